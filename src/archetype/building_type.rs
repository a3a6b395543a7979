use serde::Serialize;

use crate::error::{Error, Result};

/// The two parallel building-type vocabularies. `Ashrae` is the national
/// default; `Deer` is the regional alternative with its own category names
/// and refinement thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TaxonomyFamily {
    Ashrae,
    Deer,
}

impl TaxonomyFamily {
    /// Derive the family from a simulation template string; any template
    /// naming DEER selects the regional vocabulary.
    pub fn from_template(template: &str) -> Self {
        if template.contains("DEER") {
            Self::Deer
        } else {
            Self::Ashrae
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ashrae => "ASHRAE",
            Self::Deer => "DEER",
        }
    }
}

/// Map a generic building-use label to a simulation-ready archetype label.
///
/// Pure categorical lookup keyed by `(building_type, taxonomy)`, with two
/// refinements: `Office` archetypes depend on footprint area (three tiers for
/// ASHRAE, two for DEER; `footprint_area` is required), and ASHRAE `Lodging`
/// splits on story count (more than 3 stories selects the large format, an
/// absent count defaults to it).
pub fn resolve_building_type(
    building_type: &str,
    taxonomy: TaxonomyFamily,
    footprint_area: Option<f64>,
    number_of_stories: Option<u32>,
) -> Result<&'static str> {
    match taxonomy {
        TaxonomyFamily::Deer => resolve_deer(building_type, footprint_area),
        TaxonomyFamily::Ashrae => resolve_ashrae(building_type, footprint_area, number_of_stories),
    }
}

fn office_area(footprint_area: Option<f64>, taxonomy: TaxonomyFamily) -> Result<f64> {
    footprint_area.ok_or_else(|| Error::MissingAttribute {
        attribute: "footprint_area",
        context: format!("to map an Office {} archetype", taxonomy.name()),
    })
}

fn resolve_deer(building_type: &str, footprint_area: Option<f64>) -> Result<&'static str> {
    Ok(match building_type {
        "Education" => "EPr",
        "Enclosed mall" => "RtL",
        "Food sales" => "RSD",
        "Food service" => "RSD",
        "Inpatient health care" => "Nrs",
        "Laboratory" => "Hsp",
        "Lodging" => "Htl",
        "Mixed use" => "ECC",
        "Mobile Home" => "DMo",
        "Multifamily (2 to 4 units)" => "MFm",
        "Multifamily (5 or more units)" => "MFm",
        "Nonrefrigerated warehouse" => "SUn",
        "Nursing" => "Nrs",
        "Office" => {
            // Two tiers; the 100,000 boundary is exclusive on the large side.
            if office_area(footprint_area, TaxonomyFamily::Deer)? > 100_000.0 {
                "OfL"
            } else {
                "OfS"
            }
        }
        "Outpatient health care" => "Nrs",
        "Public assembly" => "Asm",
        "Public order and safety" => "Asm",
        "Refrigerated warehouse" => "WRf",
        "Religious worship" => "Asm",
        "Retail other than mall" => "RtS",
        "Service" => "MLI",
        "Single-Family" => "MFm",
        "Strip shopping mall" => "RtL",
        "Vacant" => "SUn",
        other => {
            return Err(Error::UnmappedCategory {
                category: other.to_string(),
                taxonomy: TaxonomyFamily::Deer.name(),
            })
        }
    })
}

fn resolve_ashrae(
    building_type: &str,
    footprint_area: Option<f64>,
    number_of_stories: Option<u32>,
) -> Result<&'static str> {
    Ok(match building_type {
        "Education" => "SecondarySchool",
        "Enclosed mall" => "RetailStripmall",
        "Food sales" => "FullServiceRestaurant",
        "Food service" => "FullServiceRestaurant",
        "Inpatient health care" => "Hospital",
        "Laboratory" => "Laboratory",
        "Lodging" => match number_of_stories {
            Some(stories) if stories <= 3 => "SmallHotel",
            // More than 3 stories, or no story count supplied.
            _ => "LargeHotel",
        },
        "Mixed use" => "Mixed use",
        "Mobile Home" => "MidriseApartment",
        "Multifamily (2 to 4 units)" => "MidriseApartment",
        "Multifamily (5 or more units)" => "MidriseApartment",
        "Nonrefrigerated warehouse" => "Warehouse",
        "Nursing" => "Outpatient",
        "Office" => {
            let area = office_area(footprint_area, TaxonomyFamily::Ashrae)?;
            if area < 20_000.0 {
                "SmallOffice"
            } else if area > 100_000.0 {
                "LargeOffice"
            } else {
                "MediumOffice"
            }
        }
        "Outpatient health care" => "Outpatient",
        "Public assembly" => "MediumOffice",
        "Public order and safety" => "MediumOffice",
        "Refrigerated warehouse" => "Warehouse",
        "Religious worship" => "MediumOffice",
        "Retail other than mall" => "RetailStandalone",
        "Service" => "MediumOffice",
        "Single-Family" => "MidriseApartment",
        "Strip shopping mall" => "RetailStripmall",
        "Vacant" => "Warehouse",
        other => {
            return Err(Error::UnmappedCategory {
                category: other.to_string(),
                taxonomy: TaxonomyFamily::Ashrae.name(),
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASHRAE_TYPES: &[&str] = &[
        "Education",
        "Enclosed mall",
        "Food sales",
        "Food service",
        "Inpatient health care",
        "Laboratory",
        "Lodging",
        "Mixed use",
        "Mobile Home",
        "Multifamily (2 to 4 units)",
        "Multifamily (5 or more units)",
        "Nonrefrigerated warehouse",
        "Nursing",
        "Office",
        "Outpatient health care",
        "Public assembly",
        "Public order and safety",
        "Refrigerated warehouse",
        "Religious worship",
        "Retail other than mall",
        "Service",
        "Single-Family",
        "Strip shopping mall",
        "Vacant",
    ];

    #[test]
    fn every_vocabulary_entry_resolves_in_both_taxonomies() {
        for bt in ASHRAE_TYPES {
            for taxonomy in [TaxonomyFamily::Ashrae, TaxonomyFamily::Deer] {
                let label =
                    resolve_building_type(bt, taxonomy, Some(50_000.0), Some(2)).unwrap();
                assert!(!label.is_empty(), "{bt} resolved to an empty label");
            }
        }
    }

    #[test]
    fn unmapped_category_names_the_type_and_taxonomy() {
        let err = resolve_building_type("Spaceport", TaxonomyFamily::Ashrae, None, None)
            .unwrap_err();
        match err {
            Error::UnmappedCategory { category, taxonomy } => {
                assert_eq!(category, "Spaceport");
                assert_eq!(taxonomy, "ASHRAE");
            }
            other => panic!("expected UnmappedCategory, got {other:?}"),
        }
    }

    #[test]
    fn office_area_tiers_ashrae() {
        let resolve = |area| {
            resolve_building_type("Office", TaxonomyFamily::Ashrae, Some(area), None).unwrap()
        };
        assert_eq!(resolve(19_999.0), "SmallOffice");
        assert_eq!(resolve(20_000.0), "MediumOffice");
        assert_eq!(resolve(99_999.0), "MediumOffice");
        // 100,000 exactly stays in the medium tier; the boundary is
        // exclusive on the large side.
        assert_eq!(resolve(100_000.0), "MediumOffice");
        assert_eq!(resolve(100_001.0), "LargeOffice");
    }

    #[test]
    fn office_area_tiers_deer() {
        let resolve =
            |area| resolve_building_type("Office", TaxonomyFamily::Deer, Some(area), None).unwrap();
        assert_eq!(resolve(99_999.0), "OfS");
        assert_eq!(resolve(100_000.0), "OfS");
        assert_eq!(resolve(100_001.0), "OfL");
    }

    #[test]
    fn office_without_area_is_missing_attribute() {
        for taxonomy in [TaxonomyFamily::Ashrae, TaxonomyFamily::Deer] {
            assert!(matches!(
                resolve_building_type("Office", taxonomy, None, None),
                Err(Error::MissingAttribute {
                    attribute: "footprint_area",
                    ..
                })
            ));
        }
    }

    #[test]
    fn lodging_splits_on_story_count() {
        let resolve = |stories| {
            resolve_building_type("Lodging", TaxonomyFamily::Ashrae, None, stories).unwrap()
        };
        assert_eq!(resolve(Some(3)), "SmallHotel");
        assert_eq!(resolve(Some(4)), "LargeHotel");
        assert_eq!(resolve(None), "LargeHotel");
        // DEER has a single lodging archetype.
        assert_eq!(
            resolve_building_type("Lodging", TaxonomyFamily::Deer, None, Some(1)).unwrap(),
            "Htl"
        );
    }

    #[test]
    fn taxonomy_family_from_template() {
        assert_eq!(
            TaxonomyFamily::from_template("DEER 2017"),
            TaxonomyFamily::Deer
        );
        assert_eq!(
            TaxonomyFamily::from_template("90.1-2013"),
            TaxonomyFamily::Ashrae
        );
        assert_eq!(TaxonomyFamily::from_template(""), TaxonomyFamily::Ashrae);
    }
}
