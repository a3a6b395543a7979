use serde::Serialize;
use tracing::debug;

use crate::archetype::building_type::{resolve_building_type, TaxonomyFamily};
use crate::error::Result;

/// One constituent use of a mixed-use building, as supplied by the caller.
#[derive(Debug, Clone)]
pub struct MixedUseInput<'a> {
    pub building_type: &'a str,
    /// Share of the building's floor area, in percent (0-100). The first
    /// constituent may omit it and takes the complement of the others.
    pub percentage: Option<f64>,
}

/// A resolved constituent: archetype label plus area fraction (0-1).
#[derive(Debug, Clone, Serialize)]
pub struct MixedUseComponent {
    pub archetype: String,
    pub fraction: f64,
}

/// Resolve each constituent of a mixed-use building independently.
///
/// Supports up to four constituents. Percentages convert to fractions; a
/// missing percentage on the first constituent is inferred as the complement
/// of the rest. Each constituent is resolved through
/// [`resolve_building_type`] against its apportioned footprint area, so the
/// office area tiers see the constituent's share, not the whole building.
///
/// Precondition (caller's responsibility): fractions are non-negative and sum
/// to at most 1.
pub fn resolve_mixed_use(
    constituents: &[MixedUseInput<'_>],
    taxonomy: TaxonomyFamily,
    footprint_area: f64,
    number_of_stories: Option<u32>,
) -> Result<Vec<MixedUseComponent>> {
    let running: f64 = constituents
        .iter()
        .skip(1)
        .map(|c| c.percentage.unwrap_or(0.0) * 0.01)
        .sum();

    let mut components = Vec::with_capacity(constituents.len());
    for (i, constituent) in constituents.iter().enumerate() {
        let fraction = match constituent.percentage {
            Some(percentage) => percentage * 0.01,
            None if i == 0 => 1.0 - running,
            None => 0.0,
        };
        let apportioned = footprint_area * fraction;
        let archetype = resolve_building_type(
            constituent.building_type,
            taxonomy,
            Some(apportioned),
            number_of_stories,
        )?;
        debug!(
            building_type = constituent.building_type,
            archetype, fraction, "resolved mixed-use constituent"
        );
        components.push(MixedUseComponent {
            archetype: archetype.to_string(),
            fraction,
        });
    }
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_constituent_takes_the_complement() {
        let constituents = [
            MixedUseInput {
                building_type: "Retail other than mall",
                percentage: None,
            },
            MixedUseInput {
                building_type: "Office",
                percentage: Some(30.0),
            },
        ];
        let components = resolve_mixed_use(
            &constituents,
            TaxonomyFamily::Ashrae,
            50_000.0,
            Some(2),
        )
        .unwrap();

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].archetype, "RetailStandalone");
        assert!((components[0].fraction - 0.7).abs() < 1e-9);
        // 30% of 50,000 ft2 is 15,000 ft2: the small office tier.
        assert_eq!(components[1].archetype, "SmallOffice");
        assert!((components[1].fraction - 0.3).abs() < 1e-9);
    }

    #[test]
    fn explicit_percentages_pass_through() {
        let constituents = [
            MixedUseInput {
                building_type: "Food service",
                percentage: Some(60.0),
            },
            MixedUseInput {
                building_type: "Lodging",
                percentage: Some(40.0),
            },
        ];
        let components =
            resolve_mixed_use(&constituents, TaxonomyFamily::Ashrae, 10_000.0, Some(5)).unwrap();
        assert_eq!(components[0].archetype, "FullServiceRestaurant");
        assert!((components[0].fraction - 0.6).abs() < 1e-9);
        assert_eq!(components[1].archetype, "LargeHotel");
    }

    #[test]
    fn constituent_outside_vocabulary_propagates() {
        let constituents = [MixedUseInput {
            building_type: "Spaceport",
            percentage: None,
        }];
        assert!(
            resolve_mixed_use(&constituents, TaxonomyFamily::Deer, 1_000.0, None).is_err()
        );
    }
}
