use crate::archetype::building_type::TaxonomyFamily;

/// `(inclusive upper year, label)` rungs in ascending order.
type Ladder = &'static [(i32, &'static str)];

const DEER_LADDER: Ladder = &[
    (1996, "DEER 1985"),
    (2003, "DEER 1996"),
    (2007, "DEER 2003"),
    (2011, "DEER 2007"),
    (2014, "DEER 2011"),
    (2015, "DEER 2014"),
    (2017, "DEER 2015"),
    (2020, "DEER 2017"),
];
const DEER_TOP: &str = "DEER 2020";

const ASHRAE_LADDER: Ladder = &[
    (1979, "DOE Ref Pre-1980"),
    (2004, "DOE Ref 1980-2004"),
    (2007, "90.1-2004"),
    (2010, "90.1-2007"),
    (2013, "90.1-2010"),
];
const ASHRAE_TOP: &str = "90.1-2013";

/// Map a construction year to the template vintage label for the taxonomy
/// family. Total and monotonic: every year resolves to exactly one rung,
/// years before the lowest threshold take the bottom rung and years at or
/// after the highest take the top rung.
pub fn resolve_vintage(taxonomy: TaxonomyFamily, year_built: i32) -> &'static str {
    let (ladder, top) = match taxonomy {
        TaxonomyFamily::Deer => (DEER_LADDER, DEER_TOP),
        TaxonomyFamily::Ashrae => (ASHRAE_LADDER, ASHRAE_TOP),
    };
    for (upper, label) in ladder {
        if year_built <= *upper {
            return label;
        }
    }
    top
}
