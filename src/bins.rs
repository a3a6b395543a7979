//! Discretizes continuous and free-text building attributes into the bin
//! labels used as lookup-table dependency keys.
//!
//! All numeric bins are left-closed and right-open; the bottom bin is
//! unbounded below and the top bin unbounded above, so binning is total and
//! monotonic over the whole input range. Free-text binners return
//! [`UNKNOWN_BIN`] for inputs outside their vocabulary.

/// Bin label for attributes that cannot be placed in a definite bin.
pub const UNKNOWN_BIN: &str = "unknown";

/// `(exclusive upper bound, label)` pairs in ascending order.
fn bin_by_upper_bound<T: PartialOrd + Copy>(
    value: T,
    bounds: &[(T, &'static str)],
    top: &'static str,
) -> &'static str {
    for (upper, label) in bounds {
        if value < *upper {
            return label;
        }
    }
    top
}

/// Year-built bins used by the windows probability table.
pub fn year_built_bin(year_built: i32) -> &'static str {
    bin_by_upper_bound(
        year_built,
        &[
            (1940, "<1940"),
            (1960, "1940-59"),
            (1980, "1960-79"),
            (2000, "1980-99"),
            (2010, "2000-09"),
        ],
        "2010s",
    )
}

/// Construction-decade bins used by the infiltration and insulation tables.
/// Total: every year lands in a decade, never in `unknown`.
pub fn vintage_bin(year_built: i32) -> &'static str {
    bin_by_upper_bound(
        year_built,
        &[
            (1940, "<1940"),
            (1950, "1940s"),
            (1960, "1950s"),
            (1970, "1960s"),
            (1980, "1970s"),
            (1990, "1980s"),
            (2000, "1990s"),
            (2010, "2000s"),
        ],
        "2010s",
    )
}

/// Conditioned floor-area bands, in square feet.
pub fn floor_area_bin(floor_area: f64) -> &'static str {
    bin_by_upper_bound(
        floor_area,
        &[
            (500.0, "0-499"),
            (750.0, "500-749"),
            (1000.0, "750-999"),
            (1500.0, "1000-1499"),
            (2000.0, "1500-1999"),
            (2500.0, "2000-2499"),
            (3000.0, "2500-2999"),
            (4000.0, "3000-3999"),
        ],
        "4000+",
    )
}

/// Attic-type band used by the ceiling insulation table.
pub fn attic_type_bin(attic_type: &str) -> &'static str {
    match attic_type {
        "attic - vented" => "Vented Attic",
        "attic - unvented" => "Unvented Attic",
        _ => UNKNOWN_BIN,
    }
}

/// The building-type name under which a residential building appears in the
/// probability tables.
pub fn residential_table_building_name(building_type: &str) -> &'static str {
    match building_type {
        "Single-Family Detached" => "Single-Family Detached",
        "Multifamily" => "Multi-Family with 2 - 4 Units",
        _ => UNKNOWN_BIN,
    }
}
