//! Stochastic selection of residential construction parameters from the
//! conditional probability tables.
//!
//! Four parameters are sampled per building, each with one independent
//! uniform draw, always in the same order: windows, infiltration, ceiling
//! insulation, wall insulation. The fixed order keeps a seeded run
//! reproducible.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::bins;
use crate::building::BuildingAttributes;
use crate::error::{Error, Result};
use crate::lookup::{find_row, LookupTable, MatchedRow, OPTION_PREFIX};
use crate::process::SamplingContext;
use crate::sample::ProbabilityDistribution;

pub const WINDOWS_TABLE: &str = "windows.tsv";
pub const INFILTRATION_TABLE: &str = "Infiltration.tsv";
pub const CEILING_INSULATION_TABLE: &str = "Insulation Ceiling.tsv";
pub const WALL_INSULATION_TABLE: &str = "Insulation Wall.tsv";
pub const OPTIONS_LOOKUP_TABLE: &str = "options_lookup.tsv";

/// The simulation-measure argument names the sampled values feed. Also the
/// loader's value-override names: a dependency column spelled like one of
/// these doubles as a direct override downstream.
pub fn value_arg_names() -> BTreeSet<String> {
    [
        "window_ufactor",
        "air_leakage_value",
        "ceiling_assembly_r",
        "wall_assembly_r",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Sampled construction parameters for one residential building.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidentialParams {
    /// Window assembly U-factor, Btu/h-ft2-F.
    pub window_ufactor: f64,
    /// Whole-dwelling air leakage at 50 Pa, ACH.
    pub air_leakage_ach50: f64,
    /// Ceiling assembly R-value, h-ft2-F/Btu.
    pub ceiling_assembly_r: f64,
    /// Wall assembly R-value, h-ft2-F/Btu.
    pub wall_assembly_r: f64,
}

fn deps(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Build the probability distribution from a matched row's `Option=` columns,
/// read in table column order. Cell values are fractions in `[0, 1]`; a
/// non-numeric weight is a structural table error.
fn distribution(
    parameter: &str,
    table: &LookupTable,
    row: &MatchedRow,
) -> Result<ProbabilityDistribution> {
    let mut pairs: Vec<(String, f64)> = Vec::with_capacity(row.options.len());
    for (name, value) in &row.options {
        let Some(label) = name.strip_prefix(OPTION_PREFIX) else {
            // Non-option columns that survive matching (e.g. a provenance
            // column) are not candidates.
            continue;
        };
        let weight: f64 = value.parse().map_err(|_| Error::MalformedTable {
            path: table.path().to_path_buf(),
            line: row.line,
            reason: format!("non-numeric weight `{value}` for `{name}`"),
        })?;
        pairs.push((label.to_string(), weight));
    }
    Ok(ProbabilityDistribution::from_fractions(parameter, pairs))
}

/// Numeric ACH50 from an infiltration option label like `15 ACH50`.
fn ach50_value(label: &str) -> f64 {
    label
        .strip_suffix("ACH50")
        .unwrap_or(label)
        .trim()
        .parse()
        .unwrap_or(0.0)
}

/// Ceiling R-value from labels like `R-13`; `Uninsulated` counts as 0.
fn ceiling_r_value(label: &str) -> f64 {
    label
        .strip_prefix("R-")
        .and_then(|rest| leading_f64(rest))
        .unwrap_or(0.0)
}

/// Wall R-value from labels like `Wood Stud, R-11`; labels without an `R-`
/// term count as 1 (source behavior for uninsulated assemblies).
fn wall_r_value(label: &str) -> f64 {
    match label.rfind("R-") {
        Some(pos) => leading_f64(&label[pos + 2..]).unwrap_or(0.0),
        None => 1.0,
    }
}

/// Parse the leading numeric prefix of `s`, ignoring whatever follows.
fn leading_f64(s: &str) -> Option<f64> {
    let end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Map a sampled window option name to its U-factor through the options
/// lookup table (`Option Name` column -> `window_ufactor=` assignment in the
/// `Arguments` column). A sampled option with no lookup entry is a hard
/// error.
fn window_ufactor_for(table: &LookupTable, option: &str) -> Result<f64> {
    let name_idx = table.require_column("Option Name")?;
    let args_idx = table.require_column("Arguments")?;
    for row in table.rows() {
        if row.get(name_idx) != Some(option) {
            continue;
        }
        if let Some(value) = row.get(args_idx).and_then(|c| parse_assignment(c, "window_ufactor")) {
            return Ok(value);
        }
    }
    Err(Error::RowNotFound {
        table: table.path().to_path_buf(),
        keys: format!("Option Name={option}"),
    })
}

/// Find `key=value` among whitespace-separated assignments in a cell.
fn parse_assignment(cell: &str, key: &str) -> Option<f64> {
    cell.split_whitespace().find_map(|token| {
        token
            .strip_prefix(key)?
            .strip_prefix('=')?
            .parse::<f64>()
            .ok()
    })
}

/// Sample all four construction parameters for one residential building.
///
/// The climate zone is the per-building value when supplied, otherwise the
/// configured default; location region and wall type always come from the
/// configuration. Missing year built, floor area, or attic type bin to
/// `unknown`, and a table without an `unknown` row then fails with
/// `RowNotFound` rather than silently defaulting.
pub fn sample_residential_params<R: Rng>(
    ctx: &SamplingContext,
    building: &BuildingAttributes,
    rng: &mut R,
) -> Result<ResidentialParams> {
    let config = ctx.config();
    let climate_zone = building
        .climate_zone
        .as_deref()
        .unwrap_or(&config.climate_zone);

    let building_name = bins::residential_table_building_name(&building.building_type);
    let year_name = building
        .year_built
        .map_or(bins::UNKNOWN_BIN, bins::year_built_bin);
    let vintage = building
        .year_built
        .map_or(bins::UNKNOWN_BIN, bins::vintage_bin);
    let floor_area_name = building
        .floor_area
        .map_or(bins::UNKNOWN_BIN, bins::floor_area_bin);
    let attic_name = building
        .attic_type
        .as_deref()
        .map_or(bins::UNKNOWN_BIN, bins::attic_type_bin);

    let value_args = BTreeMap::new();

    // WINDOWS
    let windows = ctx.table(WINDOWS_TABLE)?;
    let row = find_row(
        &windows,
        &deps(&[
            ("Climate Zone", climate_zone),
            ("Building Type", building_name),
            ("Vintage", year_name),
        ]),
        &value_args,
    )?;
    let window_option = distribution("window_ufactor", &windows, &row)?
        .sample(rng)?
        .to_string();
    let options_lookup = ctx.table(OPTIONS_LOOKUP_TABLE)?;
    let window_ufactor = window_ufactor_for(&options_lookup, &window_option)?;
    debug!(option = %window_option, window_ufactor, "sampled window construction");

    // INFILTRATION
    let infiltration = ctx.table(INFILTRATION_TABLE)?;
    let row = find_row(
        &infiltration,
        &deps(&[
            ("Climate Zone", climate_zone),
            ("Floor Area", floor_area_name),
            ("Vintage", vintage),
        ]),
        &value_args,
    )?;
    let label = distribution("air_leakage_value", &infiltration, &row)?
        .sample(rng)?
        .to_string();
    let air_leakage_ach50 = ach50_value(&label);
    debug!(option = %label, air_leakage_ach50, "sampled infiltration");

    // CEILING INSULATION
    let ceiling = ctx.table(CEILING_INSULATION_TABLE)?;
    let row = find_row(
        &ceiling,
        &deps(&[
            ("Attic Type", attic_name),
            ("Location Region", &config.location_region),
            ("Vintage", vintage),
        ]),
        &value_args,
    )?;
    let label = distribution("ceiling_assembly_r", &ceiling, &row)?
        .sample(rng)?
        .to_string();
    let ceiling_assembly_r = ceiling_r_value(&label);
    debug!(option = %label, ceiling_assembly_r, "sampled ceiling insulation");

    // WALL INSULATION
    let wall = ctx.table(WALL_INSULATION_TABLE)?;
    let row = find_row(
        &wall,
        &deps(&[
            ("Location Region", &config.location_region),
            ("Vintage", vintage),
            ("Wall Type", &config.wall_type),
        ]),
        &value_args,
    )?;
    let label = distribution("wall_assembly_r", &wall, &row)?
        .sample(rng)?
        .to_string();
    let wall_assembly_r = wall_r_value(&label);
    debug!(option = %label, wall_assembly_r, "sampled wall insulation");

    Ok(ResidentialParams {
        window_ufactor,
        air_leakage_ach50,
        ceiling_assembly_r,
        wall_assembly_r,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn option_label_value_parsers() {
        assert_eq!(ach50_value("15 ACH50"), 15.0);
        assert_eq!(ach50_value("7.5 ACH50"), 7.5);
        assert_eq!(ach50_value("leaky"), 0.0);

        assert_eq!(ceiling_r_value("R-13"), 13.0);
        assert_eq!(ceiling_r_value("R-49"), 49.0);
        assert_eq!(ceiling_r_value("Uninsulated"), 0.0);

        assert_eq!(wall_r_value("Wood Stud, R-11"), 11.0);
        assert_eq!(wall_r_value("R-19"), 19.0);
        assert_eq!(wall_r_value("Uninsulated"), 1.0);
    }

    #[test]
    fn assignment_parsing_picks_the_named_key() {
        assert_eq!(
            parse_assignment("window_ufactor=0.37 window_shgc=0.30", "window_ufactor"),
            Some(0.37)
        );
        assert_eq!(
            parse_assignment("window_shgc=0.30", "window_ufactor"),
            None
        );
    }

    #[test]
    fn window_ufactor_lookup_by_option_name() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(
            b"Parameter Name\tOption Name\tMeasure\tArguments\n\
              \t\t\t\n\
              Windows\tClear, Single, Metal\tResidentialConstructionsWindows\twindow_ufactor=1.16\n\
              Windows\tClear, Double, Thermal-Break\tResidentialConstructionsWindows\twindow_ufactor=0.63\n",
        )
        .unwrap();
        let table = LookupTable::load(tmp.path(), &BTreeSet::new()).unwrap();

        assert_eq!(
            window_ufactor_for(&table, "Clear, Double, Thermal-Break").unwrap(),
            0.63
        );
        assert!(matches!(
            window_ufactor_for(&table, "Triple, Low-E"),
            Err(Error::RowNotFound { .. })
        ));
    }

    #[test]
    fn distribution_skips_non_option_columns() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(
            b"Dependency=Vintage\tOption=A\tOption=B\tSource\n\
              \t\t\t\n\
              1990s\t0.4\t0.6\tnrel\n",
        )
        .unwrap();
        let table = LookupTable::load(tmp.path(), &BTreeSet::new()).unwrap();
        let row = find_row(&table, &deps(&[("Vintage", "1990s")]), &BTreeMap::new()).unwrap();

        let dist = distribution("test", &table, &row).unwrap();
        let labels: Vec<&str> = dist.choices().iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }

    #[test]
    fn non_numeric_weight_is_malformed() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(
            b"Dependency=Vintage\tOption=A\n\
              \t\n\
              1990s\tlots\n",
        )
        .unwrap();
        let table = LookupTable::load(tmp.path(), &BTreeSet::new()).unwrap();
        let row = find_row(&table, &deps(&[("Vintage", "1990s")]), &BTreeMap::new()).unwrap();

        match distribution("test", &table, &row).unwrap_err() {
            Error::MalformedTable { line, .. } => assert_eq!(line, 3),
            other => panic!("expected MalformedTable, got {other:?}"),
        }
    }
}
