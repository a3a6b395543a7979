use std::path::PathBuf;

use serde::Deserialize;

/// Process-wide configuration, built once by the entry point and passed by
/// reference to the resolvers. Field defaults match the source deployment
/// (upstate New York: climate zone 6A, location region CR02, brick walls).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the probability and options-lookup TSV files.
    pub tables_dir: PathBuf,
    /// Base RNG seed; building `i` samples with `seed.wrapping_add(i)`.
    /// Absent means a fresh random seed per run.
    pub seed: Option<u64>,
    pub climate_zone: String,
    pub location_region: String,
    pub wall_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tables_dir: PathBuf::from("tables"),
            seed: None,
            climate_zone: "6A".to_string(),
            location_region: "CR02".to_string(),
            wall_type: "Brick".to_string(),
        }
    }
}
