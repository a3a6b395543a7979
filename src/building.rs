//! The scalar attribute interface: what the external building-description
//! collaborator supplies, and what this crate hands back to the external
//! job-configuration collaborator.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::archetype::MixedUseComponent;
use crate::process::residential::ResidentialParams;

static RESIDENTIAL_BUILDING_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Single-Family Detached",
        "Single-Family Attached",
        "Multifamily",
    ]
    .into()
});

static COMMERCIAL_BUILDING_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Vacant",
        "Office",
        "Laboratory",
        "Nonrefrigerated warehouse",
        "Food sales",
        "Public order and safety",
        "Outpatient health care",
        "Refrigerated warehouse",
        "Religious worship",
        "Public assembly",
        "Education",
        "Food service",
        "Inpatient health care",
        "Nursing",
        "Lodging",
        "Strip shopping mall",
        "Enclosed mall",
        "Retail other than mall",
        "Service",
        "Uncovered Parking",
        "Covered Parking",
        "Mixed use",
        "Multifamily (2 to 4 units)",
        "Multifamily (5 or more units)",
        "Single-Family",
    ]
    .into()
});

pub fn is_residential(building_type: &str) -> bool {
    RESIDENTIAL_BUILDING_TYPES.contains(building_type)
}

pub fn is_commercial(building_type: &str) -> bool {
    COMMERCIAL_BUILDING_TYPES.contains(building_type)
}

/// Descriptive attributes of one building, all plain scalars. This crate
/// does not parse the upstream building-description document; the
/// collaborator flattens it to these fields.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildingAttributes {
    pub name: String,
    pub building_type: String,
    /// Simulation template family; selects the taxonomy vocabulary.
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub year_built: Option<i32>,
    /// Conditioned floor area, ft2 (drives the residential area bands).
    #[serde(default)]
    pub floor_area: Option<f64>,
    /// Ground footprint area, ft2 (drives the office tiers).
    #[serde(default)]
    pub footprint_area: Option<f64>,
    #[serde(default)]
    pub number_of_stories: Option<u32>,
    #[serde(default)]
    pub attic_type: Option<String>,
    /// Per-building climate zone override; the configured default applies
    /// when absent.
    #[serde(default)]
    pub climate_zone: Option<String>,

    // Mixed-use constituents, present only when building_type is "Mixed use".
    #[serde(default)]
    pub mixed_type_1: Option<String>,
    #[serde(default)]
    pub mixed_type_1_percentage: Option<f64>,
    #[serde(default)]
    pub mixed_type_2: Option<String>,
    #[serde(default)]
    pub mixed_type_2_percentage: Option<f64>,
    #[serde(default)]
    pub mixed_type_3: Option<String>,
    #[serde(default)]
    pub mixed_type_3_percentage: Option<f64>,
    #[serde(default)]
    pub mixed_type_4: Option<String>,
    #[serde(default)]
    pub mixed_type_4_percentage: Option<f64>,
}

/// What the job-configuration collaborator receives for one building.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingOutputs {
    pub name: String,
    /// The resolved archetype label ("Mixed use" for composites, with the
    /// constituents broken out below).
    pub archetype: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mixed_use: Vec<MixedUseComponent>,
    /// Template vintage label; absent when the construction year is unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vintage: Option<String>,
    /// Sampled construction parameters, residential buildings only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResidentialParams>,
}
