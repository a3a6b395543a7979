//! Building archetype classification and stochastic construction-parameter
//! sampling.
//!
//! Maps a building's descriptive attributes to a simulation-ready archetype
//! label and template vintage, and for residential buildings samples
//! retrofit/baseline construction parameters from conditional probability
//! tables (tab-separated files keyed by climate zone, vintage, and size
//! bands). The simulation engine that consumes the outputs is an external
//! collaborator; this crate's job ends at the resolved labels and sampled
//! values.

pub mod archetype;
pub mod bins;
pub mod building;
pub mod config;
pub mod error;
pub mod lookup;
pub mod process;
pub mod sample;

pub use archetype::{resolve_building_type, resolve_vintage, TaxonomyFamily};
pub use building::{BuildingAttributes, BuildingOutputs};
pub use config::Config;
pub use error::{Error, Result};
pub use process::{process_building, SamplingContext};
pub use sample::ProbabilityDistribution;
