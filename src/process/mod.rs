//! Per-building orchestration: archetype resolution, vintage resolution, and
//! residential parameter sampling against a shared context.

pub mod residential;

pub use residential::{sample_residential_params, ResidentialParams};

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::archetype::{
    resolve_building_type, resolve_mixed_use, resolve_vintage, MixedUseInput, TaxonomyFamily,
};
use crate::building::{is_residential, BuildingAttributes, BuildingOutputs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::lookup::{LookupTable, TableCache};

/// Shared, read-only context for processing a batch of buildings: the
/// configuration plus the lookup-table cache. Built once by the process
/// entry point and passed by reference; sampling calls for different
/// buildings may then run in parallel.
#[derive(Debug)]
pub struct SamplingContext {
    config: Config,
    cache: TableCache,
}

impl SamplingContext {
    pub fn new(config: Config) -> Self {
        let cache = TableCache::new(residential::value_arg_names());
        Self { config, cache }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn table(&self, file_name: &str) -> Result<Arc<LookupTable>> {
        self.cache
            .get_or_load(&self.config.tables_dir.join(file_name))
    }
}

fn mixed_use_inputs(building: &BuildingAttributes) -> Vec<MixedUseInput<'_>> {
    let raw = [
        (&building.mixed_type_1, building.mixed_type_1_percentage),
        (&building.mixed_type_2, building.mixed_type_2_percentage),
        (&building.mixed_type_3, building.mixed_type_3_percentage),
        (&building.mixed_type_4, building.mixed_type_4_percentage),
    ];
    raw.into_iter()
        .filter_map(|(building_type, percentage)| {
            building_type.as_deref().map(|building_type| MixedUseInput {
                building_type,
                percentage,
            })
        })
        .collect()
}

/// Resolve one building: archetype label, vintage label, and (for
/// residential buildings) sampled construction parameters.
///
/// `rng` supplies the uniform draws for the residential parameters; give
/// each building its own seeded instance for reproducible batches.
pub fn process_building<R: Rng>(
    ctx: &SamplingContext,
    building: &BuildingAttributes,
    rng: &mut R,
) -> Result<BuildingOutputs> {
    let taxonomy = TaxonomyFamily::from_template(building.template.as_deref().unwrap_or(""));
    let vintage = building
        .year_built
        .map(|year| resolve_vintage(taxonomy, year).to_string());

    if is_residential(&building.building_type) {
        let parameters = sample_residential_params(ctx, building, rng)?;
        info!(name = %building.name, "sampled residential construction parameters");
        return Ok(BuildingOutputs {
            name: building.name.clone(),
            archetype: building.building_type.clone(),
            mixed_use: Vec::new(),
            vintage,
            parameters: Some(parameters),
        });
    }

    let archetype = resolve_building_type(
        &building.building_type,
        taxonomy,
        building.footprint_area,
        building.number_of_stories,
    )?;

    let mixed_use = if building.building_type == "Mixed use" {
        let footprint_area =
            building
                .footprint_area
                .ok_or_else(|| Error::MissingAttribute {
                    attribute: "footprint_area",
                    context: "to apportion mixed-use constituents".into(),
                })?;
        let inputs = mixed_use_inputs(building);
        if inputs.is_empty() {
            return Err(Error::MissingAttribute {
                attribute: "mixed_type_1",
                context: "to decompose a Mixed use building".into(),
            });
        }
        resolve_mixed_use(&inputs, taxonomy, footprint_area, building.number_of_stories)?
    } else {
        Vec::new()
    };

    info!(name = %building.name, archetype, "resolved archetype");
    Ok(BuildingOutputs {
        name: building.name.clone(),
        archetype: archetype.to_string(),
        mixed_use,
        vintage,
        parameters: None,
    })
}
