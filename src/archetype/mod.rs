pub mod building_type;
pub mod mixed_use;
pub mod vintage;

pub use building_type::{resolve_building_type, TaxonomyFamily};
pub use mixed_use::{resolve_mixed_use, MixedUseComponent, MixedUseInput};
pub use vintage::resolve_vintage;
