pub mod cache;
pub mod matcher;
pub mod table;

pub use cache::TableCache;
pub use matcher::{find_row, MatchedRow};
pub use table::{ColumnDef, LookupTable, Row, DEPENDENCY_PREFIX, OPTION_PREFIX};
