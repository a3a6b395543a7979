use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the classification and sampling core.
///
/// None of these are retryable: every input is deterministic, so callers must
/// propagate rather than swallow them.
#[derive(Debug, Error)]
pub enum Error {
    /// A structural problem in a lookup table. Always fatal, reported with
    /// file and line context.
    #[error("malformed table {}: line {line}: {reason}", path.display())]
    MalformedTable {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// No row in the table matched the dependency-key query. Fatal for
    /// required lookups; there is no silent default.
    #[error("no row in {} matches dependency keys [{keys}]", table.display())]
    RowNotFound { table: PathBuf, keys: String },

    /// A refinement rule needed an attribute the caller did not supply.
    #[error("attribute `{attribute}` is required {context}")]
    MissingAttribute {
        attribute: &'static str,
        context: String,
    },

    /// A categorical input outside the fixed vocabulary of the selected
    /// taxonomy family.
    #[error("building type `{category}` cannot be mapped to a {taxonomy} archetype")]
    UnmappedCategory {
        category: String,
        taxonomy: &'static str,
    },

    /// A probability distribution with no positive weight; sampling from it
    /// could never select a candidate.
    #[error("probability distribution for `{parameter}` has no positive weights")]
    EmptyDistribution { parameter: String },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
