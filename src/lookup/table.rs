use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};

/// Header prefix that marks a column as a dependency key.
pub const DEPENDENCY_PREFIX: &str = "Dependency=";
/// Header prefix carried by option columns in the probability tables.
pub const OPTION_PREFIX: &str = "Option=";

/// A single column of a lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Stored name. Keeps the `Dependency=` prefix unless the stripped name
    /// collides with a caller-supplied argument name (which lets dependency
    /// columns double as direct value overrides downstream).
    pub name: String,
    pub is_dependency: bool,
    /// Unit annotation from the second table row, when non-empty.
    pub units: Option<String>,
}

impl ColumnDef {
    /// The bare dependency-key name, with the `Dependency=` prefix removed
    /// whether or not it survived in `name`.
    pub fn key(&self) -> &str {
        self.name
            .strip_prefix(DEPENDENCY_PREFIX)
            .unwrap_or(&self.name)
    }
}

/// One data row, positionally parallel to the table's columns.
///
/// Empty cells and the absent trailing provenance cell are `None`; an option
/// value is never stored as an empty-string sentinel.
#[derive(Debug, Clone)]
pub struct Row {
    line: usize,
    values: Vec<Option<String>>,
}

impl Row {
    /// File line this row was read from (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }
}

/// A parsed tab-separated lookup table: header row, units row, data rows.
///
/// Read-only after construction; cached instances are shared via `Arc`.
#[derive(Debug)]
pub struct LookupTable {
    path: PathBuf,
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
}

impl LookupTable {
    /// Parse the TSV file at `path`.
    ///
    /// Row 1 is the header (dependency columns carry the `Dependency=`
    /// prefix), row 2 holds unit annotations, rows 3+ are data. A data row
    /// exactly one cell shorter than the header tolerates a trailing
    /// provenance column present in the header only: that row's final cell is
    /// absent. Any other arity mismatch is a `MalformedTable` error.
    pub fn load(path: &Path, arg_names: &BTreeSet<String>) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut columns: Vec<ColumnDef> = Vec::new();
        let mut rows: Vec<Row> = Vec::new();

        for (idx, record) in reader.records().enumerate() {
            let line = idx + 1;
            let record = record.map_err(|e| Error::MalformedTable {
                path: path.to_path_buf(),
                line,
                reason: e.to_string(),
            })?;

            if line == 1 {
                for cell in record.iter() {
                    let raw = cell.trim();
                    let is_dependency = raw.starts_with(DEPENDENCY_PREFIX);
                    let stripped = raw.strip_prefix(DEPENDENCY_PREFIX).unwrap_or(raw);
                    let name = if arg_names.contains(stripped) {
                        stripped.to_string()
                    } else {
                        raw.to_string()
                    };
                    columns.push(ColumnDef {
                        name,
                        is_dependency,
                        units: None,
                    });
                }
                if columns.is_empty() || columns.iter().all(|c| c.name.is_empty()) {
                    return Err(Error::MalformedTable {
                        path: path.to_path_buf(),
                        line,
                        reason: "empty header".into(),
                    });
                }
            } else if line == 2 {
                // Units row: kept as column annotations, never part of the data.
                for (i, cell) in record.iter().enumerate().take(columns.len()) {
                    let unit = cell.trim();
                    if !unit.is_empty() {
                        columns[i].units = Some(unit.to_string());
                    }
                }
            } else {
                let expected = columns.len();
                let short_by_one = record.len() + 1 == expected;
                if record.len() != expected && !short_by_one {
                    return Err(Error::MalformedTable {
                        path: path.to_path_buf(),
                        line,
                        reason: format!("expected {} cells, found {}", expected, record.len()),
                    });
                }
                let mut values: Vec<Option<String>> = record
                    .iter()
                    .map(|cell| {
                        let v = cell.trim();
                        if v.is_empty() {
                            None
                        } else {
                            Some(v.to_string())
                        }
                    })
                    .collect();
                if short_by_one {
                    values.push(None);
                }
                rows.push(Row { line, values });
            }
        }

        if columns.is_empty() {
            return Err(Error::MalformedTable {
                path: path.to_path_buf(),
                line: 1,
                reason: "empty header".into(),
            });
        }

        debug!(
            path = %path.display(),
            columns = columns.len(),
            rows = rows.len(),
            "parsed lookup table"
        );

        Ok(Self {
            path: path.to_path_buf(),
            columns,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Index of the column with the given stored name. A missing column is a
    /// structural table problem, so this fails with `MalformedTable` rather
    /// than at first row access.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::MalformedTable {
                path: self.path.clone(),
                line: 1,
                reason: format!("missing column `{name}`"),
            })
    }
}
