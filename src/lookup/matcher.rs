use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{Error, Result};
use crate::lookup::table::LookupTable;

/// The surviving option columns of a matched row, in table column order.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRow {
    /// File line of the matched row, for error context further downstream.
    pub line: usize,
    /// `(column name, value)` pairs; dependency columns are stripped and
    /// empty option cells dropped.
    pub options: Vec<(String, String)>,
}

/// Find the first row whose dependency columns all equal the query.
///
/// Rows are scanned in file order and the first match wins: table authors
/// list the most-specific combinations first, and that ordering is the
/// priority order. After a dependency match the candidate's remaining columns
/// are intersected with `value_args`; a shared column with a conflicting
/// value rejects the row and the scan continues. An empty intersection always
/// accepts.
///
/// Exhausting the table is a hard error for required lookups; optional
/// lookups branch explicitly at the call site instead of swallowing this.
pub fn find_row(
    table: &LookupTable,
    dep_query: &BTreeMap<String, String>,
    value_args: &BTreeMap<String, String>,
) -> Result<MatchedRow> {
    'rows: for row in table.rows() {
        for (idx, col) in table.columns().iter().enumerate() {
            if !col.is_dependency {
                continue;
            }
            if dep_query.get(col.key()).map(String::as_str) != row.get(idx) {
                continue 'rows;
            }
        }

        let mut options: Vec<(String, String)> = Vec::new();
        for (idx, col) in table.columns().iter().enumerate() {
            if col.is_dependency {
                continue;
            }
            if let Some(value) = row.get(idx) {
                options.push((col.name.clone(), value.to_string()));
            }
        }

        let conflict = options
            .iter()
            .any(|(name, value)| value_args.get(name).is_some_and(|arg| arg != value));
        if conflict {
            trace!(line = row.line(), "row matched keys but conflicts with value args");
            continue;
        }

        return Ok(MatchedRow {
            line: row.line(),
            options,
        });
    }

    Err(Error::RowNotFound {
        table: table.path().to_path_buf(),
        keys: dep_query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load(content: &str) -> (NamedTempFile, LookupTable) {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(content.as_bytes()).unwrap();
        let table = LookupTable::load(tmp.path(), &BTreeSet::new()).unwrap();
        (tmp, table)
    }

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_match_in_file_order_wins() {
        let (_tmp, table) = load(
            "Dependency=Vintage\tOption=A\tOption=B\n\
             \t\t\n\
             1980s\t0.3\t0.7\n\
             1980s\t0.9\t0.1\n",
        );
        let row = find_row(&table, &query(&[("Vintage", "1980s")]), &BTreeMap::new()).unwrap();
        assert_eq!(row.line, 3);
        assert_eq!(row.options[0], ("Option=A".to_string(), "0.3".to_string()));
    }

    #[test]
    fn conflicting_value_arg_rejects_row_and_scan_continues() {
        let (_tmp, table) = load(
            "Dependency=Vintage\twall_type\tOption=A\n\
             \t\t\n\
             1980s\tBrick\t0.5\n\
             1980s\tWood\t0.9\n",
        );
        let args = query(&[("wall_type", "Wood")]);
        let row = find_row(&table, &query(&[("Vintage", "1980s")]), &args).unwrap();
        assert_eq!(row.line, 4);
    }

    #[test]
    fn empty_intersection_is_always_accepted() {
        let (_tmp, table) = load(
            "Dependency=Vintage\tOption=A\n\
             \t\n\
             1990s\t1.0\n",
        );
        let args = query(&[("unrelated_arg", "whatever")]);
        let row = find_row(&table, &query(&[("Vintage", "1990s")]), &args).unwrap();
        assert_eq!(row.options.len(), 1);
    }

    #[test]
    fn dependency_columns_are_stripped_and_empty_options_dropped() {
        let (_tmp, table) = load(
            "Dependency=Vintage\tOption=A\tOption=B\n\
             \t\t\n\
             1990s\t\t0.8\n",
        );
        let row = find_row(&table, &query(&[("Vintage", "1990s")]), &BTreeMap::new()).unwrap();
        assert_eq!(row.options, vec![("Option=B".to_string(), "0.8".to_string())]);
    }

    #[test]
    fn exhausted_table_is_row_not_found() {
        let (_tmp, table) = load(
            "Dependency=Vintage\tOption=A\n\
             \t\n\
             1990s\t1.0\n",
        );
        let err = find_row(&table, &query(&[("Vintage", "1880s")]), &BTreeMap::new()).unwrap_err();
        match err {
            Error::RowNotFound { keys, .. } => assert_eq!(keys, "Vintage=1880s"),
            other => panic!("expected RowNotFound, got {other:?}"),
        }
    }
}
