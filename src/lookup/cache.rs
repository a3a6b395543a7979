use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::Result;
use crate::lookup::table::LookupTable;

/// Process-lifetime cache of parsed lookup tables.
///
/// Each distinct path is parsed once. The lock is held across the parse so a
/// concurrent caller either sees the fully built table or blocks until it is
/// ready; the tables themselves are immutable and shared via `Arc`, so reads
/// after the first load are lock-free once the `Arc` is handed out.
#[derive(Debug)]
pub struct TableCache {
    /// Caller argument names forwarded to the loader's header-stripping rule.
    arg_names: BTreeSet<String>,
    tables: Mutex<HashMap<PathBuf, Arc<LookupTable>>>,
}

impl TableCache {
    pub fn new(arg_names: BTreeSet<String>) -> Self {
        Self {
            arg_names,
            tables: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_or_load(&self, path: &Path) -> Result<Arc<LookupTable>> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(table) = tables.get(path) {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(LookupTable::load(path, &self.arg_names)?);
        debug!(path = %path.display(), rows = table.rows().len(), "cached lookup table");
        tables.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn second_lookup_reuses_the_parsed_table() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(b"Dependency=Vintage\tOption=A\n\t\n1990s\t1.0\n")
            .unwrap();

        let cache = TableCache::new(BTreeSet::new());
        let first = cache.get_or_load(tmp.path()).unwrap();
        let second = cache.get_or_load(tmp.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn load_failures_are_not_cached() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(b"\n").unwrap();

        let cache = TableCache::new(BTreeSet::new());
        assert!(cache.get_or_load(tmp.path()).is_err());
        assert!(cache.tables.lock().unwrap().is_empty());
    }
}
