//! JSON file implementation of the value store.
//!
//! The file holds one JSON object mapping decimal board encodings to values,
//! pretty-printed and sorted by encoding so diffs between training runs stay
//! readable.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use tracing::{info, warn};

use crate::{Result, error::Error, learning::ValueTable, ports::ValueStore};

/// File-backed value store using pretty-printed JSON.
///
/// # Examples
///
/// ```no_run
/// use oxlearn::adapters::JsonFileStore;
/// use oxlearn::ports::ValueStore;
/// use std::path::Path;
///
/// let store = JsonFileStore::new();
/// let table = store.load(Path::new("trainingdata.json"))?;
/// store.save(&table, Path::new("trainingdata.json"))?;
/// # Ok::<(), oxlearn::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileStore;

impl JsonFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl ValueStore for JsonFileStore {
    fn load(&self, path: &Path) -> Result<ValueTable> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "Value table not found, starting empty");
                return Ok(ValueTable::new());
            }
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("open value table {}", path.display()),
                    source,
                });
            }
        };

        let table: ValueTable = serde_json::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), entries = table.len(), "Loaded value table");
        Ok(table)
    }

    fn save(&self, table: &ValueTable, path: &Path) -> Result<()> {
        let io_error = |operation: &str, source| Error::Io {
            operation: format!("{operation} value table {}", path.display()),
            source,
        };

        let mut bytes = serde_json::to_vec_pretty(table)?;
        bytes.push(b'\n');

        let file = File::create(path).map_err(|source| io_error("create", source))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&bytes)
            .and_then(|()| writer.flush())
            .map_err(|source| io_error("write", source))?;

        info!(path = %path.display(), entries = table.len(), "Saved value table");
        Ok(())
    }
}
