//! Storage port for learned value tables.

use std::path::Path;

use crate::{Result, learning::ValueTable};

/// Port for persisting and loading value tables.
///
/// # Examples
///
/// ```
/// use oxlearn::adapters::InMemoryStore;
/// use oxlearn::learning::ValueTable;
/// use oxlearn::ports::ValueStore;
/// use std::path::Path;
///
/// let store = InMemoryStore::new();
/// let table: ValueTable = [(100, 0.5)].into_iter().collect();
/// store.save(&table, Path::new("values.json"))?;
/// assert_eq!(store.load(Path::new("values.json"))?, table);
/// # Ok::<(), oxlearn::Error>(())
/// ```
pub trait ValueStore {
    /// Load the table stored at `path`.
    ///
    /// A missing entry is not an error and yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be read or parsed.
    fn load(&self, path: &Path) -> Result<ValueTable>;

    /// Replace whatever is stored at `path` with `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be written.
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()>;
}
