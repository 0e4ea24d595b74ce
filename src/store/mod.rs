//! Table storage
//!
//! The pipeline only depends on the [`TableStore`] contract: load a table
//! from a location, or store one there with overwrite semantics.
//! [`ParquetStore`] persists tables as directories of Parquet part files;
//! [`MemoryStore`] keeps them in an in-process arena keyed by location.

pub mod table;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use arrow::error::ArrowError;

use crate::config::DEFAULT_BATCH_SIZE;
use crate::error::{Error, Result};
use crate::utils::io::{load_parquet_files_parallel, read_parquet, write_parquet};

pub use table::Table;

/// File name of the single part written per table
pub const PART_FILE_NAME: &str = "part-00000.parquet";

/// Storage contract for whole tables
pub trait TableStore: Send + Sync {
    /// Load the table stored at `path`
    ///
    /// # Errors
    /// Returns [`Error::DependencyMissing`] if nothing is stored there.
    fn load(&self, path: &Path) -> Result<Table>;

    /// Store `table` at `path`, replacing whatever was there before
    fn store(&self, table: &Table, path: &Path) -> Result<()>;

    /// Whether a table is stored at `path`
    fn exists(&self, path: &Path) -> bool;
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}

fn dependency_missing(path: &Path) -> Error {
    Error::DependencyMissing {
        table: table_name(path),
        location: path.to_path_buf(),
    }
}

/// Parquet-backed table store
///
/// A location is a directory holding part files, as written by Spark-style
/// engines. Loading also accepts a plain Parquet file.
#[derive(Debug, Clone)]
pub struct ParquetStore {
    batch_size: usize,
}

impl Default for ParquetStore {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl ParquetStore {
    /// Create a store reading and writing `batch_size` rows per batch
    #[must_use]
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    fn clear(path: &Path) -> Result<()> {
        if path.is_dir() {
            std::fs::remove_dir_all(path).map_err(|e| Error::io(path, e))?;
        } else if path.exists() {
            std::fs::remove_file(path).map_err(|e| Error::io(path, e))?;
        }
        Ok(())
    }
}

impl TableStore for ParquetStore {
    fn load(&self, path: &Path) -> Result<Table> {
        if !path.exists() {
            return Err(dependency_missing(path));
        }
        if path.is_file() {
            return read_parquet(path, self.batch_size);
        }

        let mut parts = load_parquet_files_parallel(path, self.batch_size)?.into_iter();
        let Some(first) = parts.next() else {
            return Err(dependency_missing(path));
        };

        let schema = first.schema();
        let mut batches = first.batches().to_vec();
        for part in parts {
            if part.schema().fields() != schema.fields() {
                return Err(ArrowError::SchemaError(format!(
                    "part files under {} disagree on schema",
                    path.display()
                ))
                .into());
            }
            batches.extend_from_slice(part.batches());
        }
        Ok(Table::new(schema, batches))
    }

    fn store(&self, table: &Table, path: &Path) -> Result<()> {
        Self::clear(path)?;
        std::fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
        write_parquet(table, &path.join(PART_FILE_NAME), self.batch_size)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-process table store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<PathBuf, Table>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locations currently holding a table, sorted
    #[must_use]
    pub fn locations(&self) -> Vec<PathBuf> {
        let tables = self.tables.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut locations: Vec<PathBuf> = tables.keys().cloned().collect();
        locations.sort();
        locations
    }
}

impl TableStore for MemoryStore {
    fn load(&self, path: &Path) -> Result<Table> {
        let tables = self.tables.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        tables.get(path).cloned().ok_or_else(|| dependency_missing(path))
    }

    fn store(&self, table: &Table, path: &Path) -> Result<()> {
        let mut tables = self.tables.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        tables.insert(path.to_path_buf(), table.clone());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let tables = self.tables.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        tables.contains_key(path)
    }
}
