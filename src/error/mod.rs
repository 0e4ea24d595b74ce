//! Error handling for the star-schema build.
//!
//! Structural problems (a missing column, a missing persisted dimension) abort
//! the run. Row-level problems such as an undecodable arrival offset or an
//! incomplete aggregation group never surface here; they are absorbed where
//! they occur.

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for the star-schema build
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required column is absent from an input table
    #[error("Schema error: table '{table}' is missing required column '{column}'")]
    Schema { table: String, column: String },

    /// A persisted dimension could not be located for the fact step
    #[error("Dependency missing: table '{table}' not found at {}", location.display())]
    DependencyMissing { table: String, location: PathBuf },

    /// A dimension table holds more than one row for a business key
    #[error("Cardinality violation: table '{table}' has duplicate business key {key}")]
    CardinalityViolation { table: String, key: String },

    /// Error opening, writing or removing files
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error reading or writing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error from an Arrow compute kernel or batch construction
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error converting typed rows to or from record batches
    #[error("Serialization error for table '{table}': {source}")]
    Serialization {
        table: String,
        #[source]
        source: serde_arrow::Error,
    },

    /// Invalid or unreadable pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a schema error for a missing column
    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::Schema {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create an IO error that remembers the offending path
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a serialization error for a table
    pub fn serialization(table: impl Into<String>, source: serde_arrow::Error) -> Self {
        Self::Serialization {
            table: table.into(),
            source,
        }
    }
}

/// Result type for star-schema operations
pub type Result<T> = std::result::Result<T, Error>;
