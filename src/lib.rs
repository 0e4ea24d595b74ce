//! Builds a star-schema model from raw immigration, airport, demographic and
//! climate sources: eight dimension tables plus an immigration fact table,
//! stored as Parquet.

pub mod config;
pub mod dimension;
pub mod error;
pub mod fact;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{PipelineConfig, SourceLocations, TableLocations};
pub use error::{Error, Result};
pub use fact::{DimensionSet, assemble_fact_rows, build_immigration_fact};
pub use pipeline::{Pipeline, PipelineReport, PipelineRun, RawSources};
pub use store::{MemoryStore, ParquetStore, Table, TableStore};

// Arrow types
pub use arrow::record_batch::RecordBatch;
