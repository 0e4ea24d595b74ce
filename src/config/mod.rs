//! Configuration for the star-schema pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of rows per record batch when reading or writing Parquet
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var("PARQUET_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
}

/// Locations of the raw input tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocations {
    pub travelers: PathBuf,
    pub demographics: PathBuf,
    pub airports: PathBuf,
    pub climate: PathBuf,
    pub countries: PathBuf,
}

impl SourceLocations {
    /// Conventional raw layout under a root directory
    #[must_use]
    pub fn under(root: &Path) -> Self {
        Self {
            travelers: root.join("immigration.parquet"),
            demographics: root.join("us_cities_demographics.parquet"),
            airports: root.join("airport_codes.parquet"),
            climate: root.join("global_temperature.parquet"),
            countries: root.join("country_codes.parquet"),
        }
    }
}

/// Destination of every output table, one location per table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLocations {
    pub migrant: PathBuf,
    pub status: PathBuf,
    pub visa: PathBuf,
    pub state: PathBuf,
    pub time: PathBuf,
    pub airport: PathBuf,
    pub temperature: PathBuf,
    pub country: PathBuf,
    pub fact: PathBuf,
}

impl TableLocations {
    /// Conventional output layout `<root>/<table>.parquet`
    #[must_use]
    pub fn under(root: &Path) -> Self {
        Self {
            migrant: root.join("migrant.parquet"),
            status: root.join("status.parquet"),
            visa: root.join("visa.parquet"),
            state: root.join("state.parquet"),
            time: root.join("time.parquet"),
            airport: root.join("airport_codes.parquet"),
            temperature: root.join("country_temperature.parquet"),
            country: root.join("country.parquet"),
            fact: root.join("immigration_fact.parquet"),
        }
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Raw input tables
    pub sources: SourceLocations,
    /// Output tables
    pub outputs: TableLocations,
    /// Read dimensions back from storage before assembling the fact table.
    /// When false the in-memory dimension results are handed over directly.
    pub reload_dimensions: bool,
    /// Check every dimension for duplicate business keys after it is built
    pub verify_uniqueness: bool,
    /// Show a progress bar over the build stages
    pub show_progress: bool,
    /// Rows per record batch when writing output tables
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::rooted_at(Path::new("data"))
    }
}

impl PipelineConfig {
    /// Default configuration with raw inputs under `<root>/raw` and outputs under `<root>/model`
    #[must_use]
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            sources: SourceLocations::under(&root.join("raw")),
            outputs: TableLocations::under(&root.join("model")),
            reload_dimensions: true,
            verify_uniqueness: true,
            show_progress: true,
            batch_size: get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE),
        }
    }

    /// Load a configuration from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("invalid pipeline configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be greater than zero".to_string()));
        }
        Ok(())
    }
}
