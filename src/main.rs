use std::path::{Path, PathBuf};

use anyhow::Context;
use immigration_star::{ParquetStore, Pipeline, PipelineConfig};
use log::info;

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

fn load_config() -> anyhow::Result<PipelineConfig> {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("STAR_SCHEMA_CONFIG").ok())
        .map(PathBuf::from);

    if let Some(path) = config_path {
        info!("Loading pipeline configuration from {}", path.display());
        return PipelineConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load configuration {}", path.display()));
    }

    let root = std::env::var("STAR_SCHEMA_ROOT").unwrap_or_else(|_| "data".to_string());
    info!("No configuration given, using default layout under {root}");
    Ok(PipelineConfig::rooted_at(Path::new(&root)))
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let store = ParquetStore::new(config.batch_size);
    let pipeline = Pipeline::new(config, &store);

    let run = pipeline.run().context("Star schema build failed")?;
    info!(
        "Wrote {} fact rows to {}",
        run.fact.len(),
        pipeline.config().outputs.fact.display()
    );

    Ok(())
}
