use std::path::Path;

use immigration_star::models::ImmigrationFactRow;
use immigration_star::store::PART_FILE_NAME;
use immigration_star::{
    Error, MemoryStore, ParquetStore, Pipeline, PipelineConfig, PipelineRun, TableStore,
};
use itertools::Itertools;

use crate::utils::{seed_sources, test_config};

fn run_on(store: &dyn TableStore, config: PipelineConfig) -> PipelineRun {
    Pipeline::new(config, store).run().unwrap()
}

/// Fact attributes that do not depend on surrogate key assignment order
fn stable_view(facts: &[ImmigrationFactRow]) -> Vec<String> {
    facts
        .iter()
        .map(|f| {
            format!(
                "{} {:?} {:?} {:?} {:?} {:?} {} {} {} {}",
                f.cicid,
                f.airport_ident,
                f.state_code,
                f.country_code,
                f.arrival_date_raw,
                f.port_code,
                f.migrant_id.is_some(),
                f.status_flag_id.is_some(),
                f.visa_id.is_some(),
                f.temperature_id.is_some(),
            )
        })
        .sorted()
        .collect()
}

#[test]
fn test_parquet_pipeline_writes_every_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let store = ParquetStore::new(config.batch_size);
    seed_sources(&store, &config);

    let run = run_on(&store, config.clone());

    let outputs = &config.outputs;
    for location in [
        &outputs.migrant,
        &outputs.status,
        &outputs.visa,
        &outputs.state,
        &outputs.time,
        &outputs.airport,
        &outputs.temperature,
        &outputs.country,
        &outputs.fact,
    ] {
        assert!(location.join(PART_FILE_NAME).is_file(), "{} not written", location.display());
    }

    let report = &run.report;
    assert_eq!(report.rows("migrant"), Some(3));
    assert_eq!(report.rows("status"), Some(2));
    assert_eq!(report.rows("visa"), Some(2));
    assert_eq!(report.rows("state"), Some(3));
    assert_eq!(report.rows("time"), Some(3));
    assert_eq!(report.rows("airport"), Some(3));
    assert_eq!(report.rows("temperature"), Some(3));
    assert_eq!(report.rows("country"), Some(3));
    assert_eq!(report.rows("immigration_fact"), Some(3));
    assert_eq!(store.load(&outputs.fact).unwrap().num_rows(), 3);
}

#[test]
fn test_time_dimension_survives_parquet_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let store = ParquetStore::new(config.batch_size);
    seed_sources(&store, &config);

    let run = run_on(&store, config);

    let row = run
        .dimensions
        .time
        .iter()
        .find(|t| t.arrival_date_raw.as_deref() == Some("20545"))
        .unwrap();
    assert_eq!(row.arrival_date, chrono::NaiveDate::from_ymd_opt(2016, 4, 1));
    assert_eq!(row.week, Some(13));
    assert_eq!(row.weekday, Some(6));
}

#[test]
fn test_reloaded_and_in_memory_dimensions_agree() {
    let dir = tempfile::tempdir().unwrap();
    let reload_config = test_config(dir.path());
    let parquet = ParquetStore::new(reload_config.batch_size);
    seed_sources(&parquet, &reload_config);
    let reloaded = run_on(&parquet, reload_config);

    let mut memory_config = test_config(Path::new("/data"));
    memory_config.reload_dimensions = false;
    let memory = MemoryStore::new();
    seed_sources(&memory, &memory_config);
    let in_memory = run_on(&memory, memory_config);

    assert_eq!(stable_view(&reloaded.fact), stable_view(&in_memory.fact));
    assert_eq!(reloaded.report, in_memory.report);
}

#[test]
fn test_rerun_overwrites_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let store = ParquetStore::new(config.batch_size);
    seed_sources(&store, &config);

    let first = run_on(&store, config.clone());
    let second = run_on(&store, config.clone());

    assert_eq!(store.load(&config.outputs.fact).unwrap().num_rows(), 3);
    assert_eq!(store.load(&config.outputs.migrant).unwrap().num_rows(), 3);
    assert_eq!(stable_view(&first.fact), stable_view(&second.fact));

    let profiles = |run: &PipelineRun| {
        run.dimensions
            .migrant
            .iter()
            .map(|m| (m.birth_year, m.gender.clone()))
            .sorted()
            .collect_vec()
    };
    assert_eq!(profiles(&first), profiles(&second));
}

#[test]
fn test_memory_store_holds_every_output() {
    let config = test_config(Path::new("/data"));
    let store = MemoryStore::new();
    seed_sources(&store, &config);

    run_on(&store, config.clone());

    // Five raw sources plus nine outputs
    assert_eq!(store.locations().len(), 14);
    assert!(store.exists(&config.outputs.country));
}

#[test]
fn test_missing_source_fails_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let store = ParquetStore::new(config.batch_size);

    let err = Pipeline::new(config.clone(), &store).run().unwrap_err();
    assert!(matches!(err, Error::DependencyMissing { ref table, .. } if table == "travelers"));
    assert!(!config.outputs.migrant.exists());
}

#[test]
fn test_config_file_drives_locations() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("custom");
    let json = serde_json::to_string(&test_config(&root)).unwrap();
    let path = dir.path().join("pipeline.json");
    std::fs::write(&path, json).unwrap();

    let config = PipelineConfig::from_json_file(&path).unwrap();
    assert_eq!(config.outputs.fact, root.join("model").join("immigration_fact.parquet"));
    assert!(!config.show_progress);

    let store = ParquetStore::new(config.batch_size);
    seed_sources(&store, &config);
    let run = run_on(&store, config);
    assert_eq!(run.fact.len(), 3);
}
