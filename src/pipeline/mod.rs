//! Pipeline driver
//!
//! Loads the raw sources, builds the eight dimensions (concurrently, they do
//! not depend on each other), then assembles the fact table. The fact step
//! only starts once every dimension has been stored. With
//! `reload_dimensions` it reads them back from storage; otherwise the
//! in-memory results are handed over directly.
//!
//! Outputs are overwritten table by table. A failure part way through leaves
//! the tables already written in place; there is no run-wide rollback.

use std::path::Path;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::dimension::airport::build_airport_dimension;
use crate::dimension::country::build_country_dimension;
use crate::dimension::migrant::build_migrant_dimension;
use crate::dimension::state::build_state_dimension;
use crate::dimension::status::build_status_dimension;
use crate::dimension::temperature::build_temperature_dimension;
use crate::dimension::time::build_time_dimension;
use crate::dimension::visa::build_visa_dimension;
use crate::dimension::{BuildContext, SurrogateKeyGenerator};
use crate::error::{Error, Result};
use crate::fact::{DimensionSet, build_immigration_fact};
use crate::models::{
    AirportRecord, ClimateRecord, DemographicRecord, ImmigrationFactRow, TravelerRecord,
};
use crate::store::{Table, TableStore};
use crate::utils::logging::StageProgress;

/// Number of progress stages: eight dimensions and the fact table
const STAGES: u64 = 9;

/// Row counts per output table, in build order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub tables: Vec<(&'static str, usize)>,
}

impl PipelineReport {
    fn record(&mut self, table: &'static str, rows: usize) {
        self.tables.push((table, rows));
    }

    /// Rows written for `table`, if it was built
    #[must_use]
    pub fn rows(&self, table: &str) -> Option<usize> {
        self.tables.iter().find(|(t, _)| *t == table).map(|(_, n)| *n)
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub dimensions: DimensionSet,
    pub fact: Vec<ImmigrationFactRow>,
    pub report: PipelineReport,
}

/// Raw inputs of a run
#[derive(Debug, Clone)]
pub struct RawSources {
    pub travelers: Vec<TravelerRecord>,
    pub demographics: Vec<DemographicRecord>,
    pub airports: Vec<AirportRecord>,
    pub climate: Vec<ClimateRecord>,
    pub countries: Table,
}

fn load_source(store: &dyn TableStore, table: &str, location: &Path) -> Result<Table> {
    store.load(location).map_err(|e| match e {
        Error::DependencyMissing { location, .. } => Error::DependencyMissing {
            table: table.to_string(),
            location,
        },
        other => other,
    })
}

impl RawSources {
    /// Load and type every raw source named in the configuration
    pub fn load(store: &dyn TableStore, config: &PipelineConfig) -> Result<Self> {
        let sources = &config.sources;
        Ok(Self {
            travelers: TravelerRecord::from_table(&load_source(
                store,
                TravelerRecord::TABLE,
                &sources.travelers,
            )?)?,
            demographics: DemographicRecord::from_table(&load_source(
                store,
                DemographicRecord::TABLE,
                &sources.demographics,
            )?)?,
            airports: AirportRecord::from_table(&load_source(
                store,
                AirportRecord::TABLE,
                &sources.airports,
            )?)?,
            climate: ClimateRecord::from_table(&load_source(
                store,
                ClimateRecord::TABLE,
                &sources.climate,
            )?)?,
            countries: load_source(store, "country", &sources.countries)?,
        })
    }
}

/// One-shot star-schema build
pub struct Pipeline<'a> {
    config: PipelineConfig,
    store: &'a dyn TableStore,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(config: PipelineConfig, store: &'a dyn TableStore) -> Self {
        Self { config, store }
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the raw sources from the store and run the whole build
    pub fn run(&self) -> Result<PipelineRun> {
        let sources = RawSources::load(self.store, &self.config)?;
        self.run_with_sources(&sources)
    }

    /// Build every dimension and then the fact table from already loaded sources
    pub fn run_with_sources(&self, sources: &RawSources) -> Result<PipelineRun> {
        let start = Instant::now();
        let outputs = &self.config.outputs;
        let progress = StageProgress::new(STAGES, self.config.show_progress);
        let keys = SurrogateKeyGenerator::new();
        let ctx = BuildContext {
            store: self.store,
            keys: &keys,
            verify_uniqueness: self.config.verify_uniqueness,
        };

        let travelers = sources.travelers.as_slice();
        let done = |table: &str| progress.stage_done(table);

        let migrant = || {
            build_migrant_dimension(&ctx, travelers, &outputs.migrant).inspect(|_| done("migrant"))
        };
        let status = || {
            build_status_dimension(&ctx, travelers, &outputs.status).inspect(|_| done("status"))
        };
        let visa =
            || build_visa_dimension(&ctx, travelers, &outputs.visa).inspect(|_| done("visa"));
        let time =
            || build_time_dimension(&ctx, travelers, &outputs.time).inspect(|_| done("time"));
        let state = || {
            build_state_dimension(&ctx, &sources.demographics, &outputs.state)
                .inspect(|_| done("state"))
        };
        let airport = || {
            build_airport_dimension(&ctx, &sources.airports, &outputs.airport)
                .inspect(|_| done("airport"))
        };
        let temperature = || {
            build_temperature_dimension(&ctx, &sources.climate, &outputs.temperature)
                .inspect(|_| done("temperature"))
        };
        let country = || {
            build_country_dimension(&ctx, &sources.countries, &outputs.country)
                .inspect(|_| done("country"))
        };

        let (((migrant, status), (visa, time)), ((state, airport), (temperature, country))) =
            rayon::join(
                || rayon::join(|| rayon::join(migrant, status), || rayon::join(visa, time)),
                || {
                    rayon::join(
                        || rayon::join(state, airport),
                        || rayon::join(temperature, country),
                    )
                },
            );

        let built = DimensionSet {
            migrant: migrant?,
            status: status?,
            visa: visa?,
            state: state?,
            time: time?,
            airport: airport?,
            temperature: temperature?,
            country: country?,
        };

        let dimensions = if self.config.reload_dimensions {
            log::info!("Reading dimensions back from storage for the fact table");
            DimensionSet::load(self.store, outputs)?
        } else {
            built
        };

        let fact = build_immigration_fact(self.store, travelers, &dimensions, &outputs.fact)?;
        done("immigration_fact");
        progress.finish("star schema complete");

        let mut report = PipelineReport::default();
        report.record("migrant", dimensions.migrant.len());
        report.record("status", dimensions.status.len());
        report.record("visa", dimensions.visa.len());
        report.record("state", dimensions.state.len());
        report.record("time", dimensions.time.len());
        report.record("airport", dimensions.airport.len());
        report.record("temperature", dimensions.temperature.len());
        report.record("country", dimensions.country.num_rows());
        report.record("immigration_fact", fact.len());

        for (table, rows) in &report.tables {
            log::info!("{table}: {rows} rows");
        }
        log::info!("Star schema built in {:?}", start.elapsed());

        Ok(PipelineRun {
            dimensions,
            fact,
            report,
        })
    }
}
