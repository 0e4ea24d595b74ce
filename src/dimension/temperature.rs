//! Temperature dimension: average land temperature per country.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::dimension::aggregate::MeanAccumulator;
use crate::dimension::{BuildContext, SurrogateKeyGenerator};
use crate::error::Result;
use crate::models::{ClimateRecord, TemperatureRow};

/// Aggregate climate observations per country
///
/// Surrogate keys are handed out after aggregation, one per kept country.
#[must_use]
pub fn aggregate_temperatures(
    records: &[ClimateRecord],
    keys: &SurrogateKeyGenerator,
) -> Vec<TemperatureRow> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: FxHashMap<String, (MeanAccumulator, MeanAccumulator)> = FxHashMap::default();

    for record in records {
        let Some(country) = &record.country else {
            continue;
        };
        let (temperature, uncertainty) = groups.entry(country.clone()).or_insert_with(|| {
            order.push(country.clone());
            Default::default()
        });
        temperature.push(record.average_temperature);
        uncertainty.push(record.average_temperature_uncertainty);
    }

    let complete: Vec<(String, f64, f64)> = order
        .into_iter()
        .filter_map(|country| {
            let (temperature, uncertainty) = groups.remove(&country)?;
            Some((country, temperature.mean_rounded()?, uncertainty.mean_rounded()?))
        })
        .collect();

    let ids = keys.reserve(complete.len());
    complete
        .into_iter()
        .zip(ids)
        .map(|((country, average_temperature, average_temperature_uncertainty), temperature_id)| {
            TemperatureRow {
                temperature_id,
                country,
                average_temperature,
                average_temperature_uncertainty,
            }
        })
        .collect()
}

/// Build and persist the temperature dimension
pub fn build_temperature_dimension(
    ctx: &BuildContext<'_>,
    records: &[ClimateRecord],
    output: &Path,
) -> Result<Vec<TemperatureRow>> {
    let rows = aggregate_temperatures(records, ctx.keys);
    ctx.persist(&rows, output, "Temperature dimension")?;
    Ok(rows)
}
