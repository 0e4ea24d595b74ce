//! State dimension: demographics aggregated to one row per state code.
//!
//! Ages and household sizes are averaged, population counts are summed.
//! A state whose aggregate has any missing value is left out.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::dimension::BuildContext;
use crate::dimension::aggregate::{MeanAccumulator, SumAccumulator};
use crate::error::Result;
use crate::models::{DemographicRecord, StateRow};

#[derive(Debug, Default)]
struct StateGroup {
    state: Option<String>,
    median_age: MeanAccumulator,
    male_population: SumAccumulator,
    female_population: SumAccumulator,
    total_population: SumAccumulator,
    foreign_born: SumAccumulator,
    average_household_size: MeanAccumulator,
}

impl StateGroup {
    fn push(&mut self, record: &DemographicRecord) {
        if self.state.is_none() {
            self.state.clone_from(&record.state);
        }
        self.median_age.push(record.median_age);
        self.male_population.push(record.male_population);
        self.female_population.push(record.female_population);
        self.total_population.push(record.total_population);
        self.foreign_born.push(record.foreign_born);
        self.average_household_size.push(record.average_household_size);
    }

    fn finish(self, state_code: String) -> Option<StateRow> {
        Some(StateRow {
            state_code,
            state: self.state?,
            median_age: self.median_age.mean_rounded()?,
            male_population: self.male_population.total()?,
            female_population: self.female_population.total()?,
            total_population: self.total_population.total()?,
            foreign_born: self.foreign_born.total()?,
            average_household_size: self.average_household_size.mean_rounded()?,
        })
    }
}

/// Aggregate demographic records per state code, in first-seen order
#[must_use]
pub fn aggregate_states(records: &[DemographicRecord]) -> Vec<StateRow> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: FxHashMap<String, StateGroup> = FxHashMap::default();

    for record in records {
        let Some(code) = &record.state_code else {
            continue;
        };
        groups
            .entry(code.clone())
            .or_insert_with(|| {
                order.push(code.clone());
                StateGroup::default()
            })
            .push(record);
    }

    let total = order.len();
    let rows: Vec<StateRow> = order
        .into_iter()
        .filter_map(|code| {
            let group = groups.remove(&code)?;
            group.finish(code)
        })
        .collect();

    if rows.len() < total {
        log::debug!("Dropped {} state groups with incomplete metrics", total - rows.len());
    }
    rows
}

/// Build and persist the state dimension
pub fn build_state_dimension(
    ctx: &BuildContext<'_>,
    records: &[DemographicRecord],
    output: &Path,
) -> Result<Vec<StateRow>> {
    let rows = aggregate_states(records);
    ctx.persist(&rows, output, "State dimension")?;
    Ok(rows)
}
