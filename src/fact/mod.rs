//! Immigration fact assembly
//!
//! The raw traveler records are the anchor. Seven dimensions are joined in
//! turn with full outer joins on their business keys:
//!
//! | dimension   | traveler columns               | dimension columns                          |
//! |-------------|--------------------------------|--------------------------------------------|
//! | airport     | `i94port`                      | `ident`                                    |
//! | temperature | `i94res`                       | country `code` (via country-temperature)   |
//! | migrant     | `biryear`, `gender`            | `birth_year`, `gender`                     |
//! | status      | `entdepa`, `entdepd`, `matflag`| `arrival_flag`, `departure_flag`, `match_flag` |
//! | visa        | `i94visa`, `visatype`, `visapost` | `visa_category`, `visa_type`, `visa_post` |
//! | state       | `i94addr`                      | `state_code`                               |
//! | time        | `arrdate`                      | `arrival_date_raw`                         |
//!
//! Outer joins keep travelers whose key has no dimension match (their
//! reference is null). Dimension rows that matched no traveler are carried
//! through the joins and removed by the final filter on `cicid`.
//!
//! Precondition: every dimension is unique on its join key. Nothing here
//! re-checks it; a duplicated key duplicates the traveler rows that match it.

pub mod join;

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::config::TableLocations;
use crate::error::{Error, Result};
use crate::models::{
    AirportRow, ArrowSchema, CountryRecord, ImmigrationFactRow, MigrantRow, StateRow, StatusRow,
    TemperatureRow, TimeRow, TravelerRecord, VisaRow,
};
use crate::store::{Table, TableStore};
use crate::utils::logging::log_build_complete;

use join::{JoinRow, Side, full_outer_join};

/// Every dimension the fact assembler joins against
#[derive(Debug, Clone)]
pub struct DimensionSet {
    pub migrant: Vec<MigrantRow>,
    pub status: Vec<StatusRow>,
    pub visa: Vec<VisaRow>,
    pub state: Vec<StateRow>,
    pub time: Vec<TimeRow>,
    pub airport: Vec<AirportRow>,
    pub temperature: Vec<TemperatureRow>,
    pub country: Table,
}

/// Load one persisted dimension, naming it in the error if it is missing
fn load_dimension<R: ArrowSchema>(store: &dyn TableStore, location: &Path) -> Result<Vec<R>> {
    let table = store.load(location).map_err(|e| match e {
        Error::DependencyMissing { location, .. } => Error::DependencyMissing {
            table: R::TABLE.to_string(),
            location,
        },
        other => other,
    })?;
    R::from_table(&table)
}

impl DimensionSet {
    /// Read every dimension back from storage
    ///
    /// # Errors
    /// Fails with `DependencyMissing` if a dimension was never persisted, or
    /// with a schema error if a persisted dimension lacks one of its columns.
    pub fn load(store: &dyn TableStore, locations: &TableLocations) -> Result<Self> {
        let country = store.load(&locations.country).map_err(|e| match e {
            Error::DependencyMissing { location, .. } => Error::DependencyMissing {
                table: CountryRecord::TABLE.to_string(),
                location,
            },
            other => other,
        })?;

        Ok(Self {
            migrant: load_dimension(store, &locations.migrant)?,
            status: load_dimension(store, &locations.status)?,
            visa: load_dimension(store, &locations.visa)?,
            state: load_dimension(store, &locations.state)?,
            time: load_dimension(store, &locations.time)?,
            airport: load_dimension(store, &locations.airport)?,
            temperature: load_dimension(store, &locations.temperature)?,
            country,
        })
    }
}

/// A temperature row resolved to a country code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryTemperature {
    pub code: i32,
    pub temperature: usize,
}

fn normalize_country(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Attach country codes to temperature rows by matching country names
///
/// Names are compared trimmed and case-insensitively. Temperature rows with
/// no matching country are left out; they have no code to join on.
pub fn country_temperatures(
    countries: &Table,
    temperatures: &[TemperatureRow],
) -> Result<Vec<CountryTemperature>> {
    let countries = CountryRecord::from_table(countries)?;

    let mut by_name: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    for (position, row) in temperatures.iter().enumerate() {
        by_name
            .entry(normalize_country(&row.country))
            .or_default()
            .push(position);
    }

    let view = countries
        .iter()
        .filter_map(|c| Some((c.code?, by_name.get(&normalize_country(c.country.as_deref()?))?)))
        .flat_map(|(code, positions)| {
            positions
                .iter()
                .map(move |&temperature| CountryTemperature { code, temperature })
        })
        .collect();
    Ok(view)
}

fn traveler_at<'t>(travelers: &'t [TravelerRecord], row: &JoinRow) -> Option<&'t TravelerRecord> {
    row.traveler.map(|t| &travelers[t])
}

/// Resolve every traveler record against the dimensions
pub fn assemble_fact_rows(
    travelers: &[TravelerRecord],
    dims: &DimensionSet,
) -> Result<Vec<ImmigrationFactRow>> {
    let view = country_temperatures(&dims.country, &dims.temperature)?;

    let rows: Vec<JoinRow> = (0..travelers.len()).map(JoinRow::anchor).collect();

    let rows = full_outer_join(
        rows,
        Side::Airport,
        &dims.airport,
        |r| traveler_at(travelers, r)?.i94port.as_deref(),
        |a| a.ident.as_deref(),
    );
    let rows = full_outer_join(
        rows,
        Side::Temperature,
        &view,
        |r| traveler_at(travelers, r)?.i94res,
        |ct| Some(ct.code),
    );
    let rows = full_outer_join(
        rows,
        Side::Migrant,
        &dims.migrant,
        |r| {
            let t = traveler_at(travelers, r)?;
            Some((t.biryear?, t.gender.as_deref()?))
        },
        |m| Some((m.birth_year?, m.gender.as_deref()?)),
    );
    let rows = full_outer_join(
        rows,
        Side::Status,
        &dims.status,
        |r| {
            let t = traveler_at(travelers, r)?;
            Some((t.entdepa.as_deref()?, t.entdepd.as_deref()?, t.matflag.as_deref()?))
        },
        |s| {
            Some((
                s.arrival_flag.as_deref()?,
                s.departure_flag.as_deref()?,
                s.match_flag.as_deref()?,
            ))
        },
    );
    let rows = full_outer_join(
        rows,
        Side::Visa,
        &dims.visa,
        |r| {
            let t = traveler_at(travelers, r)?;
            Some((t.i94visa?, t.visatype.as_deref()?, t.visapost.as_deref()?))
        },
        |v| Some((v.visa_category?, v.visa_type.as_deref()?, v.visa_post.as_deref()?)),
    );
    let rows = full_outer_join(
        rows,
        Side::State,
        &dims.state,
        |r| traveler_at(travelers, r)?.i94addr.as_deref(),
        |s| Some(s.state_code.as_str()),
    );
    let rows = full_outer_join(
        rows,
        Side::Time,
        &dims.time,
        |r| traveler_at(travelers, r)?.arrdate.as_deref(),
        |t| t.arrival_date_raw.as_deref(),
    );

    let joined = rows.len();
    let facts: Vec<ImmigrationFactRow> = rows
        .iter()
        .filter_map(|r| project(r, travelers, dims, &view))
        .collect();

    log::debug!(
        "Fact join produced {joined} intermediate rows, kept {} with a cicid",
        facts.len()
    );
    Ok(facts)
}

/// Final projection of one joined row; `None` if the row has no traveler id
fn project(
    row: &JoinRow,
    travelers: &[TravelerRecord],
    dims: &DimensionSet,
    view: &[CountryTemperature],
) -> Option<ImmigrationFactRow> {
    let t = &travelers[row.traveler?];
    let cicid = t.cicid?;
    let country_temperature = row.temperature.map(|i| view[i]);

    Some(ImmigrationFactRow {
        cicid,
        residence_country_code: t.i94res,
        departure_date: t.depdate,
        travel_mode: t.i94mode,
        port_code: t.i94port.clone(),
        citizenship_country_code: t.i94cit,
        addr_state_code: t.i94addr.clone(),
        airline: t.airline.clone(),
        flight_number: t.fltno.clone(),
        airport_ident: row.airport.and_then(|i| dims.airport[i].ident.clone()),
        country_code: country_temperature.map(|ct| ct.code),
        temperature_id: country_temperature.map(|ct| dims.temperature[ct.temperature].temperature_id),
        migrant_id: row.migrant.map(|i| dims.migrant[i].migrant_id),
        status_flag_id: row.status.map(|i| dims.status[i].status_flag_id),
        visa_id: row.visa.map(|i| dims.visa[i].visa_id),
        state_code: row.state.map(|i| dims.state[i].state_code.clone()),
        // The time key comes from the time side, not the traveler's own arrdate
        arrival_date_raw: row.time.and_then(|i| dims.time[i].arrival_date_raw.clone()),
    })
}

/// Build and persist the immigration fact table
pub fn build_immigration_fact(
    store: &dyn TableStore,
    travelers: &[TravelerRecord],
    dims: &DimensionSet,
    output: &Path,
) -> Result<Vec<ImmigrationFactRow>> {
    let rows = assemble_fact_rows(travelers, dims)?;
    let table = ImmigrationFactRow::to_table(&rows)?;
    store.store(&table, output)?;
    log_build_complete("Immigration fact");
    Ok(rows)
}
