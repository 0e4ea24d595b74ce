//! Shared fixtures: small raw tables shaped like the upstream exports.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::record_batch::RecordBatch;
use immigration_star::{PipelineConfig, Table, TableStore};

fn strings(values: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

fn floats(values: &[Option<f64>]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

fn batch(columns: Vec<(&str, ArrayRef)>) -> Table {
    Table::from_batch(RecordBatch::try_from_iter(columns).unwrap())
}

/// Four traveler records, numeric codes exported as doubles.
///
/// Travelers 1 and 2 share a migrant profile, status flags and visa.
/// Traveler 3 has no airport, state or country match and no visa post.
/// The last record has no `cicid`.
#[must_use]
pub fn travelers() -> Table {
    batch(vec![
        ("cicid", floats(&[Some(1.0), Some(2.0), Some(3.0), None])),
        ("biryear", floats(&[Some(1975.0), Some(1975.0), Some(1990.0), Some(1980.0)])),
        ("gender", strings(&[Some("F"), Some("F"), Some("M"), Some("M")])),
        ("entdepa", strings(&[Some("G"), Some("G"), Some("G"), Some("Z")])),
        ("entdepd", strings(&[Some("O"), Some("O"), Some("O"), Some("O")])),
        ("matflag", strings(&[Some("M"), Some("M"), Some("M"), Some("M")])),
        ("i94visa", floats(&[Some(2.0), Some(2.0), Some(1.0), Some(2.0)])),
        ("visatype", strings(&[Some("B2"), Some("B2"), Some("WT"), Some("B2")])),
        ("visapost", strings(&[Some("SYD"), Some("SYD"), None, Some("SYD")])),
        ("i94addr", strings(&[Some("NY"), Some("CA"), Some("ZZ"), Some("NY")])),
        ("arrdate", strings(&[Some("20545"), Some("20546"), Some("20545"), Some("20547")])),
        ("i94res", floats(&[Some(438.0), Some(108.0), Some(999.0), Some(438.0)])),
        ("depdate", floats(&[Some(20550.0), None, Some(20560.0), None])),
        ("i94mode", floats(&[Some(1.0), Some(1.0), Some(1.0), Some(1.0)])),
        ("i94port", strings(&[Some("JFK"), Some("LAX"), Some("XXX"), Some("JFK")])),
        ("i94cit", floats(&[Some(438.0), Some(108.0), Some(999.0), Some(438.0)])),
        ("airline", strings(&[Some("QF"), Some("SK"), None, Some("QF")])),
        ("fltno", strings(&[Some("11"), Some("909"), None, Some("11")])),
    ])
}

/// City demographics for NY (two cities), CA and TX
#[must_use]
pub fn demographics() -> Table {
    batch(vec![
        ("City", strings(&[Some("New York"), Some("Buffalo"), Some("Fresno"), Some("Austin")])),
        ("State Code", strings(&[Some("NY"), Some("NY"), Some("CA"), Some("TX")])),
        ("State", strings(&[Some("New York"), Some("New York"), Some("California"), Some("Texas")])),
        ("Median Age", floats(&[Some(30.0), Some(40.0), Some(33.5), Some(32.0)])),
        ("Male Population", floats(&[Some(100.0), Some(50.0), Some(70.0), Some(90.0)])),
        ("Female Population", floats(&[Some(110.0), Some(60.0), Some(75.0), Some(95.0)])),
        ("Total Population", floats(&[Some(210.0), Some(110.0), Some(145.0), Some(185.0)])),
        ("Foreign-born", floats(&[Some(40.0), Some(10.0), Some(30.0), Some(20.0)])),
        ("Average Household Size", floats(&[Some(2.5), Some(2.7), Some(3.1), Some(2.4)])),
        ("Race", strings(&[Some("Asian"), Some("White"), Some("Asian"), Some("White")])),
        ("Count", floats(&[Some(10.0), Some(20.0), Some(30.0), Some(40.0)])),
    ])
}

/// Three airports; SEA is never referenced by a traveler
#[must_use]
pub fn airports() -> Table {
    batch(vec![
        ("ident", strings(&[Some("JFK"), Some("LAX"), Some("SEA")])),
        ("type", strings(&[Some("large_airport"), Some("large_airport"), Some("large_airport")])),
        ("name", strings(&[Some("John F Kennedy"), Some("Los Angeles"), Some("Seattle Tacoma")])),
        ("elevation_ft", floats(&[Some(13.0), Some(125.0), Some(433.0)])),
        ("continent", strings(&[Some("NA"), Some("NA"), Some("NA")])),
        ("iso_country", strings(&[Some("US"), Some("US"), Some("US")])),
        ("iso_region", strings(&[Some("US-NY"), Some("US-CA"), Some("US-WA")])),
        ("municipality", strings(&[Some("New York"), Some("Los Angeles"), Some("Seattle")])),
        ("gps_code", strings(&[Some("KJFK"), Some("KLAX"), Some("KSEA")])),
        ("iata_code", strings(&[Some("JFK"), Some("LAX"), Some("SEA")])),
        ("local_code", strings(&[Some("JFK"), Some("LAX"), Some("SEA")])),
        (
            "coordinates",
            strings(&[Some("-73.77, 40.63"), Some("-118.40, 33.94"), Some("-122.30, 47.44")]),
        ),
    ])
}

/// Monthly land temperatures. Atlantis has no country code.
#[must_use]
pub fn climate() -> Table {
    batch(vec![
        ("dt", strings(&[Some("2000-01-01"), Some("2000-02-01"), Some("2000-01-01"), Some("2000-01-01")])),
        ("AverageTemperature", floats(&[Some(25.0), Some(26.0), Some(7.5), Some(15.0)])),
        ("AverageTemperatureUncertainty", floats(&[Some(0.5), Some(0.3), Some(0.2), Some(1.0)])),
        ("Country", strings(&[Some("Australia"), Some("Australia"), Some("Denmark"), Some("Atlantis")])),
    ])
}

/// Country reference table; Mexico has no temperature observations
#[must_use]
pub fn countries() -> Table {
    let code: ArrayRef = Arc::new(Int32Array::from(vec![438, 108, 582]));
    batch(vec![
        ("code", code),
        ("country", strings(&[Some("AUSTRALIA"), Some("DENMARK"), Some("MEXICO")])),
    ])
}

/// Test configuration with every location under `root` and no progress bar
#[must_use]
pub fn test_config(root: &Path) -> PipelineConfig {
    PipelineConfig {
        show_progress: false,
        ..PipelineConfig::rooted_at(root)
    }
}

/// Store every raw fixture at the locations named by `config`
pub fn seed_sources(store: &dyn TableStore, config: &PipelineConfig) {
    let sources = &config.sources;
    store.store(&travelers(), &sources.travelers).unwrap();
    store.store(&demographics(), &sources.demographics).unwrap();
    store.store(&airports(), &sources.airports).unwrap();
    store.store(&climate(), &sources.climate).unwrap();
    store.store(&countries(), &sources.countries).unwrap();
}
