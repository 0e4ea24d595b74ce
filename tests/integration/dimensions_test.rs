use std::path::Path;

use arrow::record_batch::RecordBatch;
use immigration_star::dimension::airport::build_airport_dimension;
use immigration_star::dimension::country::build_country_dimension;
use immigration_star::dimension::migrant::build_migrant_dimension;
use immigration_star::dimension::state::build_state_dimension;
use immigration_star::dimension::status::build_status_dimension;
use immigration_star::dimension::temperature::build_temperature_dimension;
use immigration_star::dimension::time::build_time_dimension;
use immigration_star::dimension::visa::build_visa_dimension;
use immigration_star::dimension::{BuildContext, SurrogateKeyGenerator, verify_unique};
use immigration_star::models::{
    AirportRecord, ArrowSchema, ClimateRecord, DemographicRecord, MigrantRow, TravelerRecord,
};
use immigration_star::{Error, MemoryStore, Table, TableStore};
use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::utils::{airports, climate, countries, demographics, travelers};

fn traveler_records() -> Vec<TravelerRecord> {
    TravelerRecord::from_table(&travelers()).unwrap()
}

#[test]
fn test_raw_travelers_read_leniently() {
    let records = traveler_records();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].cicid, Some(1));
    assert_eq!(records[0].biryear, Some(1975));
    assert_eq!(records[0].arrdate.as_deref(), Some("20545"));
    assert_eq!(records[2].visapost, None);
    assert_eq!(records[3].cicid, None);
}

#[test]
fn test_every_dimension_is_unique_on_its_business_key() {
    let store = MemoryStore::new();
    let keys = SurrogateKeyGenerator::new();
    let ctx = BuildContext::new(&store, &keys);
    let travelers = traveler_records();
    let out = Path::new("/model");

    let migrant = build_migrant_dimension(&ctx, &travelers, &out.join("migrant")).unwrap();
    let status = build_status_dimension(&ctx, &travelers, &out.join("status")).unwrap();
    let visa = build_visa_dimension(&ctx, &travelers, &out.join("visa")).unwrap();
    let time = build_time_dimension(&ctx, &travelers, &out.join("time")).unwrap();

    assert_eq!(migrant.len(), 3);
    assert_eq!(status.len(), 2);
    assert_eq!(visa.len(), 2);
    assert_eq!(time.len(), 3);

    verify_unique("migrant", &migrant).unwrap();
    verify_unique("status", &status).unwrap();
    verify_unique("visa", &visa).unwrap();
    verify_unique("time", &time).unwrap();
}

#[test]
fn test_shared_profile_produces_one_migrant_row() {
    let store = MemoryStore::new();
    let keys = SurrogateKeyGenerator::new();
    let ctx = BuildContext::new(&store, &keys);
    let output = Path::new("/model/migrant");

    build_migrant_dimension(&ctx, &traveler_records(), output).unwrap();

    let stored = MigrantRow::from_table(&store.load(output).unwrap()).unwrap();
    let females_1975 = stored
        .iter()
        .filter(|m| m.birth_year == Some(1975) && m.gender.as_deref() == Some("F"))
        .count();
    assert_eq!(females_1975, 1);
}

#[test]
fn test_surrogate_keys_are_unique_across_dimensions() {
    let store = MemoryStore::new();
    let keys = SurrogateKeyGenerator::new();
    let ctx = BuildContext::new(&store, &keys);
    let travelers = traveler_records();
    let climate = ClimateRecord::from_table(&climate()).unwrap();
    let out = Path::new("/model");

    let (migrant, (status, (visa, temperature))) = rayon::join(
        || build_migrant_dimension(&ctx, &travelers, &out.join("migrant")),
        || {
            rayon::join(
                || build_status_dimension(&ctx, &travelers, &out.join("status")),
                || {
                    rayon::join(
                        || build_visa_dimension(&ctx, &travelers, &out.join("visa")),
                        || build_temperature_dimension(&ctx, &climate, &out.join("temperature")),
                    )
                },
            )
        },
    );

    let ids = migrant
        .unwrap()
        .iter()
        .map(|m| m.migrant_id)
        .chain(status.unwrap().iter().map(|s| s.status_flag_id))
        .chain(visa.unwrap().iter().map(|v| v.visa_id))
        .chain(temperature.unwrap().iter().map(|t| t.temperature_id))
        .collect_vec();

    let distinct: FxHashSet<i64> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), ids.len());
}

#[test]
fn test_state_dimension_averages_and_sums() {
    let store = MemoryStore::new();
    let keys = SurrogateKeyGenerator::new();
    let ctx = BuildContext::new(&store, &keys);
    let records = DemographicRecord::from_table(&demographics()).unwrap();

    let states = build_state_dimension(&ctx, &records, Path::new("/model/state")).unwrap();
    assert_eq!(states.iter().map(|s| s.state_code.as_str()).collect_vec(), ["NY", "CA", "TX"]);

    let ny = &states[0];
    assert_eq!(ny.state, "New York");
    assert!((ny.median_age - 35.0).abs() < 1e-9);
    assert!((ny.average_household_size - 2.6).abs() < 1e-9);
    assert_eq!(ny.male_population, 150);
    assert_eq!(ny.female_population, 170);
    assert_eq!(ny.total_population, 320);
    assert_eq!(ny.foreign_born, 50);
}

#[test]
fn test_temperature_dimension_one_row_per_country() {
    let store = MemoryStore::new();
    let keys = SurrogateKeyGenerator::new();
    let ctx = BuildContext::new(&store, &keys);
    let records = ClimateRecord::from_table(&climate()).unwrap();

    let rows = build_temperature_dimension(&ctx, &records, Path::new("/model/temperature")).unwrap();
    assert_eq!(rows.len(), 3);

    let australia = rows.iter().find(|r| r.country == "Australia").unwrap();
    assert!((australia.average_temperature - 25.5).abs() < 1e-9);
    assert!((australia.average_temperature_uncertainty - 0.4).abs() < 1e-9);
}

#[test]
fn test_airport_dimension_keeps_unreferenced_airports() {
    let store = MemoryStore::new();
    let keys = SurrogateKeyGenerator::new();
    let ctx = BuildContext::new(&store, &keys);
    let records = AirportRecord::from_table(&airports()).unwrap();

    let rows = build_airport_dimension(&ctx, &records, Path::new("/model/airport")).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].ident.as_deref(), Some("SEA"));
    assert_eq!(rows[2].gps_code.as_deref(), Some("KSEA"));
    assert_eq!(rows[2].region.as_deref(), Some("US-WA"));
}

#[test]
fn test_country_dimension_is_copied_unchanged() {
    let store = MemoryStore::new();
    let keys = SurrogateKeyGenerator::new();
    let ctx = BuildContext::new(&store, &keys);
    let input = countries();
    let output = Path::new("/model/country");

    build_country_dimension(&ctx, &input, output).unwrap();

    let stored = store.load(output).unwrap();
    assert_eq!(stored.schema(), input.schema());
    let stored: Vec<RecordBatch> = stored.batches().to_vec();
    assert_eq!(stored, input.batches().to_vec());
}

#[test]
fn test_missing_raw_column_is_schema_error() {
    let full = travelers().concat().unwrap();
    let index = full.schema().index_of("gender").unwrap();
    let projection = (0..full.num_columns()).filter(|i| *i != index).collect_vec();
    let without_gender = Table::from_batch(full.project(&projection).unwrap());

    let err = TravelerRecord::from_table(&without_gender).unwrap_err();
    assert!(matches!(
        err,
        Error::Schema { ref table, ref column } if table == "travelers" && column == "gender"
    ));
}

#[test]
fn test_optional_demographic_columns_are_not_required() {
    let full = demographics().concat().unwrap();
    let keep = ["State Code", "State", "Median Age", "Male Population", "Female Population",
        "Total Population", "Foreign-born", "Average Household Size"]
        .iter()
        .map(|c| full.schema().index_of(c).unwrap())
        .collect_vec();
    let trimmed = Table::from_batch(full.project(&keep).unwrap());

    assert_eq!(DemographicRecord::from_table(&trimmed).unwrap().len(), 4);
}
