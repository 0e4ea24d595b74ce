//! Raw source records
//!
//! Column names here are the fixed contract with the upstream exports. Each
//! `from_table` fails with a schema error if any referenced column is absent;
//! individual values that cannot be read as the expected type become `None`.

use itertools::izip;

use crate::error::Result;
use crate::store::Table;
use crate::utils::arrow::{float64_values, int32_values, int64_values, string_values};

/// One I-94 traveler record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelerRecord {
    pub cicid: Option<i64>,
    pub biryear: Option<i32>,
    pub gender: Option<String>,
    pub entdepa: Option<String>,
    pub entdepd: Option<String>,
    pub matflag: Option<String>,
    pub i94visa: Option<i32>,
    pub visatype: Option<String>,
    pub visapost: Option<String>,
    pub i94addr: Option<String>,
    /// Arrival day offset exactly as exported; decoded by the time dimension
    pub arrdate: Option<String>,
    pub i94res: Option<i32>,
    pub depdate: Option<i64>,
    pub i94mode: Option<i32>,
    pub i94port: Option<String>,
    pub i94cit: Option<i32>,
    pub airline: Option<String>,
    pub fltno: Option<String>,
}

impl TravelerRecord {
    pub const TABLE: &'static str = "travelers";

    pub const COLUMNS: [&'static str; 18] = [
        "cicid", "biryear", "gender", "entdepa", "entdepd", "matflag", "i94visa", "visatype",
        "visapost", "i94addr", "arrdate", "i94res", "depdate", "i94mode", "i94port", "i94cit",
        "airline", "fltno",
    ];

    /// Read traveler records from a raw table
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        let t = Self::TABLE;
        table.require_columns(t, &Self::COLUMNS)?;

        let rows = izip!(
            int64_values(table, t, "cicid")?,
            int32_values(table, t, "biryear")?,
            string_values(table, t, "gender")?,
            string_values(table, t, "entdepa")?,
            string_values(table, t, "entdepd")?,
            string_values(table, t, "matflag")?,
            int32_values(table, t, "i94visa")?,
            string_values(table, t, "visatype")?,
            string_values(table, t, "visapost")?,
            string_values(table, t, "i94addr")?,
            string_values(table, t, "arrdate")?,
            int32_values(table, t, "i94res")?,
            int64_values(table, t, "depdate")?,
            int32_values(table, t, "i94mode")?,
            string_values(table, t, "i94port")?,
            int32_values(table, t, "i94cit")?,
            string_values(table, t, "airline")?,
            string_values(table, t, "fltno")?,
        )
        .map(
            |(
                cicid,
                biryear,
                gender,
                entdepa,
                entdepd,
                matflag,
                i94visa,
                visatype,
                visapost,
                i94addr,
                arrdate,
                i94res,
                depdate,
                i94mode,
                i94port,
                i94cit,
                airline,
                fltno,
            )| Self {
                cicid,
                biryear,
                gender,
                entdepa,
                entdepd,
                matflag,
                i94visa,
                visatype,
                visapost,
                i94addr,
                arrdate,
                i94res,
                depdate,
                i94mode,
                i94port,
                i94cit,
                airline,
                fltno,
            },
        )
        .collect();
        Ok(rows)
    }
}

/// One row of the US cities demographics export (one city and race)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemographicRecord {
    pub state_code: Option<String>,
    pub state: Option<String>,
    pub median_age: Option<f64>,
    pub male_population: Option<i64>,
    pub female_population: Option<i64>,
    pub total_population: Option<i64>,
    pub average_household_size: Option<f64>,
    pub foreign_born: Option<i64>,
}

impl DemographicRecord {
    pub const TABLE: &'static str = "demographics";

    pub const COLUMNS: [&'static str; 8] = [
        "State Code",
        "State",
        "Median Age",
        "Male Population",
        "Female Population",
        "Total Population",
        "Average Household Size",
        "Foreign-born",
    ];

    /// Read demographic records from a raw table
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        let t = Self::TABLE;
        table.require_columns(t, &Self::COLUMNS)?;

        let rows = izip!(
            string_values(table, t, "State Code")?,
            string_values(table, t, "State")?,
            float64_values(table, t, "Median Age")?,
            int64_values(table, t, "Male Population")?,
            int64_values(table, t, "Female Population")?,
            int64_values(table, t, "Total Population")?,
            float64_values(table, t, "Average Household Size")?,
            int64_values(table, t, "Foreign-born")?,
        )
        .map(
            |(
                state_code,
                state,
                median_age,
                male_population,
                female_population,
                total_population,
                average_household_size,
                foreign_born,
            )| Self {
                state_code,
                state,
                median_age,
                male_population,
                female_population,
                total_population,
                average_household_size,
                foreign_born,
            },
        )
        .collect();
        Ok(rows)
    }
}

/// One airport from the airport codes export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirportRecord {
    pub ident: Option<String>,
    pub airport_type: Option<String>,
    pub iata_code: Option<String>,
    pub name: Option<String>,
    pub iso_country: Option<String>,
    pub iso_region: Option<String>,
    pub municipality: Option<String>,
    pub gps_code: Option<String>,
    pub coordinates: Option<String>,
    pub elevation_ft: Option<f64>,
}

impl AirportRecord {
    pub const TABLE: &'static str = "airports";

    pub const COLUMNS: [&'static str; 10] = [
        "ident",
        "type",
        "iata_code",
        "name",
        "iso_country",
        "iso_region",
        "municipality",
        "gps_code",
        "coordinates",
        "elevation_ft",
    ];

    /// Read airport records from a raw table
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        let t = Self::TABLE;
        table.require_columns(t, &Self::COLUMNS)?;

        let rows = izip!(
            string_values(table, t, "ident")?,
            string_values(table, t, "type")?,
            string_values(table, t, "iata_code")?,
            string_values(table, t, "name")?,
            string_values(table, t, "iso_country")?,
            string_values(table, t, "iso_region")?,
            string_values(table, t, "municipality")?,
            string_values(table, t, "gps_code")?,
            string_values(table, t, "coordinates")?,
            float64_values(table, t, "elevation_ft")?,
        )
        .map(
            |(
                ident,
                airport_type,
                iata_code,
                name,
                iso_country,
                iso_region,
                municipality,
                gps_code,
                coordinates,
                elevation_ft,
            )| Self {
                ident,
                airport_type,
                iata_code,
                name,
                iso_country,
                iso_region,
                municipality,
                gps_code,
                coordinates,
                elevation_ft,
            },
        )
        .collect();
        Ok(rows)
    }
}

/// One monthly observation from the global land temperature export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClimateRecord {
    pub country: Option<String>,
    pub average_temperature: Option<f64>,
    pub average_temperature_uncertainty: Option<f64>,
}

impl ClimateRecord {
    pub const TABLE: &'static str = "climate";

    pub const COLUMNS: [&'static str; 3] =
        ["Country", "AverageTemperature", "AverageTemperatureUncertainty"];

    /// Read climate records from a raw table
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        let t = Self::TABLE;
        table.require_columns(t, &Self::COLUMNS)?;

        let rows = izip!(
            string_values(table, t, "Country")?,
            float64_values(table, t, "AverageTemperature")?,
            float64_values(table, t, "AverageTemperatureUncertainty")?,
        )
        .map(|(country, average_temperature, average_temperature_uncertainty)| Self {
            country,
            average_temperature,
            average_temperature_uncertainty,
        })
        .collect();
        Ok(rows)
    }
}

/// The two reference columns the fact step needs from the country table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryRecord {
    pub code: Option<i32>,
    pub country: Option<String>,
}

impl CountryRecord {
    pub const TABLE: &'static str = "country";

    pub const COLUMNS: [&'static str; 2] = ["code", "country"];

    /// Read the code and name columns from the country reference table
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        let t = Self::TABLE;
        table.require_columns(t, &Self::COLUMNS)?;

        let rows = izip!(int32_values(table, t, "code")?, string_values(table, t, "country")?)
            .map(|(code, country)| Self { code, country })
            .collect();
        Ok(rows)
    }
}
