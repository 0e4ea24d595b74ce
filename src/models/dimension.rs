//! Dimension table records

use arrow::datatypes::{DataType, Field, Schema};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::traits::{ArrowSchema, BusinessKey};

/// Traveler demographic profile, unique on (birth year, gender)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrantRow {
    pub migrant_id: i64,
    pub birth_year: Option<i32>,
    pub gender: Option<String>,
}

impl ArrowSchema for MigrantRow {
    const TABLE: &'static str = "migrant";

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("migrant_id", DataType::Int64, false),
            Field::new("birth_year", DataType::Int32, true),
            Field::new("gender", DataType::Utf8, true),
        ])
    }
}

impl BusinessKey for MigrantRow {
    type Key = (Option<i32>, Option<String>);

    fn business_key(&self) -> Self::Key {
        (self.birth_year, self.gender.clone())
    }
}

/// Combination of arrival, departure and match flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRow {
    pub status_flag_id: i64,
    pub arrival_flag: Option<String>,
    pub departure_flag: Option<String>,
    pub match_flag: Option<String>,
}

impl ArrowSchema for StatusRow {
    const TABLE: &'static str = "status";

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("status_flag_id", DataType::Int64, false),
            Field::new("arrival_flag", DataType::Utf8, true),
            Field::new("departure_flag", DataType::Utf8, true),
            Field::new("match_flag", DataType::Utf8, true),
        ])
    }
}

impl BusinessKey for StatusRow {
    type Key = (Option<String>, Option<String>, Option<String>);

    fn business_key(&self) -> Self::Key {
        (
            self.arrival_flag.clone(),
            self.departure_flag.clone(),
            self.match_flag.clone(),
        )
    }
}

/// Visa category, type and issuing post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaRow {
    pub visa_id: i64,
    pub visa_category: Option<i32>,
    pub visa_type: Option<String>,
    pub visa_post: Option<String>,
}

impl ArrowSchema for VisaRow {
    const TABLE: &'static str = "visa";

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("visa_id", DataType::Int64, false),
            Field::new("visa_category", DataType::Int32, true),
            Field::new("visa_type", DataType::Utf8, true),
            Field::new("visa_post", DataType::Utf8, true),
        ])
    }
}

impl BusinessKey for VisaRow {
    type Key = (Option<i32>, Option<String>, Option<String>);

    fn business_key(&self) -> Self::Key {
        (self.visa_category, self.visa_type.clone(), self.visa_post.clone())
    }
}

/// Aggregated demographics for one US state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRow {
    pub state_code: String,
    pub state: String,
    pub median_age: f64,
    pub male_population: i64,
    pub female_population: i64,
    pub total_population: i64,
    pub foreign_born: i64,
    pub average_household_size: f64,
}

impl ArrowSchema for StateRow {
    const TABLE: &'static str = "state";

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("state_code", DataType::Utf8, false),
            Field::new("state", DataType::Utf8, false),
            Field::new("median_age", DataType::Float64, false),
            Field::new("male_population", DataType::Int64, false),
            Field::new("female_population", DataType::Int64, false),
            Field::new("total_population", DataType::Int64, false),
            Field::new("foreign_born", DataType::Int64, false),
            Field::new("average_household_size", DataType::Float64, false),
        ])
    }
}

impl BusinessKey for StateRow {
    type Key = String;

    fn business_key(&self) -> Self::Key {
        self.state_code.clone()
    }
}

/// Calendar breakdown of one raw arrival day offset
///
/// All calendar columns are null when the offset could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRow {
    pub arrival_date_raw: Option<String>,
    pub arrival_date: Option<NaiveDate>,
    pub day: Option<i32>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub week: Option<i32>,
    pub weekday: Option<i32>,
}

impl ArrowSchema for TimeRow {
    const TABLE: &'static str = "time";

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("arrival_date_raw", DataType::Utf8, true),
            Field::new("arrival_date", DataType::Date32, true),
            Field::new("day", DataType::Int32, true),
            Field::new("month", DataType::Int32, true),
            Field::new("year", DataType::Int32, true),
            Field::new("week", DataType::Int32, true),
            Field::new("weekday", DataType::Int32, true),
        ])
    }
}

impl BusinessKey for TimeRow {
    type Key = Option<String>;

    fn business_key(&self) -> Self::Key {
        self.arrival_date_raw.clone()
    }
}

/// Airport reference data, unique on the airport identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRow {
    pub ident: Option<String>,
    #[serde(rename = "type")]
    pub airport_type: Option<String>,
    pub iata_code: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub municipality: Option<String>,
    pub gps_code: Option<String>,
    pub coordinates: Option<String>,
    pub elevation: Option<f64>,
}

impl ArrowSchema for AirportRow {
    const TABLE: &'static str = "airport";

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("ident", DataType::Utf8, true),
            Field::new("type", DataType::Utf8, true),
            Field::new("iata_code", DataType::Utf8, true),
            Field::new("name", DataType::Utf8, true),
            Field::new("country", DataType::Utf8, true),
            Field::new("region", DataType::Utf8, true),
            Field::new("municipality", DataType::Utf8, true),
            Field::new("gps_code", DataType::Utf8, true),
            Field::new("coordinates", DataType::Utf8, true),
            Field::new("elevation", DataType::Float64, true),
        ])
    }
}

impl BusinessKey for AirportRow {
    type Key = Option<String>;

    fn business_key(&self) -> Self::Key {
        self.ident.clone()
    }
}

/// Average land temperature per country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRow {
    pub temperature_id: i64,
    pub country: String,
    pub average_temperature: f64,
    pub average_temperature_uncertainty: f64,
}

impl ArrowSchema for TemperatureRow {
    const TABLE: &'static str = "temperature";

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("temperature_id", DataType::Int64, false),
            Field::new("country", DataType::Utf8, false),
            Field::new("average_temperature", DataType::Float64, false),
            Field::new("average_temperature_uncertainty", DataType::Float64, false),
        ])
    }
}

impl BusinessKey for TemperatureRow {
    type Key = String;

    fn business_key(&self) -> Self::Key {
        self.country.clone()
    }
}
