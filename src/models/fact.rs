//! Immigration fact table record

use arrow::datatypes::{DataType, Field, Schema};
use serde::{Deserialize, Serialize};

use crate::models::traits::ArrowSchema;

/// One traveler record resolved against every dimension
///
/// Dimension references are `None` when the traveler's lookup key had no
/// match in that dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmigrationFactRow {
    pub cicid: i64,
    pub residence_country_code: Option<i32>,
    pub departure_date: Option<i64>,
    pub travel_mode: Option<i32>,
    pub port_code: Option<String>,
    pub citizenship_country_code: Option<i32>,
    pub addr_state_code: Option<String>,
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    /// Airport dimension key
    pub airport_ident: Option<String>,
    /// Country code resolved through the country-temperature view
    pub country_code: Option<i32>,
    pub temperature_id: Option<i64>,
    pub migrant_id: Option<i64>,
    pub status_flag_id: Option<i64>,
    pub visa_id: Option<i64>,
    pub state_code: Option<String>,
    /// Time dimension key, taken from the time dimension side of the join
    pub arrival_date_raw: Option<String>,
}

impl ArrowSchema for ImmigrationFactRow {
    const TABLE: &'static str = "immigration_fact";

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("cicid", DataType::Int64, false),
            Field::new("residence_country_code", DataType::Int32, true),
            Field::new("departure_date", DataType::Int64, true),
            Field::new("travel_mode", DataType::Int32, true),
            Field::new("port_code", DataType::Utf8, true),
            Field::new("citizenship_country_code", DataType::Int32, true),
            Field::new("addr_state_code", DataType::Utf8, true),
            Field::new("airline", DataType::Utf8, true),
            Field::new("flight_number", DataType::Utf8, true),
            Field::new("airport_ident", DataType::Utf8, true),
            Field::new("country_code", DataType::Int32, true),
            Field::new("temperature_id", DataType::Int64, true),
            Field::new("migrant_id", DataType::Int64, true),
            Field::new("status_flag_id", DataType::Int64, true),
            Field::new("visa_id", DataType::Int64, true),
            Field::new("state_code", DataType::Utf8, true),
            Field::new("arrival_date_raw", DataType::Utf8, true),
        ])
    }
}
