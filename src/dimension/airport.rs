//! Airport dimension: one row per airport identifier.

use std::path::Path;

use crate::dimension::{BuildContext, dedup_by_business_key};
use crate::error::Result;
use crate::models::{AirportRecord, AirportRow};

#[must_use]
pub fn derive_airports(airports: &[AirportRecord]) -> Vec<AirportRow> {
    dedup_by_business_key(airports.iter().map(|a| AirportRow {
        ident: a.ident.clone(),
        airport_type: a.airport_type.clone(),
        iata_code: a.iata_code.clone(),
        name: a.name.clone(),
        country: a.iso_country.clone(),
        region: a.iso_region.clone(),
        municipality: a.municipality.clone(),
        gps_code: a.gps_code.clone(),
        coordinates: a.coordinates.clone(),
        elevation: a.elevation_ft,
    }))
}

/// Build and persist the airport dimension
pub fn build_airport_dimension(
    ctx: &BuildContext<'_>,
    airports: &[AirportRecord],
    output: &Path,
) -> Result<Vec<AirportRow>> {
    let rows = derive_airports(airports);
    ctx.persist(&rows, output, "Airport codes dimension")?;
    Ok(rows)
}
