//! Status dimension: distinct arrival/departure/match flag combinations.

use std::path::Path;

use crate::dimension::{BuildContext, SurrogateKeyGenerator, dedup_by_business_key};
use crate::error::Result;
use crate::models::{StatusRow, TravelerRecord};

/// Derive status rows, assigning keys before deduplication
#[must_use]
pub fn derive_statuses(travelers: &[TravelerRecord], keys: &SurrogateKeyGenerator) -> Vec<StatusRow> {
    let rows = travelers
        .iter()
        .zip(keys.reserve(travelers.len()))
        .map(|(t, status_flag_id)| StatusRow {
            status_flag_id,
            arrival_flag: t.entdepa.clone(),
            departure_flag: t.entdepd.clone(),
            match_flag: t.matflag.clone(),
        });
    dedup_by_business_key(rows)
}

/// Build and persist the status dimension
pub fn build_status_dimension(
    ctx: &BuildContext<'_>,
    travelers: &[TravelerRecord],
    output: &Path,
) -> Result<Vec<StatusRow>> {
    let rows = derive_statuses(travelers, ctx.keys);
    ctx.persist(&rows, output, "Status dimension")?;
    Ok(rows)
}
