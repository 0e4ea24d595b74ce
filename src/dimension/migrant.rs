//! Migrant dimension: distinct (birth year, gender) profiles.

use std::path::Path;

use crate::dimension::{BuildContext, SurrogateKeyGenerator, dedup_by_business_key};
use crate::error::Result;
use crate::models::{MigrantRow, TravelerRecord};

/// Derive migrant rows. Keys are assigned per traveler before duplicates are collapsed.
#[must_use]
pub fn derive_migrants(travelers: &[TravelerRecord], keys: &SurrogateKeyGenerator) -> Vec<MigrantRow> {
    let rows = travelers
        .iter()
        .zip(keys.reserve(travelers.len()))
        .map(|(t, migrant_id)| MigrantRow {
            migrant_id,
            birth_year: t.biryear,
            gender: t.gender.clone(),
        });
    dedup_by_business_key(rows)
}

/// Build and persist the migrant dimension
pub fn build_migrant_dimension(
    ctx: &BuildContext<'_>,
    travelers: &[TravelerRecord],
    output: &Path,
) -> Result<Vec<MigrantRow>> {
    let rows = derive_migrants(travelers, ctx.keys);
    ctx.persist(&rows, output, "Migrant dimension")?;
    Ok(rows)
}
