//! Visa dimension: distinct (category, type, issuing post) triples.

use std::path::Path;

use crate::dimension::{BuildContext, SurrogateKeyGenerator, dedup_by_business_key};
use crate::error::Result;
use crate::models::{TravelerRecord, VisaRow};

/// Derive visa rows, assigning keys before deduplication
#[must_use]
pub fn derive_visas(travelers: &[TravelerRecord], keys: &SurrogateKeyGenerator) -> Vec<VisaRow> {
    let rows = travelers
        .iter()
        .zip(keys.reserve(travelers.len()))
        .map(|(t, visa_id)| VisaRow {
            visa_id,
            visa_category: t.i94visa,
            visa_type: t.visatype.clone(),
            visa_post: t.visapost.clone(),
        });
    dedup_by_business_key(rows)
}

/// Build and persist the visa dimension
pub fn build_visa_dimension(
    ctx: &BuildContext<'_>,
    travelers: &[TravelerRecord],
    output: &Path,
) -> Result<Vec<VisaRow>> {
    let rows = derive_visas(travelers, ctx.keys);
    ctx.persist(&rows, output, "Visa dimension")?;
    Ok(rows)
}
