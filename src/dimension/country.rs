//! Country dimension: the reference table is already clean and is copied as is.

use std::path::Path;

use crate::dimension::BuildContext;
use crate::error::Result;
use crate::store::Table;
use crate::utils::logging::log_build_complete;

/// Persist the country reference table unchanged
///
/// The output keeps the input schema and rows exactly.
pub fn build_country_dimension(ctx: &BuildContext<'_>, countries: &Table, output: &Path) -> Result<Table> {
    ctx.store.store(countries, output)?;
    log_build_complete("Country dimension");
    Ok(countries.clone())
}
