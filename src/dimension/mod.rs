//! Dimension builders
//!
//! Each builder derives one dimension table from one raw input, persists it
//! with overwrite semantics and hands the rows back to the caller. Builders
//! are independent of each other and may run concurrently.
//!
//! Every dimension is unique on its business key. The fact assembler relies
//! on that: a duplicated key would fan out traveler rows in the joins.

pub mod aggregate;
pub mod airport;
pub mod country;
pub mod keys;
pub mod migrant;
pub mod state;
pub mod status;
pub mod temperature;
pub mod time;
pub mod visa;

use std::path::Path;

use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::models::{ArrowSchema, BusinessKey};
use crate::store::TableStore;
use crate::utils::logging::log_build_complete;

pub use keys::SurrogateKeyGenerator;

/// Shared collaborators of the dimension builders in one run
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub store: &'a dyn TableStore,
    pub keys: &'a SurrogateKeyGenerator,
    pub verify_uniqueness: bool,
}

impl<'a> BuildContext<'a> {
    #[must_use]
    pub fn new(store: &'a dyn TableStore, keys: &'a SurrogateKeyGenerator) -> Self {
        Self {
            store,
            keys,
            verify_uniqueness: true,
        }
    }

    /// Check, convert and store a finished dimension, then report completion
    ///
    /// Nothing is written if the uniqueness check or the conversion fails.
    pub fn persist<R>(&self, rows: &[R], output: &Path, label: &str) -> Result<()>
    where
        R: ArrowSchema + BusinessKey,
    {
        if self.verify_uniqueness {
            verify_unique(R::TABLE, rows)?;
        }
        let table = R::to_table(rows)?;
        self.store.store(&table, output)?;
        log::debug!("{} rows in {} dimension", rows.len(), R::TABLE);
        log_build_complete(label);
        Ok(())
    }
}

/// Collapse rows sharing a business key, keeping the first one seen
pub fn dedup_by_business_key<R, I>(rows: I) -> Vec<R>
where
    R: BusinessKey,
    I: IntoIterator<Item = R>,
{
    rows.into_iter().unique_by(BusinessKey::business_key).collect()
}

/// Fail if two rows share a business key
pub fn verify_unique<R: BusinessKey>(table: &str, rows: &[R]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for row in rows {
        let key = row.business_key();
        if !seen.insert(key.clone()) {
            return Err(Error::CardinalityViolation {
                table: table.to_string(),
                key: format!("{key:?}"),
            });
        }
    }
    Ok(())
}
