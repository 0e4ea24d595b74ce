//! Trait definitions for table records

use std::hash::Hash;
use std::sync::Arc;

use arrow::datatypes::{FieldRef, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::store::Table;

/// A trait for records that can be converted to and from Arrow `RecordBatch`.
///
/// The schema is declared explicitly rather than traced from samples so that
/// an empty table still gets the right column types, and so that a persisted
/// table missing one of the columns is reported as a schema error instead of
/// a deserialization failure.
pub trait ArrowSchema: Serialize + DeserializeOwned + Sized {
    /// Table name used in log lines and errors
    const TABLE: &'static str;

    /// Get the Arrow schema for this record
    fn schema() -> Schema;

    /// Get the schema as `Arc<Schema>`
    fn schema_ref() -> SchemaRef {
        Arc::new(Self::schema())
    }

    /// Convert a slice of records to a `RecordBatch`
    fn to_record_batch(rows: &[Self]) -> Result<RecordBatch> {
        let fields: Vec<FieldRef> = Self::schema().fields().iter().cloned().collect();
        serde_arrow::to_record_batch(&fields, &rows)
            .map_err(|e| Error::serialization(Self::TABLE, e))
    }

    /// Convert a `RecordBatch` to records
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        serde_arrow::from_record_batch(batch).map_err(|e| Error::serialization(Self::TABLE, e))
    }

    /// Convert records to a single-batch table
    fn to_table(rows: &[Self]) -> Result<Table> {
        let batch = Self::to_record_batch(rows)?;
        Ok(Table::new(Self::schema_ref(), vec![batch]))
    }

    /// Convert a table to records, checking every schema column is present first
    fn from_table(table: &Table) -> Result<Vec<Self>> {
        let schema = Self::schema();
        let columns: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        table.require_columns(Self::TABLE, &columns)?;

        let mut rows = Vec::with_capacity(table.num_rows());
        for batch in table.batches() {
            let projected = batch.project(
                &columns
                    .iter()
                    .map(|c| batch.schema().index_of(c))
                    .collect::<std::result::Result<Vec<_>, _>>()?,
            )?;
            rows.extend(Self::from_record_batch(&projected)?);
        }
        Ok(rows)
    }
}

/// Records that belong to a dimension and are unique on a business key
pub trait BusinessKey {
    /// The business key; `None` components compare equal to each other
    type Key: Eq + Hash + Clone + std::fmt::Debug;

    /// The business key of this row
    fn business_key(&self) -> Self::Key;
}
