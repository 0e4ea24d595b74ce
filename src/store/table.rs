//! In-memory table: a schema plus the record batches that carry its rows.

use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};

/// A named-column table held as Arrow record batches
///
/// The schema is kept separately from the batches so that a table with no
/// rows still knows its columns.
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Table {
    /// Create a table from a schema and batches sharing that schema
    #[must_use]
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    /// Create a table holding a single batch
    #[must_use]
    pub fn from_batch(batch: RecordBatch) -> Self {
        Self {
            schema: batch.schema(),
            batches: vec![batch],
        }
    }

    /// The table's schema
    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    /// The record batches carrying the rows
    #[must_use]
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total number of rows across all batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Fail with a schema error naming the first required column that is absent
    pub fn require_columns(&self, table: &str, columns: &[&str]) -> Result<()> {
        for column in columns {
            if self.schema.index_of(column).is_err() {
                return Err(Error::missing_column(table, *column));
            }
        }
        Ok(())
    }

    /// Merge all batches into one
    pub fn concat(&self) -> Result<RecordBatch> {
        Ok(concat_batches(&self.schema, &self.batches)?)
    }
}
