//! Utilities for working with Arrow arrays.
//!
//! Raw sources arrive with whatever physical types the upstream export chose
//! (numeric codes stored as doubles, years stored as strings, ...). Columns
//! are cast to the type the model expects; values that cannot be cast become
//! null instead of failing the whole column.

use arrow::array::{Array, ArrayRef};
use arrow::compute::kernels::cast::{CastOptions, cast_with_options};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Error, Result};

/// Get a column from a record batch, cast to the expected type
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `table` - Name of the table (for error messages)
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The data type the caller wants
///
/// # Errors
///
/// Returns a schema error if the column is absent, or an Arrow error if the
/// cast between the two types is not supported at all.
pub fn get_column(
    batch: &RecordBatch,
    table: &str,
    column_name: &str,
    expected_type: &DataType,
) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(column_name)
        .map_err(|_| Error::missing_column(table, column_name))?;

    let column = batch.column(idx);
    let actual_type = column.data_type();
    if actual_type == expected_type {
        return Ok(column.clone());
    }

    debug!("Converting column '{column_name}' of '{table}' from {actual_type:?} to {expected_type:?}");

    let options = CastOptions {
        safe: true,
        ..Default::default()
    };

    // Integers are reached through Float64 so that "1984.0" and 1984.0 both land on 1984
    if expected_type.is_integer() && !actual_type.is_integer() && actual_type != &DataType::Float64 {
        let as_float = cast_with_options(column, &DataType::Float64, &options)?;
        return Ok(cast_with_options(&as_float, expected_type, &options)?);
    }

    Ok(cast_with_options(column, expected_type, &options)?)
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    table: &str,
    column_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| Error::missing_column(table, format!("{column_name} (unexpected type)")))
}
