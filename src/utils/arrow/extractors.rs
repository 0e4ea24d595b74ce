//! Column extraction utilities for tables
//!
//! Each extractor returns one `Option` per row, in row order across all
//! batches of the table. Nulls and uncastable values come back as `None`.

use arrow::array::{Array, PrimitiveArray, StringArray};
use arrow::datatypes::{ArrowPrimitiveType, DataType, Float64Type, Int32Type, Int64Type};

use crate::error::Result;
use crate::store::Table;
use crate::utils::arrow::array_utils::{downcast_array, get_column};

/// Extract a column as strings
pub fn string_values(table: &Table, table_name: &str, column_name: &str) -> Result<Vec<Option<String>>> {
    table.require_columns(table_name, &[column_name])?;

    let mut values = Vec::with_capacity(table.num_rows());
    for batch in table.batches() {
        let array = get_column(batch, table_name, column_name, &DataType::Utf8)?;
        let strings = downcast_array::<StringArray>(&array, table_name, column_name)?;
        values.extend(strings.iter().map(|v| v.map(str::to_string)));
    }
    Ok(values)
}

/// Extract a column as a primitive Arrow type
fn primitive_values<T: ArrowPrimitiveType>(
    table: &Table,
    table_name: &str,
    column_name: &str,
) -> Result<Vec<Option<T::Native>>> {
    table.require_columns(table_name, &[column_name])?;

    let mut values = Vec::with_capacity(table.num_rows());
    for batch in table.batches() {
        let array = get_column(batch, table_name, column_name, &T::DATA_TYPE)?;
        let primitives = downcast_array::<PrimitiveArray<T>>(&array, table_name, column_name)?;
        values.extend(primitives.iter());
    }
    Ok(values)
}

/// Extract a column as 32-bit integers
pub fn int32_values(table: &Table, table_name: &str, column_name: &str) -> Result<Vec<Option<i32>>> {
    primitive_values::<Int32Type>(table, table_name, column_name)
}

/// Extract a column as 64-bit integers
pub fn int64_values(table: &Table, table_name: &str, column_name: &str) -> Result<Vec<Option<i64>>> {
    primitive_values::<Int64Type>(table, table_name, column_name)
}

/// Extract a column as doubles. NaN is preserved; callers decide what it means.
pub fn float64_values(table: &Table, table_name: &str, column_name: &str) -> Result<Vec<Option<f64>>> {
    primitive_values::<Float64Type>(table, table_name, column_name)
}
