//! Arrow data handling utilities
//!
//! Helpers for pulling typed column values out of raw tables whose physical
//! column types are not under our control.

pub mod array_utils;
pub mod extractors;

pub use array_utils::{downcast_array, get_column};
pub use extractors::{float64_values, int32_values, int64_values, string_values};
