//! Utility modules for Arrow columns, Parquet IO and logging

pub mod arrow;
pub mod io;
pub mod logging;
