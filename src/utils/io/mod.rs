//! IO utilities for Parquet table locations

pub mod parquet;

pub use parquet::{find_parquet_files, load_parquet_files_parallel, read_parquet, write_parquet};
