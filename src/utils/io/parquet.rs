//! Parquet file operations
//!
//! Low-level helpers for reading and writing single Parquet files and
//! directories of part files. Table-level semantics (overwrite, missing
//! dependencies) live in [`crate::store`].

use std::fs::File;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::store::Table;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Read a parquet file into a table
///
/// # Arguments
/// * `path` - Path to the Parquet file
/// * `batch_size` - Rows per record batch
///
/// # Errors
/// Returns an error if the file cannot be opened or if the Parquet file is invalid
pub fn read_parquet(path: &Path, batch_size: usize) -> Result<Table> {
    let start = std::time::Instant::now();
    log_operation_start("Reading parquet file", path);

    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(batch_size);
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    let table = Table::new(schema, batches);

    log_operation_complete("read", path, table.num_rows(), Some(start.elapsed()));
    Ok(table)
}

/// Write a table into a single parquet file, replacing the file if present
///
/// # Arguments
/// * `table` - The table to write
/// * `path` - Destination file
/// * `batch_size` - Maximum rows per row group
pub fn write_parquet(table: &Table, path: &Path, batch_size: usize) -> Result<()> {
    let start = std::time::Instant::now();
    log_operation_start("Writing parquet file", path);

    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_max_row_group_size(batch_size)
        .build();

    let mut writer = ArrowWriter::try_new(file, table.schema(), Some(props))?;
    for batch in table.batches() {
        writer.write(batch)?;
    }
    writer.close()?;

    log_operation_complete("wrote", path, table.num_rows(), Some(start.elapsed()));
    Ok(())
}

/// Find all Parquet part files in a directory, sorted by file name
///
/// Marker files such as `_SUCCESS` and hidden files are skipped.
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        let visible = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| !n.starts_with('_') && !n.starts_with('.'));
        if visible && path.is_file() && path.extension().is_some_and(|ext| ext == "parquet") {
            files.push(path);
        }
    }

    let files = files.into_iter().sorted().collect_vec();
    if files.is_empty() {
        log_warning("No Parquet files found in directory", Some(dir));
    }
    Ok(files)
}

/// Load all parquet files from a directory in parallel, one table per file
///
/// The returned tables are in file-name order.
pub fn load_parquet_files_parallel(dir: &Path, batch_size: usize) -> Result<Vec<Table>> {
    let files = find_parquet_files(dir)?;

    let tables = files
        .par_iter()
        .map(|path| read_parquet(path, batch_size))
        .collect::<Result<Vec<_>>>()?;

    log::info!(
        "Successfully loaded {} Parquet files from {}",
        tables.len(),
        dir.display()
    );
    Ok(tables)
}
