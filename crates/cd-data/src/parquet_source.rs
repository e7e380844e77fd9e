//! Parquet file reading into a single Arrow record batch

use std::fs::File;
use std::path::Path;

use arrow::compute::concat_batches;
use arrow::record_batch::{RecordBatch, RecordBatchReader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;

use crate::DataError;

/// Read a whole parquet file, optionally keeping only `columns`.
///
/// When `columns` is given the resulting batch holds exactly those columns, in
/// that order; any name missing from the file makes the dataset malformed.
/// The file handle is dropped before returning on every path.
pub fn read_parquet(path: &Path, columns: Option<&[&str]>) -> Result<RecordBatch, DataError> {
    let file = File::open(path).map_err(|source| DataError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DataError::malformed(path, e))?;
    
    let builder = match columns {
        Some(columns) => {
            let file_schema = builder.schema().clone();
            let mut roots = Vec::with_capacity(columns.len());
            for column in columns {
                let idx = file_schema
                    .index_of(column)
                    .map_err(|_| DataError::malformed(path, format!("missing column '{}'", column)))?;
                roots.push(idx);
            }
            let mask = ProjectionMask::roots(builder.parquet_schema(), roots);
            builder.with_projection(mask)
        }
        None => builder,
    };
    
    let reader = builder.build().map_err(|e| DataError::malformed(path, e))?;
    let schema = reader.schema();
    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DataError::malformed(path, e))?;
    let batch = concat_batches(&schema, &batches).map_err(|e| DataError::malformed(path, e))?;
    
    // The projection mask keeps file order; put columns in the requested order
    match columns {
        Some(columns) => {
            let order = columns
                .iter()
                .map(|column| batch.schema().index_of(column))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| DataError::malformed(path, e))?;
            batch.project(&order).map_err(|e| DataError::malformed(path, e))
        }
        None => Ok(batch),
    }
}
