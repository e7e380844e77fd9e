//! Memoized dataset loading
//!
//! Each dataset is read from disk at most once per [`DatasetLoader`]; later
//! calls hand out the same `Arc`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use once_cell::sync::OnceCell;

use crate::config::{DataConfig, DatasetKind};
use crate::parquet_source::read_parquet;
use crate::records::{CallRecord, EventOccupancyRecord, Neighborhood, TableRecord};
use crate::DataError;

/// Rows shown in the debug preview logged after a load
const PREVIEW_ROWS: usize = 5;

/// An immutable table: the columnar batch and the typed rows read from it
#[derive(Debug)]
pub struct Dataset<R> {
    path: PathBuf,
    batch: RecordBatch,
    rows: Vec<R>,
}

impl<R: TableRecord> Dataset<R> {
    /// Read and type the dataset stored at `path`
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let started = Instant::now();
        
        let batch = read_parquet(path, R::COLUMNS)?;
        let rows = R::from_batch(&batch).map_err(|reason| DataError::malformed(path, reason))?;
        
        tracing::info!(
            "Loaded {} ({} rows, {} columns) in {:?}",
            R::DATASET,
            rows.len(),
            batch.num_columns(),
            started.elapsed()
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            let head = batch.slice(0, batch.num_rows().min(PREVIEW_ROWS));
            if let Ok(preview) = arrow::util::pretty::pretty_format_batches(&[head]) {
                tracing::debug!("{} preview:\n{}", R::DATASET, preview);
            }
        }
        
        Ok(Self {
            path: path.to_path_buf(),
            batch,
            rows,
        })
    }
}

impl<R> Dataset<R> {
    /// File the dataset was read from
    pub fn path(&self) -> &Path {
        &self.path
    }
    
    /// Columnar view of the table
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }
    
    /// Typed rows
    pub fn rows(&self) -> &[R] {
        &self.rows
    }
    
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three loaded tables
#[derive(Debug, Clone)]
pub struct Datasets {
    pub calls: Arc<Dataset<CallRecord>>,
    pub neighborhoods: Arc<Dataset<Neighborhood>>,
    pub events: Arc<Dataset<EventOccupancyRecord>>,
}

/// Loads each dataset on first use and caches it for the loader's lifetime
pub struct DatasetLoader {
    config: DataConfig,
    calls: OnceCell<Arc<Dataset<CallRecord>>>,
    neighborhoods: OnceCell<Arc<Dataset<Neighborhood>>>,
    events: OnceCell<Arc<Dataset<EventOccupancyRecord>>>,
}

impl DatasetLoader {
    /// Create a loader; nothing is read until a dataset is requested
    pub fn new(config: DataConfig) -> Self {
        Self {
            config,
            calls: OnceCell::new(),
            neighborhoods: OnceCell::new(),
            events: OnceCell::new(),
        }
    }
    
    pub fn config(&self) -> &DataConfig {
        &self.config
    }
    
    /// Service calls: id, start timestamp, type, subtype and neighborhood
    pub fn calls(&self) -> Result<Arc<Dataset<CallRecord>>, DataError> {
        self.cached(&self.calls, DatasetKind::Calls)
    }
    
    /// Neighborhoods: id, name, sub-prefecture and boundary
    pub fn neighborhoods(&self) -> Result<Arc<Dataset<Neighborhood>>, DataError> {
        self.cached(&self.neighborhoods, DatasetKind::Neighborhoods)
    }
    
    /// Hotel occupancy during city events, all columns
    pub fn events(&self) -> Result<Arc<Dataset<EventOccupancyRecord>>, DataError> {
        self.cached(&self.events, DatasetKind::Events)
    }
    
    /// Load every dataset, stopping at the first failure
    pub fn load_all(&self) -> Result<Datasets, DataError> {
        Ok(Datasets {
            calls: self.calls()?,
            neighborhoods: self.neighborhoods()?,
            events: self.events()?,
        })
    }
    
    fn cached<R: TableRecord>(
        &self,
        cell: &OnceCell<Arc<Dataset<R>>>,
        kind: DatasetKind,
    ) -> Result<Arc<Dataset<R>>, DataError> {
        if let Some(dataset) = cell.get() {
            tracing::trace!("{} served from cache", kind.name());
            return Ok(dataset.clone());
        }
        
        let path = self.config.path_for(kind);
        cell.get_or_try_init(|| Dataset::load(&path).map(Arc::new))
            .cloned()
    }
}
