//! Dataset loading for the 1746 call dashboard

pub mod config;
pub mod loader;
pub mod parquet_source;
pub mod records;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

use std::path::{Path, PathBuf};
use thiserror::Error;

// Re-exports
pub use config::{DataConfig, DatasetKind};
pub use loader::{Dataset, DatasetLoader, Datasets};
pub use records::{CallRecord, EventOccupancyRecord, Neighborhood, TableRecord};

/// Errors that can occur while loading a dataset
///
/// Both variants are fatal file-access failures: the dashboard cannot start
/// without every dataset and never retries or keeps a partial table.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("cannot open {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    
    #[error("malformed dataset {}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        reason: String,
    },
}

impl DataError {
    pub(crate) fn malformed(path: &Path, reason: impl ToString) -> Self {
        DataError::Malformed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
    
    /// File the error refers to
    pub fn path(&self) -> &Path {
        match self {
            DataError::FileAccess { path, .. } | DataError::Malformed { path, .. } => path,
        }
    }
    
    /// Whether the dataset could not be used at all, missing or corrupt
    pub fn is_file_access(&self) -> bool {
        matches!(self, DataError::FileAccess { .. } | DataError::Malformed { .. })
    }
    
    /// Whether this is a missing or unreadable file rather than bad content
    pub fn is_missing_file(&self) -> bool {
        matches!(self, DataError::FileAccess { .. })
    }
}
