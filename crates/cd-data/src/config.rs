//! Dataset locations

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// The three datasets the dashboard reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Calls,
    Neighborhoods,
    Events,
}

impl DatasetKind {
    /// Name used in log lines
    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Calls => "chamado_1746",
            DatasetKind::Neighborhoods => "bairro",
            DatasetKind::Events => "rede_hoteleira_ocupacao_eventos",
        }
    }
    
    /// Default file name inside the data directory
    pub fn default_file(self) -> String {
        format!("{}.parquet", self.name())
    }
}

/// Where the parquet files live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the dataset files
    pub data_dir: PathBuf,
    
    /// Service calls file name
    pub calls_file: String,
    
    /// Neighborhood boundaries file name
    pub neighborhoods_file: String,
    
    /// Hotel occupancy events file name
    pub events_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            calls_file: DatasetKind::Calls.default_file(),
            neighborhoods_file: DatasetKind::Neighborhoods.default_file(),
            events_file: DatasetKind::Events.default_file(),
        }
    }
}

impl DataConfig {
    /// Config reading the default file names from `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
    
    /// Full path of a dataset file
    pub fn path_for(&self, kind: DatasetKind) -> PathBuf {
        let file = match kind {
            DatasetKind::Calls => &self.calls_file,
            DatasetKind::Neighborhoods => &self.neighborhoods_file,
            DatasetKind::Events => &self.events_file,
        };
        self.data_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_default_paths() {
        let config = DataConfig::default();
        assert_eq!(config.path_for(DatasetKind::Calls), PathBuf::from("data/chamado_1746.parquet"));
        assert_eq!(config.path_for(DatasetKind::Neighborhoods), PathBuf::from("data/bairro.parquet"));
        assert_eq!(
            config.path_for(DatasetKind::Events),
            PathBuf::from("data/rede_hoteleira_ocupacao_eventos.parquet")
        );
    }
    
    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: DataConfig = serde_json::from_str(r#"{ "data_dir": "/srv/1746" }"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/1746"));
        assert_eq!(config.calls_file, "chamado_1746.parquet");
    }
}
