//! Application configuration
//!
//! Read from `dashboard.json` in the working directory when present. Every
//! field is optional; missing ones keep the defaults below.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cd_data::DataConfig;
use serde::{Deserialize, Serialize};

/// Configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub assets: AssetConfig,
    pub window: WindowConfig,
    /// Maximum tracing level: error, warn, info, debug or trace
    pub log_level: String,
}

/// Static assets shown by the sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub stylesheet: PathBuf,
    pub logo: PathBuf,
    /// Opened when the logo is clicked
    pub support_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            assets: AssetConfig::default(),
            window: WindowConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            stylesheet: PathBuf::from("assets/styles.css"),
            logo: PathBuf::from("assets/logo-1746.png"),
            support_url: "https://www.1746.rio/hc/pt-br".to_string(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        // Wide layout
        Self {
            title: "Chamados ao 1746 Dashboard".to_string(),
            width: 1440.0,
            height: 900.0,
        }
    }
}

impl AppConfig {
    /// Read `path`, or return the defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))
    }
    
    /// The configured log level, `info` when it cannot be parsed
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
    
    /// URI the egui image loaders resolve the logo from
    pub fn logo_uri(&self) -> String {
        format!("file://{}", self.assets.logo.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.window.title, "Chamados ao 1746 Dashboard");
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }
    
    #[test]
    fn test_partial_file_overrides_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "data": { "data_dir": "/srv/1746" }, "log_level": "debug" }"#).unwrap();
        
        let config = AppConfig::load(&path).unwrap();
        
        assert_eq!(config.data.data_dir, PathBuf::from("/srv/1746"));
        assert_eq!(config.data.calls_file, "chamado_1746.parquet");
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
        assert_eq!(config.assets, AssetConfig::default());
    }
    
    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ data_dir = 'x' }").unwrap();
        
        assert!(AppConfig::load(&path).is_err());
    }
    
    #[test]
    fn test_logo_uri() {
        assert_eq!(AppConfig::default().logo_uri(), "file://assets/logo-1746.png");
    }
}
