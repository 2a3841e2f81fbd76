use crate::error::EnumberError;
use crate::source::DEFAULT_SOURCE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pipeline settings read from a TOML file. Every field has a default, so an
/// empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub source_url: String,
    pub fetch_timeout_secs: u64,
    /// When set, the raw payload is kept here as `openfoodfacts_raw_YYYYMMDD.json`.
    pub snapshot_dir: Option<PathBuf>,
    /// When set, the CLI also writes `additives_build_YYYYMMDD.log` here.
    pub log_dir: Option<PathBuf>,
    pub include_curated: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            fetch_timeout_secs: 30,
            snapshot_dir: None,
            log_dir: None,
            include_curated: true,
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self, EnumberError> {
        let text = std::fs::read_to_string(path).map_err(|e| EnumberError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&text).map_err(|reason| EnumberError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        let config: PipelineConfig = toml::from_str(text).map_err(|e| e.to_string())?;
        if config.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be greater than zero".into());
        }
        Ok(config)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
