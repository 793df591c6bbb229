use std::path::PathBuf;

use anyhow::{Context, Result};

/// Filesystem layout for the tool's persisted state.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("amorcast")
        });

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(Config { data_dir })
    }

    /// Default location of the trained model artifact.
    pub fn model_file(&self) -> PathBuf {
        self.data_dir.join("model.json")
    }
}
