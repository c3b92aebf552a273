//! Configuration loading and parsing

use anyhow::{Context, Result};
use retron5_decoder::DecoderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for extracted saves (default: next to the input file)
    pub dir: Option<PathBuf>,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub overwrite: bool,
}

fn default_extension() -> String {
    "srm".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: default_extension(),
            overwrite: false,
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if config.output.extension.trim_start_matches('.').is_empty() {
        anyhow::bail!("Config file {:?}: output.extension must not be empty", path);
    }

    Ok(config)
}
