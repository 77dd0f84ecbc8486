use crate::tls::TlsSettings;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// Request timeout in seconds. Unset keeps the transport default.
    pub timeout_sec: Option<u64>,

    /// Same keys as the `ssl` entry of a notification's options.
    pub ssl: Option<TlsSettings>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
