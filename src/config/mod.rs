//! Configuration for the `mpns-push` binary.
//!
//! The library itself takes everything as explicit parameters; this module
//! only merges command line flags with an optional TOML file.

mod file_config;

pub use file_config::FileConfig;

use crate::tls::{TlsSettings, VerifyMode};
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub timeout_sec: Option<u64>,
    pub ssl_cert: Option<PathBuf>,
    pub ssl_key: Option<PathBuf>,
    pub ca_file: Option<PathBuf>,
    pub verify_mode: Option<VerifyMode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub timeout: Option<Duration>,
    pub tls: Option<TlsSettings>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    ///
    /// TLS file paths are not checked here; a bad path fails the delivery
    /// itself, before anything is sent.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Self {
        let file = file_config.unwrap_or_default();

        let timeout = file
            .timeout_sec
            .or(cli.timeout_sec)
            .map(Duration::from_secs);

        // A TOML [ssl] table replaces the CLI TLS flags as a whole
        let tls = file.ssl.or_else(|| {
            let from_cli = TlsSettings {
                client_cert_file: cli.ssl_cert.clone(),
                ca_file: cli.ca_file.clone(),
                key_file: cli.ssl_key.clone(),
                verify_mode: cli.verify_mode,
            };
            (!from_cli.is_empty()).then_some(from_cli)
        });

        Self { timeout, tls }
    }
}
