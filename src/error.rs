//! Errors returned by the delivery pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or delivering a push notification.
///
/// Unknown notification kinds are not represented here: they resolve to
/// [`NotificationKind::Raw`](crate::NotificationKind::Raw).
#[derive(Debug, Error)]
pub enum MpnsError {
    #[error("Invalid device URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("TLS configuration error for {}: {message}", path_display(.path))]
    TlsConfiguration {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type MpnsResult<T> = Result<T, MpnsError>;

impl MpnsError {
    pub(crate) fn invalid_uri(uri: &str, reason: impl Into<String>) -> Self {
        MpnsError::InvalidUri {
            uri: uri.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn tls(path: Option<PathBuf>, message: impl Into<String>) -> Self {
        MpnsError::TlsConfiguration {
            path,
            message: message.into(),
        }
    }

    pub fn is_invalid_uri(&self) -> bool {
        matches!(self, MpnsError::InvalidUri { .. })
    }

    pub fn is_tls_configuration(&self) -> bool {
        matches!(self, MpnsError::TlsConfiguration { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, MpnsError::Transport(_))
    }
}

fn path_display(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!("{:?}", p),
        None => "ssl settings".to_string(),
    }
}
