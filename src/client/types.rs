//! Client error types

use thiserror::Error;

/// Failure talking to the dashboard server
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or body read failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not a snapshot object
    #[error("invalid snapshot body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Settings(#[from] super::settings::SettingsError),
}

impl ClientError {
    /// HTTP status code, when the server responded at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
