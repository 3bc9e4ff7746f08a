//! Error types for the sync layer.

use linkmark_core::BookmarkError;

/// Errors that can occur while scheduling or running a sync pass.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// No usable network connection.
    #[error("device is offline")]
    Offline,

    /// Periodic sync is turned off.
    #[error("periodic sync is disabled")]
    Disabled,

    /// Another sync pass is still running.
    #[error("a sync pass is already running, try again later")]
    Busy,

    /// A sync pass took too long.
    #[error("sync timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// A repository call failed.
    #[error("repository error: {0}")]
    Repository(#[from] BookmarkError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SyncError {
    /// Creates a new invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Offline | Self::Busy | Self::Timeout { .. } => true,
            Self::Repository(e) => e.is_transient(),
            Self::Disabled | Self::InvalidConfig(_) => false,
        }
    }
}
