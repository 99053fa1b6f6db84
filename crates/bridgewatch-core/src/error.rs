// ── Core error types ──
//
// `CoreError` is what fallible engine calls return. `FailureKind` and
// `SyncFailure` are the classified form a sync cycle records instead of
// propagating: cycles never return errors, they commit them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Backend offline at {url}: {reason}")]
    Offline { url: String, reason: String },

    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<bridgewatch_api::Error> for CoreError {
    fn from(err: bridgewatch_api::Error) -> Self {
        let status = err.status();
        match err {
            bridgewatch_api::Error::Offline { url, reason } => CoreError::Offline { url, reason },
            bridgewatch_api::Error::Timeout { timeout_ms } => CoreError::Timeout { timeout_ms },
            bridgewatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            bridgewatch_api::Error::ClientBuild(message) => CoreError::Config { message },
            other @ (bridgewatch_api::Error::Http { .. }
            | bridgewatch_api::Error::Transport(_)
            | bridgewatch_api::Error::Deserialization { .. }) => CoreError::Api {
                message: other.to_string(),
                status,
            },
        }
    }
}

// ── Classification ───────────────────────────────────────────────────

/// Coarse classification that decides whether a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The local gateway is unreachable; expected during backend restarts.
    Offline,
    Other,
}

/// Finer failure taxonomy kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Offline,
    Timeout,
    /// HTTP error status, malformed payload, or any other transport fault.
    Application,
}

impl FailureKind {
    /// Classify an API error by variant.
    pub fn of(err: &bridgewatch_api::Error) -> Self {
        match err {
            bridgewatch_api::Error::Offline { .. } => Self::Offline,
            bridgewatch_api::Error::Timeout { .. } => Self::Timeout,
            bridgewatch_api::Error::Http { .. }
            | bridgewatch_api::Error::Transport(_)
            | bridgewatch_api::Error::InvalidUrl(_)
            | bridgewatch_api::Error::ClientBuild(_)
            | bridgewatch_api::Error::Deserialization { .. } => Self::Application,
        }
    }

    pub fn class(self) -> FailureClass {
        match self {
            Self::Offline => FailureClass::Offline,
            Self::Timeout | Self::Application => FailureClass::Other,
        }
    }
}

/// Map a failure to {Offline, Other}.
pub fn classify(err: &bridgewatch_api::Error) -> FailureClass {
    FailureKind::of(err).class()
}

/// A classified failure as recorded on a resource record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    pub kind: FailureKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl SyncFailure {
    pub fn from_error(err: &bridgewatch_api::Error) -> Self {
        Self {
            kind: FailureKind::of(err),
            message: err.to_string(),
            at: Utc::now(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.kind == FailureKind::Offline
    }
}
