use thiserror::Error;

/// Top-level error type for the `bridgewatch-api` crate.
///
/// Every way a request against the bridget service can fail. The variants
/// are deliberately coarse: `bridgewatch-core` classifies them, so the
/// distinction that matters is *which layer* failed, not the exact cause.
#[derive(Debug, Error)]
pub enum Error {
    // ── Gateway ─────────────────────────────────────────────────────
    /// The local backend gateway could not be reached at all (connection
    /// refused or reset, DNS failure). Any HTTP answer, even a 5xx, is not
    /// offline.
    #[error("Backend offline at {url}: {reason}")]
    Offline { url: String, reason: String },

    // ── Transport ───────────────────────────────────────────────────
    /// Request timed out on our side.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Any other HTTP transport error.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Building the underlying HTTP client failed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Application ─────────────────────────────────────────────────
    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
