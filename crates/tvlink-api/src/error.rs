use thiserror::Error;

/// Top-level error type for the `tvlink-api` crate.
///
/// Everything that can go wrong between handing a [`KeyRequest`](crate::KeyRequest)
/// to an executor and getting its reply string back. `tvlink-core` passes
/// these through to callers unchanged.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Executor ────────────────────────────────────────────────────
    /// The executor answered, but with a non-success status.
    #[error("Executor rejected the command (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Failure reported by an in-process executor.
    #[error("Executor failed: {0}")]
    Backend(String),
}

impl Error {
    /// Returns `true` if the executor (or the TV behind it) could not be reached.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
