//! Store error types.

use thiserror::Error;

/// Errors that can occur when talking to a leaderboard store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store refused our credentials.
    #[error("leaderboard rejected credentials: {0}")]
    Unauthorized(String),

    /// The store answered with an error status.
    #[error("leaderboard error (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request timed out.
    #[error("leaderboard request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// Reading or writing a local store failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored or returned data could not be decoded.
    #[error("corrupt leaderboard data: {0}")]
    Corrupt(String),

    /// The store was configured to fail (testing).
    #[error("{0}")]
    Unavailable(String),
}
