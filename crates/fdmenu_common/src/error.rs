//! Menu service error taxonomy.
//!
//! Only `InvalidQuery` is the caller's fault; everything upstream-shaped is
//! recovered internally where a manual fallback exists and surfaces as
//! `Upstream` only when it does not.

use thiserror::Error;

/// Errors surfaced by the menu service to HTTP handlers and CLI callers.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Malformed request; never retried.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Upstream unreachable (or persistently non-2xx) and no fallback applied.
    #[error("upstream unavailable: {0}")]
    Upstream(String),

    /// Anything unexpected; caught at the handler boundary.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MenuError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            MenuError::InvalidQuery(_) => 400,
            MenuError::Upstream(_) => 502,
            MenuError::Internal(_) => 500,
        }
    }
}
