//! Shared error type across routeStat crates.
//!
//! Errors only exist at construction time (config, socket setup). Request-time
//! paths never produce one.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, RouteStatError>;

/// Unified error type used by core and middleware.
#[derive(Debug, Error)]
pub enum RouteStatError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("transport: {0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl RouteStatError {
    /// Stable short label, handy for logs and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteStatError::InvalidConfig(_) => "INVALID_CONFIG",
            RouteStatError::UnsupportedVersion => "UNSUPPORTED_VERSION",
            RouteStatError::Transport(_) => "TRANSPORT",
            RouteStatError::Internal(_) => "INTERNAL",
        }
    }
}
