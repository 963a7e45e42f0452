// src/utils/errors.rs
//! Engine error types
//!
//! Only infrastructure failures are errors here. A library running out of
//! books is an expected outcome and drives the reader's abandonment
//! transition instead of an error return.

use thiserror::Error;

/// Errors produced by the simulation engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// The trace destination could not be opened at startup.
    /// Fatal before any reader task is launched.
    #[error("trace sink unavailable: {0}")]
    SinkUnavailable(String),

    /// A reader task could not run to a terminal state
    #[error("reader task failed: {0}")]
    TaskFailed(String),

    /// Configuration was loaded but is not usable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration sources could not be read or deserialized
    #[error("configuration error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    /// Underlying I/O failure (trace writer flush, file close)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, EngineError>;
