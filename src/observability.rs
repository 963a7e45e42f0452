// src/observability.rs
//! Tracing and log initialization

use crate::utils::errors::{EngineError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to `info` so console progress lines mirror the
/// trace events without drowning them in per-scan noise.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| EngineError::InvalidConfig(format!("tracing init failed: {}", e)))?;

    Ok(())
}
