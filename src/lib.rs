// src/lib.rs
//! Lectorium Simulation Engine Library
//!
//! Simulates a fixed population of concurrent readers acquiring and releasing
//! scarce books across a ring of libraries, modeling mutual exclusion,
//! resource scarcity, and graceful early termination.
//!
//! # Architecture
//!
//! - **simulation**: libraries, the reader state machine, and the orchestrator
//! - **trace**: channel-fed append-only trace sink
//! - **observability**: tracing and log initialization
//! - **utils**: configuration and error types

// Public module exports
pub mod observability;
pub mod simulation;
pub mod trace;
pub mod utils;

// Re-export commonly used types
pub use simulation::{Library, Reader, ReaderOutcome, Simulation, SimulationReport};
pub use trace::{TraceHandle, TraceRecord, TraceSink, TraceStats};
pub use utils::config::SimulationConfig;
pub use utils::errors::{EngineError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
