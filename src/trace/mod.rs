// src/trace/mod.rs
//! Execution trace capture
//!
//! The trace is the observable record of a run: an ordered, append-only log
//! of reader and orchestrator events. Producers push records into a channel
//! through a cloneable handle and a single background task owns the file, so
//! writes are serialized without any agent ever blocking on I/O contention.
//!
//! ```text
//! Reader 0 ─┐
//! Reader 1 ─┼─ TraceHandle::emit ──> channel ──> writer task ──> trace file
//! Reader N ─┘
//! ```

pub mod record;
pub mod sink;

pub use record::TraceRecord;
pub use sink::{channel, TraceHandle, TraceSink, TraceStats};
