// src/simulation/mod.rs
//! Concurrent readers-and-libraries simulation
//!
//! N readers share M libraries of K books each. Every reader starts at
//! library `id % M`, checks a book out, reads for a randomized delay with no
//! lock held, returns it, and advances to the next library in circular order.
//! A scan that finds an empty shelf is terminal: the reader abandons and
//! never visits another library.
//!
//! # Architecture
//!
//! ```text
//! Simulation (orchestrator)
//! ├─ Library 0 [mutex + shelf bitmap]
//! ├─ Library 1 [mutex + shelf bitmap]
//! ├─ Library 2 [mutex + shelf bitmap]
//! └─ Reader tasks 0..N ── checkout / return, one lock at a time
//! ```
//!
//! Each library guards its own shelf with its own mutex, no lock is ever held
//! across the read delay, and no reader holds two locks at once, which makes
//! deadlock structurally impossible.

pub mod library;
pub mod orchestrator;
pub mod reader;

pub use library::Library;
pub use orchestrator::{Simulation, SimulationReport};
pub use reader::{Reader, ReaderOutcome};
