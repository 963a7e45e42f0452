// src/main.rs
//! Lectorium Simulation Engine
//!
//! Runs one readers-and-libraries simulation from configuration: N reader
//! tasks traverse M libraries of K books in circular order until every reader
//! completes its budget or abandons on an empty shelf.

use anyhow::Result;
use lectorium::observability::init_tracing;
use lectorium::trace::{TraceRecord, TraceSink};
use lectorium::utils::config::SimulationConfig;
use lectorium::Simulation;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    info!("Starting Lectorium simulation engine v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = SimulationConfig::load()?;
    info!("Configuration loaded: {:?}", config);

    // The trace sink must be open before any reader launches; a run without
    // an observable trace never starts.
    let sink = TraceSink::open(&config.trace_path).await?;
    let trace = sink.handle();
    trace.emit(TraceRecord::simulation("simulation started"));

    let simulation = Simulation::new(config, trace.clone())?;
    let result = simulation.run().await;

    trace.emit(TraceRecord::simulation("simulation finished"));
    drop(trace);

    // Flush the trace even when the run failed; the log is the evidence.
    let stats = sink.shutdown().await?;

    let report = result?;
    info!(
        completed = report.completed(),
        abandoned = report.abandoned(),
        trace_records = stats.records_written,
        "simulation finished"
    );

    Ok(())
}
