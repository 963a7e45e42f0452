// src/trace/sink.rs
//! Channel-fed trace sink
//!
//! Readers emit records through a cloneable `TraceHandle`; a single background
//! writer task drains the channel and appends one line per record to the trace
//! file. Agent-facing code never blocks on file I/O, and the single consumer
//! guarantees records are never interleaved.

use crate::trace::record::TraceRecord;
use crate::utils::errors::{EngineError, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Create a raw trace channel with no file behind it.
///
/// `TraceSink::open` uses this internally; tests and custom consumers can
/// drain the receiver themselves.
pub fn channel() -> (TraceHandle, mpsc::UnboundedReceiver<TraceRecord>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TraceHandle { tx }, rx)
}

/// Cloneable producer side of the trace channel
#[derive(Clone)]
pub struct TraceHandle {
    tx: mpsc::UnboundedSender<TraceRecord>,
}

impl TraceHandle {
    /// Emit a record. Never blocks; records sent after the sink has shut
    /// down are silently dropped.
    pub fn emit(&self, record: TraceRecord) {
        let _ = self.tx.send(record);
    }
}

/// Sink statistics returned at shutdown
#[derive(Debug, Clone, Default)]
pub struct TraceStats {
    /// Records written to the file
    pub records_written: u64,
}

/// File-backed trace sink with a background writer task
pub struct TraceSink {
    handle: TraceHandle,
    writer_task: JoinHandle<Result<TraceStats>>,
}

impl TraceSink {
    /// Open the trace file and start the writer task.
    ///
    /// Failure to open the file is fatal to starting a run; the simulation
    /// never proceeds without an observable trace.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::create(path).await.map_err(|e| {
            EngineError::SinkUnavailable(format!("{}: {}", path.display(), e))
        })?;

        info!("Trace sink opened at {}", path.display());

        let (handle, rx) = channel();
        let writer_task = tokio::spawn(Self::write_loop(rx, BufWriter::new(file)));

        Ok(Self {
            handle,
            writer_task,
        })
    }

    /// Get a producer handle for this sink
    pub fn handle(&self) -> TraceHandle {
        self.handle.clone()
    }

    /// Drain remaining records, flush, and close the file.
    ///
    /// All other handles must be dropped for the writer to observe the end
    /// of the channel; in practice every reader task has already joined by
    /// the time the orchestrator shuts the sink down.
    pub async fn shutdown(self) -> Result<TraceStats> {
        let Self {
            handle,
            writer_task,
        } = self;
        drop(handle);

        let stats = writer_task
            .await
            .map_err(|e| EngineError::TaskFailed(format!("trace writer: {}", e)))??;

        debug!("Trace sink closed after {} records", stats.records_written);
        Ok(stats)
    }

    /// Single-consumer append loop. Flushes after every record so the trace
    /// survives an abnormal exit, matching the original file semantics.
    async fn write_loop(
        mut rx: mpsc::UnboundedReceiver<TraceRecord>,
        mut writer: BufWriter<File>,
    ) -> Result<TraceStats> {
        let mut stats = TraceStats::default();

        while let Some(record) = rx.recv().await {
            let line = format!("{}\n", record);

            if let Err(e) = writer.write_all(line.as_bytes()).await {
                error!("Trace write failed: {}", e);
                return Err(e.into());
            }
            writer.flush().await?;

            stats.records_written += 1;
        }

        writer.shutdown().await?;
        Ok(stats)
    }
}
