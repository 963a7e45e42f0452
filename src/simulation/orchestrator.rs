// src/simulation/orchestrator.rs
//! Simulation orchestrator
//!
//! Builds the libraries, launches one task per reader, waits for every reader
//! to reach a terminal outcome, and reports. Teardown is deterministic: by the
//! time the report exists, no task is still running and no checkout is in
//! flight, so the libraries can simply be dropped.

use crate::simulation::library::Library;
use crate::simulation::reader::{Reader, ReaderOutcome};
use crate::trace::{TraceHandle, TraceRecord};
use crate::utils::config::SimulationConfig;
use crate::utils::errors::{EngineError, Result};
use std::sync::Arc;
use tracing::{error, info};

/// End-of-run summary
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Terminal outcome per reader, indexed by reader id
    pub outcomes: Vec<ReaderOutcome>,

    /// Books on the shelf per library after teardown
    pub books_available: Vec<usize>,
}

impl SimulationReport {
    /// Readers that exhausted their iteration budget
    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ReaderOutcome::Completed { .. }))
            .count()
    }

    /// Readers that gave up on a failed scan
    pub fn abandoned(&self) -> usize {
        self.outcomes.len() - self.completed()
    }
}

/// One simulation run: M libraries shared by N reader tasks
pub struct Simulation {
    config: SimulationConfig,
    libraries: Arc<Vec<Library>>,
    trace: TraceHandle,
}

impl Simulation {
    /// Validate the configuration and stock the libraries.
    pub fn new(config: SimulationConfig, trace: TraceHandle) -> Result<Self> {
        config.validate()?;

        let libraries: Vec<Library> = (0..config.libraries)
            .map(|id| Library::new(id, config.books_per_library))
            .collect();

        info!(
            libraries = config.libraries,
            books_per_library = config.books_per_library,
            readers = config.readers,
            "simulation initialized"
        );

        Ok(Self {
            config,
            libraries: Arc::new(libraries),
            trace,
        })
    }

    /// Run every reader to a terminal outcome and report.
    ///
    /// Every launched task is joined even when one of them fails; a failure
    /// is propagated only after the join loop finishes, so no task is left
    /// running behind an error return.
    pub async fn run(self) -> Result<SimulationReport> {
        let reader_count = self.config.readers;
        let mut handles = Vec::with_capacity(reader_count);

        for id in 0..reader_count {
            let reader = Reader::new(
                id,
                self.config.books_per_library,
                Arc::clone(&self.libraries),
                self.config.read_delay(),
                self.trace.clone(),
            );

            handles.push(tokio::spawn(reader.run()));
            self.trace.emit(TraceRecord::at_library(
                id,
                id % self.config.libraries,
                "reader task launched",
            ));
        }

        let mut outcomes = Vec::with_capacity(reader_count);
        let mut failure: Option<EngineError> = None;

        for (id, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(outcome) => {
                    self.trace
                        .emit(TraceRecord::reader(id, "reader task joined"));
                    outcomes.push(outcome);
                }
                Err(e) => {
                    error!(reader = id, "reader task failed: {}", e);
                    self.trace
                        .emit(TraceRecord::reader(id, "reader task failed"));
                    failure = Some(EngineError::TaskFailed(format!("reader {}: {}", id, e)));
                }
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }

        let books_available = self.libraries.iter().map(|l| l.available()).collect();

        let report = SimulationReport {
            outcomes,
            books_available,
        };

        info!(
            completed = report.completed(),
            abandoned = report.abandoned(),
            "all readers terminal"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace;

    fn test_config(readers: usize, libraries: usize, books: usize) -> SimulationConfig {
        SimulationConfig {
            readers,
            libraries,
            books_per_library: books,
            min_read_ms: 1,
            max_read_ms: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_libraries_rejected_at_construction() {
        let (handle, _rx) = trace::channel();
        let result = Simulation::new(test_config(4, 0, 5), handle);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_single_book_two_readers() {
        // M=1, K=1, N=2: the first scanner always wins the only book, and
        // while it is reading the other scanner finds an empty shelf.
        let config = SimulationConfig {
            min_read_ms: 200,
            max_read_ms: 300,
            ..test_config(2, 1, 1)
        };
        let (handle, _rx) = trace::channel();

        let report = Simulation::new(config, handle).unwrap().run().await.unwrap();

        assert_eq!(report.outcomes.len(), 2);
        assert!(report.completed() >= 1);
        assert_eq!(report.completed() + report.abandoned(), 2);

        // Whoever abandoned did so on its very first scan.
        for outcome in &report.outcomes {
            if let ReaderOutcome::Abandoned { library, iteration } = outcome {
                assert_eq!(*library, 0);
                assert_eq!(*iteration, 0);
            }
        }

        assert_eq!(report.books_available, vec![1]);
    }

    #[tokio::test]
    async fn test_default_sizing_restores_full_conservation() {
        // M=3, K=5, N=10: every checked-out book is returned before its
        // holder advances, so every shelf ends full.
        let (handle, _rx) = trace::channel();

        let report = Simulation::new(test_config(10, 3, 5), handle)
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 10);
        assert_eq!(report.books_available, vec![5, 5, 5]);
    }

    #[tokio::test]
    async fn test_zero_books_abandons_everyone_on_first_scan() {
        // M=3, K=0: no books ever exist, so all readers abandon at
        // iteration 0 with zero checkouts system-wide.
        let (handle, rx) = trace::channel();

        let report = Simulation::new(test_config(6, 3, 0), handle)
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.completed(), 0);
        assert_eq!(report.abandoned(), 6);

        for (id, outcome) in report.outcomes.iter().enumerate() {
            assert_eq!(
                *outcome,
                ReaderOutcome::Abandoned {
                    library: id % 3,
                    iteration: 0
                }
            );
        }

        // No checkout record anywhere in the trace.
        let mut rx = rx;
        while let Ok(record) = rx.try_recv() {
            assert!(record.book.is_none());
        }
    }

    #[tokio::test]
    async fn test_lone_reader_always_completes() {
        // N=1, M=4, K=5: no contention, so the single reader finishes its
        // whole budget and conservation holds everywhere.
        let (handle, _rx) = trace::channel();

        let report = Simulation::new(test_config(1, 4, 5), handle)
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.completed(), 1);
        assert_eq!(report.outcomes[0], ReaderOutcome::Completed { iterations: 5 });
        assert_eq!(report.books_available, vec![5, 5, 5, 5]);
    }

    #[tokio::test]
    async fn test_launch_records_use_deterministic_start_assignment() {
        let (handle, rx) = trace::channel();

        Simulation::new(test_config(5, 2, 1), handle)
            .unwrap()
            .run()
            .await
            .unwrap();

        let mut rx = rx;
        let mut launches = Vec::new();
        while let Ok(record) = rx.try_recv() {
            if record.message == "reader task launched" {
                launches.push((record.reader.unwrap(), record.library.unwrap()));
            }
        }

        assert_eq!(launches.len(), 5);
        for (reader, library) in launches {
            assert_eq!(library, reader % 2);
        }
    }

    #[tokio::test]
    async fn test_zero_readers_is_an_empty_report() {
        let (handle, _rx) = trace::channel();

        let report = Simulation::new(test_config(0, 3, 5), handle)
            .unwrap()
            .run()
            .await
            .unwrap();

        assert!(report.outcomes.is_empty());
        assert_eq!(report.books_available, vec![5, 5, 5]);
    }
}
