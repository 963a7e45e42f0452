// src/simulation/reader.rs
//! Reader state machine
//!
//! A reader starts at library `id % M` and cycles:
//! scan -> holding -> release -> advance, for at most K successful cycles.
//! A scan that finds no book is terminal: the reader abandons on the spot and
//! never visits another library. No lock is ever held across the simulated
//! read delay, and a reader holds at most one library lock at a time.

use crate::simulation::library::Library;
use crate::trace::{TraceHandle, TraceRecord};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Terminal outcome of one reader's run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderOutcome {
    /// The reader exhausted its iteration budget
    Completed {
        /// Successful checkout/return cycles performed
        iterations: usize,
    },

    /// A scan found no book; the reader gave up permanently
    Abandoned {
        /// Library where the failed scan happened
        library: usize,
        /// Zero-based iteration at which the reader gave up
        iteration: usize,
    },
}

/// One concurrently executing reader
pub struct Reader {
    /// Reader id, unique in 0..N
    id: usize,

    /// Index of the library the reader is currently visiting
    current_library: usize,

    /// Remaining successful cycles before natural completion
    iterations_remaining: usize,

    /// Shared view of every library in the simulation
    libraries: Arc<Vec<Library>>,

    /// Simulated read delay range, milliseconds
    read_delay: RangeInclusive<u64>,

    /// Trace producer handle
    trace: TraceHandle,
}

impl Reader {
    /// Create a reader bound to its deterministic starting library `id % M`.
    ///
    /// The iteration budget equals the per-library book count, matching the
    /// source model exactly.
    pub fn new(
        id: usize,
        budget: usize,
        libraries: Arc<Vec<Library>>,
        read_delay: RangeInclusive<u64>,
        trace: TraceHandle,
    ) -> Self {
        let current_library = id % libraries.len();

        Self {
            id,
            current_library,
            iterations_remaining: budget,
            libraries,
            read_delay,
            trace,
        }
    }

    /// Run the state machine to a terminal outcome.
    pub async fn run(mut self) -> ReaderOutcome {
        self.trace.emit(TraceRecord::at_library(
            self.id,
            self.current_library,
            "enters starting library",
        ));

        let mut iteration = 0;

        loop {
            let library = &self.libraries[self.current_library];

            // SCAN: one short critical section inside `checkout`. The budget
            // is only consulted after a successful cycle, so a K=0 run still
            // performs its first scan and abandons there.
            let Some(book) = library.checkout() else {
                info!(
                    reader = self.id,
                    library = self.current_library,
                    iteration,
                    "no books available, reader abandons"
                );
                self.trace.emit(TraceRecord::at_library(
                    self.id,
                    self.current_library,
                    "abandons, no books available",
                ));
                return ReaderOutcome::Abandoned {
                    library: self.current_library,
                    iteration,
                };
            };

            // HOLDING: the library lock is already released; sleep without
            // holding anything so other readers can use any library freely.
            info!(
                reader = self.id,
                library = self.current_library,
                book, "checks out book"
            );
            self.trace.emit(TraceRecord::with_book(
                self.id,
                self.current_library,
                book,
                "checks out book",
            ));

            tokio::time::sleep(self.sample_read_delay()).await;

            // RELEASE: re-lock briefly to put the book back.
            library.return_book(book);
            info!(
                reader = self.id,
                library = self.current_library,
                book, "returns book"
            );
            self.trace.emit(TraceRecord::with_book(
                self.id,
                self.current_library,
                book,
                "returns book",
            ));

            // ADVANCE: fixed circular order, no skips.
            let next = (self.current_library + 1) % self.libraries.len();
            self.trace.emit(TraceRecord::at_library(
                self.id,
                next,
                "moves to next library",
            ));
            debug!(reader = self.id, from = self.current_library, to = next, "advances");
            self.current_library = next;

            self.iterations_remaining = self.iterations_remaining.saturating_sub(1);
            iteration += 1;

            if self.iterations_remaining == 0 {
                info!(reader = self.id, iterations = iteration, "completed all readings");
                self.trace.emit(TraceRecord::reader(self.id, "completes all readings"));
                return ReaderOutcome::Completed {
                    iterations: iteration,
                };
            }
        }
    }

    /// Sample the simulated read time. The rng handle is scoped so it is
    /// dropped before the task suspends.
    fn sample_read_delay(&self) -> Duration {
        use rand::Rng;

        let millis = {
            let mut rng = rand::thread_rng();
            rng.gen_range(self.read_delay.clone())
        };

        Duration::from_millis(millis)
    }
}
