// src/trace/record.rs
//! Trace record type and line rendering
//!
//! Each record captures one simulation event with a wall-clock timestamp and
//! the reader, library, and book involved where applicable. Records render as
//! single lines so the sink can guarantee that concurrent readers never
//! interleave partial records.

use chrono::{DateTime, Local};
use std::fmt;

/// One append-only trace event
#[derive(Debug, Clone)]
pub struct TraceRecord {
    /// Wall-clock time the event was emitted
    pub timestamp: DateTime<Local>,

    /// Reader that produced the event; `None` for orchestrator events
    pub reader: Option<usize>,

    /// Library involved, if any
    pub library: Option<usize>,

    /// Book involved, if any
    pub book: Option<usize>,

    /// Short event description
    pub message: String,
}

impl TraceRecord {
    /// Orchestrator-level event (no reader attached)
    pub fn simulation(message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            reader: None,
            library: None,
            book: None,
            message: message.into(),
        }
    }

    /// Reader event with no library context
    pub fn reader(reader: usize, message: impl Into<String>) -> Self {
        Self {
            reader: Some(reader),
            ..Self::simulation(message)
        }
    }

    /// Reader event at a specific library
    pub fn at_library(reader: usize, library: usize, message: impl Into<String>) -> Self {
        Self {
            reader: Some(reader),
            library: Some(library),
            ..Self::simulation(message)
        }
    }

    /// Reader event naming both a library and a book
    pub fn with_book(
        reader: usize,
        library: usize,
        book: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            reader: Some(reader),
            library: Some(library),
            book: Some(book),
            ..Self::simulation(message)
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"))?;

        match (self.reader, self.library, self.book) {
            (Some(r), Some(l), Some(b)) => {
                write!(f, "reader={} | library={} | book={} | ", r, l, b)?
            }
            (Some(r), Some(l), None) => write!(f, "reader={} | library={} | ", r, l)?,
            (Some(r), None, _) => write!(f, "reader={} | ", r)?,
            (None, _, _) => write!(f, "simulation | ")?,
        }

        write!(f, "{}", self.message)
    }
}
