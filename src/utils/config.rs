// src/utils/config.rs
//! Simulation configuration
//!
//! Sizing parameters are explicit configuration, never hidden constants.
//! Defaults match the classic sizing: 10 readers, 3 libraries, 5 books per
//! library, 1-2 second simulated read time.

use crate::utils::errors::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of concurrent readers (N)
    pub readers: usize,

    /// Number of libraries (M)
    pub libraries: usize,

    /// Books held by each library (K); also each reader's iteration budget
    pub books_per_library: usize,

    /// Lower bound of the simulated read delay, milliseconds
    pub min_read_ms: u64,

    /// Upper bound of the simulated read delay, milliseconds
    pub max_read_ms: u64,

    /// Path of the append-only trace log
    pub trace_path: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            readers: 10,
            libraries: 3,
            books_per_library: 5,
            min_read_ms: 1000,
            max_read_ms: 2000,
            trace_path: PathBuf::from("lectorium-trace.log"),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from `lectorium.toml` (optional) with
    /// `LECTORIUM_*` environment overrides on top of the defaults.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("readers", defaults.readers as u64)?
            .set_default("libraries", defaults.libraries as u64)?
            .set_default("books_per_library", defaults.books_per_library as u64)?
            .set_default("min_read_ms", defaults.min_read_ms)?
            .set_default("max_read_ms", defaults.max_read_ms)?
            .set_default(
                "trace_path",
                defaults.trace_path.to_string_lossy().to_string(),
            )?
            .add_source(config::File::with_name("lectorium").required(false))
            .add_source(config::Environment::with_prefix("LECTORIUM"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Validate sizing parameters
    pub fn validate(&self) -> Result<()> {
        if self.libraries == 0 {
            return Err(EngineError::InvalidConfig(
                "libraries must be at least 1".to_string(),
            ));
        }

        if self.min_read_ms > self.max_read_ms {
            return Err(EngineError::InvalidConfig(format!(
                "min_read_ms ({}) exceeds max_read_ms ({})",
                self.min_read_ms, self.max_read_ms
            )));
        }

        Ok(())
    }

    /// Simulated read delay range, milliseconds
    pub fn read_delay(&self) -> std::ops::RangeInclusive<u64> {
        self.min_read_ms..=self.max_read_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.readers, 10);
        assert_eq!(config.libraries, 3);
        assert_eq!(config.books_per_library, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_libraries_rejected() {
        let config = SimulationConfig {
            libraries: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_inverted_delay_range_rejected() {
        let config = SimulationConfig {
            min_read_ms: 500,
            max_read_ms: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_books_is_valid_sizing() {
        // K=0 is a legal run: every reader abandons on its first scan.
        let config = SimulationConfig {
            books_per_library: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_read_delay_range() {
        let config = SimulationConfig::default();
        assert_eq!(config.read_delay(), 1000..=2000);
    }
}
