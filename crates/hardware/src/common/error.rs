//! Error and Check-Failure definitions.
//!
//! The peripheral core itself cannot fail: it is deterministic sequential logic. This module
//! defines the error handling for everything around it:
//! 1. **Check Failures:** A driver observed a signal value different from the expected one.
//! 2. **Host Errors:** Configuration, (de)serialisation, and file I/O failures.
//! 3. **Lookup Errors:** Unknown scenario names supplied by a host.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors reported by the simulation driver and host-facing layers.
#[derive(Debug, Error)]
pub enum SimError {
    /// A scenario observed a value that differs from the expected one.
    #[error("check failed: {0}")]
    Check(CheckFailure),

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialisation of a config or trace failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A trace sink failed to accept a record.
    #[error("trace sink error: {0}")]
    Trace(#[source] std::io::Error),

    /// No scenario with the given name exists.
    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
}

impl From<CheckFailure> for SimError {
    fn from(failure: CheckFailure) -> Self {
        Self::Check(failure)
    }
}

/// Description of a single mismatch between an expected and an observed signal value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckFailure {
    /// Name of the scenario that ran the check.
    pub scenario: &'static str,
    /// Simulator cycle at which the value was sampled.
    pub cycle: u64,
    /// Signal (or signal slice) that was compared, e.g. `"uo_out[7:1]"`.
    pub signal: &'static str,
    /// Value the scenario expected.
    pub expected: u8,
    /// Value the core produced.
    pub observed: u8,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ cycle {}: {} expected {:#04x} ({:#010b}), observed {:#04x} ({:#010b})",
            self.scenario,
            self.cycle,
            self.signal,
            self.expected,
            self.expected,
            self.observed,
            self.observed
        )
    }
}

impl std::error::Error for CheckFailure {}
