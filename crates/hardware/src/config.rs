//! Configuration system for the peripheral simulator.
//!
//! This module defines all configuration structures used to parameterize the driver.
//! It provides:
//! 1. **Defaults:** Baseline clock and stimulus constants taken from the reference test bench.
//! 2. **Structures:** Hierarchical config for general, clock, and driver settings.
//! 3. **Loading:** JSON parsing from strings or files, followed by validation.
//!
//! The core itself has no parameters; everything here shapes how it is driven.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{Result, SimError};

/// Default configuration constants for the simulator.
///
/// These values reproduce the timing of the reference test bench when not
/// explicitly overridden in a JSON configuration file.
mod defaults {
    /// Clock period in nanoseconds (10 us, i.e. 100 kHz).
    pub const CLOCK_PERIOD_NS: u64 = 10_000;

    /// Number of edges reset is held for at the start of every scenario.
    pub const RESET_CYCLES: u64 = 10;

    /// Edges waited after reset release before counter-mode sampling starts.
    pub const SETTLE_CYCLES: u64 = 2;

    /// Consecutive counter-mode samples; 256 covers a full wraparound.
    pub const COUNTER_CHECK_CYCLES: u64 = 256;

    /// Number of payload values swept in loopback mode (`0..128`).
    pub const LOOPBACK_SWEEP: u8 = 128;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use ttsim_core::config::Config;
///
/// let config = Config::default();
/// assert!(!config.general.trace_cycles);
/// assert_eq!(config.driver.reset_cycles, 10);
/// ```
///
/// Deserializing from JSON; omitted fields fall back to their defaults:
///
/// ```
/// use ttsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_cycles": true },
///     "driver": { "counter_check_cycles": 512 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_cycles);
/// assert_eq!(config.clock.period_ns, 10_000);
/// assert_eq!(config.driver.counter_check_cycles, 512);
/// assert_eq!(config.driver.settle_cycles, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Clock generation
    #[serde(default)]
    pub clock: ClockConfig,
    /// Stimulus lengths used by the canonical scenarios
    #[serde(default)]
    pub driver: DriverConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] for malformed JSON and [`SimError::Config`] when a value
    /// fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] when the file cannot be read, otherwise as [`Config::from_json`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks that every value is usable by the driver.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.clock.period_ns == 0 {
            return Err(SimError::Config("clock.period_ns must be non-zero".into()));
        }
        if self.driver.reset_cycles == 0 {
            return Err(SimError::Config(
                "driver.reset_cycles must be non-zero".into(),
            ));
        }
        if self.driver.loopback_sweep > defaults::LOOPBACK_SWEEP {
            return Err(SimError::Config(format!(
                "driver.loopback_sweep must be at most {} (7-bit payload), got {}",
                defaults::LOOPBACK_SWEEP,
                self.driver.loopback_sweep
            )));
        }
        if self.driver.counter_check_cycles == 0 {
            return Err(SimError::Config(
                "driver.counter_check_cycles must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace`-level event for every clock edge
    #[serde(default)]
    pub trace_cycles: bool,
}

/// Clock generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Clock period in nanoseconds; only affects trace timestamps
    #[serde(default = "ClockConfig::default_period_ns")]
    pub period_ns: u64,
}

impl ClockConfig {
    /// Returns the default clock period.
    const fn default_period_ns() -> u64 {
        defaults::CLOCK_PERIOD_NS
    }

    /// Returns the clock frequency in hertz.
    pub const fn frequency_hz(&self) -> u64 {
        if self.period_ns == 0 {
            0
        } else {
            1_000_000_000 / self.period_ns
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period_ns: defaults::CLOCK_PERIOD_NS,
        }
    }
}

/// Stimulus lengths used by the canonical scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Edges reset is held for before a scenario starts checking
    #[serde(default = "DriverConfig::default_reset_cycles")]
    pub reset_cycles: u64,

    /// Edges waited after reset release in counter mode
    #[serde(default = "DriverConfig::default_settle_cycles")]
    pub settle_cycles: u64,

    /// Consecutive counter-mode samples checked
    #[serde(default = "DriverConfig::default_counter_check_cycles")]
    pub counter_check_cycles: u64,

    /// Payload values swept in loopback mode, starting from zero
    #[serde(default = "DriverConfig::default_loopback_sweep")]
    pub loopback_sweep: u8,
}

impl DriverConfig {
    /// Returns the default reset length.
    const fn default_reset_cycles() -> u64 {
        defaults::RESET_CYCLES
    }

    /// Returns the default settle length.
    const fn default_settle_cycles() -> u64 {
        defaults::SETTLE_CYCLES
    }

    /// Returns the default number of counter-mode samples.
    const fn default_counter_check_cycles() -> u64 {
        defaults::COUNTER_CHECK_CYCLES
    }

    /// Returns the default loopback sweep length.
    const fn default_loopback_sweep() -> u8 {
        defaults::LOOPBACK_SWEEP
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            reset_cycles: defaults::RESET_CYCLES,
            settle_cycles: defaults::SETTLE_CYCLES,
            counter_check_cycles: defaults::COUNTER_CHECK_CYCLES,
            loopback_sweep: defaults::LOOPBACK_SWEEP,
        }
    }
}
