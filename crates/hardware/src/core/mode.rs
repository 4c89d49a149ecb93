//! Operating Modes.
//!
//! This module defines the two operating modes of the peripheral and the state-machine
//! view derived from them. It implements the following:
//! 1. **Mode Classification:** Loopback and counter, selected by `ui_in[0]` every cycle.
//! 2. **Sub-states:** Normal pass-through and reset-shift inside loopback mode.
//! 3. **Observability:** Human-readable naming and display formatting for traces and logs.

use serde::{Deserialize, Serialize};

use crate::common::bits::{self, MODE_SELECT_BIT};

/// Top-level operating mode.
///
/// The mode is a pure combinational function of `ui_in[0]`; there is no mode latch and
/// no switching delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// `ui_in[0] == 0`: the bidirectional bus is relayed to the output bus.
    #[default]
    Loopback,

    /// `ui_in[0] == 1`: both output buses mirror the free-running counter.
    Counter,
}

impl Mode {
    /// Decodes the mode from the input bus.
    #[inline]
    pub const fn from_ui_in(ui_in: u8) -> Self {
        if bits::bit(ui_in, MODE_SELECT_BIT) {
            Self::Counter
        } else {
            Self::Loopback
        }
    }

    /// Returns the `ui_in` value that selects this mode with every payload bit clear.
    pub const fn ui_in(self) -> u8 {
        match self {
            Self::Loopback => 0,
            Self::Counter => 1 << MODE_SELECT_BIT,
        }
    }

    /// Returns the human-readable name of the mode.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Loopback => "loopback",
            Self::Counter => "counter",
        }
    }

    /// Parses a mode from its name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "loopback" => Some(Self::Loopback),
            "counter" => Some(Self::Counter),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Behavioural sub-state inside loopback mode, selected by the reset line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopbackPhase {
    /// Reset deasserted: `uio_in[6:0]` is registered into `uo_out[7:1]`.
    Normal,

    /// Reset asserted: the output register shifts left by one position per cycle and
    /// admits no external payload.
    ResetShift,
}

/// State-machine view of the core for the current cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreState {
    /// Loopback mode in the given sub-state.
    Loopback(LoopbackPhase),

    /// Counter mode.
    Counter,
}

impl CoreState {
    /// Derives the state from the current mode and the (active-low) reset line.
    pub const fn new(mode: Mode, rst_n: bool) -> Self {
        match mode {
            Mode::Counter => Self::Counter,
            Mode::Loopback if rst_n => Self::Loopback(LoopbackPhase::Normal),
            Mode::Loopback => Self::Loopback(LoopbackPhase::ResetShift),
        }
    }

    /// Returns the top-level mode of this state.
    pub const fn mode(self) -> Mode {
        match self {
            Self::Loopback(_) => Mode::Loopback,
            Self::Counter => Mode::Counter,
        }
    }

    /// Returns the human-readable name of the state.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Loopback(LoopbackPhase::Normal) => "loopback",
            Self::Loopback(LoopbackPhase::ResetShift) => "loopback/reset-shift",
            Self::Counter => "counter",
        }
    }
}

impl std::fmt::Display for CoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
