//! Pin-level boundary of the peripheral.
//!
//! These bundles are the entire contract between the core and whatever drives it:
//! inputs are sampled at every rising clock edge, outputs are a combinational view of
//! the registers and the current inputs.

use serde::{Deserialize, Serialize};

use crate::common::bits::{self, ALL_INPUT, ALL_OUTPUT};
use crate::core::Mode;

/// Signals driven into the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinInputs {
    /// Input bus; bit 0 selects the operating mode.
    pub ui_in: u8,
    /// Bidirectional bus, input-direction sample.
    pub uio_in: u8,
    /// Active-low reset.
    pub rst_n: bool,
    /// Enable; while low the clock is gated and outputs are don't-care.
    pub ena: bool,
}

impl Default for PinInputs {
    /// Enabled, out of reset, every bus at zero.
    fn default() -> Self {
        Self {
            ui_in: 0,
            uio_in: 0,
            rst_n: true,
            ena: true,
        }
    }
}

impl PinInputs {
    /// Returns the operating mode selected by `ui_in`.
    #[inline]
    pub const fn mode(&self) -> Mode {
        Mode::from_ui_in(self.ui_in)
    }

    /// Returns `true` while the (active-low) reset line is asserted.
    #[inline]
    pub const fn in_reset(&self) -> bool {
        !self.rst_n
    }
}

/// Drive direction of the bidirectional bus as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusDirection {
    /// Every bit is driven externally (`uio_oe == 0x00`).
    Input,
    /// Every bit is driven by the core (`uio_oe == 0xFF`).
    Output,
}

impl BusDirection {
    /// Returns the per-bit `uio_oe` mask for this direction.
    pub const fn output_enable(self) -> u8 {
        match self {
            Self::Input => ALL_INPUT,
            Self::Output => ALL_OUTPUT,
        }
    }
}

/// Signals driven by the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinOutputs {
    /// Output bus.
    pub uo_out: u8,
    /// Bidirectional bus, output-direction drive. Meaningful only where `uio_oe` is set.
    pub uio_out: u8,
    /// Per-bit output enable of the bidirectional bus (`1` = core drives).
    pub uio_oe: u8,
    /// `false` when `ena` is low; drivers must treat the other fields as don't-care.
    pub live: bool,
}

impl PinOutputs {
    /// Returns the bidirectional bus direction, or `None` for a mixed mask.
    pub const fn direction(&self) -> Option<BusDirection> {
        match self.uio_oe {
            ALL_INPUT => Some(BusDirection::Input),
            ALL_OUTPUT => Some(BusDirection::Output),
            _ => None,
        }
    }

    /// Returns the loopback payload field `uo_out[7:1]`.
    pub const fn payload(&self) -> u8 {
        bits::out_payload(self.uo_out)
    }

    /// Returns the loopback toggle bit `uo_out[0]`.
    pub const fn toggle(&self) -> bool {
        bits::bit(self.uo_out, bits::TOGGLE_BIT)
    }
}
