//! Peripheral Core.
//!
//! The register-transfer-level model of the loopback/counter peripheral. It holds three
//! registers and updates them together on every enabled rising clock edge:
//!
//! * `out_q`: the output register, visible on `uo_out` (and on `uio_out` in counter mode).
//! * `count_q`: the free-running 8-bit counter, wrapping modulo 256.
//! * `reset_q`: the reset line as sampled on the previous edge. It gates the counter so that
//!   counting starts one edge after reset release.
//!
//! # Next-state rules
//!
//! | State                  | `out_q` next                                 |
//! |------------------------|----------------------------------------------|
//! | loopback               | `{uio_in[6:0], !out_q[7]}`                   |
//! | loopback / reset-shift | `{out_q[6:0], !out_q[7]}`                    |
//! | counter, in reset      | `0`                                          |
//! | counter                | `count_q`                                    |
//!
//! The toggle lands in the LSB and is fed from the MSB, so in loopback mode the payload
//! occupies `out_q[7:1]`.
//!
//! In every state `count_q` becomes `0` if reset is asserted now or was asserted on the
//! previous edge, and `count_q + 1` otherwise.

use crate::common::bits::{self, ALL_INPUT, ALL_OUTPUT, FEEDBACK_BIT};
use crate::core::{CoreState, LoopbackPhase, Mode, PinInputs, PinOutputs};
use crate::soc::Device;

/// Register file and next-state logic of the peripheral.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PeripheralCore {
    /// Output register.
    out_q: u8,
    /// Free-running counter.
    count_q: u8,
    /// Reset line sampled at the previous edge (`true` = was asserted).
    reset_q: bool,
}

impl PeripheralCore {
    /// Creates a core with every register at its power-on value of zero.
    pub const fn new() -> Self {
        Self {
            out_q: 0,
            count_q: 0,
            reset_q: false,
        }
    }

    /// Returns the current value of the output register.
    #[inline]
    pub const fn output_register(&self) -> u8 {
        self.out_q
    }

    /// Returns the current value of the counter register.
    #[inline]
    pub const fn counter(&self) -> u8 {
        self.count_q
    }

    /// Returns `true` if reset was asserted at the previous edge.
    #[inline]
    pub const fn reset_synchronised(&self) -> bool {
        self.reset_q
    }

    /// Returns the operating mode selected by `inputs`.
    #[inline]
    pub const fn mode(inputs: &PinInputs) -> Mode {
        inputs.mode()
    }

    /// Returns the state-machine view for the current cycle.
    #[inline]
    pub const fn state(inputs: &PinInputs) -> CoreState {
        CoreState::new(inputs.mode(), inputs.rst_n)
    }

    /// Forces every register back to zero.
    pub fn power_on_reset(&mut self) {
        *self = Self::new();
    }

    /// Computes the combinational output pins for `inputs`.
    pub const fn outputs(&self, inputs: &PinInputs) -> PinOutputs {
        let (uio_out, uio_oe) = match inputs.mode() {
            Mode::Counter if inputs.rst_n => (self.out_q, ALL_OUTPUT),
            Mode::Counter => (self.out_q, ALL_INPUT),
            Mode::Loopback => (0, ALL_INPUT),
        };
        PinOutputs {
            uo_out: self.out_q,
            uio_out,
            uio_oe,
            live: inputs.ena,
        }
    }

    /// Applies one rising clock edge with `inputs` sampled at that edge.
    ///
    /// Every next-state value is computed from the current registers before any of them
    /// is written. A low `ena` gates the clock and leaves all registers unchanged.
    pub const fn clock_edge(&mut self, inputs: &PinInputs) {
        if !inputs.ena {
            return;
        }
        let reset = inputs.in_reset();

        let out_next = match Self::state(inputs) {
            CoreState::Loopback(LoopbackPhase::Normal) => self.loopback_next(inputs.uio_in),
            CoreState::Loopback(LoopbackPhase::ResetShift) => self.reset_shift_next(),
            CoreState::Counter if reset => 0,
            CoreState::Counter => self.count_q,
        };
        let count_next = if reset || self.reset_q {
            0
        } else {
            self.count_q.wrapping_add(1)
        };

        self.out_q = out_next;
        self.count_q = count_next;
        self.reset_q = reset;
    }

    /// Next toggle bit: the negation of the current `out_q[7]`.
    #[inline]
    const fn toggle_next(&self) -> u8 {
        if bits::bit(self.out_q, FEEDBACK_BIT) { 0 } else { 1 }
    }

    #[inline]
    const fn loopback_next(&self, uio_in: u8) -> u8 {
        bits::to_out_payload(bits::payload(uio_in)) | self.toggle_next()
    }

    #[inline]
    const fn reset_shift_next(&self) -> u8 {
        (self.out_q << 1) | self.toggle_next()
    }
}

impl Device for PeripheralCore {
    fn name(&self) -> &str {
        "tt_loopback_counter"
    }

    fn outputs(&self, inputs: &PinInputs) -> PinOutputs {
        Self::outputs(self, inputs)
    }

    fn clock_edge(&mut self, inputs: &PinInputs) {
        Self::clock_edge(self, inputs);
    }

    fn state(&self, inputs: &PinInputs) -> CoreState {
        Self::state(inputs)
    }

    fn power_on_reset(&mut self) {
        Self::power_on_reset(self);
    }
}
