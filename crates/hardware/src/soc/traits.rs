//! Device trait for clocked logic driven at the pin level.
//!
//! This module defines the `Device` trait implemented by anything a `Simulator` can drive. It provides:
//! 1. **Identification:** `name` for logs and traces.
//! 2. **Outputs:** A combinational view of the output pins for the current inputs.
//! 3. **Lifecycle:** `clock_edge` for rising edges and `power_on_reset` for a cold start.
//!
//! Implementors must be `Send` so a simulator can be moved to a worker thread.

use crate::core::{CoreState, PinInputs, PinOutputs};

/// Trait for synchronous devices attached to the driver's pins.
///
/// The driver calls `outputs` whenever it samples and `clock_edge` once per rising edge.
/// Implementations must sample `inputs` at the edge and commit all registers at once.
pub trait Device: Send {
    /// Returns a short name for this device (e.g., `"tt_loopback_counter"`).
    fn name(&self) -> &str;

    /// Returns the output pins as seen with `inputs` applied to the current registers.
    fn outputs(&self, inputs: &PinInputs) -> PinOutputs;

    /// Advances the device by one rising clock edge with `inputs` sampled at that edge.
    fn clock_edge(&mut self, inputs: &PinInputs);

    /// Returns the state-machine view for the current cycle.
    fn state(&self, inputs: &PinInputs) -> CoreState {
        CoreState::new(inputs.mode(), inputs.rst_n)
    }

    /// Returns every register to its power-on value.
    fn power_on_reset(&mut self) {}
}
