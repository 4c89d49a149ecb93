//! Peripheral core tests.
//!
//! Each file covers one behaviour through the public core API or the simulator.


/// Clock gating through `ena`.
pub mod enable;


/// Reset behaviour in both modes, including the reset-shift sub-state.
pub mod reset;
