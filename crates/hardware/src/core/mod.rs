//! Peripheral core implementation.
//!
//! This module contains the register-transfer-level model of the peripheral: the
//! pin-level boundary, the operating-mode state machine, and the core that owns
//! every register and computes next-state values on each clock edge.

/// Operating modes and the state-machine view of the core.
pub mod mode;

/// The peripheral core (registers, next-state logic, output mux).
pub mod peripheral;

/// Pin-level input and output bundles.
pub mod pins;

pub use self::mode::{CoreState, LoopbackPhase, Mode};
pub use self::peripheral::PeripheralCore;
pub use self::pins::{BusDirection, PinInputs, PinOutputs};
