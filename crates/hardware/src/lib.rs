//! Loopback/counter peripheral simulator library.
//!
//! This crate implements a cycle-accurate model of a small synchronous I/O peripheral with the following:
//! 1. **Core:** The register-transfer-level `PeripheralCore` (output register, counter, reset synchroniser).
//! 2. **Pins:** The boundary contract (`ui_in`, `uio_in`/`uio_out`/`uio_oe`, `uo_out`, `rst_n`, `ena`).
//! 3. **SoC seam:** The `Device` trait that clocked logic implements so drivers can stimulate it.
//! 4. **Simulation:** The clocked stimulus driver, canonical scenarios, and per-cycle traces.
//! 5. **Support:** Configuration, error types, and statistics collection.
//!
//! All bit positions use LSB-0 numbering: bit 0 is the least significant bit of a bus.

/// Common types and helpers (bus bit manipulation, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Peripheral core (pins, modes, registers, next-state logic).
pub mod core;
/// Clocked stimulus driver, scenarios, and cycle traces.
pub mod sim;
/// Device trait shared by the core and any test doubles.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Crate-wide error type.
pub use crate::common::{Result, SimError};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The peripheral core; holds every register of the design.
pub use crate::core::PeripheralCore;
/// Pin-level input and output bundles.
pub use crate::core::{PinInputs, PinOutputs};
/// Clocked driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
