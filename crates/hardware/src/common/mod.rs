//! Common utilities and types used throughout the peripheral simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Bus Helpers:** Bit extraction and insertion on 8-bit buses (LSB-0 numbering).
//! 2. **Bus Constants:** Widths and masks for the payload and toggle fields.
//! 3. **Error Handling:** The crate-wide error type and check-failure reports.

/// Bit-level helpers and masks for 8-bit buses.
pub mod bits;

/// Error types and check-failure reports.
pub mod error;

pub use bits::{BUS_WIDTH, CONTROL_BIT, FEEDBACK_BIT, PAYLOAD_MASK, TOGGLE_BIT, bit, with_bit};
pub use error::{CheckFailure, Result, SimError};
