//! Device seam between clocked logic and its drivers.
//!
//! The peripheral core and any test doubles implement [`Device`]; the simulator only
//! talks to that trait, so stimulus code is reusable across implementations.

/// Device trait implemented by clocked logic.
pub mod traits;

pub use self::traits::Device;
