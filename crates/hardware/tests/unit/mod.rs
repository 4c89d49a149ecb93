//! # Unit Components
//!
//! Tests grouped by the crate module they exercise.


/// Configuration defaults, parsing, and validation.
pub mod config;

/// The peripheral core: loopback, reset-shift, counter, and pin behaviour.
pub mod core;
