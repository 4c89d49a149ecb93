//! Shared helpers for the peripheral tests.
