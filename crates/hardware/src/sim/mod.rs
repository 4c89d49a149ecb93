//! Clocked stimulus driver and verification scenarios.
//!
//! Provides the driver that generates clock edges and applies stimulus to a
//! [`Device`](crate::soc::Device), the canonical scenarios that check the
//! peripheral's behaviour, and per-cycle trace recording.

/// Canonical loopback and counter scenarios.
pub mod scenario;
/// Clock generation, stimulus, and sampling.
pub mod simulator;
/// Per-cycle trace records and sinks.
pub mod trace;

pub use scenario::{Scenario, ScenarioReport, run_scenario};
pub use simulator::Simulator;
pub use trace::{CycleRecord, JsonLinesTrace, MemoryTrace, TraceSink};
