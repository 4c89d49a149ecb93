//! Simulation statistics collection and reporting.
//!
//! This module tracks what the driver did to the core. It provides:
//! 1. **Cycles:** Total edges, clock-gated edges, and edges spent in reset.
//! 2. **Mode mix:** Edges spent in loopback, loopback reset-shift, and counter mode.
//! 3. **Counter:** Number of observed wraparounds of the free-running counter.
//! 4. **Checks:** Passed and failed scenario checks.

use std::time::Instant;

use serde::Serialize;

use crate::core::{CoreState, LoopbackPhase};

/// Simulation statistics structure tracking all driver-side metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total rising edges generated.
    pub cycles: u64,
    /// Edges on which `ena` was low (registers held).
    pub gated_cycles: u64,
    /// Edges on which reset was asserted.
    pub reset_cycles: u64,

    /// Edges in loopback mode with reset deasserted.
    pub loopback_cycles: u64,
    /// Edges in loopback mode with reset asserted.
    pub reset_shift_cycles: u64,
    /// Edges in counter mode.
    pub counter_cycles: u64,

    /// Edges on which the counter register went from 255 to 0.
    pub counter_wraps: u64,

    /// Scenario checks that matched.
    pub checks_passed: u64,
    /// Scenario checks that did not match.
    pub checks_failed: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            gated_cycles: 0,
            reset_cycles: 0,
            loopback_cycles: 0,
            reset_shift_cycles: 0,
            counter_cycles: 0,
            counter_wraps: 0,
            checks_passed: 0,
            checks_failed: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"modes"`, `"checks"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "modes", "checks"];

impl SimStats {
    /// Accounts for one rising edge.
    ///
    /// `enabled` is the sampled `ena`; gated edges count towards `cycles` and
    /// `gated_cycles` only.
    pub const fn record_edge(&mut self, state: CoreState, enabled: bool, in_reset: bool) {
        self.cycles += 1;
        if !enabled {
            self.gated_cycles += 1;
            return;
        }
        if in_reset {
            self.reset_cycles += 1;
        }
        match state {
            CoreState::Loopback(LoopbackPhase::Normal) => self.loopback_cycles += 1,
            CoreState::Loopback(LoopbackPhase::ResetShift) => self.reset_shift_cycles += 1,
            CoreState::Counter => self.counter_cycles += 1,
        }
    }

    /// Accounts for a counter wraparound.
    pub const fn record_wrap(&mut self) {
        self.counter_wraps += 1;
    }

    /// Accounts for the outcome of one check.
    pub const fn record_check(&mut self, passed: bool) {
        if passed {
            self.checks_passed += 1;
        } else {
            self.checks_failed += 1;
        }
    }

    /// Adds every counter of `other` into `self`; the start time is kept.
    pub const fn merge(&mut self, other: &Self) {
        self.cycles += other.cycles;
        self.gated_cycles += other.gated_cycles;
        self.reset_cycles += other.reset_cycles;
        self.loopback_cycles += other.loopback_cycles;
        self.reset_shift_cycles += other.reset_shift_cycles;
        self.counter_cycles += other.counter_cycles;
        self.counter_wraps += other.counter_wraps;
        self.checks_passed += other.checks_passed;
        self.checks_failed += other.checks_failed;
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"modes"`, or `"checks"`.
    /// Pass an empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;

        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("PERIPHERAL SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_freq                 {khz:.2} kHz");
            println!(
                "cycles.gated             {} ({:.2}%)",
                self.gated_cycles,
                pct(self.gated_cycles)
            );
            println!(
                "cycles.reset             {} ({:.2}%)",
                self.reset_cycles,
                pct(self.reset_cycles)
            );
            println!("----------------------------------------------------------");
        }
        if want("modes") {
            println!("MODE BREAKDOWN");
            println!(
                "  mode.loopback          {} ({:.2}%)",
                self.loopback_cycles,
                pct(self.loopback_cycles)
            );
            println!(
                "  mode.reset_shift       {} ({:.2}%)",
                self.reset_shift_cycles,
                pct(self.reset_shift_cycles)
            );
            println!(
                "  mode.counter           {} ({:.2}%)",
                self.counter_cycles,
                pct(self.counter_cycles)
            );
            println!("  counter.wraps          {}", self.counter_wraps);
            println!("----------------------------------------------------------");
        }
        if want("checks") {
            println!("CHECKS");
            println!("  checks.passed          {}", self.checks_passed);
            println!("  checks.failed          {}", self.checks_failed);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
