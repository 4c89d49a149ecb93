//! Canonical verification scenarios.
//!
//! Each scenario drives a [`Simulator`] through a fixed stimulus sequence and compares the
//! sampled pins against the expected behaviour, stopping at the first mismatch. The
//! scenarios are:
//! 1. **Loopback:** Sweep the 7-bit payload and check it returns on `uo_out[7:1]` one edge
//!    later, with `uo_out[0]` carrying the inverse of the previous `uo_out[7]`.
//! 2. **Loopback reset-shift:** Hold reset in loopback mode and check the output register
//!    shifts left with the inverted MSB fed back into the LSB.
//! 3. **Counter:** Check both output buses count together through a full wraparound, are
//!    cleared by reset, and restart from zero.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::common::bits::{self, CONTROL_BIT, FEEDBACK_BIT};
use crate::common::{Result, SimError};
use crate::config::Config;
use crate::core::{BusDirection, Mode};
use crate::sim::Simulator;
use crate::soc::Device;

/// Payload driven onto `uio_in` before reset is asserted in the reset-shift scenario,
/// so that the shifted pattern is not all zeros.
const RESET_SHIFT_SEED: u8 = 0x55;

/// Edges the counter scenario holds reset for after the counting sequence.
const COUNTER_RESET_HOLD: u64 = 2;

/// One of the canonical scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Payload pass-through and toggle bit.
    Loopback,
    /// Left shift of the output register while reset is held in loopback mode.
    LoopbackResetShift,
    /// Free-running counter on both output buses.
    Counter,
}

/// Summary of a passing scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Scenario that ran.
    pub scenario: Scenario,
    /// Edges generated by the scenario.
    pub cycles: u64,
    /// Checks performed (all of which passed).
    pub checks: u64,
}

impl Scenario {
    /// Every scenario, in the order `ttsim check` runs them.
    pub const ALL: [Self; 3] = [Self::Loopback, Self::LoopbackResetShift, Self::Counter];

    /// Returns the scenario's command-line name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Loopback => "loopback",
            Self::LoopbackResetShift => "loopback-reset-shift",
            Self::Counter => "counter",
        }
    }

    /// Returns a one-line description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Loopback => {
                "uio_in[6:0] returns on uo_out[7:1] one edge later; uo_out[0] = !uo_out[7]"
            }
            Self::LoopbackResetShift => {
                "reset held in loopback mode shifts uo_out left with inverted feedback"
            }
            Self::Counter => "uo_out and uio_out count 0..=255 together; reset clears them",
        }
    }

    /// Looks up a scenario by name (case-insensitive, `_` accepted for `-`).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownScenario`] if no scenario has that name.
    pub fn from_name(name: &str) -> Result<Self> {
        let wanted = name.to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == wanted)
            .ok_or_else(|| SimError::UnknownScenario(name.to_owned()))
    }

    /// Runs the scenario on an existing simulator.
    ///
    /// The simulator is left in whatever state the scenario ends in.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Check`] on the first mismatch, or a trace sink error.
    pub fn run<D: Device>(
        self,
        sim: &mut Simulator<D>,
        config: &Config,
    ) -> Result<ScenarioReport> {
        info!(
            scenario = self.name(),
            device = sim.device().name(),
            "scenario started"
        );
        let start_cycle = sim.cycle();
        let start_checks = sim.stats().checks_passed;

        match self {
            Self::Loopback => loopback(sim, config)?,
            Self::LoopbackResetShift => loopback_reset_shift(sim, config)?,
            Self::Counter => counter(sim, config)?,
        }

        let report = ScenarioReport {
            scenario: self,
            cycles: sim.cycle() - start_cycle,
            checks: sim.stats().checks_passed - start_checks,
        };
        info!(
            scenario = self.name(),
            cycles = report.cycles,
            checks = report.checks,
            "scenario passed"
        );
        Ok(report)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs `scenario` on a freshly powered-on [`PeripheralCore`](crate::PeripheralCore).
///
/// # Errors
///
/// As [`Scenario::run`].
pub fn run_scenario(scenario: Scenario, config: &Config) -> Result<ScenarioReport> {
    let mut sim = Simulator::with_config(config);
    scenario.run(&mut sim, config)
}

/// Selects loopback mode, resets, then sweeps the payload.
fn loopback<D: Device>(sim: &mut Simulator<D>, config: &Config) -> Result<()> {
    const NAME: &str = "loopback";

    sim.set_ena(true);
    sim.set_ui_in(Mode::Loopback.ui_in());
    sim.set_uio_in(0);
    sim.apply_reset(config.driver.reset_cycles)?;
    sim.set_uio_in_bit(CONTROL_BIT, true);

    for payload in 0..config.driver.loopback_sweep {
        let before = sim.outputs();
        sim.set_uio_in_payload(payload);
        sim.clock_cycles(1)?;
        let after = sim.outputs();

        sim.check(NAME, "uo_out[7:1]", payload, after.payload())?;
        sim.check(
            NAME,
            "uo_out[0]",
            u8::from(!bits::bit(before.uo_out, FEEDBACK_BIT)),
            u8::from(after.toggle()),
        )?;
    }
    Ok(())
}

/// Seeds the output register in loopback mode, then holds reset and watches it shift.
fn loopback_reset_shift<D: Device>(sim: &mut Simulator<D>, config: &Config) -> Result<()> {
    const NAME: &str = "loopback-reset-shift";

    sim.set_ena(true);
    sim.set_ui_in(Mode::Loopback.ui_in());
    sim.set_uio_in(0);
    sim.apply_reset(config.driver.reset_cycles)?;
    sim.set_uio_in(bits::with_bit(RESET_SHIFT_SEED, CONTROL_BIT, true));
    sim.clock_cycles(1)?;

    sim.set_rst_n(false);
    sim.clock_cycles(1)?;
    sim.set_uio_in_bit(CONTROL_BIT, false);

    for payload in 0..config.driver.loopback_sweep {
        let before = sim.outputs();
        sim.set_uio_in_payload(payload);
        sim.clock_cycles(1)?;
        let after = sim.outputs();

        sim.check(
            NAME,
            "uio_oe",
            BusDirection::Input.output_enable(),
            after.uio_oe,
        )?;
        sim.check(
            NAME,
            "uo_out[7:1]",
            bits::payload(before.uo_out),
            after.payload(),
        )?;
        sim.check(
            NAME,
            "uo_out[0]",
            u8::from(!bits::bit(before.uo_out, FEEDBACK_BIT)),
            u8::from(after.toggle()),
        )?;
    }
    sim.set_rst_n(true);
    Ok(())
}

/// Counts through a full wraparound, then checks reset clears and restarts the counter.
fn counter<D: Device>(sim: &mut Simulator<D>, config: &Config) -> Result<()> {
    const NAME: &str = "counter";

    sim.set_ena(true);
    sim.set_ui_in(Mode::Counter.ui_in());
    sim.set_uio_in(0);
    sim.apply_reset(config.driver.reset_cycles)?;
    sim.clock_cycles(config.driver.settle_cycles)?;

    // Counting starts on the second edge after release.
    let settle = config.driver.settle_cycles;
    for i in 0..config.driver.counter_check_cycles {
        let out = sim.outputs();
        sim.check(NAME, "uio_out", out.uo_out, out.uio_out)?;
        sim.check(
            NAME,
            "uio_oe",
            BusDirection::Output.output_enable(),
            out.uio_oe,
        )?;
        sim.check(
            NAME,
            "uo_out",
            settle.wrapping_add(i).saturating_sub(2) as u8,
            out.uo_out,
        )?;
        sim.clock_cycles(1)?;
    }

    sim.set_rst_n(false);
    sim.clock_cycles(COUNTER_RESET_HOLD)?;
    let held = sim.outputs();
    sim.check(NAME, "uo_out in reset", 0, held.uo_out)?;
    sim.check(
        NAME,
        "uio_oe in reset",
        BusDirection::Input.output_enable(),
        held.uio_oe,
    )?;

    sim.set_rst_n(true);
    for expected in [0, 0, 1] {
        sim.clock_cycles(1)?;
        let observed = sim.outputs().uo_out;
        sim.check(NAME, "uo_out after release", expected, observed)?;
    }
    Ok(())
}
