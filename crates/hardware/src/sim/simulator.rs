//! Simulator: owns the device, the driven pins, and the clock.
//!
//! Time advances only through [`Simulator::clock_cycles`]. Inputs set between edges are
//! sampled at the next edge; outputs can be read at any point and reflect the registers
//! committed by the last edge together with the inputs currently applied.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::common::bits;
use crate::common::{CheckFailure, Result};
use crate::config::Config;
use crate::core::{CoreState, Mode, PeripheralCore, PinInputs, PinOutputs};
use crate::sim::trace::{CycleRecord, TraceSink};
use crate::soc::Device;
use crate::stats::SimStats;

/// Top-level simulator: a device plus the pins and clock that drive it.
pub struct Simulator<D: Device = PeripheralCore> {
    device: D,
    inputs: PinInputs,
    cycle: u64,
    period_ns: u64,
    trace_cycles: bool,
    last_state: Option<CoreState>,
    stats: SimStats,
    sink: Option<Box<dyn TraceSink>>,
}

impl<D: Device> fmt::Debug for Simulator<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("device", &self.device.name())
            .field("inputs", &self.inputs)
            .field("cycle", &self.cycle)
            .field("period_ns", &self.period_ns)
            .field("tracing", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl Simulator<PeripheralCore> {
    /// Creates a simulator around a freshly powered-on [`PeripheralCore`].
    pub fn with_config(config: &Config) -> Self {
        Self::new(PeripheralCore::new(), config)
    }
}

impl<D: Device> Simulator<D> {
    /// Creates a new simulator driving `device`.
    ///
    /// The pins start enabled, out of reset, with both input buses at zero.
    pub fn new(device: D, config: &Config) -> Self {
        Self {
            device,
            inputs: PinInputs::default(),
            cycle: 0,
            period_ns: config.clock.period_ns,
            trace_cycles: config.general.trace_cycles || cfg!(feature = "always-trace"),
            last_state: None,
            stats: SimStats::default(),
            sink: None,
        }
    }

    /// Attaches a sink that receives one record per edge.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replaces (or removes) the trace sink, returning the previous one.
    pub fn set_trace_sink(
        &mut self,
        sink: Option<Box<dyn TraceSink>>,
    ) -> Option<Box<dyn TraceSink>> {
        std::mem::replace(&mut self.sink, sink)
    }

    /// Drives the input bus.
    pub fn set_ui_in(&mut self, value: u8) {
        if Mode::from_ui_in(value) != self.inputs.mode() {
            debug!(
                cycle = self.cycle,
                mode = %Mode::from_ui_in(value),
                "mode select changed"
            );
        }
        self.inputs.ui_in = value;
    }

    /// Drives the input direction of the bidirectional bus.
    pub const fn set_uio_in(&mut self, value: u8) {
        self.inputs.uio_in = value;
    }

    /// Drives a single bit of `uio_in`.
    pub const fn set_uio_in_bit(&mut self, index: u8, value: bool) {
        self.inputs.uio_in = bits::with_bit(self.inputs.uio_in, index, value);
    }

    /// Drives `uio_in[6:0]`, leaving bit 7 unchanged.
    pub const fn set_uio_in_payload(&mut self, payload: u8) {
        self.inputs.uio_in = bits::with_payload(self.inputs.uio_in, payload);
    }

    /// Drives the active-low reset line.
    pub fn set_rst_n(&mut self, value: bool) {
        if value != self.inputs.rst_n {
            debug!(
                cycle = self.cycle,
                asserted = !value,
                "reset line changed"
            );
        }
        self.inputs.rst_n = value;
    }

    /// Drives the enable line.
    pub const fn set_ena(&mut self, value: bool) {
        self.inputs.ena = value;
    }

    /// Returns the inputs that will be sampled at the next edge.
    pub const fn inputs(&self) -> &PinInputs {
        &self.inputs
    }

    /// Samples the output pins.
    pub fn outputs(&self) -> PinOutputs {
        self.device.outputs(&self.inputs)
    }

    /// Returns the state-machine view for the current inputs.
    pub fn state(&self) -> CoreState {
        self.device.state(&self.inputs)
    }

    /// Returns the number of edges generated so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Returns the simulated time of the last edge in nanoseconds.
    pub const fn time_ns(&self) -> u64 {
        self.cycle.saturating_mul(self.period_ns)
    }

    /// Returns the clock period in nanoseconds.
    pub const fn clock_period_ns(&self) -> u64 {
        self.period_ns
    }

    /// Returns the statistics collected so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Returns the driven device.
    pub const fn device(&self) -> &D {
        &self.device
    }

    /// Returns the driven device mutably.
    pub const fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Consumes the simulator and returns the device.
    pub fn into_device(self) -> D {
        self.device
    }

    /// Returns every device register to its power-on value. No edge is generated.
    pub fn power_on_reset(&mut self) {
        debug!(device = self.device.name(), "power-on reset");
        self.device.power_on_reset();
        self.last_state = None;
    }

    /// Generates `n` rising edges with the current inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the attached trace sink rejects a record. The edge that
    /// produced the record has already been applied.
    pub fn clock_cycles(&mut self, n: u64) -> Result<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Holds reset for `cycles` edges, then releases it without a further edge.
    ///
    /// # Errors
    ///
    /// As [`Simulator::clock_cycles`].
    pub fn apply_reset(&mut self, cycles: u64) -> Result<()> {
        debug!(cycle = self.cycle, cycles, "applying reset");
        self.set_rst_n(false);
        self.clock_cycles(cycles)?;
        self.set_rst_n(true);
        Ok(())
    }

    /// Compares one observed value, records the outcome, and fails on mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Check`](crate::SimError::Check) when `observed != expected`.
    pub fn check(
        &mut self,
        scenario: &'static str,
        signal: &'static str,
        expected: u8,
        observed: u8,
    ) -> Result<()> {
        let passed = expected == observed;
        self.stats.record_check(passed);
        if passed {
            return Ok(());
        }
        let failure = CheckFailure {
            scenario,
            cycle: self.cycle,
            signal,
            expected,
            observed,
        };
        warn!(%failure, "check failed");
        Err(failure.into())
    }

    fn tick(&mut self) -> Result<()> {
        let inputs = self.inputs;
        let state = self.device.state(&inputs);
        if self.last_state != Some(state) {
            debug!(cycle = self.cycle, state = %state, "state entered");
            self.last_state = Some(state);
        }

        let before = self.device.outputs(&inputs);
        self.device.clock_edge(&inputs);
        self.cycle += 1;
        let after = self.device.outputs(&inputs);

        self.stats.record_edge(state, inputs.ena, inputs.in_reset());
        if inputs.ena
            && state == CoreState::Counter
            && !inputs.in_reset()
            && before.uo_out == u8::MAX
            && after.uo_out == 0
        {
            self.stats.record_wrap();
        }

        if self.trace_cycles {
            trace!(
                cycle = self.cycle,
                state = %state,
                ui_in = inputs.ui_in,
                uio_in = inputs.uio_in,
                rst_n = inputs.rst_n,
                ena = inputs.ena,
                uo_out = after.uo_out,
                uio_out = after.uio_out,
                uio_oe = after.uio_oe,
                toggle = after.toggle(),
                "edge"
            );
        }

        if let Some(sink) = self.sink.as_mut() {
            sink.record(&CycleRecord {
                cycle: self.cycle,
                time_ns: self.cycle.saturating_mul(self.period_ns),
                state,
                inputs,
                outputs: after,
            })?;
        }
        Ok(())
    }

    /// Flushes the attached trace sink, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to flush.
    pub fn flush_trace(&mut self) -> Result<()> {
        self.sink.as_mut().map_or(Ok(()), |sink| sink.flush())
    }
}
