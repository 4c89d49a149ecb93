//! # Simulator Tests
//!
//! Stimulus application, edge generation, and what the simulator hands to its device.

use pretty_assertions::assert_eq;
use ttsim_core::Simulator;
use ttsim_core::common::CONTROL_BIT;
use ttsim_core::config::Config;
use ttsim_core::core::{CoreState, LoopbackPhase, Mode, PinInputs, PinOutputs};

use crate::common::harness::TestContext;
use crate::common::mocks::{MockPinDevice, stuck_device};

#[test]
fn default_inputs_are_enabled_and_out_of_reset() {
    let ctx = TestContext::new();
    assert_eq!(ctx.sim.inputs(), &PinInputs::default());
    assert!(ctx.sim.inputs().ena);
    assert!(ctx.sim.inputs().rst_n);
    assert_eq!(ctx.sim.cycle(), 0);
}

#[test]
fn bit_and_payload_setters_compose() {
    let mut ctx = TestContext::new();
    ctx.sim.set_uio_in_bit(CONTROL_BIT, true);
    ctx.sim.set_uio_in_payload(0x15);
    assert_eq!(ctx.sim.inputs().uio_in, 0x95);
    ctx.sim.set_uio_in_payload(0xFF);
    assert_eq!(ctx.sim.inputs().uio_in, 0xFF);
    ctx.sim.set_uio_in_bit(CONTROL_BIT, false);
    assert_eq!(ctx.sim.inputs().uio_in, 0x7F);
}

#[test]
fn apply_reset_generates_exactly_the_requested_edges() {
    let mut ctx = TestContext::new();
    ctx.reset(10).unwrap();
    assert_eq!(ctx.sim.cycle(), 10);
    assert!(ctx.sim.inputs().rst_n);
    assert_eq!(ctx.sim.stats().reset_cycles, 10);
    assert_eq!(ctx.sim.stats().reset_shift_cycles, 10);
}

#[test]
fn time_follows_clock_period() {
    let mut config = Config::default();
    config.clock.period_ns = 40;
    let mut ctx = TestContext::with_config(&config);
    ctx.sim.clock_cycles(3).unwrap();
    assert_eq!(ctx.sim.clock_period_ns(), 40);
    assert_eq!(ctx.sim.time_ns(), 120);
    let times: Vec<u64> = ctx.records().iter().map(|r| r.time_ns).collect();
    assert_eq!(times, vec![40, 80, 120]);
}

#[test]
fn stats_split_edges_by_state() {
    let mut ctx = TestContext::new().mode(Mode::Counter);
    ctx.reset(3).unwrap();
    ctx.sim.clock_cycles(5).unwrap();
    ctx.sim.set_ui_in(Mode::Loopback.ui_in());
    ctx.sim.clock_cycles(2).unwrap();

    let stats = ctx.sim.stats();
    assert_eq!(stats.cycles, 10);
    assert_eq!(stats.counter_cycles, 8);
    assert_eq!(stats.loopback_cycles, 2);
    assert_eq!(stats.reset_cycles, 3);
    assert_eq!(stats.reset_shift_cycles, 0);
}

#[test]
fn state_tracks_inputs() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.sim.state(), CoreState::Loopback(LoopbackPhase::Normal));
    ctx.sim.set_rst_n(false);
    assert_eq!(ctx.sim.state(), CoreState::Loopback(LoopbackPhase::ResetShift));
    ctx.sim.set_ui_in(Mode::Counter.ui_in());
    assert_eq!(ctx.sim.state(), CoreState::Counter);
}

#[test]
fn power_on_reset_clears_device_without_an_edge() {
    let mut ctx = TestContext::new().mode(Mode::Counter);
    ctx.reset(2).unwrap();
    ctx.sim.clock_cycles(30).unwrap();
    assert_ne!(ctx.uo_out(), 0);
    ctx.sim.power_on_reset();
    assert_eq!(ctx.uo_out(), 0);
    assert_eq!(ctx.sim.device().counter(), 0);
    assert_eq!(ctx.sim.cycle(), 32);
}

#[test]
fn device_sees_inputs_sampled_at_each_edge() {
    let mut mock = MockPinDevice::new();
    mock.expect_name().return_const("mock".to_owned());
    mock.expect_outputs().return_const(PinOutputs::default());
    mock.expect_clock_edge()
        .withf(|inputs| !inputs.rst_n && inputs.ui_in == 1)
        .times(4)
        .return_const(());
    mock.expect_clock_edge()
        .withf(|inputs| inputs.rst_n && inputs.uio_in == 0x42)
        .times(2)
        .return_const(());

    let mut sim = Simulator::new(mock, &Config::default());
    sim.set_ui_in(1);
    sim.apply_reset(4).unwrap();
    sim.set_uio_in(0x42);
    sim.clock_cycles(2).unwrap();
    assert_eq!(sim.cycle(), 6);
}

#[test]
fn power_on_reset_reaches_device() {
    let mut mock = stuck_device(PinOutputs::default());
    mock.expect_power_on_reset().times(1).return_const(());
    let mut sim = Simulator::new(mock, &Config::default());
    sim.power_on_reset();
    sim.device_mut().checkpoint();
}

#[test]
fn check_records_outcome() {
    let mut ctx = TestContext::new();
    ctx.sim.check("unit", "uo_out", 1, 1).unwrap();
    let err = ctx.sim.check("unit", "uo_out", 1, 2).unwrap_err();
    assert!(err.to_string().contains("uo_out"));
    assert_eq!(ctx.sim.stats().checks_passed, 1);
    assert_eq!(ctx.sim.stats().checks_failed, 1);
}
