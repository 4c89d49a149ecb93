//! # Reset Tests
//!
//! Reset in counter mode, the loopback reset-shift sub-state, and repeatability.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use ttsim_core::PeripheralCore;
use ttsim_core::common::bits::{self, FEEDBACK_BIT, TOGGLE_BIT};
use ttsim_core::core::{CoreState, LoopbackPhase, Mode, PinInputs};

use crate::common::harness::TestContext;

#[test]
fn power_on_outputs_are_zero() {
    let ctx = TestContext::new();
    let out = ctx.sim.outputs();
    assert_eq!(out.uo_out, 0);
    assert_eq!(out.uio_out, 0);
    assert_eq!(out.uio_oe, 0);
    assert!(out.live);
}

#[test]
fn counter_reset_clears_outputs_within_one_edge() {
    let mut ctx = TestContext::new().mode(Mode::Counter);
    ctx.reset(10).unwrap();
    ctx.sim.clock_cycles(40).unwrap();
    assert_ne!(ctx.uo_out(), 0);

    ctx.sim.set_rst_n(false);
    // Output enable drops combinationally, before any edge.
    assert_eq!(ctx.sim.outputs().uio_oe, 0x00);
    assert_eq!(ctx.step().unwrap().uo_out, 0);
    assert_eq!(ctx.step().unwrap().uo_out, 0);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(10)]
fn counting_resumes_from_zero(#[case] hold: u64) {
    let mut ctx = TestContext::new().mode(Mode::Counter);
    ctx.reset(10).unwrap();
    ctx.sim.clock_cycles(100).unwrap();

    ctx.reset(hold).unwrap();
    assert_eq!(ctx.sample_uo_out(5).unwrap(), vec![0, 0, 1, 2, 3]);
}

#[test]
fn counter_reset_sequence_is_repeatable() {
    let mut ctx = TestContext::new().mode(Mode::Counter);
    ctx.reset(10).unwrap();
    let first = ctx.sample_uo_out(20).unwrap();
    ctx.reset(10).unwrap();
    let second = ctx.sample_uo_out(20).unwrap();
    assert_eq!(first, second);
}

#[rstest]
#[case(0x3C)]
#[case(0x81)]
fn loopback_reset_sequence_repeats_after_first_edge(#[case] uio_in: u8) {
    let mut ctx = TestContext::new().mode(Mode::Loopback);
    ctx.sim.set_uio_in(uio_in);
    ctx.reset(10).unwrap();
    let first = ctx.sample_uo_out(20).unwrap();
    ctx.reset(10).unwrap();
    let second = ctx.sample_uo_out(20).unwrap();
    // Reset shifts rather than clears the output register, so only the toggle bit of
    // the first sample depends on what was there before.
    assert_eq!(bits::out_payload(first[0]), bits::out_payload(second[0]));
    assert_eq!(first[1..], second[1..]);
}

#[test]
fn reset_shift_is_a_johnson_ring() {
    let mut ctx = TestContext::new().mode(Mode::Loopback);
    ctx.sim.set_rst_n(false);
    assert_eq!(
        ctx.sim.state(),
        CoreState::Loopback(LoopbackPhase::ResetShift)
    );
    let ring = ctx.sample_uo_out(16).unwrap();
    assert_eq!(
        ring,
        vec![
            0x01, 0x03, 0x07, 0x0F, 0x1F, 0x3F, 0x7F, 0xFF, //
            0xFE, 0xFC, 0xF8, 0xF0, 0xE0, 0xC0, 0x80, 0x00,
        ]
    );
}

#[test]
fn reset_shift_ignores_payload() {
    let mut ctx = TestContext::new().mode(Mode::Loopback);
    ctx.sim.set_uio_in(0x2A);
    ctx.step().unwrap();
    ctx.sim.set_rst_n(false);
    let before = ctx.uo_out();
    ctx.sim.set_uio_in(0x55);
    let after = ctx.step().unwrap().uo_out;
    assert_eq!(bits::out_payload(after), bits::payload(before));
    assert_eq!(bits::bit(after, TOGGLE_BIT), !bits::bit(before, FEEDBACK_BIT));
}

proptest! {
    #[test]
    fn reset_shift_holds_for_any_start_and_stimulus(
        seed in any::<u8>(),
        stimulus in proptest::collection::vec(any::<u8>(), 1..32)
    ) {
        let mut core = PeripheralCore::new();
        core.clock_edge(&PinInputs { uio_in: seed, ..PinInputs::default() });
        for uio_in in stimulus {
            let inputs = PinInputs { uio_in, rst_n: false, ..PinInputs::default() };
            let before = core.output_register();
            core.clock_edge(&inputs);
            let after = core.output_register();
            prop_assert_eq!(after >> 1, before & 0x7F);
            prop_assert_eq!(bits::bit(after, TOGGLE_BIT), !bits::bit(before, FEEDBACK_BIT));
            prop_assert_eq!(core.counter(), 0);
        }
    }
}
