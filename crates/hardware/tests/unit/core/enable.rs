//! # Enable Tests
//!
//! A low `ena` gates the clock: registers hold and outputs are flagged as not live.

use pretty_assertions::assert_eq;
use ttsim_core::core::Mode;

use crate::common::harness::TestContext;

#[test]
fn gated_edges_hold_every_register() {
    let mut ctx = TestContext::new().mode(Mode::Counter);
    ctx.reset(10).unwrap();
    ctx.sim.clock_cycles(20).unwrap();
    let held = ctx.sim.device().clone();

    ctx.sim.set_ena(false);
    ctx.sim.clock_cycles(7).unwrap();
    assert_eq!(ctx.sim.device(), &held);
    assert!(!ctx.sim.outputs().live);

    ctx.sim.set_ena(true);
    assert!(ctx.sim.outputs().live);
    assert_eq!(ctx.step().unwrap().uo_out, held.counter());
}

#[test]
fn gated_edges_ignore_reset() {
    let mut ctx = TestContext::new().mode(Mode::Counter);
    ctx.reset(10).unwrap();
    ctx.sim.clock_cycles(20).unwrap();
    let value = ctx.uo_out();

    ctx.sim.set_ena(false);
    ctx.sim.set_rst_n(false);
    ctx.sim.clock_cycles(3).unwrap();
    assert_eq!(ctx.uo_out(), value);
}

#[test]
fn gated_edges_are_counted() {
    let mut ctx = TestContext::new();
    ctx.sim.set_ena(false);
    ctx.sim.clock_cycles(4).unwrap();
    ctx.sim.set_ena(true);
    ctx.sim.clock_cycles(2).unwrap();

    let stats = ctx.sim.stats();
    assert_eq!(stats.cycles, 6);
    assert_eq!(stats.gated_cycles, 4);
    assert_eq!(stats.loopback_cycles, 2);
    // Records are still produced for gated edges.
    assert_eq!(ctx.records().len(), 6);
    assert!(!ctx.records()[0].outputs.live);
}
