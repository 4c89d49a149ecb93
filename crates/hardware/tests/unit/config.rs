//! # Configuration Tests
//!
//! Defaults, JSON deserialization, file loading, and validation.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use ttsim_core::SimError;
use ttsim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_cycles);
    assert_eq!(config.clock.period_ns, 10_000);
    assert_eq!(config.clock.frequency_hz(), 100_000);
    assert_eq!(config.driver.reset_cycles, 10);
    assert_eq!(config.driver.settle_cycles, 2);
    assert_eq!(config.driver.counter_check_cycles, 256);
    assert_eq!(config.driver.loopback_sweep, 128);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config = Config::from_json(r#"{ "driver": { "reset_cycles": 3 } }"#).unwrap();
    assert_eq!(config.driver.reset_cycles, 3);
    assert_eq!(config.driver.settle_cycles, 2);
    assert_eq!(config.clock, ClockConfig::default());
}

#[test]
fn test_serialize_roundtrip() {
    let mut config = Config::default();
    config.general.trace_cycles = true;
    config.clock.period_ns = 20;
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}

#[test]
fn test_zero_period_rejected() {
    let err = Config::from_json(r#"{ "clock": { "period_ns": 0 } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(ref msg) if msg.contains("period_ns")));
}

#[test]
fn test_oversized_sweep_rejected() {
    let err = Config::from_json(r#"{ "driver": { "loopback_sweep": 129 } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(ref msg) if msg.contains("loopback_sweep")));
}

#[test]
fn test_zero_counter_samples_rejected() {
    let err = Config::from_json(r#"{ "driver": { "counter_check_cycles": 0 } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn test_malformed_json() {
    let err = Config::from_json("{ general: }").unwrap_err();
    assert!(matches!(err, SimError::Json(_)));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "general": { "trace_cycles": true } }"#)
        .unwrap();
    file.flush().unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.general.trace_cycles);
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, SimError::Io { path: ref p, .. } if *p == path));
}

#[test]
fn test_zero_reset_cycles_rejected() {
    let err = Config::from_json(r#"{ "driver": { "reset_cycles": 0 } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(ref msg) if msg.contains("reset_cycles")));
}
