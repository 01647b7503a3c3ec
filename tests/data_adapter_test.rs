// ABOUTME: Integration tests for the raw-input data adapter
// ABOUTME: Covers derived values, label mapping, default substitution logs and required-field failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::subscriber::with_default;
use tracing::Level;

use bionic_core::errors::ErrorCode;
use bionic_core::models::{CoverDensity, StandType, WaterType};
use bionic_hunt::adapter::{DataAdapter, RawWaypointInput, NEUTRAL_NDVI, UNKNOWN_WATER_DISTANCE};

fn raw() -> RawWaypointInput {
    serde_json::from_str(common::RAW_WAYPOINT_JSON).unwrap()
}

/// Log sink shared between the subscriber and the assertions
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn normalize_with_logs(input: &RawWaypointInput) -> String {
    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(move || sink.clone())
        .finish();
    let _features = with_default(subscriber, || DataAdapter::default().normalize(input).unwrap());
    logs.contents()
}

#[test]
fn test_normalizes_french_input() {
    let features = DataAdapter::default().normalize(&raw()).unwrap();

    assert!((features.latitude - 46.2).abs() < f64::EPSILON);
    assert_eq!(features.stand_type, StandType::Oak);
    assert_eq!(
        features.adjacent_stands,
        vec![StandType::Conifer, StandType::Meadow]
    );
    assert!(features.is_transition);
    assert_eq!(features.water_type, Some(WaterType::Stream));
    assert_eq!(features.cover_density, Some(CoverDensity::Dense));
    assert!(features.has_confluence);
    assert_eq!(features.aspect, Some(270.0));
    assert_eq!(features.human_pressure, Some(100.0));
}

#[test]
fn test_derives_slope_and_relative_elevation() {
    let features = DataAdapter::default().normalize(&raw()).unwrap();
    let expected_slope = (10.0_f64 / 30.0).atan().to_degrees();
    assert!((features.slope - expected_slope).abs() < 1e-9);
    assert!(features.relative_elevation.unwrap().abs() < 1e-9);
}

#[test]
fn test_cell_size_changes_derived_slope() {
    let adapter = DataAdapter::new(10.0).unwrap();
    let features = adapter.normalize(&raw()).unwrap();
    assert!((features.slope - 45.0).abs() < 1e-9);
    assert!(DataAdapter::new(0.0).is_err());
}

#[test]
fn test_explicit_values_win_over_derived_ones() {
    let mut input = raw();
    input.terrain.slope = Some(4.0);
    input.terrain.relative_elevation = Some(-12.0);
    input.is_transition = Some(false);
    let features = DataAdapter::default().normalize(&input).unwrap();
    assert!((features.slope - 4.0).abs() < f64::EPSILON);
    assert_eq!(features.relative_elevation, Some(-12.0));
    assert!(!features.is_transition);
}

#[test]
fn test_default_substitutions_are_logged() {
    let input: RawWaypointInput = serde_json::from_str(
        r#"{"latitude": 45.0, "longitude": 5.0, "terrain": {"elevation": 500.0, "slope": 12.0}}"#,
    )
    .unwrap();
    let logs = normalize_with_logs(&input);
    assert!(logs.contains("Water distance unavailable, using default"));
    assert!(logs.contains("NDVI unavailable, using default"));
    assert!(logs.contains("fallback=0.4"));

    let logs = normalize_with_logs(&raw());
    assert!(!logs.contains("Water distance unavailable"));
    assert!(!logs.contains("NDVI unavailable"));
}

#[test]
fn test_missing_optional_data_gets_neutral_defaults() {
    let input: RawWaypointInput = serde_json::from_str(
        r#"{"latitude": 45.0, "longitude": 5.0, "terrain": {"elevation": 500.0, "slope": 12.0}}"#,
    )
    .unwrap();
    let features = DataAdapter::default().normalize(&input).unwrap();
    assert!((features.ndvi - NEUTRAL_NDVI).abs() < f64::EPSILON);
    assert!((features.water_distance - UNKNOWN_WATER_DISTANCE).abs() < f64::EPSILON);
    assert_eq!(features.stand_type, StandType::Unknown);
    assert!(features.cover_density.is_none());
    assert!(features.relative_elevation.is_none());
    assert!(!features.is_transition);
}

#[test]
fn test_ndvi_is_clamped() {
    let mut input = raw();
    input.vegetation.ndvi = Some(1.8);
    let features = DataAdapter::default().normalize(&input).unwrap();
    assert!((features.ndvi - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_missing_required_fields_fail_fast() {
    let adapter = DataAdapter::default();

    let mut input = raw();
    input.latitude = None;
    let error = adapter.normalize(&input).unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);

    let mut input = raw();
    input.terrain.elevation = None;
    assert_eq!(
        adapter.normalize(&input).unwrap_err().code,
        ErrorCode::MissingRequiredField
    );

    let mut input = raw();
    input.terrain.neighbor_elevations.clear();
    assert_eq!(
        adapter.normalize(&input).unwrap_err().code,
        ErrorCode::MissingRequiredField
    );
}

#[test]
fn test_out_of_range_latitude_is_rejected() {
    let mut input = raw();
    input.latitude = Some(95.0);
    assert_eq!(
        DataAdapter::default().normalize(&input).unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );
}
