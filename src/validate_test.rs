#![allow(clippy::float_cmp)]

use super::*;

fn input(x: Option<f64>, y: Option<f64>, zoom: Option<f64>, min_zoom: Option<f64>, max_zoom: Option<f64>) -> CameraStateInput {
    CameraStateInput { x, y, zoom, min_zoom, max_zoom }
}

fn message(err: &CameraError) -> String {
    err.to_string()
}

// --- Defaults ---

#[test]
fn empty_input_resolves_to_defaults() {
    let state = validate_state(&CameraStateInput::default()).expect("defaults are valid");
    assert_eq!(state, CameraState::default());
    assert_eq!(state.zoom, 1.0);
    assert_eq!(state.min_zoom, 0.1);
    assert_eq!(state.max_zoom, 3.0);
}

#[test]
fn provided_fields_override_defaults() {
    let state = validate_state(&input(Some(-5.0), Some(7.5), Some(0.5), Some(0.25), Some(4.0))).expect("valid");
    assert_eq!(state, CameraState { x: -5.0, y: 7.5, zoom: 0.5, min_zoom: 0.25, max_zoom: 4.0 });
}

#[test]
fn equal_bounds_are_accepted() {
    let state = validate_state(&input(None, None, Some(2.0), Some(2.0), Some(2.0))).expect("valid");
    assert_eq!(state.zoom, 2.0);
}

#[test]
fn zoom_on_bound_is_accepted() {
    assert!(validate_state(&input(None, None, Some(3.0), None, None)).is_ok());
    assert!(validate_state(&input(None, None, Some(0.1), None, None)).is_ok());
}

#[test]
fn state_converts_back_into_input() {
    let state = CameraState { x: 1.0, y: 2.0, zoom: 1.5, min_zoom: 1.0, max_zoom: 2.0 };
    assert_eq!(validate_state(&CameraStateInput::from(state)).expect("valid"), state);
}

// --- Rejections ---

#[test]
fn non_finite_position_is_rejected() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = validate_state(&input(Some(bad), None, None, None, None)).expect_err("x");
        assert!(matches!(err, CameraError::InvalidState(_)));
        assert!(message(&err).contains("x must be finite"));

        let err = validate_state(&input(None, Some(bad), None, None, None)).expect_err("y");
        assert!(message(&err).contains("y must be finite"));
    }
}

#[test]
fn non_positive_zoom_is_rejected() {
    for bad in [0.0, -1.0] {
        let err = validate_state(&input(None, None, Some(bad), None, None)).expect_err("zoom");
        assert!(message(&err).contains("zoom must be positive"));
    }
}

#[test]
fn non_finite_zoom_bounds_are_rejected() {
    let err = validate_state(&input(None, None, None, Some(f64::NAN), None)).expect_err("minZoom");
    assert!(message(&err).contains("minZoom"));
    let err = validate_state(&input(None, None, None, None, Some(f64::INFINITY))).expect_err("maxZoom");
    assert!(message(&err).contains("maxZoom"));
}

#[test]
fn non_positive_min_zoom_is_rejected() {
    let err = validate_state(&input(None, None, None, Some(0.0), None)).expect_err("minZoom");
    assert!(message(&err).contains("minZoom must be positive"));
}

#[test]
fn inverted_bounds_are_rejected() {
    let err = validate_state(&input(None, None, None, Some(2.0), Some(1.0))).expect_err("inverted");
    assert!(message(&err).contains("exceeds maxZoom"));
}

#[test]
fn lone_max_below_default_min_is_rejected() {
    let err = validate_state(&input(None, None, Some(0.05), None, Some(0.05))).expect_err("inverted");
    assert!(matches!(err, CameraError::InvalidState(_)));
}

#[test]
fn zoom_outside_bounds_is_rejected() {
    let err = validate_state(&input(None, None, Some(5.0), None, None)).expect_err("above");
    assert!(message(&err).contains("outside"));
    let err = validate_state(&input(None, None, Some(0.5), Some(1.0), Some(2.0))).expect_err("below");
    assert!(message(&err).contains("outside"));
}

// --- JSON input ---

#[test]
fn input_deserializes_camel_case_with_missing_fields() {
    let parsed: CameraStateInput = serde_json::from_str(r#"{"zoom": 2, "maxZoom": 5}"#).expect("json");
    assert_eq!(parsed, input(None, None, Some(2.0), None, Some(5.0)));
}

#[test]
fn explicit_null_fields_are_not_treated_as_omitted() {
    for json in [r#"{"x": null}"#, r#"{"zoom": null}"#, r#"{"x": null, "zoom": null}"#] {
        assert!(serde_json::from_str::<CameraStateInput>(json).is_err(), "{json}");
    }
}

#[test]
fn explicit_non_finite_fields_are_rejected_not_defaulted() {
    let err = validate_state(&input(Some(f64::NAN), None, Some(f64::INFINITY), None, None)).expect_err("non-finite");
    assert!(matches!(err, CameraError::InvalidState(_)));
    assert!(message(&err).contains("x must be finite"));
}

#[test]
fn input_serializes_only_provided_fields() {
    let json = serde_json::to_string(&input(None, None, Some(2.0), None, None)).expect("serialize");
    assert_eq!(json, r#"{"zoom":2.0}"#);
    let back: CameraStateInput = serde_json::from_str(&json).expect("round trip");
    assert_eq!(back, input(None, None, Some(2.0), None, None));
}

// --- Dimensions ---

#[test]
fn positive_dimensions_are_accepted() {
    assert!(validate_dimensions(800.0, 600.0).is_ok());
    assert!(validate_dimensions(0.5, 0.5).is_ok());
}

#[test]
fn bad_dimensions_are_rejected() {
    for (w, h) in [(0.0, 1.0), (1.0, -1.0), (f64::NAN, 1.0), (1.0, f64::INFINITY)] {
        let err = validate_dimensions(w, h).expect_err("invalid");
        assert!(matches!(err, CameraError::InvalidDimension { .. }));
    }
}

#[test]
fn dimension_error_reports_values() {
    let err = validate_dimensions(-3.0, 600.0).expect_err("invalid");
    assert_eq!(err.to_string(), "invalid canvas dimensions: -3x600");
}
