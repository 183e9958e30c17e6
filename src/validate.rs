//! Validation of caller-supplied camera state.
//!
//! The camera can be seeded from a persisted snapshot, so anything arriving at
//! construction time is treated as untrusted. [`validate_state`] fills omitted
//! fields with defaults and rejects combinations the camera cannot honor.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::camera::CameraState;
use crate::consts::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_X, DEFAULT_Y, DEFAULT_ZOOM};

/// Error returned by fallible camera operations.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// The candidate state has non-finite values or inconsistent zoom bounds.
    #[error("invalid camera state: {0}")]
    InvalidState(String),
    /// A canvas dimension was non-finite or not strictly positive.
    #[error("invalid canvas dimensions: {width}x{height}")]
    InvalidDimension { width: f64, height: f64 },
    /// Camera state could not be read from or written to JSON.
    #[error("camera state json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Partial camera state as supplied by a caller. Omitted fields use defaults.
///
/// A key that is present must hold a number. An explicit `null` is an error,
/// not an omission: `JSON.stringify` writes `NaN` and `Infinity` as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraStateInput {
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f64>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    f64::deserialize(deserializer).map(Some)
}

impl From<CameraState> for CameraStateInput {
    fn from(state: CameraState) -> Self {
        Self {
            x: Some(state.x),
            y: Some(state.y),
            zoom: Some(state.zoom),
            min_zoom: Some(state.min_zoom),
            max_zoom: Some(state.max_zoom),
        }
    }
}

/// Check a candidate state and resolve it against the defaults.
///
/// Provided fields must be finite, and provided zoom values must be strictly
/// positive. The bound relationships (`min_zoom <= max_zoom`,
/// `min_zoom <= zoom <= max_zoom`) are checked on the resolved state, so a
/// lone `max_zoom` below the default `min_zoom` is rejected too.
///
/// # Errors
///
/// Returns [`CameraError::InvalidState`] describing the first violation found.
pub fn validate_state(input: &CameraStateInput) -> Result<CameraState, CameraError> {
    check(input).inspect_err(|e| {
        debug!(error = %e, ?input, "rejected camera state");
    })
}

fn check(input: &CameraStateInput) -> Result<CameraState, CameraError> {
    require_finite("x", input.x)?;
    require_finite("y", input.y)?;
    require_positive("zoom", input.zoom)?;
    require_positive("minZoom", input.min_zoom)?;
    require_positive("maxZoom", input.max_zoom)?;

    let state = CameraState {
        x: input.x.unwrap_or(DEFAULT_X),
        y: input.y.unwrap_or(DEFAULT_Y),
        zoom: input.zoom.unwrap_or(DEFAULT_ZOOM),
        min_zoom: input.min_zoom.unwrap_or(DEFAULT_MIN_ZOOM),
        max_zoom: input.max_zoom.unwrap_or(DEFAULT_MAX_ZOOM),
    };

    if state.min_zoom > state.max_zoom {
        return Err(CameraError::InvalidState(format!(
            "minZoom {} exceeds maxZoom {}",
            state.min_zoom, state.max_zoom
        )));
    }
    if state.zoom < state.min_zoom || state.zoom > state.max_zoom {
        return Err(CameraError::InvalidState(format!(
            "zoom {} outside [{}, {}]",
            state.zoom, state.min_zoom, state.max_zoom
        )));
    }
    Ok(state)
}

fn require_finite(field: &str, value: Option<f64>) -> Result<(), CameraError> {
    match value {
        Some(v) if !v.is_finite() => Err(CameraError::InvalidState(format!("{field} must be finite, got {v}"))),
        _ => Ok(()),
    }
}

fn require_positive(field: &str, value: Option<f64>) -> Result<(), CameraError> {
    require_finite(field, value)?;
    match value {
        Some(v) if v <= 0.0 => Err(CameraError::InvalidState(format!("{field} must be positive, got {v}"))),
        _ => Ok(()),
    }
}

/// Check a proposed canvas size.
///
/// # Errors
///
/// Returns [`CameraError::InvalidDimension`] if either side is non-finite or `<= 0`.
pub fn validate_dimensions(width: f64, height: f64) -> Result<(), CameraError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(width) && ok(height) {
        Ok(())
    } else {
        debug!(width, height, "rejected canvas size");
        Err(CameraError::InvalidDimension { width, height })
    }
}
