//! Tunable navigation parameters.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ANIMATION_MS, DEFAULT_FIT_PADDING, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};

/// Navigation tuning for a [`crate::camera::Camera`].
///
/// Deserializes from partial JSON; missing keys keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraConfig {
    /// Zoom multiplier for one wheel step toward the content.
    pub zoom_in_factor: f64,
    /// Zoom multiplier for one wheel step away from the content.
    pub zoom_out_factor: f64,
    /// Duration used by [`crate::camera::Camera::animate_to_default`].
    pub animation_duration_ms: f64,
    /// Screen margin used by [`crate::camera::Camera::fit_bounds_default`].
    pub fit_padding: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            animation_duration_ms: DEFAULT_ANIMATION_MS,
            fit_padding: DEFAULT_FIT_PADDING,
        }
    }
}
