//! Shared numeric constants for the viewport camera.

// ── Initial state ───────────────────────────────────────────────

/// World-space x the camera starts centered on.
pub const DEFAULT_X: f64 = 0.0;

/// World-space y the camera starts centered on.
pub const DEFAULT_Y: f64 = 0.0;

/// Starting zoom factor (1.0 = one world unit per CSS pixel).
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Lower zoom bound when the caller does not supply one.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound when the caller does not supply one.
pub const DEFAULT_MAX_ZOOM: f64 = 3.0;

// ── Navigation ──────────────────────────────────────────────────

/// Multiplier applied per wheel step when zooming in.
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Multiplier applied per wheel step when zooming out.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Screen-space margin in pixels kept around content by `fit_bounds`.
pub const DEFAULT_FIT_PADDING: f64 = 50.0;

// ── Animation ───────────────────────────────────────────────────

/// Length of an animated camera transition in milliseconds.
pub const DEFAULT_ANIMATION_MS: f64 = 300.0;

// ── Display ─────────────────────────────────────────────────────

/// Smallest accepted device pixel ratio.
pub const MIN_DEVICE_PIXEL_RATIO: f64 = 1.0;
