#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::config::CameraConfig;
use crate::consts::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_X, DEFAULT_Y, DEFAULT_ZOOM, MIN_DEVICE_PIXEL_RATIO};
use crate::validate::{CameraError, CameraStateInput, validate_dimensions, validate_state};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// Inclusive containment test against these bounds grown by `padding` on every side.
    #[must_use]
    pub fn contains(&self, point: Point, padding: f64) -> bool {
        point.x >= self.min_x - padding
            && point.x <= self.max_x + padding
            && point.y >= self.min_y - padding
            && point.y <= self.max_y + padding
    }

    /// Whether the rectangle at `(x, y)` with the given size overlaps these bounds.
    ///
    /// Touching edges count as overlapping.
    #[must_use]
    pub fn intersects_rect(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        !(x + width < self.min_x || x > self.max_x || y + height < self.min_y || y > self.max_y)
    }
}

/// Conversion between world space and screen space.
pub trait CoordinateTransform {
    fn to_screen(&self, world: Point) -> Point;
    fn to_world(&self, screen: Point) -> Point;
}

/// How a zoom request that lands outside `[min_zoom, max_zoom]` is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPolicy {
    /// Clamp into range and apply.
    Clamp,
    /// Leave the camera untouched, so repeated wheel steps never stick at a limit.
    RejectOutOfRange,
}

/// Persistable camera snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            x: DEFAULT_X,
            y: DEFAULT_Y,
            zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

/// Viewport camera for the editor canvas.
///
/// `(x, y)` is the world point drawn at the center of the canvas.
/// `zoom` is the number of CSS pixels per world unit.
#[derive(Debug, Clone)]
pub struct Camera {
    x: f64,
    y: f64,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    canvas_width: f64,
    canvas_height: f64,
    dpr: f64,
    generation: u64,
    config: CameraConfig,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_state(CameraState::default(), CameraConfig::default())
    }
}

impl Camera {
    /// Create a camera from a partial initial state.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidState`] if the state fails validation.
    pub fn new(input: &CameraStateInput) -> Result<Self, CameraError> {
        Self::with_config(input, CameraConfig::default())
    }

    /// Create a camera from a partial initial state with custom navigation tuning.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidState`] if the state fails validation.
    pub fn with_config(input: &CameraStateInput, config: CameraConfig) -> Result<Self, CameraError> {
        let state = validate_state(input)?;
        Ok(Self::from_state(state, config))
    }

    /// Restore a camera from persisted JSON, validating it like any other initial state.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::Json`] for malformed JSON and
    /// [`CameraError::InvalidState`] for values that fail validation.
    pub fn from_json(json: &str) -> Result<Self, CameraError> {
        let input: CameraStateInput = serde_json::from_str(json)?;
        Self::new(&input)
    }

    fn from_state(state: CameraState, config: CameraConfig) -> Self {
        Self {
            x: state.x,
            y: state.y,
            zoom: state.zoom,
            min_zoom: state.min_zoom,
            max_zoom: state.max_zoom,
            canvas_width: 0.0,
            canvas_height: 0.0,
            dpr: MIN_DEVICE_PIXEL_RATIO,
            generation: 0,
            config,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    #[must_use]
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Last canvas size in CSS pixels, `(0, 0)` until [`Self::set_canvas_size`] succeeds.
    #[must_use]
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    // --- Canvas ---

    /// Record the canvas size in CSS pixels. Call on every resize.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidDimension`] if either side is non-finite or
    /// not positive. The previous size is kept.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> Result<(), CameraError> {
        validate_dimensions(width, height)?;
        self.canvas_width = width;
        self.canvas_height = height;
        Ok(())
    }

    /// Record the device pixel ratio used by renderers for backing-store scaling.
    ///
    /// Values below 1 are raised to 1. Non-finite values are ignored.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        if dpr.is_finite() {
            self.dpr = dpr.max(MIN_DEVICE_PIXEL_RATIO);
        }
    }

    // --- Transforms ---

    /// [`CoordinateTransform::to_screen`] rounded to whole pixels, for crisp strokes.
    #[must_use]
    pub fn to_screen_snapped(&self, world: Point) -> Point {
        let p = self.to_screen(world);
        Point::new(p.x.round(), p.y.round())
    }

    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    #[must_use]
    pub fn world_dist_to_screen(&self, world_dist: f64) -> f64 {
        world_dist * self.zoom
    }

    fn canvas_center(&self) -> Point {
        Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    // --- Zoom ---

    /// Set the zoom factor, clamped into `[min_zoom, max_zoom]`. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = self.clamp_zoom(zoom);
    }

    // Not `f64::clamp`: restored state may carry inverted bounds, which must not panic.
    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// One wheel step of zoom toward the cursor.
    ///
    /// Positive `delta` zooms in, negative zooms out; only the sign matters.
    /// A step that would leave the zoom bounds does nothing. Returns whether
    /// the camera changed.
    pub fn zoom_to_point(&mut self, delta: f64, screen: Point) -> bool {
        let factor = if delta > 0.0 {
            self.config.zoom_in_factor
        } else if delta < 0.0 {
            self.config.zoom_out_factor
        } else {
            return false;
        };
        self.zoom_by(factor, screen, ZoomPolicy::RejectOutOfRange)
    }

    /// Multiply the zoom by `factor`, keeping the world point under `screen` fixed.
    ///
    /// Returns whether the camera changed.
    pub fn zoom_by(&mut self, factor: f64, screen: Point, policy: ZoomPolicy) -> bool {
        let candidate = self.zoom * factor;
        if !candidate.is_finite() {
            return false;
        }
        let in_range = (self.min_zoom..=self.max_zoom).contains(&candidate);
        let new_zoom = match policy {
            ZoomPolicy::RejectOutOfRange if !in_range => {
                trace!(zoom = self.zoom, candidate, "zoom step rejected at limit");
                return false;
            }
            ZoomPolicy::RejectOutOfRange => candidate,
            ZoomPolicy::Clamp => self.clamp_zoom(candidate),
        };
        if new_zoom.total_cmp(&self.zoom).is_eq() {
            return false;
        }

        let before = self.to_world(screen);
        self.zoom = new_zoom;
        let after = self.to_world(screen);
        self.x += before.x - after.x;
        self.y += before.y - after.y;
        true
    }

    // --- Position ---

    /// Move by a screen-space drag delta. Dragging right moves the view left in world space.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_damped(dx, dy, 1.0);
    }

    /// [`Self::pan`] with the delta scaled by `damping` first.
    pub fn pan_damped(&mut self, dx: f64, dy: f64, damping: f64) {
        if !dx.is_finite() || !dy.is_finite() || !damping.is_finite() {
            warn!(dx, dy, damping, "ignoring non-finite pan delta");
            return;
        }
        self.x -= dx * damping / self.zoom;
        self.y -= dy * damping / self.zoom;
    }

    /// Center the viewport on a world point.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Alias of [`Self::set_position`].
    pub fn center_on(&mut self, world_x: f64, world_y: f64) {
        self.set_position(world_x, world_y);
    }

    /// Return to the world origin at the default zoom and stop any running transition.
    pub fn reset(&mut self) {
        self.x = DEFAULT_X;
        self.y = DEFAULT_Y;
        self.zoom = self.clamp_zoom(DEFAULT_ZOOM);
        self.cancel_animation();
    }

    // --- Queries ---

    /// World-space rectangle currently covered by the canvas.
    #[must_use]
    pub fn viewport_bounds(&self) -> Bounds {
        let min = self.to_world(Point::new(0.0, 0.0));
        let max = self.to_world(Point::new(self.canvas_width, self.canvas_height));
        Bounds::new(min.x, min.y, max.x, max.y)
    }

    /// Whether a world point is on screen, with `padding` world units of slack.
    #[must_use]
    pub fn is_point_visible(&self, world: Point, padding: f64) -> bool {
        self.viewport_bounds().contains(world, padding)
    }

    /// Whether any part of a world-space rectangle is on screen.
    #[must_use]
    pub fn is_rect_visible(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        self.viewport_bounds().intersects_rect(x, y, width, height)
    }

    // --- Fit ---

    /// Zoom and center so `bounds` fits inside the canvas with `padding` pixels of margin.
    ///
    /// The zoom is capped at `max_zoom` but not raised to `min_zoom`, so very
    /// large regions can end up below the lower bound. Degenerate bounds are the
    /// caller's responsibility.
    pub fn fit_bounds(&mut self, bounds: Bounds, padding: f64) {
        let zoom_x = (self.canvas_width - padding * 2.0) / bounds.width();
        let zoom_y = (self.canvas_height - padding * 2.0) / bounds.height();
        self.zoom = zoom_x.min(zoom_y).min(self.max_zoom);
        let center = bounds.center();
        self.x = center.x;
        self.y = center.y;
    }

    /// [`Self::fit_bounds`] using the configured padding.
    pub fn fit_bounds_default(&mut self, bounds: Bounds) {
        self.fit_bounds(bounds, self.config.fit_padding);
    }

    // --- Serialization ---

    #[must_use]
    pub fn state(&self) -> CameraState {
        CameraState {
            x: self.x,
            y: self.y,
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        }
    }

    /// Restore a snapshot as-is. Untrusted input should go through
    /// [`crate::validate::validate_state`] first. Cancels any running transition.
    pub fn set_state(&mut self, state: CameraState) {
        self.x = state.x;
        self.y = state.y;
        self.zoom = state.zoom;
        self.min_zoom = state.min_zoom;
        self.max_zoom = state.max_zoom;
        self.cancel_animation();
    }

    /// Serialize the current snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CameraError> {
        Ok(serde_json::to_string(&self.state())?)
    }

    // --- Animation bookkeeping ---

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate every outstanding transition.
    pub fn cancel_animation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Write interpolated view values without clamping.
    pub(crate) fn apply_view(&mut self, x: f64, y: f64, zoom: f64) {
        self.x = x;
        self.y = y;
        self.zoom = zoom;
    }
}

impl CoordinateTransform for Camera {
    fn to_screen(&self, world: Point) -> Point {
        let center = self.canvas_center();
        Point {
            x: (world.x - self.x) * self.zoom + center.x,
            y: (world.y - self.y) * self.zoom + center.y,
        }
    }

    fn to_world(&self, screen: Point) -> Point {
        let center = self.canvas_center();
        Point {
            x: (screen.x - center.x) / self.zoom + self.x,
            y: (screen.y - center.y) / self.zoom + self.y,
        }
    }
}
