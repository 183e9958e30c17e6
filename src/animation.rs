//! Animated camera transitions.
//!
//! A [`Transition`] is a plain value describing one eased move from the
//! camera's state at start time to a target view. The host calls
//! [`Transition::step`] once per frame with its clock; elapsed time is
//! recomputed from the captured start each call, so dropped frames catch up.
//!
//! Every transition captures the camera's generation when it starts. Starting
//! another transition, resetting, or restoring state bumps the generation, and
//! any older transition then stops writing and reports [`Step::Superseded`].

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use tracing::trace;

use crate::camera::{Camera, Point};

/// Outcome of advancing a transition by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Interpolated values were written; schedule another frame.
    Running,
    /// The exact target was written; the transition is finished.
    Done,
    /// A newer transition owns the camera; nothing was written.
    Superseded,
}

impl Step {
    /// Whether the host should stop scheduling frames for this transition.
    #[must_use]
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Quadratic ease-in-out over `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// One in-flight move of the camera toward a target view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    generation: u64,
    start_ms: f64,
    duration_ms: f64,
    from_x: f64,
    from_y: f64,
    from_zoom: f64,
    to_x: f64,
    to_y: f64,
    to_zoom: f64,
}

impl Transition {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn target(&self) -> Point {
        Point::new(self.to_x, self.to_y)
    }

    #[must_use]
    pub fn target_zoom(&self) -> f64 {
        self.to_zoom
    }

    /// Fraction of the transition elapsed at `now_ms`, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms.is_nan() || self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).max(0.0).min(1.0)
    }

    /// Advance the camera to where this transition should be at `now_ms`.
    pub fn step(&self, camera: &mut Camera, now_ms: f64) -> Step {
        if camera.generation() != self.generation {
            trace!(generation = self.generation, current = camera.generation(), "transition superseded");
            return Step::Superseded;
        }

        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            camera.apply_view(self.to_x, self.to_y, self.to_zoom);
            return Step::Done;
        }

        let eased = ease_in_out_quad(progress);
        camera.apply_view(
            lerp(self.from_x, self.to_x, eased),
            lerp(self.from_y, self.to_y, eased),
            lerp(self.from_zoom, self.to_zoom, eased),
        );
        Step::Running
    }

    /// One frame of a host loop.
    ///
    /// Steps at `now_ms`, then asks `schedule` for another frame while the
    /// transition is still running. Returns the step to report once the host
    /// should stop: finished, or running with no frame clock, in which case
    /// the camera lands on the target immediately.
    pub fn advance(&self, camera: &mut Camera, now_ms: f64, schedule: impl FnOnce() -> bool) -> Option<Step> {
        let step = self.step(camera, now_ms);
        if step.is_finished() {
            return Some(step);
        }
        if schedule() {
            return None;
        }
        Some(self.finish(camera))
    }

    /// Jump straight to the target, unless superseded.
    pub fn finish(&self, camera: &mut Camera) -> Step {
        self.step(camera, f64::INFINITY)
    }
}

impl Camera {
    /// Begin an eased transition to `target` at `target_zoom`, starting at `now_ms`.
    ///
    /// The target zoom is clamped into the camera's bounds. A non-finite target
    /// coordinate or NaN zoom keeps the current value. Any earlier
    /// transition is superseded. The camera does not move until the returned
    /// transition is stepped.
    pub fn animate_to(&mut self, target: Point, target_zoom: f64, duration_ms: f64, now_ms: f64) -> Transition {
        self.cancel_animation();
        let start = self.state();
        let to_zoom = if target_zoom.is_nan() {
            start.zoom
        } else {
            target_zoom.max(start.min_zoom).min(start.max_zoom)
        };
        let finite_or = |v: f64, current: f64| if v.is_finite() { v } else { current };
        Transition {
            generation: self.generation(),
            start_ms: now_ms,
            duration_ms,
            from_x: start.x,
            from_y: start.y,
            from_zoom: start.zoom,
            to_x: finite_or(target.x, start.x),
            to_y: finite_or(target.y, start.y),
            to_zoom,
        }
    }

    /// [`Self::animate_to`] with the configured duration.
    pub fn animate_to_default(&mut self, target: Point, target_zoom: f64, now_ms: f64) -> Transition {
        let duration_ms = self.config().animation_duration_ms;
        self.animate_to(target, target_zoom, duration_ms, now_ms)
    }

    /// Whether `transition` is still the one allowed to drive this camera.
    #[must_use]
    pub fn is_current(&self, transition: &Transition) -> bool {
        transition.generation == self.generation()
    }
}
