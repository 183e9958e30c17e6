//! Viewport camera for the canvas editor surface.
//!
//! Maps world space to canvas pixels and back, and provides the navigation
//! built on it. It draws nothing and performs no I/O.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`camera`] | Camera state, coordinate transforms, navigation, visibility queries |
//! | [`animation`] | Eased transitions guarded by a generation token |
//! | [`validate`] | Initial-state and canvas-size validation, [`validate::CameraError`] |
//! | [`config`] | Navigation tuning (zoom step factors, default duration and padding) |
//! | [`web`] | `wasm-bindgen` handle driven by `requestAnimationFrame` |
//! | [`consts`] | Shared numeric defaults |

pub mod animation;
pub mod camera;
pub mod config;
pub mod consts;
pub mod validate;
pub mod web;

pub use animation::{Step, Transition};
pub use camera::{Bounds, Camera, CameraState, CoordinateTransform, Point, ZoomPolicy};
pub use config::CameraConfig;
pub use validate::{CameraError, CameraStateInput};
