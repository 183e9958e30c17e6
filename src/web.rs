//! Browser bindings for the camera.
//!
//! [`WebCamera`] is what the editor's JavaScript host holds. It forwards input
//! and render-loop calls to a shared [`Camera`] and drives transitions from
//! `window.requestAnimationFrame`. Objects cross the boundary through
//! `serde-wasm-bindgen`, so wire names match [`CameraState`] and `NaN` stays a
//! number for the validator to reject.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Promise};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};

use crate::animation::{Step, Transition};
use crate::camera::{Bounds, Camera, CameraState, CoordinateTransform, Point};
use crate::validate::CameraStateInput;

/// JavaScript handle to a viewport camera.
#[wasm_bindgen]
pub struct WebCamera {
    inner: Rc<RefCell<Camera>>,
}

#[wasm_bindgen]
impl WebCamera {
    /// Create a camera from an optional partial state object.
    ///
    /// # Errors
    ///
    /// Rejects with an `Error` if the state fails validation.
    #[wasm_bindgen(constructor)]
    pub fn new(initial: JsValue) -> Result<WebCamera, JsValue> {
        let input: CameraStateInput = if initial.is_undefined() || initial.is_null() {
            CameraStateInput::default()
        } else {
            from_js(initial)?
        };
        let camera = Camera::new(&input).map_err(js_error)?;
        Ok(Self { inner: Rc::new(RefCell::new(camera)) })
    }

    /// # Errors
    ///
    /// Rejects with an `Error` for non-finite or non-positive dimensions.
    #[wasm_bindgen(js_name = setCanvasSize)]
    pub fn set_canvas_size(&self, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner.borrow_mut().set_canvas_size(width, height).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setDevicePixelRatio)]
    pub fn set_device_pixel_ratio(&self, dpr: f64) {
        self.inner.borrow_mut().set_device_pixel_ratio(dpr);
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.borrow().position().x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.borrow().position().y
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.borrow().zoom()
    }

    #[wasm_bindgen(getter, js_name = minZoom)]
    pub fn min_zoom(&self) -> f64 {
        self.inner.borrow().min_zoom()
    }

    #[wasm_bindgen(getter, js_name = maxZoom)]
    pub fn max_zoom(&self) -> f64 {
        self.inner.borrow().max_zoom()
    }

    #[wasm_bindgen(js_name = toScreen)]
    pub fn to_screen(&self, world_x: f64, world_y: f64) -> Array {
        pair(self.inner.borrow().to_screen(Point::new(world_x, world_y)))
    }

    #[wasm_bindgen(js_name = toScreenSnapped)]
    pub fn to_screen_snapped(&self, world_x: f64, world_y: f64) -> Array {
        pair(self.inner.borrow().to_screen_snapped(Point::new(world_x, world_y)))
    }

    #[wasm_bindgen(js_name = toWorld)]
    pub fn to_world(&self, screen_x: f64, screen_y: f64) -> Array {
        pair(self.inner.borrow().to_world(Point::new(screen_x, screen_y)))
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&self, zoom: f64) {
        self.inner.borrow_mut().set_zoom(zoom);
    }

    /// Returns `true` if the step was applied.
    #[wasm_bindgen(js_name = zoomToPoint)]
    pub fn zoom_to_point(&self, delta: f64, screen_x: f64, screen_y: f64) -> bool {
        self.inner.borrow_mut().zoom_to_point(delta, Point::new(screen_x, screen_y))
    }

    pub fn pan(&self, delta_x: f64, delta_y: f64) {
        self.inner.borrow_mut().pan(delta_x, delta_y);
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&self, x: f64, y: f64) {
        self.inner.borrow_mut().set_position(x, y);
    }

    #[wasm_bindgen(js_name = centerOn)]
    pub fn center_on(&self, world_x: f64, world_y: f64) {
        self.inner.borrow_mut().center_on(world_x, world_y);
    }

    pub fn reset(&self) {
        self.inner.borrow_mut().reset();
    }

    /// # Errors
    ///
    /// Rejects if the bounds cannot be converted to a JS object.
    #[wasm_bindgen(js_name = getViewportBounds)]
    pub fn viewport_bounds(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.borrow().viewport_bounds())
    }

    #[wasm_bindgen(js_name = isPointVisible)]
    pub fn is_point_visible(&self, world_x: f64, world_y: f64, padding: Option<f64>) -> bool {
        self.inner
            .borrow()
            .is_point_visible(Point::new(world_x, world_y), padding.unwrap_or(0.0))
    }

    #[wasm_bindgen(js_name = isRectVisible)]
    pub fn is_rect_visible(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        self.inner.borrow().is_rect_visible(x, y, width, height)
    }

    #[wasm_bindgen(js_name = fitBounds)]
    pub fn fit_bounds(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64, padding: Option<f64>) {
        let mut camera = self.inner.borrow_mut();
        let padding = padding.unwrap_or(camera.config().fit_padding);
        camera.fit_bounds(Bounds::new(min_x, min_y, max_x, max_y), padding);
    }

    /// Start an eased transition. The promise resolves `true` once the camera
    /// sits exactly on the target, or `false` if a newer transition took over.
    #[wasm_bindgen(js_name = animateTo)]
    pub fn animate_to(&self, target_x: f64, target_y: f64, target_zoom: f64, duration_ms: Option<f64>) -> Promise {
        let transition = {
            let mut camera = self.inner.borrow_mut();
            let duration_ms = duration_ms.unwrap_or(camera.config().animation_duration_ms);
            camera.animate_to(Point::new(target_x, target_y), target_zoom, duration_ms, now_ms())
        };
        let camera = Rc::clone(&self.inner);
        let mut start = |resolve: Function, _reject: Function| drive(Rc::clone(&camera), transition, resolve);
        Promise::new(&mut start)
    }

    #[wasm_bindgen(js_name = cancelAnimation)]
    pub fn cancel_animation(&self) {
        self.inner.borrow_mut().cancel_animation();
    }

    /// # Errors
    ///
    /// Rejects if the state cannot be converted to a JS object.
    #[wasm_bindgen(js_name = getState)]
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.borrow().state())
    }

    /// Restore a full state object without validation.
    ///
    /// # Errors
    ///
    /// Rejects if the object is missing fields or has non-numeric values.
    /// `NaN` and `Infinity` are numbers and pass through unchecked.
    #[wasm_bindgen(js_name = setState)]
    pub fn set_state(&self, state: JsValue) -> Result<(), JsValue> {
        let state: CameraState = from_js(state)?;
        self.inner.borrow_mut().set_state(state);
        Ok(())
    }
}

/// Step `transition` once per animation frame until it finishes, then resolve.
fn drive(camera: Rc<RefCell<Camera>>, transition: Transition, resolve: Function) {
    let Some(window) = web_sys::window() else {
        // No frame clock; land on the target immediately.
        settle(&resolve, transition.finish(&mut camera.borrow_mut()));
        return;
    };

    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let window_for_cb = window.clone();
    let camera_for_cb = Rc::clone(&camera);
    let resolve_for_cb = resolve.clone();
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        let schedule = || {
            holder_for_cb
                .borrow()
                .as_ref()
                .is_some_and(|cb| window_for_cb.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok())
        };
        let finished = transition.advance(&mut camera_for_cb.borrow_mut(), now_ms(), schedule);
        if let Some(step) = finished {
            settle(&resolve_for_cb, step);
            holder_for_cb.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>);

    if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
        *holder.borrow_mut() = Some(cb);
    } else {
        settle(&resolve, transition.finish(&mut camera.borrow_mut()));
    }
}

fn settle(resolve: &Function, step: Step) {
    if let Err(err) = resolve.call1(&JsValue::NULL, &JsValue::from_bool(step == Step::Done)) {
        warn!(?err, "animation completion callback threw");
    }
}

fn pair(p: Point) -> Array {
    Array::of2(&JsValue::from_f64(p.x), &JsValue::from_f64(p.y))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}
