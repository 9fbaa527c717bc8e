//! Pointer Tilt Utilities
//!
//! 3-D tilt and hover-lift effects driven by mouse events.
//! The geometry is plain math so it can be tested off the browser.

use serde::Deserialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Tilt tuning
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Rotation at the edges of the element, in degrees
    pub max_degrees: f64,
    /// Upward translation while hovered, in pixels
    pub lift_px: f64,
    pub perspective_px: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_degrees: 5.0,
            lift_px: 5.0,
            perspective_px: 1000.0,
        }
    }
}

/// Element box in client coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn from_rect(rect: &web_sys::DomRect) -> Self {
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// Computed tilt for one pointer position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub translate_y: f64,
}

impl Tilt {
    /// No rotation, no lift
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Tilt for a pointer at client position (`x`, `y`) over `bounds`.
    ///
    /// Rotation is proportional to the offset from the centre and reaches
    /// `max_degrees` at the edges.
    pub fn at(bounds: Bounds, x: f64, y: f64, config: &TiltConfig) -> Self {
        let center_x = bounds.width / 2.0;
        let center_y = bounds.height / 2.0;
        let local_x = x - bounds.left;
        let local_y = y - bounds.top;

        let max = config.max_degrees.abs();
        let axis = |offset: f64, center: f64| {
            if center > 0.0 {
                (offset / center * max).clamp(-max, max) + 0.0
            } else {
                0.0
            }
        };

        Self {
            rotate_x: axis(local_y - center_y, center_y),
            rotate_y: axis(center_x - local_x, center_x),
            translate_y: -config.lift_px,
        }
    }

    /// CSS `transform` value
    pub fn to_css(&self, perspective_px: f64) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateY({}px)",
            perspective_px,
            self.rotate_x,
            self.rotate_y,
            self.translate_y + 0.0
        )
    }
}

/// Lift-and-grow hover effect
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HoverLift {
    pub lift_px: f64,
    pub scale: f64,
}

impl Default for HoverLift {
    fn default() -> Self {
        Self {
            lift_px: 5.0,
            scale: 1.02,
        }
    }
}

impl HoverLift {
    pub fn hovered_css(&self) -> String {
        format!("translateY({}px) scale({})", -self.lift_px, self.scale)
    }

    pub fn rest_css(&self) -> &'static str {
        "translateY(0) scale(1)"
    }
}

fn set_transform(el: &web_sys::HtmlElement, value: &str) {
    let _ = el.style().set_property("transform", value);
}

fn listen<F>(el: &web_sys::HtmlElement, event: &str, handler: F)
where
    F: FnMut(web_sys::MouseEvent) + 'static,
{
    let cb = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
    let _ = el.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
    cb.forget();
}

/// Create mousemove handler that tilts `el` toward the pointer
pub fn make_on_mousemove(el: web_sys::HtmlElement, config: TiltConfig) -> impl FnMut(web_sys::MouseEvent) + 'static {
    move |ev: web_sys::MouseEvent| {
        let bounds = Bounds::from_rect(&el.get_bounding_client_rect());
        let tilt = Tilt::at(bounds, ev.client_x() as f64, ev.client_y() as f64, &config);
        set_transform(&el, &tilt.to_css(config.perspective_px));
    }
}

/// Create mouseleave handler that resets the tilt
pub fn make_on_mouseleave(el: web_sys::HtmlElement, config: TiltConfig) -> impl FnMut(web_sys::MouseEvent) + 'static {
    move |_ev: web_sys::MouseEvent| {
        set_transform(&el, &Tilt::neutral().to_css(config.perspective_px));
    }
}

/// Bind pointer cursor and tilt handlers to `el`
pub fn bind_tilt(el: &web_sys::HtmlElement, config: TiltConfig) {
    let enter_el = el.clone();
    listen(el, "mouseenter", move |_ev| {
        let _ = enter_el.style().set_property("cursor", "pointer");
    });
    listen(el, "mousemove", make_on_mousemove(el.clone(), config));
    listen(el, "mouseleave", make_on_mouseleave(el.clone(), config));
}

/// Bind lift-on-hover handlers to `el`
pub fn bind_hover_lift(el: &web_sys::HtmlElement, lift: HoverLift) {
    let enter_el = el.clone();
    listen(el, "mouseenter", move |_ev| set_transform(&enter_el, &lift.hovered_css()));
    let leave_el = el.clone();
    listen(el, "mouseleave", move |_ev| set_transform(&leave_el, lift.rest_css()));
}
