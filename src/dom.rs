//! DOM Access
//!
//! The subsystems talk to elements through [`DomNode`]; the page uses
//! `web_sys::HtmlElement`, tests use in-memory nodes.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::{PortfolioError, Result};

/// The element operations the portfolio behaviours need
pub trait DomNode: Clone + 'static {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn text(&self) -> Option<String>;
    fn set_text(&self, text: &str);
    fn set_style(&self, property: &str, value: &str);
    fn has_class(&self, class: &str) -> bool;
    /// Add or remove `class`
    fn set_class(&self, class: &str, present: bool);
}

impl DomNode for web_sys::HtmlElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = web_sys::Element::set_attribute(self, name, value);
    }

    fn text(&self) -> Option<String> {
        self.text_content()
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.style().set_property(property, value);
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_class(&self, class: &str, present: bool) {
        let classes = self.class_list();
        let _ = if present { classes.add_1(class) } else { classes.remove_1(class) };
    }
}

pub fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or(PortfolioError::MissingGlobal("window"))
}

pub fn document() -> Result<web_sys::Document> {
    window()?.document().ok_or(PortfolioError::MissingGlobal("document"))
}

/// All `HtmlElement`s in `doc` matching `selector`
pub fn query_all(doc: &web_sys::Document, selector: &str) -> Vec<web_sys::HtmlElement> {
    let Ok(list) = doc.query_selector_all(selector) else {
        log::warn!("bad selector: {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

/// First `HtmlElement` in `doc` matching `selector`
pub fn query(doc: &web_sys::Document, selector: &str) -> Option<web_sys::HtmlElement> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
}

/// First descendant of `el` matching `selector`
pub fn query_in(el: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
    el.query_selector(selector).ok().flatten()
}

/// Attach a listener for the lifetime of the page
pub fn listen<E, F>(target: &web_sys::EventTarget, event: &str, mut handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let cb = Closure::<dyn FnMut(JsValue)>::new(move |ev: JsValue| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    });
    let _ = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
    cb.forget();
}

/// True when `name` is defined on `window`
pub fn has_global(name: &str) -> bool {
    window()
        .ok()
        .and_then(|win| js_sys::Reflect::has(&win, &JsValue::from_str(name)).ok())
        .unwrap_or(false)
}
