//! Viewport Watching
//!
//! Thin wrapper over `IntersectionObserver`. Callbacks receive the index of
//! the target in the slice they were registered with and answer with a
//! [`Watch`] decision.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::dom;
use crate::error::Result;
use crate::models::Watch;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchOptions {
    pub threshold: Option<f64>,
    pub root_margin: Option<String>,
}

impl WatchOptions {
    pub fn threshold(threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
            root_margin: None,
        }
    }

    pub fn with_root_margin(mut self, margin: &str) -> Self {
        self.root_margin = Some(margin.to_string());
        self
    }
}

pub fn supported() -> bool {
    dom::has_global("IntersectionObserver")
}

/// Watch `targets`, calling `on_change(index, is_intersecting)` for each
/// notification. Targets whose callback answers `Detach` are unobserved.
pub fn watch<F>(
    targets: &[web_sys::HtmlElement],
    options: &WatchOptions,
    on_change: F,
) -> Result<web_sys::IntersectionObserver>
where
    F: Fn(usize, bool) -> Watch + 'static,
{
    let watched: Vec<web_sys::Element> = targets.iter().map(|t| t.clone().into()).collect();
    let lookup = watched.clone();

    let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = lookup.iter().position(|el| *el == target) else {
                    continue;
                };
                if on_change(index, entry.is_intersecting()) == Watch::Detach {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let init = web_sys::IntersectionObserverInit::new();
    if let Some(threshold) = options.threshold {
        init.set_threshold(&JsValue::from_f64(threshold));
    }
    if let Some(margin) = &options.root_margin {
        init.set_root_margin(margin);
    }

    let observer = web_sys::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &init,
    )?;
    callback.forget();

    for target in &watched {
        observer.observe(target);
    }
    Ok(observer)
}
