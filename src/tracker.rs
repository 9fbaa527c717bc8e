//! Analytics Tracking
//!
//! Events go through [`EventTracker`]. On the page it forwards to an optional
//! global `trackEvent(name, properties)` function, looked up on every call.

use std::collections::BTreeMap;

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

pub const FILTER_USED: &str = "portfolio_filter_used";
pub const ITEM_CLICKED: &str = "portfolio_item_clicked";

/// Event property map, serialized as a plain JS object
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EventProperties(BTreeMap<String, String>);

impl EventProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

pub trait EventTracker {
    /// Best effort; never fails
    fn track(&self, event: &str, properties: &EventProperties);
}

/// Drops every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracker;

impl EventTracker for NoopTracker {
    fn track(&self, _event: &str, _properties: &EventProperties) {}
}

/// Calls a global function on `window` when one is defined
#[derive(Clone, Debug)]
pub struct GlobalFunctionTracker {
    function_name: String,
}

impl GlobalFunctionTracker {
    pub fn new(function_name: &str) -> Self {
        Self {
            function_name: function_name.to_string(),
        }
    }

    fn resolve(&self) -> Option<js_sys::Function> {
        let win = web_sys::window()?;
        js_sys::Reflect::get(&win, &JsValue::from_str(&self.function_name))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()
    }
}

impl Default for GlobalFunctionTracker {
    fn default() -> Self {
        Self::new("trackEvent")
    }
}

impl EventTracker for GlobalFunctionTracker {
    fn track(&self, event: &str, properties: &EventProperties) {
        let Some(function) = self.resolve() else {
            return;
        };
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let props = match properties.serialize(&serializer) {
            Ok(props) => props,
            Err(err) => {
                log::debug!("dropping {} event: {}", event, err);
                return;
            }
        };
        if let Err(err) = function.call2(&JsValue::NULL, &JsValue::from_str(event), &props) {
            log::debug!("{} threw for {}: {:?}", self.function_name, event, err);
        }
    }
}
