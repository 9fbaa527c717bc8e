//! Page load timing from the navigation performance entry.

use wasm_bindgen::JsValue;

/// `loadEventEnd - loadEventStart`, once the load event has finished
pub fn load_duration_ms(load_start: f64, load_end: f64) -> Option<f64> {
    (load_end > 0.0 && load_end >= load_start).then(|| load_end - load_start)
}

fn number(entry: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(entry, &JsValue::from_str(key)).ok()?.as_f64()
}

/// Log the navigation load time, if the browser reports one
pub fn log_navigation_timing() {
    let Some(performance) = web_sys::window().and_then(|w| w.performance()) else {
        return;
    };
    let entries = performance.get_entries_by_type("navigation");
    let entry = entries.get(0);
    if entry.is_undefined() {
        return;
    }
    let start = number(&entry, "loadEventStart").unwrap_or(0.0);
    let end = number(&entry, "loadEventEnd").unwrap_or(0.0);
    if let Some(duration) = load_duration_ms(start, end) {
        log::info!("Portfolio page load time: {} ms", duration);
    }
}
