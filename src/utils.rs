//! Utility Facade
//!
//! `window.PortfolioUtils`, for other scripts on the page.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::dom;
use crate::error::Result;
use crate::filter::FilterSubsystem;

pub const GLOBAL_NAME: &str = "PortfolioUtils";

#[wasm_bindgen]
pub struct PortfolioUtils {
    filter: Rc<FilterSubsystem<HtmlElement>>,
}

impl PortfolioUtils {
    pub fn new(filter: Rc<FilterSubsystem<HtmlElement>>) -> Self {
        Self { filter }
    }
}

#[wasm_bindgen]
impl PortfolioUtils {
    /// Show only items in `categories`; no animation, no analytics
    #[wasm_bindgen(js_name = filterByMultiple)]
    pub fn filter_by_multiple(&self, categories: Vec<String>) {
        self.filter.filter_by_categories(&categories);
    }

    #[wasm_bindgen(js_name = getVisibleItemsCount)]
    pub fn get_visible_items_count(&self) -> u32 {
        self.filter.visible_count() as u32
    }

    /// Same as clicking the "all" filter
    #[wasm_bindgen(js_name = resetFilters)]
    pub fn reset_filters(&self) {
        self.filter.reset();
    }

    /// Placeholder for a project detail view
    #[wasm_bindgen(js_name = showProjectModal)]
    pub fn show_project_modal(&self, project: JsValue) {
        let project = js_sys::JSON::stringify(&project)
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or_else(|| format!("{:?}", project));
        log::info!("Opening project modal: {}", project);
    }
}

/// Publish `utils` as `window.PortfolioUtils`
pub fn expose(utils: PortfolioUtils) -> Result<()> {
    let win = dom::window()?;
    js_sys::Reflect::set(&win, &JsValue::from_str(GLOBAL_NAME), &JsValue::from(utils))?;
    Ok(())
}
