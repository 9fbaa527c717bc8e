//! Portfolio Controller
//!
//! Queries the page once, builds each subsystem over the elements it owns
//! and binds the browser events to them.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::config::PortfolioConfig;
use crate::counter::CounterSubsystem;
use crate::dom::{self, DomNode};
use crate::error::Result;
use crate::filter::{FilterSubsystem, CATEGORY_ATTR, FILTER_BUTTON_CLASS};
use crate::lazy::LazyLoader;
use crate::observer::{self, WatchOptions};
use crate::reveal::RevealSubsystem;
use crate::scheduler::{BrowserScheduler, Scheduler};
use crate::tracker::{EventTracker, GlobalFunctionTracker, NoopTracker};
use crate::{hover, keyboard, perf};

/// Subsystems are owned by the listeners bound to them; the controller keeps
/// the filter for the utility facade.
pub struct PortfolioController {
    filter: Rc<FilterSubsystem<HtmlElement>>,
}

impl PortfolioController {
    pub fn init(config: &PortfolioConfig) -> Result<Self> {
        let doc = dom::document()?;
        let selectors = &config.selectors;
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);
        let tracker: Rc<dyn EventTracker> = if config.analytics_enabled {
            Rc::new(GlobalFunctionTracker::default())
        } else {
            Rc::new(NoopTracker)
        };

        let buttons = dom::query_all(&doc, &selectors.filter_buttons);
        let items = dom::query_all(&doc, &selectors.items);
        log::debug!("{} filter buttons, {} items", buttons.len(), items.len());

        let grid_selector = selectors.grid.clone();
        let filter = Rc::new(
            FilterSubsystem::new(buttons, items.clone(), scheduler.clone(), tracker.clone(), config.filter)
                .with_scroll_hook(move || scroll_into_view(&grid_selector)),
        );
        bind_filter_buttons(&filter);
        bind_keyboard(&doc);

        let io_supported = observer::supported();
        if !io_supported {
            log::warn!("IntersectionObserver unavailable; reveal, counters and lazy images disabled");
        }
        if io_supported {
            let nodes = dom::query_all(&doc, &selectors.case_studies);
            let reveal = RevealSubsystem::new(nodes.clone(), &config.reveal);
            let options = WatchOptions::threshold(config.reveal.threshold)
                .with_root_margin(&config.reveal.root_margin);
            observer::watch(&nodes, &options, move |i, on| reveal.on_visibility(i, on))?;
        }

        match dom::query(&doc, &selectors.results_region) {
            Some(region) if io_supported => {
                let nodes = dom::query_all(&doc, &selectors.counters);
                let counters = CounterSubsystem::new(nodes, scheduler.clone(), config.counter);
                let options = WatchOptions::threshold(config.counter.threshold);
                observer::watch(&[region], &options, move |_, on| counters.on_visibility(on))?;
            }
            _ => {}
        }

        for item in &items {
            bind_item(item, config, tracker.clone());
        }
        for industry in dom::query_all(&doc, &selectors.industry_items) {
            web_tilt::bind_hover_lift(&industry, config.hover_lift);
        }

        if io_supported {
            let images = dom::query_all(&doc, &selectors.lazy_images);
            let lazy = LazyLoader::new(images.clone());
            observer::watch(&images, &WatchOptions::default(), move |i, on| lazy.on_visibility(i, on))?;
        }

        bind_load_timing(scheduler)?;

        log::info!("Portfolio page initialized successfully!");
        Ok(Self { filter })
    }

    pub fn filter(&self) -> Rc<FilterSubsystem<HtmlElement>> {
        self.filter.clone()
    }
}

fn bind_filter_buttons(filter: &Rc<FilterSubsystem<HtmlElement>>) {
    for (index, button) in filter.button_nodes().into_iter().enumerate() {
        let filter = filter.clone();
        dom::listen(&button, "click", move |_ev: web_sys::MouseEvent| filter.activate(index));
    }
}

fn bind_keyboard(doc: &web_sys::Document) {
    dom::listen(doc, "keydown", |ev: web_sys::KeyboardEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
            return;
        };
        if target.has_class(FILTER_BUTTON_CLASS) && keyboard::is_activation_key(&ev.key()) {
            ev.prevent_default();
            target.click();
        }
    });
}

/// Tilt and click tracking, for items that have an overlay
fn bind_item(item: &HtmlElement, config: &PortfolioConfig, tracker: Rc<dyn EventTracker>) {
    if dom::query_in(item, &config.selectors.item_overlay).is_none() {
        return;
    }
    web_tilt::bind_tilt(item, config.tilt);

    let el = item.clone();
    let title_selector = config.selectors.item_title.clone();
    dom::listen(item, "click", move |_ev: web_sys::MouseEvent| {
        let title = dom::query_in(&el, &title_selector).and_then(|t| t.text_content());
        let category = el.attribute(CATEGORY_ATTR);
        hover::item_clicked(tracker.as_ref(), title.as_deref(), category.as_deref());
    });
}

fn scroll_into_view(selector: &str) {
    let Some(grid) = dom::document().ok().and_then(|doc| dom::query(&doc, selector)) else {
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Start);
    grid.scroll_into_view_with_scroll_into_view_options(&options);
}

fn bind_load_timing(scheduler: Rc<dyn Scheduler>) -> Result<()> {
    let win = dom::window()?;
    if dom::document()?.ready_state() == "complete" {
        perf::log_navigation_timing();
        return Ok(());
    }
    // loadEventEnd is only set once the load handlers have returned
    dom::listen(&win, "load", move |_ev: web_sys::Event| {
        scheduler.after(0, Box::new(perf::log_navigation_timing));
    });
    Ok(())
}
