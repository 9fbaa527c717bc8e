//! Portfolio FX Entry Point
//!
//! Interactive behaviour for the portfolio page: filtering, reveals,
//! counters, tilt and lazy images.

mod config;
mod controller;
mod counter;
mod dom;
mod error;
mod filter;
mod hover;
mod keyboard;
mod lazy;
mod logger;
mod models;
mod observer;
mod perf;
mod reveal;
mod scheduler;
mod tracker;
mod utils;

#[cfg(test)]
mod testing;

use config::PortfolioConfig;
use controller::PortfolioController;
use error::Result;
use utils::PortfolioUtils;

fn main() {
    console_error_panic_hook::set_once();

    let config = load_config();
    logger::init(logger::parse_level(&config.log_level));

    let ready = match dom::document() {
        Ok(doc) => doc.ready_state() != "loading",
        Err(err) => {
            log::error!("{}", err);
            return;
        }
    };
    if ready {
        start(&config);
    } else if let Ok(doc) = dom::document() {
        dom::listen(&doc, "DOMContentLoaded", move |_ev: web_sys::Event| start(&config));
    }
}

fn start(config: &PortfolioConfig) {
    if let Err(err) = init(config) {
        log::error!("portfolio init failed: {}", err);
    }
}

fn init(config: &PortfolioConfig) -> Result<()> {
    let controller = PortfolioController::init(config)?;
    utils::expose(PortfolioUtils::new(controller.filter()))
}

/// Config from the page's JSON block, defaults otherwise
fn load_config() -> PortfolioConfig {
    let block = dom::document()
        .ok()
        .and_then(|doc| doc.get_element_by_id(config::CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let Some(json) = block else {
        return PortfolioConfig::default();
    };
    PortfolioConfig::from_json(&json).unwrap_or_else(|err| {
        web_sys::console::warn_1(&format!("[portfolio] {}; using defaults", err).into());
        PortfolioConfig::default()
    })
}
