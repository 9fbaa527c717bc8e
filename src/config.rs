//! Portfolio Configuration
//!
//! Selectors and timings, optionally overridden by a JSON block in the page:
//! `<script id="portfolio-config" type="application/json">{ ... }</script>`.
//! Every field has a default, so partial JSON is fine.

use serde::Deserialize;
use web_tilt::{HoverLift, TiltConfig};

use crate::error::Result;
use crate::filter::FILTER_BUTTON_CLASS;

/// Element id of the optional JSON config block
pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub log_level: String,
    /// When false, analytics events are dropped even if `trackEvent` exists
    pub analytics_enabled: bool,
    pub selectors: Selectors,
    pub filter: FilterTimings,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub tilt: TiltConfig,
    pub hover_lift: HoverLift,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            analytics_enabled: true,
            selectors: Selectors::default(),
            filter: FilterTimings::default(),
            reveal: RevealConfig::default(),
            counter: CounterConfig::default(),
            tilt: TiltConfig::default(),
            hover_lift: HoverLift::default(),
        }
    }
}

impl PortfolioConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// CSS selectors for the page structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub filter_buttons: String,
    pub items: String,
    pub item_overlay: String,
    pub item_title: String,
    pub grid: String,
    pub case_studies: String,
    pub results_region: String,
    pub counters: String,
    pub lazy_images: String,
    pub industry_items: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            filter_buttons: format!(".{}", FILTER_BUTTON_CLASS),
            items: ".portfolio-item".to_string(),
            item_overlay: ".portfolio-overlay".to_string(),
            item_title: ".portfolio-info h4".to_string(),
            grid: ".portfolio-grid".to_string(),
            case_studies: ".case-study".to_string(),
            results_region: ".client-results".to_string(),
            counters: ".result-stat .stat-number".to_string(),
            lazy_images: ".portfolio-img[data-src]".to_string(),
            industry_items: ".industry-item".to_string(),
        }
    }
}

/// Filter transition delays, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterTimings {
    pub show_delay_ms: u32,
    pub hide_delay_ms: u32,
    pub scroll_delay_ms: u32,
}

impl Default for FilterTimings {
    fn default() -> Self {
        Self {
            show_delay_ms: 100,
            hide_delay_ms: 300,
            scroll_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
    pub offset_px: f64,
    pub transition: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            offset_px: 30.0,
            transition: "all 0.6s ease".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Fraction of the results region that must be visible
    pub threshold: f64,
    pub steps: u32,
    pub interval_ms: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            steps: 100,
            interval_ms: 30,
        }
    }
}
