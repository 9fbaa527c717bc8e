//! Error Types
//!
//! Plumbing failures only. Missing page elements are not errors; the
//! subsystems skip them silently.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("invalid portfolio config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),

    #[error("global `{0}` is not available")]
    MissingGlobal(&'static str),
}

impl From<JsValue> for PortfolioError {
    fn from(value: JsValue) -> Self {
        let message = value.as_string().unwrap_or_else(|| format!("{:?}", value));
        PortfolioError::Js(message)
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
