//! Portfolio Models
//!
//! Small value types shared by the subsystems.

/// Which items a filter control selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    /// Wildcard, matches every item
    All,
    Category(String),
}

impl FilterToken {
    pub const WILDCARD: &'static str = "all";

    pub fn parse(raw: &str) -> Self {
        if raw == Self::WILDCARD {
            FilterToken::All
        } else {
            FilterToken::Category(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterToken::All => Self::WILDCARD,
            FilterToken::Category(name) => name,
        }
    }

    /// Items without a category only match the wildcard
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            FilterToken::All => true,
            FilterToken::Category(name) => category == Some(name.as_str()),
        }
    }
}

/// What an intersection callback wants done with its watch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    Keep,
    Detach,
}
