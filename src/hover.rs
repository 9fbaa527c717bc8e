//! Item Click Tracking
//!
//! The tilt itself lives in the `web-tilt` crate; this module handles what
//! a click on a portfolio item reports.

use crate::tracker::{self, EventProperties, EventTracker};

/// Report a click on a portfolio item. Items without a title element are
/// ignored; the title text is reported as it is.
pub fn item_clicked(events: &dyn EventTracker, title: Option<&str>, category: Option<&str>) {
    let Some(title) = title else {
        return;
    };
    log::info!("Portfolio item clicked: {}", title);

    let mut properties = EventProperties::new().with("project", title);
    if let Some(category) = category {
        properties = properties.with("category", category);
    }
    events.track(tracker::ITEM_CLICKED, &properties);
}
