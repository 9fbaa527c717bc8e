//! Filter Subsystem
//!
//! Filter controls select which portfolio items are shown. Each item keeps
//! one authoritative `visible` flag; inline styles and the `hidden` class are
//! derived from it through [`ItemLook`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::FilterTimings;
use crate::dom::DomNode;
use crate::models::FilterToken;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::tracker::{self, EventProperties, EventTracker};

pub const CATEGORY_ATTR: &str = "data-category";
pub const FILTER_ATTR: &str = "data-filter";
pub const HIDDEN_CLASS: &str = "hidden";
pub const ACTIVE_CLASS: &str = "active";
/// Class that marks a filter control for keyboard activation
pub const FILTER_BUTTON_CLASS: &str = "filter-btn";

/// Rendering phases of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLook {
    /// In layout, still transparent and offset
    Entering,
    Shown,
    /// Fading out, still in layout
    Leaving,
    Hidden,
}

impl ItemLook {
    pub fn apply<N: DomNode>(self, node: &N) {
        match self {
            ItemLook::Entering => {
                node.set_style("display", "block");
                node.set_class(HIDDEN_CLASS, false);
            }
            ItemLook::Shown => {
                node.set_style("opacity", "1");
                node.set_style("transform", "translateY(0)");
            }
            ItemLook::Leaving => {
                node.set_style("opacity", "0");
                node.set_style("transform", "translateY(20px)");
            }
            ItemLook::Hidden => {
                node.set_style("display", "none");
                node.set_class(HIDDEN_CLASS, true);
            }
        }
    }
}

struct ItemSlot<N> {
    node: N,
    category: Option<String>,
    visible: bool,
    pending: Option<TaskHandle>,
}

impl<N: DomNode> ItemSlot<N> {
    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.cancel();
        }
    }
}

struct ButtonSlot<N> {
    node: N,
    token: FilterToken,
    active: bool,
}

/// Shows and hides portfolio items for the active filter
pub struct FilterSubsystem<N: DomNode> {
    items: RefCell<Vec<ItemSlot<N>>>,
    buttons: RefCell<Vec<ButtonSlot<N>>>,
    scheduler: Rc<dyn Scheduler>,
    tracker: Rc<dyn EventTracker>,
    timings: FilterTimings,
    scroll_to_results: Option<Rc<dyn Fn()>>,
}

impl<N: DomNode> FilterSubsystem<N> {
    /// Buttons without a `data-filter` attribute are not filter controls
    /// and are dropped here; callers should bind clicks by `button_nodes()`.
    pub fn new(
        buttons: Vec<N>,
        items: Vec<N>,
        scheduler: Rc<dyn Scheduler>,
        tracker: Rc<dyn EventTracker>,
        timings: FilterTimings,
    ) -> Self {
        let items = items
            .into_iter()
            .map(|node| ItemSlot {
                category: node.attribute(CATEGORY_ATTR),
                visible: !node.has_class(HIDDEN_CLASS),
                pending: None,
                node,
            })
            .collect();
        let buttons = buttons
            .into_iter()
            .filter_map(|node| {
                let token = FilterToken::parse(&node.attribute(FILTER_ATTR)?);
                Some(ButtonSlot {
                    active: node.has_class(ACTIVE_CLASS),
                    token,
                    node,
                })
            })
            .collect();
        Self {
            items: RefCell::new(items),
            buttons: RefCell::new(buttons),
            scheduler,
            tracker,
            timings,
            scroll_to_results: None,
        }
    }

    /// Hook run `scroll_delay_ms` after each activation
    pub fn with_scroll_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.scroll_to_results = Some(Rc::new(hook));
        self
    }

    pub fn button_nodes(&self) -> Vec<N> {
        self.buttons.borrow().iter().map(|b| b.node.clone()).collect()
    }

    /// Activate filter control `index`: mark it the single active control,
    /// animate items in or out, report the choice and scroll to the grid.
    pub fn activate(&self, index: usize) {
        let token = {
            let mut buttons = self.buttons.borrow_mut();
            let Some(token) = buttons.get(index).map(|b| b.token.clone()) else {
                return;
            };
            for (i, button) in buttons.iter_mut().enumerate() {
                button.active = i == index;
                button.node.set_class(ACTIVE_CLASS, button.active);
            }
            token
        };

        self.apply_animated(&token);

        self.tracker.track(
            tracker::FILTER_USED,
            &EventProperties::new()
                .with("filter", token.as_str())
                .with("page", "portfolio"),
        );

        if let Some(scroll) = self.scroll_to_results.clone() {
            self.scheduler
                .after(self.timings.scroll_delay_ms, Box::new(move || scroll()));
        }
    }

    fn apply_animated(&self, token: &FilterToken) {
        for item in self.items.borrow_mut().iter_mut() {
            item.cancel_pending();
            item.visible = token.matches(item.category.as_deref());

            let node = item.node.clone();
            let task = if item.visible {
                ItemLook::Entering.apply(&item.node);
                self.scheduler.after(
                    self.timings.show_delay_ms,
                    Box::new(move || ItemLook::Shown.apply(&node)),
                )
            } else {
                ItemLook::Leaving.apply(&item.node);
                self.scheduler.after(
                    self.timings.hide_delay_ms,
                    Box::new(move || ItemLook::Hidden.apply(&node)),
                )
            };
            item.pending = Some(task);
        }
    }

    /// Show exactly the items whose category is in `categories`, with no
    /// animation and no analytics. Filter controls are left as they are.
    pub fn filter_by_categories(&self, categories: &[String]) {
        for item in self.items.borrow_mut().iter_mut() {
            item.cancel_pending();
            item.visible = item
                .category
                .as_ref()
                .is_some_and(|c| categories.contains(c));
            if item.visible {
                ItemLook::Entering.apply(&item.node);
                ItemLook::Shown.apply(&item.node);
            } else {
                ItemLook::Hidden.apply(&item.node);
            }
        }
    }

    pub fn visible_count(&self) -> usize {
        self.items.borrow().iter().filter(|item| item.visible).count()
    }

    /// Activate the first wildcard control, going through the full
    /// animated path. No-op when the page has none.
    pub fn reset(&self) {
        let wildcard = self
            .buttons
            .borrow()
            .iter()
            .position(|b| b.token == FilterToken::All);
        if let Some(index) = wildcard {
            self.activate(index);
        }
    }

    #[cfg(test)]
    pub fn active_index(&self) -> Option<usize> {
        self.buttons.borrow().iter().position(|b| b.active)
    }

    /// Visibility flags in item order
    #[cfg(test)]
    pub fn visibility(&self) -> Vec<bool> {
        self.items.borrow().iter().map(|item| item.visible).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::VirtualScheduler;
    use crate::testing::{FakeNode, RecordingTracker};
    use proptest::prelude::*;
    use std::cell::Cell;

    struct Page {
        scheduler: Rc<VirtualScheduler>,
        tracker: Rc<RecordingTracker>,
        buttons: Vec<FakeNode>,
        items: Vec<FakeNode>,
        filter: FilterSubsystem<FakeNode>,
    }

    fn button(token: &str) -> FakeNode {
        FakeNode::new().with_attr(FILTER_ATTR, token).with_class(FILTER_BUTTON_CLASS)
    }

    fn item(category: &str) -> FakeNode {
        FakeNode::new().with_attr(CATEGORY_ATTR, category)
    }

    fn page(tokens: &[&str], categories: &[&str]) -> Page {
        let scheduler = VirtualScheduler::new();
        let tracker = RecordingTracker::new();
        let buttons: Vec<_> = tokens.iter().map(|t| button(t)).collect();
        let items: Vec<_> = categories.iter().map(|c| item(c)).collect();
        let filter = FilterSubsystem::new(
            buttons.clone(),
            items.clone(),
            scheduler.clone(),
            tracker.clone(),
            FilterTimings::default(),
        );
        Page { scheduler, tracker, buttons, items, filter }
    }

    #[test]
    fn test_web_then_all() {
        let p = page(&["all", "web", "branding"], &["web", "branding"]);

        p.filter.activate(1);
        p.scheduler.advance(300);
        assert_eq!(p.filter.visibility(), vec![true, false]);
        assert_eq!(p.items[0].style("display").as_deref(), Some("block"));
        assert_eq!(p.items[0].style("opacity").as_deref(), Some("1"));
        assert_eq!(p.items[1].style("display").as_deref(), Some("none"));
        assert!(p.items[1].has_class(HIDDEN_CLASS));

        p.filter.activate(0);
        p.scheduler.advance(300);
        assert_eq!(p.filter.visibility(), vec![true, true]);
        assert!(!p.items[1].has_class(HIDDEN_CLASS));
        assert_eq!(p.items[1].style("transform").as_deref(), Some("translateY(0)"));
    }

    #[test]
    fn test_transition_timing() {
        let p = page(&["all", "web"], &["web", "branding"]);
        p.filter.activate(1);

        // Immediate half of each transition
        assert_eq!(p.items[0].style("display").as_deref(), Some("block"));
        assert_eq!(p.items[0].style("opacity"), None);
        assert_eq!(p.items[1].style("opacity").as_deref(), Some("0"));
        assert_eq!(p.items[1].style("transform").as_deref(), Some("translateY(20px)"));
        assert_eq!(p.items[1].style("display"), None);

        p.scheduler.advance(100);
        assert_eq!(p.items[0].style("opacity").as_deref(), Some("1"));
        assert_eq!(p.items[1].style("display"), None);

        p.scheduler.advance(200);
        assert_eq!(p.items[1].style("display").as_deref(), Some("none"));
    }

    #[test]
    fn test_single_active_button() {
        let p = page(&["all", "web", "branding"], &["web"]);
        p.buttons[0].set_class(ACTIVE_CLASS, true);

        for index in [2, 1, 0, 1] {
            p.filter.activate(index);
            assert_eq!(p.filter.active_index(), Some(index));
            let active = p.buttons.iter().filter(|b| b.has_class(ACTIVE_CLASS)).count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn test_out_of_range_activation_is_ignored() {
        let p = page(&["all"], &["web"]);
        p.filter.activate(5);
        assert_eq!(p.filter.active_index(), None);
        assert!(p.tracker.events().is_empty());
        assert_eq!(p.scheduler.pending_count(), 0);
    }

    #[test]
    fn test_stale_hide_is_cancelled() {
        let p = page(&["all", "web", "branding"], &["web"]);

        p.filter.activate(2); // hide the web item, 300ms pending
        p.scheduler.advance(150);
        p.filter.activate(1); // show it again before the hide lands
        p.scheduler.advance(500);

        assert_eq!(p.filter.visibility(), vec![true]);
        assert_eq!(p.items[0].style("display").as_deref(), Some("block"));
        assert!(!p.items[0].has_class(HIDDEN_CLASS));
        assert_eq!(p.items[0].style("opacity").as_deref(), Some("1"));
    }

    #[test]
    fn test_tracks_filter_choice() {
        let p = page(&["all", "web"], &["web"]);
        p.filter.activate(1);
        let events = p.tracker.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, tracker::FILTER_USED);
        assert_eq!(events[0].1.get("filter"), Some("web"));
        assert_eq!(events[0].1.get("page"), Some("portfolio"));
    }

    #[test]
    fn test_scroll_hook_after_delay() {
        let scheduler = VirtualScheduler::new();
        let scrolled = Rc::new(Cell::new(0));
        let s = scrolled.clone();
        let filter = FilterSubsystem::new(
            vec![button("all")],
            vec![item("web")],
            scheduler.clone(),
            Rc::new(crate::tracker::NoopTracker),
            FilterTimings::default(),
        )
        .with_scroll_hook(move || s.set(s.get() + 1));

        filter.activate(0);
        scheduler.advance(99);
        assert_eq!(scrolled.get(), 0);
        scheduler.advance(1);
        assert_eq!(scrolled.get(), 1);
    }

    #[test]
    fn test_buttons_without_token_are_skipped() {
        let scheduler = VirtualScheduler::new();
        let filter = FilterSubsystem::new(
            vec![FakeNode::new(), button("web")],
            vec![item("web")],
            scheduler,
            Rc::new(crate::tracker::NoopTracker),
            FilterTimings::default(),
        );
        assert_eq!(filter.button_nodes().len(), 1);
    }

    #[test]
    fn test_filter_by_categories() {
        let p = page(&["all", "web"], &["web", "branding", "print"]);
        p.filter.activate(1);

        p.filter
            .filter_by_categories(&["branding".to_string(), "print".to_string()]);
        assert_eq!(p.filter.visibility(), vec![false, true, true]);
        assert_eq!(p.filter.visible_count(), 2);
        // Settled immediately, and the pending animation no longer applies
        assert_eq!(p.items[1].style("opacity").as_deref(), Some("1"));
        assert_eq!(p.items[1].style("display").as_deref(), Some("block"));
        p.scheduler.advance(1000);
        assert_eq!(p.items[1].style("display").as_deref(), Some("block"));
        assert!(p.items[0].has_class(HIDDEN_CLASS));

        // No analytics, buttons untouched
        assert_eq!(p.tracker.events().len(), 1);
        assert_eq!(p.filter.active_index(), Some(1));
    }

    #[test]
    fn test_reset_matches_wildcard() {
        let a = page(&["web", "all"], &["web", "branding", "web"]);
        a.filter.activate(0);
        a.filter.reset();
        a.scheduler.advance(300);

        let b = page(&["web", "all"], &["web", "branding", "web"]);
        b.filter.activate(1);
        b.scheduler.advance(300);

        assert_eq!(a.filter.visibility(), b.filter.visibility());
        assert_eq!(a.filter.visible_count(), 3);
        assert_eq!(a.filter.active_index(), Some(1));
        // Reset goes through the tracked path
        assert_eq!(a.tracker.events().len(), 2);
    }

    #[test]
    fn test_reset_without_wildcard() {
        let p = page(&["web"], &["web", "branding"]);
        p.filter.reset();
        assert!(p.tracker.events().is_empty());
        assert_eq!(p.filter.visible_count(), 2);
    }

    #[test]
    fn test_initial_visibility_from_markup() {
        let scheduler = VirtualScheduler::new();
        let filter = FilterSubsystem::new(
            vec![],
            vec![item("web"), item("web").with_class(HIDDEN_CLASS)],
            scheduler,
            Rc::new(crate::tracker::NoopTracker),
            FilterTimings::default(),
        );
        assert_eq!(filter.visible_count(), 1);
    }

    proptest! {
        #[test]
        fn visible_iff_wildcard_or_match(
            token in prop::sample::select(vec!["all", "web", "branding", "print"]),
            categories in prop::collection::vec(
                prop::sample::select(vec!["web", "branding", "print"]), 0..8),
        ) {
            let p = page(&[token], &categories);
            p.filter.activate(0);
            p.scheduler.advance(300);
            for (visible, category) in p.filter.visibility().into_iter().zip(&categories) {
                prop_assert_eq!(visible, token == "all" || token == *category);
            }
        }
    }
}
