//! Test doubles: in-memory DOM nodes and a recording tracker.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::dom::DomNode;
use crate::tracker::{EventProperties, EventTracker};

#[derive(Debug, Default)]
struct NodeState {
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    styles: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    attribute_writes: usize,
}

/// Shared handle to a fake element; clones point at the same node
#[derive(Clone, Debug, Default)]
pub struct FakeNode(Rc<RefCell<NodeState>>);

impl FakeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0.borrow_mut().attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.0.borrow_mut().classes.insert(class.into());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.0.borrow_mut().text = Some(text.into());
        self
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn attribute_writes(&self) -> usize {
        self.0.borrow().attribute_writes
    }
}

impl DomNode for FakeNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut state = self.0.borrow_mut();
        state.attribute_writes += 1;
        state.attributes.insert(name.into(), value.into());
    }

    fn text(&self) -> Option<String> {
        self.0.borrow().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = Some(text.into());
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0.borrow_mut().styles.insert(property.into(), value.into());
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn set_class(&self, class: &str, present: bool) {
        let mut state = self.0.borrow_mut();
        if present {
            state.classes.insert(class.into());
        } else {
            state.classes.remove(class);
        }
    }
}

/// Keeps every tracked event for inspection
#[derive(Default)]
pub struct RecordingTracker {
    events: RefCell<Vec<(String, EventProperties)>>,
}

impl RecordingTracker {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(&self) -> Vec<(String, EventProperties)> {
        self.events.borrow().clone()
    }
}

impl EventTracker for RecordingTracker {
    fn track(&self, event: &str, properties: &EventProperties) {
        self.events.borrow_mut().push((event.to_string(), properties.clone()));
    }
}
