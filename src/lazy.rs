//! Lazy-Load Subsystem
//!
//! Images carry their real source in `data-src` until they near the
//! viewport.

use std::cell::RefCell;

use crate::dom::DomNode;
use crate::models::Watch;

pub const DEFERRED_SRC_ATTR: &str = "data-src";
pub const LAZY_CLASS: &str = "lazy";

struct LazySlot<N> {
    node: N,
    loaded: bool,
}

pub struct LazyLoader<N: DomNode> {
    images: RefCell<Vec<LazySlot<N>>>,
}

impl<N: DomNode> LazyLoader<N> {
    pub fn new(images: Vec<N>) -> Self {
        let images = images
            .into_iter()
            .map(|node| LazySlot { node, loaded: false })
            .collect();
        Self {
            images: RefCell::new(images),
        }
    }

    /// Intersection callback for image `index`
    pub fn on_visibility(&self, index: usize, intersecting: bool) -> Watch {
        let mut images = self.images.borrow_mut();
        let Some(slot) = images.get_mut(index) else {
            return Watch::Detach;
        };
        if slot.loaded {
            return Watch::Detach;
        }
        if !intersecting {
            return Watch::Keep;
        }
        let Some(src) = slot.node.attribute(DEFERRED_SRC_ATTR) else {
            return Watch::Keep;
        };
        slot.node.set_attribute("src", &src);
        slot.node.set_class(LAZY_CLASS, false);
        slot.loaded = true;
        Watch::Detach
    }

    #[cfg(test)]
    pub fn loaded_count(&self) -> usize {
        self.images.borrow().iter().filter(|s| s.loaded).count()
    }
}
