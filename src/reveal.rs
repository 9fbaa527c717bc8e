//! Reveal Subsystem
//!
//! Case studies start transparent and offset, then fade and slide into
//! place the first time they scroll into view.

use std::cell::RefCell;

use crate::config::RevealConfig;
use crate::dom::DomNode;
use crate::models::Watch;

struct RevealSlot<N> {
    node: N,
    revealed: bool,
}

pub struct RevealSubsystem<N: DomNode> {
    slots: RefCell<Vec<RevealSlot<N>>>,
}

impl<N: DomNode> RevealSubsystem<N> {
    /// Puts every node in its hidden starting position
    pub fn new(nodes: Vec<N>, config: &RevealConfig) -> Self {
        let offset = format!("translateY({}px)", config.offset_px);
        let slots = nodes
            .into_iter()
            .map(|node| {
                node.set_style("opacity", "0");
                node.set_style("transform", &offset);
                node.set_style("transition", &config.transition);
                RevealSlot { node, revealed: false }
            })
            .collect();
        Self {
            slots: RefCell::new(slots),
        }
    }

    /// Intersection callback for node `index`
    pub fn on_visibility(&self, index: usize, intersecting: bool) -> Watch {
        let mut slots = self.slots.borrow_mut();
        let Some(slot) = slots.get_mut(index) else {
            return Watch::Detach;
        };
        if slot.revealed {
            return Watch::Detach;
        }
        if !intersecting {
            return Watch::Keep;
        }
        slot.node.set_style("opacity", "1");
        slot.node.set_style("transform", "translateY(0)");
        slot.revealed = true;
        Watch::Detach
    }

    #[cfg(test)]
    pub fn revealed_count(&self) -> usize {
        self.slots.borrow().iter().filter(|s| s.revealed).count()
    }
}
