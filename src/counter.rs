//! Counter Subsystem
//!
//! Result numbers count up from zero the first time the results region is
//! half visible. Fixed-step: every counter takes `steps` ticks whatever its
//! target.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::config::CounterConfig;
use crate::dom::DomNode;
use crate::models::Watch;
use crate::scheduler::{Scheduler, TaskHandle};

/// Counter text split into its number and the characters around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterTarget {
    pub target: u64,
    /// Every non-digit character, in order
    pub suffix: String,
}

impl CounterTarget {
    /// `"250+"` -> 250 / `"+"`. `None` when there are no digits or the
    /// number does not fit.
    pub fn parse(text: &str) -> Option<Self> {
        let (digits, suffix): (String, String) = text.chars().partition(|c| c.is_ascii_digit());
        let target = digits.parse().ok()?;
        Some(Self { target, suffix })
    }

    pub fn render(&self, value: u64) -> String {
        format!("{}{}", value, self.suffix)
    }
}

/// Count-up state for one counter
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: CounterTarget,
    current: f64,
    increment: f64,
}

impl CounterAnimation {
    pub fn new(target: CounterTarget, steps: u32) -> Self {
        let increment = target.target as f64 / f64::from(steps.max(1));
        Self {
            target,
            current: 0.0,
            increment,
        }
    }

    /// Advance one tick. Returns the text to display and whether to go on.
    pub fn step(&mut self) -> (String, ControlFlow<()>) {
        self.current += self.increment;
        let end = self.target.target as f64;
        if self.current >= end {
            return (self.target.render(self.target.target), ControlFlow::Break(()));
        }
        (self.target.render(self.current.floor() as u64), ControlFlow::Continue(()))
    }
}

pub struct CounterSubsystem<N: DomNode> {
    counters: Vec<N>,
    scheduler: Rc<dyn Scheduler>,
    config: CounterConfig,
    fired: Cell<bool>,
}

impl<N: DomNode> CounterSubsystem<N> {
    pub fn new(counters: Vec<N>, scheduler: Rc<dyn Scheduler>, config: CounterConfig) -> Self {
        Self {
            counters,
            scheduler,
            config,
            fired: Cell::new(false),
        }
    }

    /// Intersection callback for the results region
    pub fn on_visibility(&self, intersecting: bool) -> Watch {
        if self.fired.get() {
            return Watch::Detach;
        }
        if !intersecting {
            return Watch::Keep;
        }
        self.fired.set(true);
        let started = self.start();
        log::debug!("{} counters started", started.len());
        Watch::Detach
    }

    /// One handle per animated counter
    fn start(&self) -> Vec<TaskHandle> {
        let mut running = Vec::new();
        for node in &self.counters {
            let Some(target) = node.text().as_deref().and_then(CounterTarget::parse) else {
                continue;
            };
            log::debug!("counting to {}{}", target.target, target.suffix);
            let mut animation = CounterAnimation::new(target, self.config.steps);
            let node = node.clone();
            let handle = self.scheduler.every(
                self.config.interval_ms,
                Box::new(move || {
                    let (text, flow) = animation.step();
                    node.set_text(&text);
                    flow
                }),
            );
            running.push(handle);
        }
        running
    }

    #[cfg(test)]
    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}
