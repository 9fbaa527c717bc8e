//! Task Scheduling
//!
//! Delayed and repeating callbacks behind a trait, so the subsystems can be
//! driven by browser timers in the page and by virtual time in tests.

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

pub type OnceTask = Box<dyn FnOnce()>;
/// Repeating task; returning `Break` stops it
pub type RepeatTask = Box<dyn FnMut() -> ControlFlow<()>>;

/// Cancellation handle for a scheduled task
#[derive(Clone, Debug, Default)]
pub struct TaskHandle {
    done: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the task. No effect if it already ran to completion.
    pub fn cancel(&self) {
        self.done.set(true);
    }

    /// True until the task is cancelled or finishes
    pub fn is_active(&self) -> bool {
        !self.done.get()
    }

    fn finish(&self) {
        self.done.set(true);
    }
}

pub trait Scheduler {
    /// Run `task` once after `delay_ms`
    fn after(&self, delay_ms: u32, task: OnceTask) -> TaskHandle;

    /// Run `task` every `period_ms` until it returns `Break` or is cancelled
    fn every(&self, period_ms: u32, task: RepeatTask) -> TaskHandle;
}

/// Browser timers via `gloo-timers`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn after(&self, delay_ms: u32, task: OnceTask) -> TaskHandle {
        let handle = TaskHandle::new();
        let guard = handle.clone();
        Timeout::new(delay_ms, move || {
            if guard.is_active() {
                guard.finish();
                task();
            }
        })
        .forget();
        handle
    }

    fn every(&self, period_ms: u32, task: RepeatTask) -> TaskHandle {
        let handle = TaskHandle::new();
        schedule_tick(period_ms, Rc::new(RefCell::new(task)), handle.clone());
        handle
    }
}

// Chained timeouts rather than setInterval: the callback never has to drop
// its own closure to stop.
fn schedule_tick(period_ms: u32, task: Rc<RefCell<RepeatTask>>, handle: TaskHandle) {
    Timeout::new(period_ms, move || {
        if !handle.is_active() {
            return;
        }
        let flow = (&mut *task.borrow_mut())();
        match flow {
            ControlFlow::Continue(()) => schedule_tick(period_ms, task, handle),
            ControlFlow::Break(()) => handle.finish(),
        }
    })
    .forget();
}

#[cfg(test)]
pub use virtual_time::VirtualScheduler;
