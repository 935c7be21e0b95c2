//! Collaborator seams: the renderer that displays states and the scheduler
//! that paces fix-up steps.
//!
//! The stepper never draws or sleeps itself. After every visible change it
//! hands a [`TreeView`] to its [`Renderer`]; when a fix-up starts or ends it
//! tells its [`Scheduler`], which is expected to call
//! [`Stepper::tick`](crate::stepper::Stepper::tick) periodically in between.

use std::time::Duration;

use crate::error::BlackHeightMismatch;
use crate::history::HistoryLog;
use crate::tree::RbTree;

/// Everything a renderer needs for one frame.
pub struct TreeView<'a, K> {
    pub tree: &'a RbTree<K>,
    pub history: &'a HistoryLog<K>,
    pub show_absent_children: bool,
    pub height: usize,
    pub node_count: usize,
    pub black_height: Result<usize, BlackHeightMismatch>,
}

impl<K> TreeView<'_, K> {
    /// Black height as shown to users: the number, or `INVALID` mid fix-up.
    pub fn black_height_label(&self) -> String {
        match self.black_height {
            Ok(h) => h.to_string(),
            Err(e) => e.to_string(),
        }
    }
}

/// Whether the renderer is still animating toward the view it was given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settle {
    Immediate,
    /// The stepper stays busy until [`Stepper::settled`](crate::stepper::Stepper::settled).
    Pending,
}

pub trait Renderer<K> {
    fn update(&mut self, view: &TreeView<'_, K>) -> Settle;
}

pub trait Scheduler {
    /// Begin calling `tick` after `delay`, then every `interval`.
    fn start(&mut self, delay: Duration, interval: Duration);
    /// Stop calling `tick`; any pending call is dropped.
    fn stop(&mut self);
}

/// Renderer that draws nothing and settles immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl<K> Renderer<K> for NullRenderer {
    fn update(&mut self, _view: &TreeView<'_, K>) -> Settle {
        Settle::Immediate
    }
}

/// Scheduler that only remembers whether it is running; the owner calls
/// `tick` by hand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    pub running: bool,
    pub interval: Duration,
    pub starts: usize,
    pub stops: usize,
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, _delay: Duration, interval: Duration) {
        self.running = true;
        self.interval = interval;
        self.starts += 1;
    }

    fn stop(&mut self) {
        if self.running {
            self.stops += 1;
        }
        self.running = false;
    }
}
