//! Operation orchestrator.
//!
//! A [`Stepper`] owns the working tree, the history of the current operation,
//! the state of the active fix-up machine and the busy flag. Top-level
//! operations mutate the tree, reset the history and arm a machine; the
//! scheduler then drives the machine one case at a time through [`Stepper::tick`].

use std::fmt::Display;
use std::time::Duration;

use log::debug;

use crate::config::StepperConfig;
use crate::delete::{splice_out, DeleteFixup};
use crate::error::{BlackHeightMismatch, StepperError};
use crate::history::HistoryLog;
use crate::insert::{insert_node, InsertFixup};
use crate::render::{ManualScheduler, NullRenderer, Renderer, Scheduler, Settle, TreeView};
use crate::snapshot::Snapshot;
use crate::step::{Step, StepKind};
use crate::tree::RbTree;
use crate::types::{Color, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixupKind {
    Insert,
    Delete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fixup {
    Insert(InsertFixup),
    Delete(DeleteFixup),
}

/// What a scheduler tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Previous step still settling; nothing done.
    Skipped,
    /// No machine active.
    Idle,
    Advanced(Step),
}

pub struct Stepper<K, R = NullRenderer, S = ManualScheduler> {
    tree: RbTree<K>,
    history: HistoryLog<K>,
    fixup: Option<Fixup>,
    busy: bool,
    config: StepperConfig,
    renderer: R,
    scheduler: S,
}

impl<K> Stepper<K> {
    pub fn new() -> Self {
        Self::with_parts(
            StepperConfig::default(),
            NullRenderer,
            ManualScheduler::default(),
        )
    }
}

impl<K> Default for Stepper<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, R, S> Stepper<K, R, S> {
    pub fn with_parts(config: StepperConfig, renderer: R, scheduler: S) -> Self {
        Self {
            tree: RbTree::new(),
            history: HistoryLog::new(),
            fixup: None,
            busy: false,
            config,
            renderer,
            scheduler,
        }
    }

    pub fn tree(&self) -> &RbTree<K> {
        &self.tree
    }

    pub fn history(&self) -> &HistoryLog<K> {
        &self.history
    }

    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// True while the renderer is still settling the last state.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Renderer callback: the last state finished animating.
    pub fn settled(&mut self) {
        self.busy = false;
    }

    /// Kind of the active machine, if any.
    pub fn fixup_kind(&self) -> Option<FixupKind> {
        self.fixup.map(|f| match f {
            Fixup::Insert(_) => FixupKind::Insert,
            Fixup::Delete(_) => FixupKind::Delete,
        })
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn node_count(&self) -> usize {
        self.tree.size()
    }

    pub fn black_height(&self) -> Result<usize, BlackHeightMismatch> {
        self.tree.black_height(self.tree.root())
    }
}

impl<K, R, S> Stepper<K, R, S>
where
    K: Ord + Clone + Display,
    R: Renderer<K>,
    S: Scheduler,
{
    /// Inserts `value` and arms the insert machine when a fix-up is needed.
    pub fn insert(&mut self, value: K) -> Result<(), StepperError> {
        let label = value.to_string();
        debug!("insert {label}");
        self.begin(format!("Starting insert for: {label}"));

        if self.tree.contains(&value) {
            self.record(
                StepKind::NoOp,
                "Value already exists in tree (No change)".to_string(),
            );
            self.refresh();
            return Err(StepperError::DuplicateValue);
        }

        let z = insert_node(&mut self.tree, value);
        if self.tree.root() == Some(z) {
            self.record(
                StepKind::Complete,
                format!("Root: {label} inserted as BLACK. Fix-up complete."),
            );
        } else {
            self.record(
                StepKind::Inserted,
                format!("Inserted {label} as RED node (z). Starting fix-up."),
            );
            self.arm(Fixup::Insert(InsertFixup::new(z)));
        }
        self.refresh();
        Ok(())
    }

    /// Deletes `value` and arms the delete machine when a BLACK unit was lost.
    pub fn delete(&mut self, value: &K) -> Result<(), StepperError> {
        debug!("delete {value}");
        self.begin(format!("Starting delete for: {value}"));

        let Some(z) = self.tree.search(value) else {
            self.record(
                StepKind::NoOp,
                "Value not found in tree (No change)".to_string(),
            );
            self.refresh();
            return Err(StepperError::ValueNotFound);
        };

        let record_splice = self.config.record_splice_steps;
        let history = &mut self.history;
        let splice = splice_out(&mut self.tree, z, |tree, description| {
            if record_splice {
                history.append(Snapshot::capture(tree), StepKind::Splice, description);
            }
        });

        match splice.removed_color {
            Color::Red => self.record(
                StepKind::Complete,
                format!("Deleted RED node {value}. Fix-up complete."),
            ),
            Color::Black => {
                let parent = match splice.anchor {
                    Position::Real(x) => self.tree.p(x),
                    Position::Deficient { parent, .. } => parent,
                };
                let parent = parent.map_or_else(
                    || "root".to_string(),
                    |p| self.tree.node(p).value.to_string(),
                );
                self.record(
                    StepKind::Removed,
                    format!("Deleted BLACK node. Starting double-black fix-up on parent {parent}."),
                );
                self.arm(Fixup::Delete(DeleteFixup::new(splice.anchor)));
            }
        }
        self.refresh();
        Ok(())
    }

    /// Empties the tree.
    pub fn clear(&mut self) {
        debug!("clear");
        self.cancel();
        self.tree.clear();
        self.history.reset(
            Snapshot::capture(&self.tree),
            StepKind::Cleared,
            "Tree cleared".to_string(),
        );
        self.refresh();
    }

    /// Applies one case of the active machine and records it.
    ///
    /// Returns [`Step::Stop`] once the machine is done, or when none is active.
    pub fn advance_fix(&mut self) -> Step {
        let report = match self.fixup.as_mut() {
            None => return Step::Stop,
            Some(Fixup::Insert(f)) => f.advance(&mut self.tree),
            Some(Fixup::Delete(f)) => f.advance(&mut self.tree),
        };
        debug!("fix-up step {:?} -> {:?}", report.kind, report.step);
        self.record(report.kind, report.description);
        if report.step == Step::Stop {
            self.fixup = None;
            self.scheduler.stop();
        }
        self.refresh();
        report.step
    }

    /// Scheduler entry point: advances unless the last state is still
    /// settling.
    pub fn tick(&mut self) -> Tick {
        if self.busy {
            return Tick::Skipped;
        }
        if self.fixup.is_none() {
            self.scheduler.stop();
            return Tick::Idle;
        }
        Tick::Advanced(self.advance_fix())
    }

    /// Drives the active machine to the end, ignoring the busy flag.
    /// Returns the number of steps taken.
    pub fn run_to_completion(&mut self) -> usize {
        let mut steps = 0;
        while self.fixup.is_some() {
            self.advance_fix();
            steps += 1;
        }
        self.busy = false;
        steps
    }

    /// Loads history entry `index` into a fresh working tree, abandoning any
    /// active machine.
    pub fn navigate(&mut self, index: isize) -> Result<(), StepperError> {
        let tree = self.history.seek(index)?.snapshot.rebuild();
        debug!("navigate to step {index}");
        self.cancel();
        self.tree = tree;
        self.refresh();
        Ok(())
    }

    pub fn step_back(&mut self) -> Result<(), StepperError> {
        self.navigate(self.cursor() - 1)
    }

    pub fn step_forward(&mut self) -> Result<(), StepperError> {
        self.navigate(self.cursor() + 1)
    }

    fn cursor(&self) -> isize {
        self.history.cursor().map_or(-1, |c| c as isize)
    }

    /// Abandons the active machine, stops the scheduler and drops the busy
    /// flag.
    fn cancel(&mut self) {
        self.fixup = None;
        self.scheduler.stop();
        self.busy = false;
    }

    /// Starts a top-level operation with a fresh single-entry history.
    fn begin(&mut self, description: String) {
        self.cancel();
        self.history
            .reset(Snapshot::capture(&self.tree), StepKind::Start, description);
    }

    fn arm(&mut self, fixup: Fixup) {
        self.fixup = Some(fixup);
        self.scheduler.start(
            Duration::from_millis(self.config.start_delay_ms),
            Duration::from_millis(self.config.step_interval_ms),
        );
    }

    fn record(&mut self, kind: StepKind, description: String) {
        self.history
            .append(Snapshot::capture(&self.tree), kind, description);
    }

    fn refresh(&mut self) {
        let view = TreeView {
            tree: &self.tree,
            history: &self.history,
            show_absent_children: self.config.show_absent_children,
            height: self.tree.height(),
            node_count: self.tree.size(),
            black_height: self.tree.black_height(self.tree.root()),
        };
        if self.renderer.update(&view) == Settle::Pending {
            self.busy = true;
        }
    }
}

impl<K: Clone, R, S> Stepper<K, R, S> {
    /// In-order values of the working tree.
    pub fn values(&self) -> Vec<K> {
        self.tree.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_needs_no_machine() {
        let mut s = Stepper::new();
        s.insert(5).unwrap();
        assert_eq!(s.fixup_kind(), None);
        assert_eq!(s.history().len(), 2);
        assert!(!s.scheduler().running);
    }

    #[test]
    fn insert_arms_scheduler() {
        let mut s = Stepper::new();
        s.insert(5).unwrap();
        s.insert(6).unwrap();
        assert_eq!(s.fixup_kind(), Some(FixupKind::Insert));
        assert!(s.scheduler().running);
        assert_eq!(s.scheduler().interval, Duration::from_millis(500));
        assert_eq!(s.tick(), Tick::Advanced(Step::Stop));
        assert!(!s.scheduler().running);
        assert_eq!(s.tick(), Tick::Idle);
    }

    #[test]
    fn duplicate_records_no_op() {
        let mut s = Stepper::new();
        s.insert(1).unwrap();
        assert_eq!(s.insert(1), Err(StepperError::DuplicateValue));
        let last = s.history().current().unwrap();
        assert_eq!(last.kind, StepKind::NoOp);
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.fixup_kind(), None);
    }

    #[test]
    fn advance_without_machine_stops() {
        let mut s = Stepper::<i32>::new();
        assert_eq!(s.advance_fix(), Step::Stop);
        assert!(s.history().is_empty());
    }

    #[test]
    fn splice_steps_can_be_skipped() {
        let config = StepperConfig {
            record_splice_steps: false,
            ..StepperConfig::default()
        };
        let mut s = Stepper::with_parts(config, NullRenderer, ManualScheduler::default());
        for v in [2, 1, 3] {
            s.insert(v).unwrap();
            s.run_to_completion();
        }
        s.delete(&2).unwrap();
        assert!(s
            .history()
            .entries()
            .iter()
            .all(|e| e.kind != StepKind::Splice));
    }
}
