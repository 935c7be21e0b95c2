//! Red-black tree whose insert and delete rebalancing run as resumable,
//! single-step state machines, paired with an undo/redo history of deep
//! snapshots.
//!
//! Each call into a fix-up machine applies exactly one textbook case, records
//! the resulting tree in the history, and reports whether another step is
//! needed. An external scheduler paces those calls through
//! [`Stepper::tick`], honoring the stepper's busy flag while a renderer
//! settles the previous state.
//!
//! Nodes live in a `Vec` arena and link to each other through `Option<u32>`
//! indices; the parent link is a back-reference only.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Color`], [`Side`], [`RbNode`], [`Position`] |
//! [`tree`] | [`RbTree`]: rotations, transplant, search, minimum, measurements |
//! [`insert`] | BST placement and the [`InsertFixup`] machine |
//! [`delete`] | successor splice and the [`DeleteFixup`] machine |
//! [`snapshot`] | [`Snapshot`] deep copies |
//! [`history`] | [`HistoryLog`] with cursor and branch discard |
//! [`render`] | [`Renderer`] / [`Scheduler`] collaborator traits |
//! [`stepper`] | [`Stepper`] orchestrator |

pub mod config;
pub mod delete;
pub mod error;
pub mod history;
pub mod insert;
pub mod render;
pub mod snapshot;
pub mod step;
pub mod stepper;
pub mod tree;
pub mod types;

pub use config::StepperConfig;
pub use delete::{splice_out, DeleteFixup, Splice};
pub use error::{BlackHeightMismatch, InvariantViolation, StepperError};
pub use history::{HistoryEntry, HistoryLog};
pub use insert::{insert_node, InsertFixup};
pub use render::{ManualScheduler, NullRenderer, Renderer, Scheduler, Settle, TreeView};
pub use snapshot::{Snapshot, SnapshotNode};
pub use step::{Step, StepKind, StepReport};
pub use stepper::{FixupKind, Stepper, Tick};
pub use tree::RbTree;
pub use types::{Color, Node, Position, RbNode, Side};
