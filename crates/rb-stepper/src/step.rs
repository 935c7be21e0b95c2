//! What a single fix-up step reports back to its driver.

use serde::{Deserialize, Serialize};

/// Whether the machine needs another step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Stop,
}

/// Label attached to every history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Tree as it was before a top-level operation.
    Start,
    /// New node linked in as a RED leaf.
    Inserted,
    /// Intermediate state while a deleted node is spliced out.
    Splice,
    /// Node unlinked; a BLACK removal is followed by fix-up.
    Removed,
    Case1,
    /// Insert: triangle rotation plus the line case, one entry for both.
    /// Delete: sibling and its children black.
    Case2,
    Case3,
    Case4,
    /// Machine reached a state where every invariant holds.
    Complete,
    /// Rejected operation, tree untouched.
    NoOp,
    Cleared,
}

impl StepKind {
    /// Entries that describe a case application (recolor and/or rotation).
    pub fn is_fixup_case(self) -> bool {
        matches!(
            self,
            StepKind::Case1 | StepKind::Case2 | StepKind::Case3 | StepKind::Case4
        )
    }
}

/// Outcome of one call into a fix-up machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub kind: StepKind,
    pub description: String,
    pub step: Step,
}

impl StepReport {
    pub(crate) fn new(kind: StepKind, description: String, step: Step) -> Self {
        Self {
            kind,
            description,
            step,
        }
    }
}
