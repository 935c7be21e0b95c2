//! Error types.
//!
//! None of these are fatal. Insert/delete report their conditions after
//! recording a no-op history entry, navigation reports a rejected index
//! without touching state, and the black-height check has its own sentinel.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepperError {
    #[error("value already exists in tree")]
    DuplicateValue,
    #[error("value not found in tree")]
    ValueNotFound,
    #[error("history index {index} out of range (len {len})")]
    InvalidNavigation { index: isize, len: usize },
}

/// Sentinel returned by black-height computation when two sibling subtrees
/// disagree. Expected while a fix-up is half way through.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("INVALID")]
pub struct BlackHeightMismatch;

/// Structural problem found by [`RbTree::check`](crate::tree::RbTree::check).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("Root has parent")]
    RootHasParent,
    #[error("Root is not black")]
    RootNotBlack,
    #[error("Red node has red child")]
    RedRed,
    #[error("Broken parent link")]
    BrokenParentLink,
    #[error("Black height mismatch")]
    BlackHeight,
    #[error("Node order violated")]
    Order,
}
