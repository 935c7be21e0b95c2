//! Deletion: successor splice and the resumable double-black fix-up.
//!
//! After a BLACK unit leaves the tree, the position that lost it carries a
//! deficiency. That position may hold a real node or be an empty child slot,
//! which is why the machine is anchored at a [`Position`] rather than a node.
//!
//! Cases are named relative to `side`, the side of `parent` the deficient
//! position is on. The sibling's *near* child is on `side`, its *far* child on
//! the opposite side.

use std::fmt::Display;

use log::{debug, warn};

use crate::insert::{display_opt, rotation_name};
use crate::step::{Step, StepKind, StepReport};
use crate::tree::RbTree;
use crate::types::{Color, Position, Side};

/// Result of unlinking a node from the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Splice {
    /// Color that vacated its original position.
    pub removed_color: Color,
    /// Where the replacement (possibly absent) now sits.
    pub anchor: Position,
}

/// Removes `z` from the tree and releases its slot.
///
/// `record` is invoked with the tree as it stands right before each
/// structural change, so callers can log intermediate states.
pub fn splice_out<K, F>(tree: &mut RbTree<K>, z: u32, mut record: F) -> Splice
where
    K: Display,
    F: FnMut(&RbTree<K>, String),
{
    let z_value = tree.node(z).value.to_string();
    let mut removed_color = tree.node(z).color;
    let x;
    let x_parent;
    let x_side;

    if let (Some(zl), Some(zr)) = (tree.l(z), tree.r(z)) {
        let y = tree.minimum(zr);
        let y_value = tree.node(y).value.to_string();
        removed_color = tree.node(y).color;
        x = tree.r(y);
        record(tree, format!("Pre-Delete: Successor {y_value} found."));

        if tree.p(y) == Some(z) {
            x_parent = Some(y);
            x_side = Side::Right;
        } else {
            x_parent = tree.p(y);
            x_side = Side::Left;
            record(
                tree,
                format!("Pre-Delete: Transplanting {y_value}'s right child to fill successor hole."),
            );
            tree.transplant(y, x);
            tree.set_r(y, Some(zr));
            tree.set_p(zr, Some(y));
        }

        record(
            tree,
            format!("Pre-Delete: Transplanting {z_value} with successor {y_value}."),
        );
        tree.transplant(z, Some(y));
        tree.set_l(y, Some(zl));
        tree.set_p(zl, Some(y));
        let z_color = tree.node(z).color;
        tree.set_color(y, z_color);
    } else {
        let (missing, replacement) = match tree.l(z) {
            None => ("left", "right"),
            Some(_) => ("right", "left"),
        };
        x = tree.l(z).or(tree.r(z));
        x_parent = tree.p(z);
        x_side = tree.side_of(z).unwrap_or(Side::Left);
        record(
            tree,
            format!("Pre-Delete: Node {z_value} has no {missing} child. Replacing with {replacement} child."),
        );
        tree.transplant(z, x);
    }

    tree.release(z);
    let anchor = match x {
        Some(x) => Position::Real(x),
        None => Position::Deficient {
            parent: x_parent,
            side: x_side,
        },
    };
    debug!("spliced out {z_value}, removed {removed_color}, anchor {anchor:?}");
    Splice {
        removed_color,
        anchor,
    }
}

/// Delete fix-up machine state: the position carrying the extra black.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeleteFixup {
    pub x: Position,
}

impl DeleteFixup {
    pub fn new(x: Position) -> Self {
        Self { x }
    }

    /// Parent and side of the deficient position, `None` when it is the root.
    fn locate<K>(&self, tree: &RbTree<K>) -> Option<(u32, Side)> {
        match self.x {
            Position::Real(i) => Some((tree.p(i)?, tree.side_of(i)?)),
            Position::Deficient { parent, side } => Some((parent?, side)),
        }
    }

    /// Applies one case and reports it.
    pub fn advance<K: Display>(&mut self, tree: &mut RbTree<K>) -> StepReport {
        let Some((parent, side)) = self.locate(tree) else {
            if let Some(root) = tree.root() {
                tree.set_color(root, Color::Black);
            }
            return StepReport::new(
                StepKind::Complete,
                "Fix-up complete: Reached root. Final root color is BLACK.".to_string(),
                Step::Stop,
            );
        };

        if let Position::Real(x) = self.x {
            if tree.color_of(Some(x)).is_red() {
                tree.set_color(x, Color::Black);
                return StepReport::new(
                    StepKind::Complete,
                    format!(
                        "x = {} is RED: recolor x <- BLACK. Fix-up complete.",
                        tree.node(x).value
                    ),
                    Step::Stop,
                );
            }
        }

        let far_side = side.opposite();
        let Some(s) = tree.child(parent, far_side) else {
            warn!("delete fix-up: no sibling under {}", tree.node(parent).value);
            return StepReport::new(
                StepKind::Complete,
                "Fix-up stopped: deficient position has no sibling.".to_string(),
                Step::Stop,
            );
        };

        if tree.color_of(Some(s)).is_red() {
            tree.set_color(s, Color::Black);
            tree.set_color(parent, Color::Red);
            tree.rotate(parent, side);
            debug!("delete fix-up case 1 at {}", tree.node(parent).value);
            let description = format!(
                "Case 1: Sibling (w = {}) is RED.\n\
                 1. Recolor w <- BLACK.\n\
                 2. Recolor p = {} <- RED.\n\
                 3. {}-ROTATE(T, p).\n\
                 4. New sibling found. Repeat fixup.",
                tree.node(s).value,
                tree.node(parent).value,
                rotation_name(side).to_uppercase(),
            );
            return StepReport::new(StepKind::Case1, description, Step::Continue);
        }

        let near = tree.child(s, side);
        let far = tree.child(s, far_side);

        if tree.color_of(near).is_black() && tree.color_of(far).is_black() {
            tree.set_color(s, Color::Red);
            if tree.color_of(Some(parent)).is_red() {
                tree.set_color(parent, Color::Black);
                debug!("delete fix-up case 2 absorbed at {}", tree.node(parent).value);
                let description = format!(
                    "Case 2: Sibling (w = {}) and children are BLACK. Parent is RED.\n\
                     1. Recolor w <- RED.\n\
                     2. Recolor p = {} <- BLACK.\n\
                     3. Fix-up complete.",
                    tree.node(s).value,
                    tree.node(parent).value,
                );
                return StepReport::new(StepKind::Case2, description, Step::Stop);
            }
            self.x = Position::Real(parent);
            debug!("delete fix-up case 2 propagated to {}", tree.node(parent).value);
            let description = format!(
                "Case 2: Sibling (w = {}) and children are BLACK. Parent is BLACK.\n\
                 1. Recolor w <- RED.\n\
                 2. Propagate double-black to parent (x <- p = {}).",
                tree.node(s).value,
                tree.node(parent).value,
            );
            return StepReport::new(StepKind::Case2, description, Step::Continue);
        }

        if tree.color_of(far).is_black() {
            if let Some(near) = near {
                tree.set_color(near, Color::Black);
            }
            tree.set_color(s, Color::Red);
            tree.rotate(s, far_side);
            debug!("delete fix-up case 3 at {}", tree.node(s).value);
            let description = format!(
                "Case 3: Near child (w.{} = {}) is RED.\n\
                 1. Recolor w.{} <- BLACK, w = {} <- RED.\n\
                 2. {}-ROTATE(T, w).\n\
                 3. Now in Case 4 setup.",
                side_name(side),
                display_opt(tree, near),
                side_name(side),
                tree.node(s).value,
                rotation_name(far_side).to_uppercase(),
            );
            return StepReport::new(StepKind::Case3, description, Step::Continue);
        }

        let parent_color = tree.node(parent).color;
        tree.set_color(s, parent_color);
        tree.set_color(parent, Color::Black);
        if let Some(far) = far {
            tree.set_color(far, Color::Black);
        }
        tree.rotate(parent, side);
        if let Some(root) = tree.root() {
            tree.set_color(root, Color::Black);
        }
        debug!("delete fix-up case 4 at {}", tree.node(parent).value);
        let description = format!(
            "Case 4: Far child (w.{} = {}) is RED.\n\
             1. Recolor w = {} <- p.color, p = {} <- BLACK.\n\
             2. Recolor w.{} <- BLACK.\n\
             3. {}-ROTATE(T, p). Fix-up complete.",
            side_name(far_side),
            display_opt(tree, far),
            tree.node(s).value,
            tree.node(parent).value,
            side_name(far_side),
            rotation_name(side).to_uppercase(),
        );
        StepReport::new(StepKind::Case4, description, Step::Stop)
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Left => "left",
        Side::Right => "right",
    }
}
