//! Insertion: BST placement of a RED leaf and the resumable insert fix-up.
//!
//! [`InsertFixup::advance`] applies exactly one case per call:
//!
//! | Case | Shape | Action | Result |
//! |------|-------|--------|--------|
//! | terminal | no parent, or BLACK parent | recolor root BLACK | stop |
//! | 1 | parent and uncle RED | push redness to grandparent | continue at grandparent |
//! | 2 | uncle BLACK, `z` inner grandchild | rotate at parent, then case 3 | stop |
//! | 3 | uncle BLACK, `z` outer grandchild | recolor, rotate at grandparent | stop |

use std::fmt::Display;

use log::debug;

use crate::step::{Step, StepKind, StepReport};
use crate::tree::RbTree;
use crate::types::{Color, Side};

/// Links `value` in as a RED leaf and returns its arena index.
///
/// The caller guarantees the value is not already present. An empty tree
/// gets a BLACK root and needs no fix-up.
pub fn insert_node<K: Ord>(tree: &mut RbTree<K>, value: K) -> u32 {
    let mut curr = tree.root();
    let mut parent: Option<(u32, Side)> = None;
    while let Some(i) = curr {
        let side = if value < tree.node(i).value {
            Side::Left
        } else {
            Side::Right
        };
        parent = Some((i, side));
        curr = tree.child(i, side);
    }

    let n = tree.alloc(value);
    match parent {
        None => {
            tree.set_color(n, Color::Black);
            tree.set_root(Some(n));
        }
        Some((p, side)) => {
            tree.set_child(p, side, Some(n));
            tree.set_p(n, Some(p));
        }
    }
    n
}

/// Insert fix-up machine state: the node whose parent link may be red-red.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertFixup {
    pub z: u32,
}

impl InsertFixup {
    pub fn new(z: u32) -> Self {
        Self { z }
    }

    /// Applies one case and reports it.
    pub fn advance<K: Display>(&mut self, tree: &mut RbTree<K>) -> StepReport {
        let z = self.z;
        let Some(p) = tree.p(z).filter(|&p| tree.color_of(Some(p)).is_red()) else {
            return finish(tree);
        };
        let Some(g) = tree.p(p) else {
            return finish(tree);
        };
        let p_side = tree.side_of(p).unwrap_or(Side::Left);
        let u = tree.child(g, p_side.opposite());

        if tree.color_of(u).is_red() {
            tree.set_color(p, Color::Black);
            if let Some(u) = u {
                tree.set_color(u, Color::Black);
            }
            tree.set_color(g, Color::Red);
            self.z = g;
            debug!("insert fix-up case 1 at {}", tree.node(z).value);
            let description = format!(
                "Case 1: Parent {} and uncle {} are RED.\n\
                 1. Recolor parent <- BLACK.\n\
                 2. Recolor uncle <- BLACK.\n\
                 3. Recolor grandparent {} <- RED.\n\
                 4. Set z <- grandparent.",
                tree.node(p).value,
                display_opt(tree, u),
                tree.node(g).value,
            );
            return StepReport::new(StepKind::Case1, description, Step::Continue);
        }

        let mut description = String::new();
        let mut kind = StepKind::Case3;
        let mut p = p;
        if tree.side_of(z) != Some(p_side) {
            tree.rotate(p, p_side);
            self.z = p;
            p = z;
            kind = StepKind::Case2;
            description.push_str(&format!(
                "Case 2 ({}): Parent is RED, uncle is BLACK, z is inner child.\n\
                 1. {}-Rotate on parent {}.\n\
                 2. Set z <- former parent.\n",
                shape(p_side, p_side.opposite()),
                rotation_name(p_side),
                tree.node(self.z).value,
            ));
        }

        tree.set_color(p, Color::Black);
        tree.set_color(g, Color::Red);
        let turn = p_side.opposite();
        tree.rotate(g, turn);
        debug!("insert fix-up {:?} at {}", kind, tree.node(self.z).value);
        description.push_str(&format!(
            "Case 3 ({}): Parent is RED, uncle is BLACK, z is outer child.\n\
             1. Recolor parent {} <- BLACK.\n\
             2. Recolor grandparent {} <- RED.\n\
             3. {}-Rotate on grandparent.\n\
             4. Fix-up complete.",
            shape(p_side, p_side),
            tree.node(p).value,
            tree.node(g).value,
            rotation_name(turn),
        ));
        StepReport::new(kind, description, Step::Stop)
    }
}

fn finish<K>(tree: &mut RbTree<K>) -> StepReport {
    match tree.root() {
        Some(root) if tree.color_of(Some(root)).is_red() => {
            tree.set_color(root, Color::Black);
            StepReport::new(
                StepKind::Complete,
                "Final: Root recolored BLACK. Fix-up complete.".to_string(),
                Step::Stop,
            )
        }
        _ => StepReport::new(
            StepKind::Complete,
            "Property 4 satisfied. Fix-up complete.".to_string(),
            Step::Stop,
        ),
    }
}

pub(crate) fn rotation_name(side: Side) -> &'static str {
    match side {
        Side::Left => "Left",
        Side::Right => "Right",
    }
}

fn shape(outer: Side, inner: Side) -> &'static str {
    match (outer, inner) {
        (Side::Left, Side::Left) => "Left-Left",
        (Side::Left, Side::Right) => "Left-Right",
        (Side::Right, Side::Left) => "Right-Left",
        (Side::Right, Side::Right) => "Right-Right",
    }
}

pub(crate) fn display_opt<K: Display>(tree: &RbTree<K>, i: Option<u32>) -> String {
    i.map_or_else(|| "NIL".to_string(), |i| tree.node(i).value.to_string())
}
