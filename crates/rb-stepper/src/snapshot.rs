//! Deep structural copies of a tree.
//!
//! A [`Snapshot`] owns its nodes outright; it shares nothing with the arena it
//! was taken from, and [`Snapshot::rebuild`] always produces a brand-new arena.

use serde::{Deserialize, Serialize};

use crate::tree::RbTree;
use crate::types::Color;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode<K> {
    pub value: K,
    pub color: Color,
    pub left: Option<Box<SnapshotNode<K>>>,
    pub right: Option<Box<SnapshotNode<K>>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<K> {
    pub root: Option<Box<SnapshotNode<K>>>,
}

impl<K: Clone> Snapshot<K> {
    pub fn capture(tree: &RbTree<K>) -> Self {
        Self {
            root: capture_node(tree, tree.root()),
        }
    }

    /// Fresh tree with the same values, colors and shape.
    pub fn rebuild(&self) -> RbTree<K> {
        let mut tree = RbTree::new();
        let root = rebuild_node(&mut tree, self.root.as_deref(), None);
        tree.set_root(root);
        tree
    }
}

impl<K> Snapshot<K> {
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Pre-order `(value, color)` pairs, handy for comparing shapes.
    pub fn preorder(&self) -> Vec<(&K, Color)> {
        let mut out = Vec::new();
        let mut stack: Vec<&SnapshotNode<K>> = self.root.as_deref().into_iter().collect();
        while let Some(n) = stack.pop() {
            out.push((&n.value, n.color));
            stack.extend(n.right.as_deref());
            stack.extend(n.left.as_deref());
        }
        out
    }
}

fn capture_node<K: Clone>(tree: &RbTree<K>, i: Option<u32>) -> Option<Box<SnapshotNode<K>>> {
    let i = i?;
    let n = tree.node(i);
    Some(Box::new(SnapshotNode {
        value: n.value.clone(),
        color: n.color,
        left: capture_node(tree, n.l),
        right: capture_node(tree, n.r),
    }))
}

fn rebuild_node<K: Clone>(
    tree: &mut RbTree<K>,
    node: Option<&SnapshotNode<K>>,
    parent: Option<u32>,
) -> Option<u32> {
    let node = node?;
    let i = tree.alloc(node.value.clone());
    tree.set_color(i, node.color);
    tree.set_p(i, parent);
    let l = rebuild_node(tree, node.left.as_deref(), Some(i));
    let r = rebuild_node(tree, node.right.as_deref(), Some(i));
    tree.set_l(i, l);
    tree.set_r(i, r);
    Some(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insert::{insert_node, InsertFixup};
    use crate::step::Step;

    fn build(values: &[i32]) -> RbTree<i32> {
        let mut t = RbTree::new();
        for &v in values {
            let z = insert_node(&mut t, v);
            if t.root() != Some(z) {
                let mut fix = InsertFixup::new(z);
                while fix.advance(&mut t).step == Step::Continue {}
            }
        }
        t
    }

    #[test]
    fn rebuild_matches_capture() {
        let t = build(&[5, 3, 8, 1, 4, 7, 9, 2]);
        let snap = Snapshot::capture(&t);
        let rebuilt = snap.rebuild();
        assert_eq!(rebuilt.values(), t.values());
        assert_eq!(rebuilt.check(), Ok(()));
        assert_eq!(Snapshot::capture(&rebuilt), snap);
    }

    #[test]
    fn snapshot_is_independent_of_live_tree() {
        let mut t = build(&[2, 1, 3]);
        let snap = Snapshot::capture(&t);
        let z = insert_node(&mut t, 4);
        InsertFixup::new(z).advance(&mut t);
        assert_eq!(snap.preorder().len(), 3);
        assert_eq!(snap.rebuild().values(), vec![1, 2, 3]);
    }

    #[test]
    fn empty_snapshot() {
        let snap = Snapshot::capture(&RbTree::<i32>::new());
        assert!(snap.is_empty());
        assert!(snap.rebuild().is_empty());
    }

    #[test]
    fn preorder_lists_root_first() {
        let t = build(&[10, 20, 30]);
        let snap = Snapshot::capture(&t);
        assert_eq!(
            snap.preorder(),
            vec![(&20, Color::Black), (&10, Color::Red), (&30, Color::Red)]
        );
    }
}
