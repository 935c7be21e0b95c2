//! Arena-backed red-black tree and its structural primitives.
//!
//! Nothing in here knows about fix-up cases: rotations, transplant, search,
//! minimum and the read-only measurements (height, size, black height,
//! invariant check) are the building blocks the step machines in
//! [`insert`](crate::insert) and [`delete`](crate::delete) are made of.

use std::fmt::{self, Debug};

use log::trace;

use crate::error::{BlackHeightMismatch, InvariantViolation};
use crate::types::{Color, Node, RbNode, Side};

#[derive(Clone, Debug)]
pub struct RbTree<K> {
    arena: Vec<RbNode<K>>,
    root: Option<u32>,
    free: Vec<u32>,
}

impl<K> Default for RbTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RbTree<K> {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            free: Vec::new(),
        }
    }

    #[inline]
    pub fn root(&self) -> Option<u32> {
        self.root
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    pub fn node(&self, i: u32) -> &RbNode<K> {
        &self.arena[i as usize]
    }

    #[inline]
    pub(crate) fn set_root(&mut self, root: Option<u32>) {
        self.root = root;
    }

    #[inline]
    pub(crate) fn p(&self, i: u32) -> Option<u32> {
        self.arena[i as usize].p()
    }

    #[inline]
    pub(crate) fn l(&self, i: u32) -> Option<u32> {
        self.arena[i as usize].l()
    }

    #[inline]
    pub(crate) fn r(&self, i: u32) -> Option<u32> {
        self.arena[i as usize].r()
    }

    #[inline]
    pub(crate) fn child(&self, i: u32, side: Side) -> Option<u32> {
        self.arena[i as usize].child(side)
    }

    #[inline]
    pub(crate) fn set_p(&mut self, i: u32, v: Option<u32>) {
        self.arena[i as usize].set_p(v);
    }

    #[inline]
    pub(crate) fn set_l(&mut self, i: u32, v: Option<u32>) {
        self.arena[i as usize].set_l(v);
    }

    #[inline]
    pub(crate) fn set_r(&mut self, i: u32, v: Option<u32>) {
        self.arena[i as usize].set_r(v);
    }

    #[inline]
    pub(crate) fn set_child(&mut self, i: u32, side: Side, v: Option<u32>) {
        self.arena[i as usize].set_child(side, v);
    }

    /// Color of an optional node; absent children are BLACK.
    #[inline]
    pub fn color_of(&self, i: Option<u32>) -> Color {
        i.map_or(Color::Black, |i| self.arena[i as usize].color)
    }

    #[inline]
    pub(crate) fn set_color(&mut self, i: u32, color: Color) {
        self.arena[i as usize].color = color;
    }

    /// Which side of its parent `i` hangs on, `None` for the root.
    pub fn side_of(&self, i: u32) -> Option<Side> {
        let p = self.p(i)?;
        if self.l(p) == Some(i) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Places a detached RED node in the arena, reusing a released slot when
    /// one is available.
    pub(crate) fn alloc(&mut self, value: K) -> u32 {
        let node = RbNode::new(value);
        match self.free.pop() {
            Some(i) => {
                self.arena[i as usize] = node;
                i
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Returns an unlinked node's slot to the free list.
    pub(crate) fn release(&mut self, i: u32) {
        let n = &mut self.arena[i as usize];
        n.p = None;
        n.l = None;
        n.r = None;
        self.free.push(i);
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
    }

    /// Left rotation around `n`; `n.r` becomes the subtree root.
    ///
    /// # Panics
    ///
    /// If `n` has no right child.
    pub fn rotate_left(&mut self, n: u32) {
        let nr = self.r(n).expect("rotate_left requires a right child");
        trace!("rotate_left at #{n}");
        let nrl = self.l(nr);

        self.set_r(n, nrl);
        if let Some(nrl) = nrl {
            self.set_p(nrl, Some(n));
        }

        let p = self.p(n);
        self.set_p(nr, p);
        self.replace_child(p, n, Some(nr));

        self.set_l(nr, Some(n));
        self.set_p(n, Some(nr));
    }

    /// Right rotation around `n`; `n.l` becomes the subtree root.
    ///
    /// # Panics
    ///
    /// If `n` has no left child.
    pub fn rotate_right(&mut self, n: u32) {
        let nl = self.l(n).expect("rotate_right requires a left child");
        trace!("rotate_right at #{n}");
        let nlr = self.r(nl);

        self.set_l(n, nlr);
        if let Some(nlr) = nlr {
            self.set_p(nlr, Some(n));
        }

        let p = self.p(n);
        self.set_p(nl, p);
        self.replace_child(p, n, Some(nl));

        self.set_r(nl, Some(n));
        self.set_p(n, Some(nl));
    }

    /// Rotates `n` down toward `side`: `Side::Left` is a left rotation.
    pub fn rotate(&mut self, n: u32, side: Side) {
        match side {
            Side::Left => self.rotate_left(n),
            Side::Right => self.rotate_right(n),
        }
    }

    /// Points `p`'s link that used to reference `old` at `new`; with no
    /// parent the root is replaced instead.
    fn replace_child(&mut self, p: Option<u32>, old: u32, new: Option<u32>) {
        match p {
            None => self.root = new,
            Some(p) => {
                if self.l(p) == Some(old) {
                    self.set_l(p, new);
                } else {
                    self.set_r(p, new);
                }
            }
        }
    }

    /// Replaces the subtree rooted at `u` with `v` as seen from `u`'s parent.
    ///
    /// An absent `v` leaves an empty slot behind; delete fix-up tracks that
    /// slot as a [`Position::Deficient`](crate::types::Position) anchor instead
    /// of a node, so no parent link is written for it.
    pub fn transplant(&mut self, u: u32, v: Option<u32>) {
        let p = self.p(u);
        self.replace_child(p, u, v);
        if let Some(v) = v {
            self.set_p(v, p);
        }
    }

    /// Leftmost descendant of `n`.
    pub fn minimum(&self, mut n: u32) -> u32 {
        while let Some(l) = self.l(n) {
            n = l;
        }
        n
    }

    /// Leftmost node of the whole tree.
    pub fn first(&self) -> Option<u32> {
        self.root.map(|r| self.minimum(r))
    }

    /// In-order successor.
    pub fn next(&self, mut curr: u32) -> Option<u32> {
        if let Some(r) = self.r(curr) {
            return Some(self.minimum(r));
        }
        let mut p = self.p(curr);
        while let Some(pi) = p {
            if self.r(pi) == Some(curr) {
                curr = pi;
                p = self.p(pi);
            } else {
                return Some(pi);
            }
        }
        None
    }

    /// In-order iterator over node values.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            tree: self,
            curr: self.first(),
        }
    }

    /// Number of edges-plus-one on the longest root-to-node path; 0 when empty.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn height_of(&self, n: Option<u32>) -> usize {
        match n {
            None => 0,
            Some(i) => 1 + self.height_of(self.l(i)).max(self.height_of(self.r(i))),
        }
    }

    /// Number of nodes reachable from the root.
    pub fn size(&self) -> usize {
        self.size_of(self.root)
    }

    fn size_of(&self, n: Option<u32>) -> usize {
        n.map_or(0, |i| 1 + self.size_of(self.l(i)) + self.size_of(self.r(i)))
    }

    /// Black height of the subtree at `n`.
    ///
    /// An absent subtree counts as 1. Each node adds its own black unit on top
    /// of its children's height, and the children must agree.
    pub fn black_height(&self, n: Option<u32>) -> Result<usize, BlackHeightMismatch> {
        let Some(i) = n else {
            return Ok(1);
        };
        let lh = self.black_height(self.l(i))?;
        let rh = self.black_height(self.r(i))?;
        if lh != rh {
            return Err(BlackHeightMismatch);
        }
        Ok(lh + usize::from(self.arena[i as usize].color.is_black()))
    }
}

impl<K: Ord> RbTree<K> {
    /// Plain BST descent.
    pub fn search(&self, value: &K) -> Option<u32> {
        let mut curr = self.root;
        while let Some(i) = curr {
            let k = &self.arena[i as usize].value;
            curr = match value.cmp(k) {
                std::cmp::Ordering::Equal => return Some(i),
                std::cmp::Ordering::Less => self.l(i),
                std::cmp::Ordering::Greater => self.r(i),
            };
        }
        None
    }

    pub fn contains(&self, value: &K) -> bool {
        self.search(value).is_some()
    }

    /// Full red-black validation: parent links, root color, no red-red edge,
    /// equal black height and strictly increasing in-order values.
    pub fn check(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            return Ok(());
        };
        if self.p(root).is_some() {
            return Err(InvariantViolation::RootHasParent);
        }
        if self.arena[root as usize].color.is_red() {
            return Err(InvariantViolation::RootNotBlack);
        }
        self.check_subtree(root)?;

        let mut prev: Option<&K> = None;
        for value in self.iter() {
            if let Some(prev) = prev {
                if prev >= value {
                    return Err(InvariantViolation::Order);
                }
            }
            prev = Some(value);
        }
        Ok(())
    }

    fn check_subtree(&self, i: u32) -> Result<usize, InvariantViolation> {
        let l = self.l(i);
        let r = self.r(i);
        for c in [l, r].into_iter().flatten() {
            if self.p(c) != Some(i) {
                return Err(InvariantViolation::BrokenParentLink);
            }
        }
        let red = self.arena[i as usize].color.is_red();
        if red && (self.color_of(l).is_red() || self.color_of(r).is_red()) {
            return Err(InvariantViolation::RedRed);
        }
        let lh = l.map_or(Ok(1), |l| self.check_subtree(l))?;
        let rh = r.map_or(Ok(1), |r| self.check_subtree(r))?;
        if lh != rh {
            return Err(InvariantViolation::BlackHeight);
        }
        Ok(lh + usize::from(!red))
    }
}

impl<K: Clone> RbTree<K> {
    /// In-order values.
    pub fn values(&self) -> Vec<K> {
        self.iter().cloned().collect()
    }
}

pub struct Iter<'a, K> {
    tree: &'a RbTree<K>,
    curr: Option<u32>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let i = self.curr?;
        self.curr = self.tree.next(i);
        Some(&self.tree.arena[i as usize].value)
    }
}

/// Debug printer, one node per line with nested `L=` / `R=` branches.
pub fn print<K: Debug>(tree: &RbTree<K>, node: Option<u32>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = tree.node(i);
            let left = print(tree, n.l, &format!("{tab}  "));
            let right = print(tree, n.r, &format!("{tab}  "));
            format!(
                "{:?} {}\n{tab}L={left}\n{tab}R={right}",
                n.value, n.color
            )
        }
    }
}

impl<K: Debug> fmt::Display for RbTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print(self, self.root, ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the chain 10 -> 20 -> 30 along right links, all black.
    fn chain() -> (RbTree<i32>, [u32; 3]) {
        let mut t = RbTree::new();
        let a = t.alloc(10);
        let b = t.alloc(20);
        let c = t.alloc(30);
        t.set_r(a, Some(b));
        t.set_p(b, Some(a));
        t.set_r(b, Some(c));
        t.set_p(c, Some(b));
        t.set_root(Some(a));
        for i in [a, b, c] {
            t.set_color(i, Color::Black);
        }
        (t, [a, b, c])
    }

    #[test]
    fn rotate_left_at_root_moves_root() {
        let (mut t, [a, b, c]) = chain();
        t.rotate_left(a);
        assert_eq!(t.root(), Some(b));
        assert_eq!(t.p(b), None);
        assert_eq!(t.l(b), Some(a));
        assert_eq!(t.r(b), Some(c));
        assert_eq!(t.p(a), Some(b));
        assert_eq!(t.values(), vec![10, 20, 30]);
    }

    #[test]
    fn rotate_right_inverts_rotate_left() {
        let (mut t, [a, b, _]) = chain();
        t.rotate_left(a);
        t.rotate_right(b);
        assert_eq!(t.root(), Some(a));
        assert_eq!(t.r(a), Some(b));
        assert_eq!(t.l(b), None);
        assert_eq!(t.values(), vec![10, 20, 30]);
    }

    #[test]
    fn rotate_below_root_relinks_parent() {
        let (mut t, [a, b, c]) = chain();
        t.rotate_left(b);
        assert_eq!(t.r(a), Some(c));
        assert_eq!(t.p(c), Some(a));
        assert_eq!(t.l(c), Some(b));
        assert_eq!(t.side_of(b), Some(Side::Left));
    }

    #[test]
    #[should_panic(expected = "requires a left child")]
    fn rotate_without_pivot_panics() {
        let (mut t, [a, _, _]) = chain();
        t.rotate_right(a);
    }

    #[test]
    fn transplant_to_empty_slot() {
        let (mut t, [a, b, _]) = chain();
        t.transplant(b, None);
        assert_eq!(t.r(a), None);
        assert_eq!(t.size(), 1);
    }

    #[test]
    fn transplant_root() {
        let (mut t, [a, b, _]) = chain();
        t.transplant(a, Some(b));
        assert_eq!(t.root(), Some(b));
        assert_eq!(t.p(b), None);
    }

    #[test]
    fn search_and_minimum() {
        let (t, [a, b, c]) = chain();
        assert_eq!(t.search(&20), Some(b));
        assert_eq!(t.search(&25), None);
        assert_eq!(t.minimum(a), a);
        assert_eq!(t.minimum(c), c);
    }

    #[test]
    fn measurements() {
        let (mut t, _) = chain();
        assert_eq!(t.height(), 3);
        assert_eq!(t.size(), 3);
        assert_eq!(t.black_height(t.root()), Err(BlackHeightMismatch));
        assert_eq!(t.check(), Err(InvariantViolation::BlackHeight));
        t.clear();
        assert_eq!(t.height(), 0);
        assert_eq!(t.black_height(t.root()), Ok(1));
        assert_eq!(t.check(), Ok(()));
    }

    #[test]
    fn released_slots_are_reused() {
        let (mut t, [_, b, c]) = chain();
        t.transplant(c, None);
        t.release(c);
        let d = t.alloc(40);
        assert_eq!(d, c);
        assert_eq!(t.node(d).color, Color::Red);
        assert_eq!(t.r(b), None);
    }

    #[test]
    fn print_shows_colors() {
        let (t, _) = chain();
        let out = t.to_string();
        assert!(out.starts_with("10 BLACK"));
        assert!(out.contains("∅"));
    }
}
