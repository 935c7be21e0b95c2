//! Node, color and position types.
//!
//! Nodes live in a `Vec`-backed arena owned by [`RbTree`](crate::tree::RbTree).
//! Every "pointer" is an `Option<u32>` index into that arena. The parent link
//! is a back-reference used for rotations and walks toward the root; subtree
//! membership is always decided by the `l` / `r` links.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("RED"),
            Color::Black => f.write_str("BLACK"),
        }
    }
}

/// Which child slot of a parent a position occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Link accessors shared by arena nodes.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);

    /// Child on the given side.
    #[inline]
    fn child(&self, side: Side) -> Option<u32> {
        match side {
            Side::Left => self.l(),
            Side::Right => self.r(),
        }
    }

    #[inline]
    fn set_child(&mut self, side: Side, v: Option<u32>) {
        match side {
            Side::Left => self.set_l(v),
            Side::Right => self.set_r(v),
        }
    }
}

/// Red-black tree node.
#[derive(Clone, Debug)]
pub struct RbNode<K> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub value: K,
    pub color: Color,
}

impl<K> RbNode<K> {
    /// New detached node. Fresh nodes are RED.
    pub fn new(value: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            value,
            color: Color::Red,
        }
    }
}

impl<K> Node for RbNode<K> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

/// Where a delete-time deficiency currently sits.
///
/// `Real` names an arena node. `Deficient` marks an empty child slot of
/// `parent` (or the empty root slot when `parent` is `None`); it is never
/// linked into the tree and its color is always BLACK.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Real(u32),
    Deficient { parent: Option<u32>, side: Side },
}
