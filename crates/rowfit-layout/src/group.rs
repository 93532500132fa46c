#![forbid(unsafe_code)]

//! Container-level sizing record.

use crate::item::ItemId;

/// Index of a [`GroupSize`] inside a [`SizeTree`](crate::SizeTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub(crate) u32);

impl GroupId {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered children of one container plus the data derived from them.
///
/// `flat` and `priorities` are caches over the subtree. The owning
/// [`SizeTree`](crate::SizeTree) rebuilds them on every structural change;
/// nothing else writes them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupSize {
    pub(crate) children: Vec<ItemId>,
    pub(crate) flat: Vec<ItemId>,
    pub(crate) priorities: Vec<i32>,
    pub(crate) paddings: f64,
    pub(crate) indent_size: f64,
    pub(crate) parent_size: Option<ItemId>,
}

impl GroupSize {
    pub(crate) fn new(children: Vec<ItemId>, indent_size: f64) -> Self {
        Self {
            children,
            indent_size: if indent_size.is_finite() {
                indent_size.max(0.0)
            } else {
                0.0
            },
            ..Self::default()
        }
    }

    /// Direct children in visual order.
    #[must_use]
    pub fn tree_list(&self) -> &[ItemId] {
        &self.children
    }

    /// Every leaf reachable through nested groups, depth-first.
    #[must_use]
    pub fn flat_list(&self) -> &[ItemId] {
        &self.flat
    }

    /// Distinct leaf priorities of the subtree, ascending.
    #[must_use]
    pub fn priorities(&self) -> &[i32] {
        &self.priorities
    }

    /// Whether the group has no children at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Width taken by the group's own chrome.
    #[must_use]
    pub const fn paddings(&self) -> f64 {
        self.paddings
    }

    /// Gap between consecutive visible children.
    #[must_use]
    pub const fn indent_size(&self) -> f64 {
        self.indent_size
    }

    /// Item wrapping this group, if nested.
    #[must_use]
    pub const fn parent_size(&self) -> Option<ItemId> {
        self.parent_size
    }
}
