#![forbid(unsafe_code)]

//! Arena owning every size of one layout pass.
//!
//! Items and groups reference each other by index only: a group lists its
//! children as [`ItemId`]s, a group-wrapping item names its [`GroupId`], and
//! the back-links (`parent_group`, `parent_size`) are plain indices too. The
//! tree is built from the current widget tree, measured, fitted and then
//! dropped; nothing in it survives the pass.

use crate::group::{GroupId, GroupSize};
use crate::item::{ComponentId, ItemId, ItemSize, ItemSpec};
use crate::tiers::collect_priorities;

/// Owner of all [`ItemSize`] and [`GroupSize`] records of a pass.
#[derive(Debug, Clone, Default)]
pub struct SizeTree {
    pub(crate) items: Vec<ItemSize>,
    pub(crate) groups: Vec<GroupSize>,
}

impl SizeTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with room for `items` sizes and `groups` groups.
    pub fn with_capacity(items: usize, groups: usize) -> Self {
        Self {
            items: Vec::with_capacity(items),
            groups: Vec::with_capacity(groups),
        }
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Add a leaf size for a single widget.
    pub fn add_leaf(&mut self, spec: ItemSpec) -> ItemId {
        self.push_item(ItemSize::leaf(spec))
    }

    /// Create a group from already-added items, in visual order.
    ///
    /// The items become children of the new group.
    pub fn add_group(&mut self, children: Vec<ItemId>, indent_size: f64) -> GroupId {
        let id = self.push_group(GroupSize::new(children, indent_size));
        for child in self.groups[id.index()].children.clone() {
            self.items[child.index()].set_parent_group(Some(id));
        }
        self.refresh_derived(id);
        id
    }

    /// Add an item standing for a nested group.
    ///
    /// The item's floor is `max_width - economy(group)` and the group's
    /// paddings are back-computed as `max_width - content width`, so the
    /// chrome measured around the group is kept when the group shrinks.
    pub fn add_group_item(&mut self, spec: ItemSpec, group: GroupId) -> ItemId {
        let economy = self.economy(group, None);
        let content = self.width_with(group, None, true);
        let id = self.push_item(ItemSize::wrapping(spec, group, economy));

        let max_width = self.items[id.index()].max_width();
        let nested = &mut self.groups[group.index()];
        nested.parent_size = Some(id);
        nested.paddings = max_width - content;
        id
    }

    /// Append a child to an existing group.
    ///
    /// Flattened leaves and priority tiers are rebuilt for the group and
    /// every enclosing group.
    pub fn push_child(&mut self, group: GroupId, item: ItemId) {
        self.groups[group.index()].children.push(item);
        self.items[item.index()].set_parent_group(Some(group));

        let mut current = Some(group);
        while let Some(g) = current {
            self.refresh_derived(g);
            current = self.groups[g.index()]
                .parent_size
                .and_then(|owner| self.items[owner.index()].parent_group());
        }
    }

    /// Re-measure a group-wrapping item against its group's current content.
    ///
    /// Use this when a nested group changed after its enclosing item was
    /// built; the floor, economy and group paddings are derived again from
    /// `max_width`. Leaf items are left untouched.
    pub fn remeasure(&mut self, item: ItemId, max_width: f64) {
        let Some(group) = self.items[item.index()].group() else {
            return;
        };
        let economy = self.economy(group, None);
        let content = self.width_with(group, None, true);
        let size = &mut self.items[item.index()];
        size.remeasure(max_width, economy);
        let max_width = size.max_width();
        self.groups[group.index()].paddings = max_width - content;
    }

    /// Set the width consumed by a group's chrome.
    pub fn set_paddings(&mut self, group: GroupId, paddings: f64) {
        self.groups[group.index()].paddings = paddings;
    }

    fn push_item(&mut self, item: ItemSize) -> ItemId {
        let id = ItemId(u32::try_from(self.items.len()).unwrap_or(u32::MAX));
        self.items.push(item);
        id
    }

    pub(crate) fn push_group(&mut self, group: GroupSize) -> GroupId {
        let id = GroupId(u32::try_from(self.groups.len()).unwrap_or(u32::MAX));
        self.groups.push(group);
        id
    }

    pub(crate) fn refresh_derived(&mut self, group: GroupId) {
        let mut flat = Vec::new();
        let mut priorities = Vec::new();
        for &child in &self.groups[group.index()].children {
            let size = &self.items[child.index()];
            match size.group() {
                Some(nested) => {
                    let nested = &self.groups[nested.index()];
                    flat.extend_from_slice(&nested.flat);
                    priorities.extend_from_slice(&nested.priorities);
                }
                None => {
                    flat.push(child);
                    priorities.push(size.priority());
                }
            }
        }
        let g = &mut self.groups[group.index()];
        g.flat = flat;
        g.priorities = collect_priorities(priorities);
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    /// Size record for `id`.
    #[must_use]
    pub fn item(&self, id: ItemId) -> &ItemSize {
        &self.items[id.index()]
    }

    /// Mutable size record for `id`.
    pub fn item_mut(&mut self, id: ItemId) -> &mut ItemSize {
        &mut self.items[id.index()]
    }

    /// Group record for `id`.
    #[must_use]
    pub fn group(&self, id: GroupId) -> &GroupSize {
        &self.groups[id.index()]
    }

    /// Number of item records.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of group records, rows included.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Whether `group` has no children.
    #[must_use]
    pub fn is_empty(&self, group: GroupId) -> bool {
        self.groups[group.index()].is_empty()
    }

    /// Group-wrapping items enclosing `item`, outermost first.
    #[must_use]
    pub fn lineage(&self, item: ItemId) -> Vec<ItemId> {
        let mut chain = Vec::new();
        let mut current = self.items[item.index()].parent_group();
        while let Some(group) = current {
            let Some(owner) = self.groups[group.index()].parent_size else {
                break;
            };
            chain.push(owner);
            current = self.items[owner.index()].parent_group();
        }
        chain.reverse();
        chain
    }

    /// Component handles of the direct children of `group`.
    pub fn components(&self, group: GroupId) -> impl Iterator<Item = ComponentId> + '_ {
        self.groups[group.index()]
            .children
            .iter()
            .map(|&id| self.items[id.index()].component())
    }

    /// Leaves of `group`, optionally restricted to one priority tier.
    #[must_use]
    pub fn flat_sizes(&self, group: GroupId, priority: Option<i32>) -> Vec<ItemId> {
        self.flat_iter(group, priority).collect()
    }

    /// Visible leaves of `group`, optionally restricted to one priority tier.
    #[must_use]
    pub fn visible_flat_sizes(&self, group: GroupId, priority: Option<i32>) -> Vec<ItemId> {
        self.flat_iter(group, priority)
            .filter(|&id| !self.items[id.index()].is_hidden())
            .collect()
    }

    /// Number of visible leaves of `group`.
    #[must_use]
    pub fn count_visible(&self, group: GroupId, priority: Option<i32>) -> usize {
        self.flat_iter(group, priority)
            .filter(|&id| !self.items[id.index()].is_hidden())
            .count()
    }

    /// Whether any visible child forces a row break.
    #[must_use]
    pub fn has_breaks(&self, group: GroupId) -> bool {
        self.groups[group.index()].children.iter().any(|&id| {
            let size = &self.items[id.index()];
            !size.is_hidden() && size.is_wrap()
        })
    }

    pub(crate) fn flat_iter(
        &self,
        group: GroupId,
        priority: Option<i32>,
    ) -> impl Iterator<Item = ItemId> + '_ {
        self.groups[group.index()]
            .flat
            .iter()
            .copied()
            .filter(move |&id| priority.is_none_or(|p| self.items[id.index()].priority() == p))
    }

    // ------------------------------------------------------------------
    // Width accounting
    // ------------------------------------------------------------------

    /// Full width of `group`: visible children, indents and paddings.
    #[must_use]
    pub fn width(&self, group: GroupId) -> f64 {
        self.width_with(group, None, false)
    }

    /// Width of `group` restricted to a priority tier.
    ///
    /// Hidden children never count. Nested groups always count (with their
    /// own filtered width); leaves count when they match `priority`. Unless
    /// `content_only` is set, one indent is added between counted children
    /// and the paddings are added when nothing visible was filtered out.
    #[must_use]
    pub fn width_with(&self, group: GroupId, priority: Option<i32>, content_only: bool) -> f64 {
        let g = &self.groups[group.index()];
        let mut width = 0.0;
        let mut visible = 0usize;
        let mut counted = 0usize;

        for &child in &g.children {
            let size = &self.items[child.index()];
            if size.is_hidden() {
                continue;
            }
            visible += 1;

            if let Some(nested) = size.group() {
                width += self.width_with(nested, priority, content_only);
                counted += 1;
            } else if priority.is_none_or(|p| size.priority() == p) {
                width += size.width();
                counted += 1;
            }
        }

        if !content_only {
            if counted > 1 {
                width += g.indent_size * (counted - 1) as f64;
            }
            if counted > 0 && counted == visible {
                width += g.paddings;
            }
        }
        width
    }

    /// Total economy of the leaves of `group`, optionally for one tier.
    #[must_use]
    pub fn economy(&self, group: GroupId, priority: Option<i32>) -> f64 {
        self.flat_iter(group, priority)
            .map(|id| self.items[id.index()].economy())
            .sum()
    }

    /// Slack still recoverable from visible leaves of one tier.
    pub(crate) fn tier_slack(&self, group: GroupId, tier: i32) -> f64 {
        self.flat_iter(group, Some(tier))
            .map(|id| &self.items[id.index()])
            .filter(|size| !size.is_hidden())
            .map(ItemSize::slack)
            .sum()
    }

    // ------------------------------------------------------------------
    // State resets
    // ------------------------------------------------------------------

    /// Undo the effects of previous fitting.
    ///
    /// Without a priority every item of the subtree is reset and items
    /// wrapping an empty group are hidden straight away. With a priority
    /// only matching leaves are reset.
    pub fn reset(&mut self, group: GroupId, priority: Option<i32>) {
        for child in self.groups[group.index()].children.clone() {
            match self.items[child.index()].group() {
                Some(nested) => {
                    if priority.is_none() {
                        let empty = self.groups[nested.index()].is_empty();
                        let size = &mut self.items[child.index()];
                        size.reset();
                        if empty {
                            size.hide();
                        }
                    }
                    self.reset(nested, priority);
                }
                None => {
                    let size = &mut self.items[child.index()];
                    if priority.is_none_or(|p| size.priority() == p) {
                        size.reset();
                    }
                }
            }
        }
    }

    /// Shrink every shrinkable leaf (priority `>= 0`) to its floor.
    pub fn minify(&mut self, group: GroupId, priority: Option<i32>) {
        let leaves: Vec<ItemId> = self.flat_iter(group, priority).collect();
        for id in leaves {
            let size = &mut self.items[id.index()];
            if size.is_shrinkable() {
                size.minify();
            }
        }
    }

    /// Give visible leaves of one tier their natural width back.
    pub(crate) fn restore_tier(&mut self, group: GroupId, tier: i32) {
        let leaves: Vec<ItemId> = self.flat_iter(group, Some(tier)).collect();
        for id in leaves {
            let size = &mut self.items[id.index()];
            if !size.is_hidden() {
                size.set_width(size.max_width());
            }
        }
    }
}
