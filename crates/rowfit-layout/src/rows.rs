#![forbid(unsafe_code)]

//! Row splitting and per-row fitting.

use crate::fit::{HideCandidate, HideVeto};
use crate::group::{GroupId, GroupSize};
use crate::item::ItemId;
use crate::tiers::hide_order;
use crate::tree::SizeTree;

/// Budget for row `row`; rows past the end reuse the last budget.
///
/// A budget of `0` (or an empty list) leaves the row unbounded. A negative
/// budget fits nothing, so every item gets a row of its own.
#[must_use]
pub fn row_budget(widths: &[f64], row: usize) -> f64 {
    widths
        .get(row)
        .or_else(|| widths.last())
        .copied()
        .unwrap_or(0.0)
}

impl SizeTree {
    /// Greedily split the direct children of `group` into rows.
    ///
    /// A new row starts when the next visible item, plus one indent, would
    /// push the current row past its budget, and right after any item marked
    /// `wrap`. Hidden items are skipped. An item wider than an empty row is
    /// still placed in it. The result may have more rows than `widths`.
    #[must_use]
    pub fn split(&self, group: GroupId, widths: &[f64]) -> Vec<Vec<ItemId>> {
        let g = &self.groups[group.index()];
        let mut rows: Vec<Vec<ItemId>> = vec![Vec::new()];
        let mut row_width = 0.0;

        for &child in &g.children {
            let size = &self.items[child.index()];
            if size.is_hidden() {
                continue;
            }
            let width = match size.group() {
                Some(nested) => self.width(nested),
                None => size.width(),
            };

            let budget = row_budget(widths, rows.len() - 1);
            let row_empty = rows.last().is_none_or(Vec::is_empty);
            let needed = if row_empty {
                width
            } else {
                row_width + g.indent_size + width
            };

            if budget != 0.0 && !row_empty && needed > budget {
                rows.push(vec![child]);
                row_width = width;
            } else if let Some(row) = rows.last_mut() {
                row.push(child);
                row_width = needed;
            }

            if size.is_wrap() {
                rows.push(Vec::new());
                row_width = 0.0;
            }
        }

        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }
        rows
    }

    /// Fit `group` into rows with the given budgets.
    ///
    /// Leaves are shrunk to their floors and split. If hiding is enabled and
    /// more rows than budgets come out, priority tiers are hidden (least
    /// important first) and the split repeated until the rows fit or no
    /// hideable tier is left. Each row becomes a fresh group with the same
    /// indent, expanded to fill its own budget.
    ///
    /// Row groups list the original items without adopting them: each item
    /// keeps its `parent_group`.
    pub fn rows(
        &mut self,
        group: GroupId,
        widths: &[f64],
        hide: bool,
        mut veto: Option<HideVeto<'_>>,
    ) -> Vec<GroupId> {
        if widths.is_empty() {
            return Vec::new();
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("rows", budgets = widths.len(), hide).entered();

        self.reset(group, None);
        self.minify(group, None);
        let mut split = self.split(group, widths);

        if hide && split.len() > widths.len() {
            for tier in hide_order(self.groups[group.index()].priorities()) {
                let veto = veto
                    .as_mut()
                    .map(|v| &mut **v as &mut dyn FnMut(&HideCandidate<'_>) -> bool);
                self.hide(group, tier, veto);
                split = self.split(group, widths);
                rowfit_core::debug!(tier, rows = split.len(), "tier hidden");
                if split.len() <= widths.len() {
                    break;
                }
            }
        }

        let indent_size = self.groups[group.index()].indent_size;
        split
            .into_iter()
            .enumerate()
            .map(|(i, items)| {
                let row = self.add_row(items, indent_size);
                let free = row_budget(widths, i) - self.width(row);
                self.expand(row, free);
                row
            })
            .collect()
    }

    /// Assign the group's indent after every visible child except the last
    /// visible one, which gets none.
    pub fn apply_indents(&mut self, group: GroupId) {
        let g = &self.groups[group.index()];
        let indent_size = g.indent_size;
        let visible: Vec<ItemId> = g
            .children
            .iter()
            .copied()
            .filter(|&id| !self.items[id.index()].is_hidden())
            .collect();

        if let Some((&last, rest)) = visible.split_last() {
            for &id in rest {
                self.items[id.index()].set_indent(indent_size);
            }
            self.items[last.index()].set_indent(0.0);
        }
    }

    fn add_row(&mut self, items: Vec<ItemId>, indent_size: f64) -> GroupId {
        let row = self.push_group(GroupSize::new(items, indent_size));
        self.refresh_derived(row);
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ComponentId, ItemSpec};

    fn fixed(tree: &mut SizeTree, id: u64, width: f64) -> ItemId {
        tree.add_leaf(ItemSpec::new(ComponentId(id), width))
    }

    #[test]
    fn split_breaks_on_budget() {
        let mut tree = SizeTree::new();
        let ids: Vec<ItemId> = (0..4).map(|i| fixed(&mut tree, i, 40.0)).collect();
        let root = tree.add_group(ids.clone(), 10.0);

        let rows = tree.split(root, &[100.0]);
        assert_eq!(rows, vec![ids[0..2].to_vec(), ids[2..4].to_vec()]);
    }

    #[test]
    fn split_uses_per_row_budgets() {
        let mut tree = SizeTree::new();
        let ids: Vec<ItemId> = (0..4).map(|i| fixed(&mut tree, i, 40.0)).collect();
        let root = tree.add_group(ids.clone(), 0.0);

        let rows = tree.split(root, &[40.0, 120.0]);
        assert_eq!(rows, vec![vec![ids[0]], ids[1..4].to_vec()]);
    }

    #[test]
    fn wrap_item_ends_its_row() {
        let mut tree = SizeTree::new();
        let a = fixed(&mut tree, 1, 10.0);
        let b = tree.add_leaf(ItemSpec::new(ComponentId(2), 10.0).wrap(true));
        let c = fixed(&mut tree, 3, 10.0);
        let root = tree.add_group(vec![a, b, c], 0.0);

        assert_eq!(tree.split(root, &[500.0]), vec![vec![a, b], vec![c]]);
    }

    #[test]
    fn trailing_wrap_adds_no_empty_row() {
        let mut tree = SizeTree::new();
        let a = tree.add_leaf(ItemSpec::new(ComponentId(1), 10.0).wrap(true));
        let root = tree.add_group(vec![a], 0.0);
        assert_eq!(tree.split(root, &[500.0]), vec![vec![a]]);
    }

    #[test]
    fn oversized_item_does_not_leave_empty_row() {
        let mut tree = SizeTree::new();
        let a = fixed(&mut tree, 1, 300.0);
        let b = fixed(&mut tree, 2, 10.0);
        let root = tree.add_group(vec![a, b], 0.0);
        assert_eq!(tree.split(root, &[100.0]), vec![vec![a], vec![b]]);
    }

    #[test]
    fn zero_budget_is_unbounded() {
        let mut tree = SizeTree::new();
        let ids: Vec<ItemId> = (0..5).map(|i| fixed(&mut tree, i, 100.0)).collect();
        let root = tree.add_group(ids.clone(), 4.0);
        assert_eq!(tree.split(root, &[0.0]), vec![ids]);
    }

    #[test]
    fn rows_expand_each_row_to_its_budget() {
        let mut tree = SizeTree::new();
        let ids: Vec<ItemId> = (0..3)
            .map(|i| tree.add_leaf(ItemSpec::new(ComponentId(i), 60.0).min_width(40.0).priority(0)))
            .collect();
        let root = tree.add_group(ids.clone(), 0.0);

        let rows = tree.rows(root, &[90.0, 50.0], false, None);
        assert_eq!(rows.len(), 2);
        assert_eq!(tree.group(rows[0]).tree_list(), &ids[0..2]);
        assert_eq!(tree.width(rows[0]), 90.0);
        assert_eq!(tree.item(ids[2]).width(), 50.0);
        assert_eq!(tree.item(ids[0]).parent_group(), Some(root));
    }

    #[test]
    fn rows_offer_each_hidden_tier_to_veto() {
        let mut tree = SizeTree::new();
        let ids: Vec<ItemId> = (0..4)
            .map(|i| {
                let spec = ItemSpec::new(ComponentId(i + 1), 40.0).min_width(40.0);
                tree.add_leaf(spec.priority(i as i32))
            })
            .collect();
        let root = tree.add_group(ids.clone(), 0.0);

        let mut offered = Vec::new();
        let mut veto = |candidate: &HideCandidate<'_>| {
            offered.push(candidate.component);
            true
        };
        let rows = tree.rows(root, &[90.0], true, Some(&mut veto));

        assert_eq!(offered, vec![ComponentId(4), ComponentId(3)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(tree.group(rows[0]).tree_list(), &ids[0..2]);
        assert!(tree.item(ids[2]).is_hidden());
        assert!(tree.item(ids[3]).is_hidden());
    }

    #[test]
    fn rows_without_budgets_is_empty() {
        let mut tree = SizeTree::new();
        let a = fixed(&mut tree, 1, 10.0);
        let root = tree.add_group(vec![a], 0.0);
        assert!(tree.rows(root, &[], true, None).is_empty());
    }

    #[test]
    fn indents_skip_last_visible_item() {
        let mut tree = SizeTree::new();
        let a = fixed(&mut tree, 1, 10.0);
        let b = fixed(&mut tree, 2, 10.0);
        let c = fixed(&mut tree, 3, 10.0);
        let root = tree.add_group(vec![a, b, c], 6.0);
        tree.item_mut(c).hide();

        tree.apply_indents(root);
        assert_eq!(tree.item(a).indent(), 6.0);
        assert_eq!(tree.item(b).indent(), 0.0);
    }

    #[test]
    fn negative_budget_puts_each_item_alone() {
        let mut tree = SizeTree::new();
        let a = fixed(&mut tree, 1, 10.0);
        let b = fixed(&mut tree, 2, 10.0);
        let root = tree.add_group(vec![a, b], 0.0);
        assert_eq!(tree.split(root, &[-5.0]), vec![vec![a], vec![b]]);
    }

    #[test]
    fn row_budget_reuses_last_entry() {
        assert_eq!(row_budget(&[10.0, 20.0], 5), 20.0);
        assert_eq!(row_budget(&[], 0), 0.0);
    }
}
