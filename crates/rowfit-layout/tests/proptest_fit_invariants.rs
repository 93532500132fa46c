//! Property-based invariant tests for the width model.
//!
//! 1. Size bounds: `0 <= min <= max` and `economy = max - min`.
//! 2. Reset is idempotent and restores the natural state.
//! 3. Compaction without hiding never hides and reports overflow.
//! 4. Compaction with hiding never hides the protected tiers.
//! 5. Expansion never pushes a width past its natural width.
//! 6. Stretch distributes `min(free, slack)` within rounding.
//! 7. Split never places a hidden item and a wrap item ends its row.
//! 8. Reset, minify, then a huge expansion restores natural widths.

use proptest::prelude::*;
use rowfit_layout::{ComponentId, GroupId, ItemId, ItemSpec, SizeTree};

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Leaf {
    max: f64,
    min: f64,
    priority: Option<i32>,
    wrap: bool,
}

fn leaf_strategy() -> impl Strategy<Value = Leaf> {
    (
        -20.0f64..300.0,
        0.0f64..200.0,
        prop::option::of(-2i32..4),
        prop::bool::weighted(0.15),
    )
        .prop_map(|(max, min, priority, wrap)| Leaf {
            max,
            min,
            priority,
            wrap,
        })
}

fn build(leaves: &[Leaf], indent: f64) -> (SizeTree, Vec<ItemId>, GroupId) {
    let mut tree = SizeTree::new();
    let items: Vec<ItemId> = leaves
        .iter()
        .enumerate()
        .map(|(i, leaf)| {
            tree.add_leaf(
                ItemSpec::new(ComponentId(i as u64), leaf.max)
                    .min_width(leaf.min)
                    .maybe_priority(leaf.priority)
                    .wrap(leaf.wrap),
            )
        })
        .collect();
    let root = tree.add_group(items.clone(), indent);
    (tree, items, root)
}

const EPS: f64 = 1e-6;

// ═════════════════════════════════════════════════════════════════════════
// 1. Size bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn size_bounds_hold(leaves in prop::collection::vec(leaf_strategy(), 1..12)) {
        let (tree, items, _) = build(&leaves, 0.0);
        for id in items {
            let size = tree.item(id);
            prop_assert!(size.min_width() >= 0.0);
            prop_assert!(size.min_width() <= size.max_width());
            prop_assert!((size.economy() - (size.max_width() - size.min_width())).abs() < EPS);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Reset is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reset_restores_natural_state(
        leaves in prop::collection::vec(leaf_strategy(), 1..12),
        budget in 0.0f64..800.0,
    ) {
        let (mut tree, items, root) = build(&leaves, 4.0);
        tree.compact(root, budget, true, None);
        tree.apply_indents(root);

        tree.reset(root, None);
        tree.reset(root, None);
        for id in items {
            let size = tree.item(id);
            prop_assert_eq!(size.width(), size.max_width());
            prop_assert!(!size.is_hidden());
            prop_assert_eq!(size.indent(), 0.0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Compaction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn compact_without_hiding_reports_overflow(
        leaves in prop::collection::vec(leaf_strategy(), 1..12),
        budget in 0.0f64..800.0,
    ) {
        let (mut tree, items, root) = build(&leaves, 3.0);
        tree.reset(root, None);
        tree.minify(root, None);
        let floor = tree.width(root);

        let width = tree.compact(root, budget, false, None);

        prop_assert!(items.iter().all(|&id| !tree.item(id).is_hidden()));
        if floor > budget {
            prop_assert!(width > budget);
        } else {
            prop_assert!(width <= budget + EPS);
        }
    }

    #[test]
    fn compact_never_hides_protected_tiers(
        leaves in prop::collection::vec(leaf_strategy(), 1..12),
        budget in 0.0f64..400.0,
    ) {
        let (mut tree, items, root) = build(&leaves, 0.0);
        let most_important = tree.group(root).priorities().first().copied();

        tree.compact(root, budget, true, None);

        for id in items {
            let size = tree.item(id);
            if size.priority() <= 0 || Some(size.priority()) == most_important {
                prop_assert!(!size.is_hidden(), "tier {} was hidden", size.priority());
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-6. Expansion and stretch
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn expand_respects_natural_width(
        leaves in prop::collection::vec(leaf_strategy(), 1..12),
        free in 0.0f64..1000.0,
    ) {
        let (mut tree, items, root) = build(&leaves, 0.0);
        tree.minify(root, None);
        tree.expand(root, free);
        for id in items {
            let size = tree.item(id);
            prop_assert!(size.width() <= size.max_width() + EPS);
            prop_assert!(size.width() >= size.min_width() - EPS);
        }
    }

    #[test]
    fn stretch_distributes_up_to_slack(
        leaves in prop::collection::vec(leaf_strategy(), 1..12),
        free in 0.0f64..500.0,
    ) {
        let leaves: Vec<Leaf> = leaves
            .into_iter()
            .map(|leaf| Leaf { priority: Some(0), ..leaf })
            .collect();
        let (mut tree, items, root) = build(&leaves, 0.0);
        tree.minify(root, None);
        let before = tree.width(root);
        let slack: f64 = items.iter().map(|&id| tree.item(id).slack()).sum();

        tree.stretch(root, 0, free);

        let gained = tree.width(root) - before;
        if free / items.len() as f64 >= rowfit_layout::MIN_STRETCH_SHARE {
            prop_assert!((gained - free.min(slack)).abs() < 1e-3, "gained {gained}, free {free}, slack {slack}");
        } else {
            prop_assert_eq!(gained, 0.0);
        }
        for id in items {
            let size = tree.item(id);
            prop_assert!(size.width() <= size.max_width() + EPS);
        }
    }

    #[test]
    fn huge_expansion_restores_natural_widths(
        leaves in prop::collection::vec(leaf_strategy(), 1..12),
    ) {
        let (mut tree, items, root) = build(&leaves, 0.0);
        tree.reset(root, None);
        tree.minify(root, None);
        tree.expand(root, 1.0e12);
        for id in items {
            let size = tree.item(id);
            prop_assert!((size.width() - size.max_width()).abs() < EPS);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Split
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn split_skips_hidden_and_ends_rows_on_wrap(
        leaves in prop::collection::vec(leaf_strategy(), 1..16),
        hidden in prop::collection::vec(any::<bool>(), 16),
        budgets in prop::collection::vec(0.0f64..400.0, 1..4),
    ) {
        let (mut tree, items, root) = build(&leaves, 2.0);
        for (&id, &hide) in items.iter().zip(&hidden) {
            if hide {
                tree.item_mut(id).hide();
            }
        }

        let rows = tree.split(root, &budgets);
        let placed: usize = rows.iter().map(Vec::len).sum();
        prop_assert_eq!(placed, tree.count_visible(root, None));

        for row in &rows {
            prop_assert!(!row.is_empty());
            for (i, &id) in row.iter().enumerate() {
                let size = tree.item(id);
                prop_assert!(!size.is_hidden());
                if size.is_wrap() {
                    prop_assert_eq!(i, row.len() - 1);
                }
            }
        }
    }
}
