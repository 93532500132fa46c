#![forbid(unsafe_code)]

//! Priority tier planning.
//!
//! Priorities are small integers; a lower value means a more important
//! item. Tiers are processed in a fixed order:
//!
//! - **Hiding** walks tiers from least to most important. The most important
//!   tier present, and every tier `<= 0`, is never hidden.
//! - **Expansion** hands space back from most to least important, skipping
//!   the negative "never shrink" tier.
//!
//! The functions here are pure: they map a tier list (and, for expansion,
//! the per-tier slack) to the sequence of steps the tree then applies.

/// Distinct priorities, sorted ascending.
pub fn collect_priorities(priorities: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut list: Vec<i32> = priorities.into_iter().collect();
    list.sort_unstable();
    list.dedup();
    list
}

/// Tiers eligible for hiding, least important first.
///
/// ```
/// use rowfit_layout::tiers::hide_order;
///
/// assert_eq!(hide_order(&[-1, 0, 1, 3]), vec![3, 1]);
/// assert_eq!(hide_order(&[1, 2]), vec![2]);
/// assert!(hide_order(&[0]).is_empty());
/// ```
#[must_use]
pub fn hide_order(priorities: &[i32]) -> Vec<i32> {
    priorities
        .iter()
        .skip(1)
        .rev()
        .copied()
        .filter(|&tier| tier > 0)
        .collect()
}

/// Tiers eligible for expansion, most important first.
#[must_use]
pub fn expand_order(priorities: &[i32]) -> Vec<i32> {
    priorities.iter().copied().filter(|&tier| tier >= 0).collect()
}

/// One step of an expansion plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierGrant {
    /// Give the whole tier its natural width back.
    Restore {
        /// Tier being restored.
        tier: i32,
        /// Space the restore consumes.
        economy: f64,
    },
    /// Spread `space` across the tier without fully restoring it.
    Stretch {
        /// Tier being stretched.
        tier: i32,
        /// Space to distribute.
        space: f64,
    },
}

/// Plan how `free_space` flows back into shrunk tiers.
///
/// `tiers` yields `(tier, economy)` pairs in expansion order. Tiers are
/// restored whole while the space lasts; the first tier that needs more
/// than what is left is stretched and ends the plan.
///
/// ```
/// use rowfit_layout::tiers::{TierGrant, plan_expansion};
///
/// let plan = plan_expansion([(0, 30.0), (1, 50.0)], 50.0);
/// assert_eq!(
///     plan,
///     vec![
///         TierGrant::Restore { tier: 0, economy: 30.0 },
///         TierGrant::Stretch { tier: 1, space: 20.0 },
///     ]
/// );
/// ```
pub fn plan_expansion(
    tiers: impl IntoIterator<Item = (i32, f64)>,
    free_space: f64,
) -> Vec<TierGrant> {
    let mut plan = Vec::new();
    if free_space.is_nan() || free_space <= 0.0 {
        return plan;
    }

    let mut free = free_space;
    for (tier, economy) in tiers {
        if tier < 0 {
            continue;
        }
        if economy > free {
            plan.push(TierGrant::Stretch { tier, space: free });
            break;
        }
        if economy > 0.0 {
            plan.push(TierGrant::Restore { tier, economy });
            free -= economy;
        }
    }
    plan
}
