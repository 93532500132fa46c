#![forbid(unsafe_code)]

//! Shrink-to-fit: compaction, priority hiding, expansion and stretch.
//!
//! A compaction pass runs in three stages:
//!
//! 1. Reset the subtree and shrink every shrinkable leaf to its floor.
//! 2. While the group still overflows and hiding is allowed, hide whole
//!    priority tiers, least important first ([`hide_order`]).
//! 3. Hand any room left over back to shrunk leaves, most important tier
//!    first ([`plan_expansion`]).

use crate::group::GroupId;
use crate::item::{ComponentId, ItemId};
use crate::tiers::{TierGrant, expand_order, hide_order, plan_expansion};
use crate::tree::SizeTree;

/// Below this per-item share, stretching is skipped as sub-pixel noise.
pub const MIN_STRETCH_SHARE: f64 = 0.5;

/// An item about to be hidden, offered to the veto callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HideCandidate<'a> {
    /// Size record about to be hidden.
    pub item: ItemId,
    /// Widget behind the size.
    pub component: ComponentId,
    /// Components of the group-wrapping items between the group being
    /// fitted and the candidate, outermost first. Empty for direct children.
    pub lineage: &'a [ComponentId],
}

/// Callback deciding whether a candidate may be hidden.
///
/// Returning `false` keeps the item visible. Container renderers use this to
/// collapse a nested group instead of dropping its children.
pub type HideVeto<'v> = &'v mut dyn FnMut(&HideCandidate<'_>) -> bool;

impl SizeTree {
    /// Hide every leaf of `tier` in `group`, in tree order.
    ///
    /// A nested group whose leaves are all hidden is hidden as well. The
    /// veto, when given, is consulted for every item before it is hidden.
    pub fn hide(&mut self, group: GroupId, tier: i32, veto: Option<HideVeto<'_>>) {
        let mut allow_all = |_: &HideCandidate<'_>| true;
        let veto: HideVeto<'_> = match veto {
            Some(veto) => veto,
            None => &mut allow_all,
        };
        let mut lineage = Vec::new();
        self.hide_in(group, tier, veto, &mut lineage);
    }

    fn hide_in(
        &mut self,
        group: GroupId,
        tier: i32,
        veto: &mut dyn FnMut(&HideCandidate<'_>) -> bool,
        lineage: &mut Vec<ComponentId>,
    ) {
        for child in self.groups[group.index()].children.clone() {
            let size = &self.items[child.index()];
            if size.is_hidden() {
                continue;
            }
            let component = size.component();

            let candidate = match size.group() {
                Some(nested) => {
                    lineage.push(component);
                    self.hide_in(nested, tier, veto, lineage);
                    lineage.pop();
                    self.count_visible(nested, None) == 0
                }
                None => size.priority() == tier,
            };

            if candidate
                && veto(&HideCandidate {
                    item: child,
                    component,
                    lineage: lineage.as_slice(),
                })
            {
                self.items[child.index()].hide();
                rowfit_core::trace!(component = component.get(), tier, "item hidden");
            }
        }
    }

    /// Fit `group` into `max_width` and return the resulting width.
    ///
    /// With `hide` disabled nothing is ever hidden, so a returned width
    /// above `max_width` reports the overflow. With `hide` enabled, tiers
    /// are hidden until the group fits or no hideable tier is left.
    pub fn compact(
        &mut self,
        group: GroupId,
        max_width: f64,
        hide: bool,
        mut veto: Option<HideVeto<'_>>,
    ) -> f64 {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("compact", max_width, hide).entered();

        self.reset(group, None);
        self.minify(group, None);
        let mut overflow = self.width(group) - max_width;

        if overflow > 0.0 && hide {
            for tier in hide_order(self.groups[group.index()].priorities()) {
                let veto = veto
                    .as_mut()
                    .map(|v| &mut **v as &mut dyn FnMut(&HideCandidate<'_>) -> bool);
                self.hide(group, tier, veto);
                overflow = self.width(group) - max_width;
                rowfit_core::debug!(tier, overflow, "tier hidden");
                if overflow <= 0.0 {
                    break;
                }
            }
        }

        if overflow < 0.0 {
            self.expand(group, -overflow);
        }

        let width = self.width(group);
        rowfit_core::debug!(width, max_width, "compact done");
        width
    }

    /// Return up to `free_space` pixels to shrunk leaves.
    ///
    /// Tiers are served most important first; a tier whose slack exceeds
    /// the remaining space is stretched and ends the pass. Widths never
    /// exceed the natural width and hidden items stay hidden.
    pub fn expand(&mut self, group: GroupId, free_space: f64) {
        let tiers: Vec<(i32, f64)> = expand_order(self.groups[group.index()].priorities())
            .into_iter()
            .map(|tier| (tier, self.tier_slack(group, tier)))
            .collect();

        for grant in plan_expansion(tiers, free_space) {
            match grant {
                TierGrant::Restore { tier, .. } => self.restore_tier(group, tier),
                TierGrant::Stretch { tier, space } => self.stretch(group, tier, space),
            }
        }
    }

    /// Spread `free_space` evenly over the visible leaves of one tier.
    ///
    /// Leaves with the least slack are served first: a leaf whose slack fits
    /// in the current share is restored in full and the remainder is shared
    /// among the rest. Nothing happens when the first share is below
    /// [`MIN_STRETCH_SHARE`].
    pub fn stretch(&mut self, group: GroupId, tier: i32, free_space: f64) {
        let mut leaves = self.visible_flat_sizes(group, Some(tier));
        let count = leaves.len();
        if count == 0 {
            return;
        }

        let mut free = free_space;
        let mut share = free / count as f64;
        if share.is_nan() || share < MIN_STRETCH_SHARE {
            return;
        }

        leaves.sort_by(|a, b| {
            self.items[a.index()]
                .slack()
                .total_cmp(&self.items[b.index()].slack())
        });

        for (i, id) in leaves.into_iter().enumerate() {
            let size = &mut self.items[id.index()];
            let slack = size.slack();
            if slack <= share {
                size.set_width(size.max_width());
                free -= slack;
                let remaining = count - i - 1;
                if remaining > 0 {
                    share = free / remaining as f64;
                }
            } else {
                size.set_width(size.width() + share);
                free -= share;
            }
        }
    }
}
