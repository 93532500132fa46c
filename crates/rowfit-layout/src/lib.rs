#![forbid(unsafe_code)]

//! Width model for responsive containers.
//!
//! Every container-like widget (flat groups, toolbars, overflow menus)
//! describes its children to this crate as sizes and gets back widths,
//! indents and a visibility flag per child:
//!
//! - [`ItemSize`] - one child: natural width, floor, priority, wrap flag
//! - [`GroupSize`] - ordered children of one container, possibly nested
//! - [`SizeTree`] - arena owning both, with the fitting algorithms
//! - [`tiers`] - how priority tiers are hidden and handed space back
//!
//! # Fitting
//!
//! ```
//! use rowfit_layout::{ComponentId, ItemSpec, SizeTree};
//!
//! let mut tree = SizeTree::new();
//! let items: Vec<_> = [100.0, 80.0, 60.0]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, w)| tree.add_leaf(ItemSpec::new(ComponentId(i as u64), w).min_width(40.0).priority(0)))
//!     .collect();
//! let root = tree.add_group(items, 0.0);
//!
//! let width = tree.compact(root, 180.0, false, None);
//! assert_eq!(width, 180.0);
//! assert_eq!(tree.item(tree.group(root).tree_list()[2]).width(), 60.0);
//! ```
//!
//! Priorities: a lower value is more important. `-1` ([`NEVER_HIDE`]) is
//! never shrunk or hidden; the most important tier present is never hidden.

mod fit;
mod group;
mod item;
mod rows;
pub mod tiers;
mod tree;

pub use fit::{HideCandidate, HideVeto, MIN_STRETCH_SHARE};
pub use group::{GroupId, GroupSize};
pub use item::{ComponentId, ItemId, ItemSize, ItemSpec, NEVER_HIDE};
pub use rows::row_budget;
pub use tree::SizeTree;
