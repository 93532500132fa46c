#![forbid(unsafe_code)]

//! Per-widget sizing record.

use crate::group::GroupId;

/// Priority assigned to items that must never shrink or hide individually.
pub const NEVER_HIDE: i32 = -1;

/// Opaque handle to the widget an [`ItemSize`] describes.
///
/// The layout engine never dereferences it; hosts use it to route results
/// back to their widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ComponentId(pub u64);

impl ComponentId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Index of an [`ItemSize`] inside a [`SizeTree`](crate::SizeTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Measured inputs for a new [`ItemSize`].
///
/// # Example
///
/// ```
/// use rowfit_layout::{ComponentId, ItemSpec};
///
/// let spec = ItemSpec::new(ComponentId(7), 120.0)
///     .min_width(48.0)
///     .priority(2)
///     .wrap(true);
/// assert_eq!(spec.max_width, 120.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSpec {
    /// Widget the size belongs to.
    pub component: ComponentId,
    /// Natural (measured) width.
    pub max_width: f64,
    /// Configured floor for shrinkable items.
    pub min_width: f64,
    /// Shrink/hide tier; `None` behaves like [`NEVER_HIDE`].
    pub priority: Option<i32>,
    /// Force a row break after this item.
    pub wrap: bool,
}

impl ItemSpec {
    /// Spec with the given natural width and no shrink tier.
    pub const fn new(component: ComponentId, max_width: f64) -> Self {
        Self {
            component,
            max_width,
            min_width: 0.0,
            priority: None,
            wrap: false,
        }
    }

    /// Set the width floor used when the item is shrinkable.
    #[must_use]
    pub const fn min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width;
        self
    }

    /// Set the shrink/hide tier.
    #[must_use]
    pub const fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set an optional shrink/hide tier.
    #[must_use]
    pub const fn maybe_priority(mut self, priority: Option<i32>) -> Self {
        self.priority = priority;
        self
    }

    /// Mark the item as the last one of its row.
    #[must_use]
    pub const fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }
}

/// Sizing contract of one widget or nested group for a single layout pass.
///
/// Invariants, established at construction:
///
/// - `0 <= min_width <= max_width`
/// - `economy == max_width - min_width`
/// - `width` starts at `max_width`; compaction keeps it inside
///   `[min_width, max_width]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSize {
    component: ComponentId,
    max_width: f64,
    min_width: f64,
    economy: f64,
    priority: i32,
    width: f64,
    indent: f64,
    wrap: bool,
    hidden: bool,
    pub(crate) group: Option<GroupId>,
    pub(crate) parent_group: Option<GroupId>,
}

impl ItemSize {
    /// Build a leaf size from measured inputs.
    ///
    /// Negative or non-finite widths clamp to zero, negative priorities
    /// normalize to [`NEVER_HIDE`] and a natural width below the configured
    /// floor is raised to the floor. Items without a non-negative priority
    /// cannot shrink, so their floor equals their natural width.
    pub fn leaf(spec: ItemSpec) -> Self {
        let (max_width, floor) = clamp_bounds(spec.max_width, spec.min_width);
        let priority = normalize_priority(spec.priority);
        let min_width = if priority >= 0 { floor } else { max_width };
        Self::with_bounds(spec, priority, max_width, min_width)
    }

    /// Build a size for an item wrapping a nested group whose flattened
    /// leaves can give up `group_economy` pixels.
    pub(crate) fn wrapping(spec: ItemSpec, group: GroupId, group_economy: f64) -> Self {
        let (max_width, _) = clamp_bounds(spec.max_width, spec.min_width);
        let min_width = (max_width - group_economy.max(0.0)).max(0.0);
        let mut size = Self::with_bounds(
            spec,
            normalize_priority(spec.priority),
            max_width,
            min_width,
        );
        size.group = Some(group);
        size
    }

    fn with_bounds(spec: ItemSpec, priority: i32, max_width: f64, min_width: f64) -> Self {
        Self {
            component: spec.component,
            max_width,
            min_width,
            economy: max_width - min_width,
            priority,
            width: max_width,
            indent: 0.0,
            wrap: spec.wrap,
            hidden: false,
            group: None,
            parent_group: None,
        }
    }

    /// Re-derive bounds for a group-wrapping item after its group changed.
    pub(crate) fn remeasure(&mut self, max_width: f64, group_economy: f64) {
        let (max_width, _) = clamp_bounds(max_width, 0.0);
        self.max_width = max_width;
        self.min_width = (max_width - group_economy.max(0.0)).max(0.0);
        self.economy = self.max_width - self.min_width;
        self.width = max_width;
    }

    /// Widget this size describes.
    #[must_use]
    pub const fn component(&self) -> ComponentId {
        self.component
    }

    /// Natural width.
    #[must_use]
    pub const fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Smallest width the item may shrink to.
    #[must_use]
    pub const fn min_width(&self) -> f64 {
        self.min_width
    }

    /// Shrinkable slack: `max_width - min_width`.
    #[must_use]
    pub const fn economy(&self) -> f64 {
        self.economy
    }

    /// Slack still available from the current working width.
    #[must_use]
    pub fn slack(&self) -> f64 {
        (self.max_width - self.width).max(0.0)
    }

    /// Normalized priority; [`NEVER_HIDE`] for items without a tier.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether the item shrinks down to its floor when minified.
    #[must_use]
    pub const fn is_shrinkable(&self) -> bool {
        self.priority >= 0 && self.group.is_none()
    }

    /// Current working width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Overwrite the working width.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// Gap to apply after this item.
    #[must_use]
    pub const fn indent(&self) -> f64 {
        self.indent
    }

    /// Set the gap applied after this item.
    pub fn set_indent(&mut self, indent: f64) {
        self.indent = indent;
    }

    /// Whether a row break follows this item.
    #[must_use]
    pub const fn is_wrap(&self) -> bool {
        self.wrap
    }

    /// Hide the item for the rest of the pass.
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Whether the item was hidden during this pass.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Restore the natural width, visibility and zero indent.
    pub fn reset(&mut self) {
        self.width = self.max_width;
        self.hidden = false;
        self.indent = 0.0;
    }

    /// Shrink to the floor.
    pub fn minify(&mut self) {
        self.width = self.min_width;
    }

    /// Nested group owned by this item, if any.
    #[must_use]
    pub const fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Group this item belongs to.
    #[must_use]
    pub const fn parent_group(&self) -> Option<GroupId> {
        self.parent_group
    }

    /// Re-home the item. Only the owning tree links items to groups.
    pub(crate) fn set_parent_group(&mut self, group: Option<GroupId>) {
        self.parent_group = group;
    }
}

fn clamp_bounds(max_width: f64, min_width: f64) -> (f64, f64) {
    let floor = sanitize(min_width);
    let max_width = sanitize(max_width).max(floor);
    (max_width, floor)
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn normalize_priority(priority: Option<i32>) -> i32 {
    match priority {
        Some(p) if p >= 0 => p,
        _ => NEVER_HIDE,
    }
}
