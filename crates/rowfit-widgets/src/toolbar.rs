#![forbid(unsafe_code)]

//! Responsive toolbar.
//!
//! A toolbar owns a list of [`ToolbarItem`]s and, on every resize, fits them
//! into the space the host reports:
//!
//! - **Flat** (`no_wrap` or a single row): one row. Items shrink, then
//!   top-level groups collapse into buttons, then whole priority tiers are
//!   hidden. With horizontal scrolling nothing is hidden and the overflow
//!   is reported instead.
//! - **Dropdown**: a main row next to a "more" button plus popup rows. The
//!   same shrink, collapse and hide steps run against the row budgets. With
//!   vertical scrolling nothing is hidden and the popup scrolls.
//!
//! Resizes go through a [`ResizeThrottle`], so bursts of resize events
//! produce one layout pass per interval.

use std::collections::HashSet;
use std::time::Instant;

use rowfit_core::{ResizeAction, ResizeThrottle, ThrottleConfig};
use rowfit_layout::{ComponentId, GroupId, HideCandidate, SizeTree};

use crate::config::{ScrollOrientation, ToolbarConfig, ToolbarConfigError, ToolbarMetrics};
use crate::group::{DisplayMode, GroupRenderer, ToolbarItem};
use crate::renderer::{RendererKind, SizeRenderer, apply_sizes, create_sizes};

/// Strategy picked from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarRenderer {
    /// One row; items shrink and hide to fit.
    Flat,
    /// A main row plus popup rows behind a "more" button.
    Dropdown,
}

/// Outcome of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarLayout {
    Flat {
        /// Visible top-level items, in order.
        row: Vec<ComponentId>,
        /// Width used by the row.
        width: f64,
        /// How far the row exceeds the content width.
        overflow: f64,
    },
    Dropdown {
        /// Top-level items in the main row.
        main: Vec<ComponentId>,
        /// Top-level items of every popup row.
        popup: Vec<Vec<ComponentId>>,
        /// Popup rows shown (or, when scrolling, in view) at once.
        visible_popup_rows: usize,
        /// Whether the "more" button is shown.
        more_visible: bool,
    },
}

impl ToolbarLayout {
    /// Items in the first row.
    pub fn main_row(&self) -> &[ComponentId] {
        match self {
            Self::Flat { row, .. } => row,
            Self::Dropdown { main, .. } => main,
        }
    }

    /// Number of rows, main row included.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Flat { row, .. } => usize::from(!row.is_empty()),
            Self::Dropdown { main, popup, .. } => usize::from(!main.is_empty()) + popup.len(),
        }
    }
}

/// A responsive toolbar.
#[derive(Debug, Clone)]
pub struct Toolbar {
    config: ToolbarConfig,
    items: Vec<ToolbarItem>,
    throttle: ResizeThrottle,
    metrics: Option<ToolbarMetrics>,
    opened: bool,
    last_layout: Option<ToolbarLayout>,
}

impl Toolbar {
    /// Create an empty toolbar from a validated configuration.
    pub fn new(config: ToolbarConfig) -> Result<Self, ToolbarConfigError> {
        Ok(Self {
            config: config.validate()?,
            items: Vec::new(),
            throttle: ResizeThrottle::default(),
            metrics: None,
            opened: false,
            last_layout: None,
        })
    }

    /// Use a custom resize throttle interval.
    #[must_use]
    pub fn with_throttle(mut self, config: ThrottleConfig) -> Self {
        self.throttle = ResizeThrottle::new(config);
        self
    }

    /// Append an item. Ids must be unique across the whole toolbar.
    pub fn push(&mut self, item: impl Into<ToolbarItem>) -> Result<(), ToolbarConfigError> {
        let item = item.into();
        let mut seen = HashSet::new();
        for existing in &self.items {
            collect_ids(existing, &mut seen);
        }
        check_unique(&item, &mut seen)?;
        self.items.push(item);
        Ok(())
    }

    /// Validated configuration.
    pub const fn config(&self) -> &ToolbarConfig {
        &self.config
    }

    /// Top-level items.
    pub fn items(&self) -> &[ToolbarItem] {
        &self.items
    }

    /// Top-level items, mutably. Call [`relayout`](Self::relayout) after changes.
    pub fn items_mut(&mut self) -> &mut [ToolbarItem] {
        &mut self.items
    }

    /// Item with `id` anywhere in the toolbar.
    pub fn find(&self, id: ComponentId) -> Option<&ToolbarItem> {
        self.items.iter().find_map(|item| item.find(id))
    }

    /// Item with `id` anywhere in the toolbar, mutably.
    pub fn find_mut(&mut self, id: ComponentId) -> Option<&mut ToolbarItem> {
        self.items.iter_mut().find_map(|item| item.find_mut(id))
    }

    /// Layout strategy for the current configuration.
    #[must_use]
    pub const fn renderer(&self) -> ToolbarRenderer {
        if self.config.is_single_row() {
            ToolbarRenderer::Flat
        } else {
            ToolbarRenderer::Dropdown
        }
    }

    /// Result of the most recent layout pass.
    pub fn last_layout(&self) -> Option<&ToolbarLayout> {
        self.last_layout.as_ref()
    }

    /// Whether the overflow popup is open.
    pub const fn is_opened(&self) -> bool {
        self.opened
    }

    /// Open or close the overflow popup. It only opens while the "more"
    /// button is shown.
    pub fn set_opened(&mut self, opened: bool) -> bool {
        let can_open = matches!(
            self.last_layout,
            Some(ToolbarLayout::Dropdown {
                more_visible: true,
                ..
            })
        );
        self.opened = opened && can_open;
        self.opened == opened
    }

    // ------------------------------------------------------------------
    // Resizing
    // ------------------------------------------------------------------

    /// Report new geometry. Lays out immediately unless throttled.
    pub fn handle_resize(&mut self, metrics: ToolbarMetrics, now: Instant) -> Option<ToolbarLayout> {
        self.metrics = Some(metrics);
        match self.throttle.handle_resize(metrics.content_width, now) {
            ResizeAction::Apply(_) => self.relayout(),
            ResizeAction::Hold => None,
        }
    }

    /// Run the layout deferred by the throttle, if it is due.
    pub fn tick(&mut self, now: Instant) -> Option<ToolbarLayout> {
        match self.throttle.tick(now) {
            ResizeAction::Apply(_) => self.relayout(),
            ResizeAction::Hold => None,
        }
    }

    /// Lay out again with the last reported geometry, e.g. after items
    /// changed.
    pub fn relayout(&mut self) -> Option<ToolbarLayout> {
        let metrics = self.metrics?;
        Some(self.layout(&metrics))
    }

    /// Fit the items into `metrics` and apply the result to every item.
    pub fn layout(&mut self, metrics: &ToolbarMetrics) -> ToolbarLayout {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "toolbar_layout",
            width = metrics.content_width,
            rows = self.config.row_count,
            items = self.items.len()
        )
        .entered();

        self.metrics = Some(*metrics);
        self.reset_group_renderers();
        self.reset_styles();

        let layout = match self.renderer() {
            ToolbarRenderer::Flat => self.layout_flat(metrics),
            ToolbarRenderer::Dropdown => self.layout_dropdown(metrics),
        };

        if !matches!(
            layout,
            ToolbarLayout::Dropdown {
                more_visible: true,
                ..
            }
        ) {
            self.opened = false;
        }
        self.last_layout = Some(layout.clone());
        layout
    }

    fn layout_flat(&mut self, metrics: &ToolbarMetrics) -> ToolbarLayout {
        let max_width = metrics.content_width;
        let (mut tree, mut root) = self.build_tree();

        let width = if self.config.scroll == ScrollOrientation::Horizontal {
            tree.compact(root, max_width, false, None)
        } else {
            let collapsible = self.collapsible_groups();
            let mut pending = Vec::new();
            let mut collect = |c: &HideCandidate<'_>| redirect_to_group(c, &collapsible, &mut pending);
            let mut width = tree.compact(root, max_width, true, Some(&mut collect));

            for &group in &pending {
                self.collapse_group(group);
                (tree, root) = self.build_tree();
                let mut protect = |c: &HideCandidate<'_>| outside_groups(c, &pending);
                width = tree.compact(root, max_width, true, Some(&mut protect));
                if width <= max_width {
                    break;
                }
            }
            width
        };

        self.apply_rows(&mut tree, &[root]);
        ToolbarLayout::Flat {
            row: visible_components(&tree, root),
            width,
            overflow: (width - max_width).max(0.0),
        }
    }

    fn layout_dropdown(&mut self, metrics: &ToolbarMetrics) -> ToolbarLayout {
        let row_count = self.config.row_count;
        let main_width = metrics.content_width;
        let mut popup_width = metrics.popup_content_width;
        let mut widths = vec![popup_width; row_count];
        widths[0] = main_width - metrics.more_button_width - self.config.indent;

        let (mut tree, mut root) = self.build_tree();
        let scroll = self.config.scroll == ScrollOrientation::Vertical;

        let rows = if scroll {
            let mut rows = tree.rows(root, &widths, false, None);
            if rows.len() == 1 {
                widths[0] = main_width;
                rows = tree.rows(root, &widths, false, None);
            } else if rows.len() > widths.len() {
                popup_width -= metrics.scrollbar_width;
                widths.iter_mut().skip(1).for_each(|w| *w = popup_width);
                rows = tree.rows(root, &widths, false, None);
            }
            rows
        } else {
            let collapsible = self.collapsible_groups();
            let mut pending = Vec::new();
            let mut collect = |c: &HideCandidate<'_>| redirect_to_group(c, &collapsible, &mut pending);
            let mut rows = tree.rows(root, &widths, true, Some(&mut collect));

            let mut protect = |c: &HideCandidate<'_>| outside_groups(c, &pending);
            for &group in &pending {
                self.collapse_group(group);
                (tree, root) = self.build_tree();
                rows = tree.rows(root, &widths, true, Some(&mut protect));
                if rows.len() <= row_count {
                    break;
                }
            }

            if rows.len() == 1 {
                widths[0] = main_width;
                rows = tree.rows(root, &widths, true, Some(&mut protect));
            }
            rows
        };

        self.apply_rows(&mut tree, &rows);
        self.apply_hidden(&mut tree, root);

        if !scroll {
            for &row in rows.iter().skip(row_count) {
                for component in visible_components(&tree, row) {
                    if let Some(item) = self.find_mut(component) {
                        hide_item(item);
                    }
                }
            }
        }

        let shown = if scroll { rows.len() } else { rows.len().min(row_count) };
        let mut components = rows[..shown].iter().map(|&row| visible_components(&tree, row));
        let main = components.next().unwrap_or_default();
        let popup: Vec<Vec<ComponentId>> = components.collect();
        rowfit_core::debug!(rows = rows.len(), popup = popup.len(), "dropdown rows");

        ToolbarLayout::Dropdown {
            visible_popup_rows: popup.len().min(row_count - 1),
            more_visible: !popup.is_empty(),
            main,
            popup,
        }
    }

    // ------------------------------------------------------------------
    // Tree building and applying
    // ------------------------------------------------------------------

    fn build_tree(&self) -> (SizeTree, GroupId) {
        let options = self.config.measure_options();
        let mut tree = SizeTree::with_capacity(self.items.len() * 2, 4);
        let sizes = create_sizes(&self.items, &mut tree, &options);
        let root = tree.add_group(sizes, options.indent);
        (tree, root)
    }

    fn reset_styles(&mut self) {
        let options = self.config.measure_options();
        for item in &mut self.items {
            RendererKind::of(item).reset_styles(item, &options);
        }
    }

    /// Top-level groups in auto mode start every pass laid out flat.
    fn reset_group_renderers(&mut self) {
        for group in self.items.iter_mut().filter_map(ToolbarItem::as_group_mut) {
            if group.mode() == DisplayMode::Auto {
                group.change_renderer(GroupRenderer::Flat);
            }
        }
    }

    fn collapsible_groups(&self) -> Vec<ComponentId> {
        self.items
            .iter()
            .filter_map(ToolbarItem::as_group)
            .filter(|g| g.mode() == DisplayMode::Auto && g.renderer() == GroupRenderer::Flat)
            .map(|g| g.id())
            .collect()
    }

    fn collapse_group(&mut self, id: ComponentId) {
        let group = self
            .items
            .iter_mut()
            .filter_map(ToolbarItem::as_group_mut)
            .find(|g| g.id() == id);
        if let Some(group) = group {
            rowfit_core::debug!(group = id.get(), "collapsing group");
            group.change_renderer(GroupRenderer::Expandable);
        }
    }

    fn apply_rows(&mut self, tree: &mut SizeTree, rows: &[GroupId]) {
        for &row in rows {
            tree.apply_indents(row);
            apply_sizes(&mut self.items, tree, row);
        }
    }

    /// Rows list visible items only; hidden ones are applied from the root.
    fn apply_hidden(&mut self, tree: &mut SizeTree, root: GroupId) {
        let hidden: Vec<_> = tree
            .group(root)
            .tree_list()
            .iter()
            .copied()
            .filter(|&id| tree.item(id).is_hidden())
            .collect();
        for size in hidden {
            let component = tree.item(size).component();
            if let Some(item) = self.items.iter_mut().find(|item| item.id() == component) {
                RendererKind::of(item).apply_size(item, tree, size);
            }
        }
    }
}

/// Veto for the first pass: hiding an item inside a collapsible top-level
/// group records that group for collapsing instead.
fn redirect_to_group(
    candidate: &HideCandidate<'_>,
    collapsible: &[ComponentId],
    pending: &mut Vec<ComponentId>,
) -> bool {
    match candidate.lineage.first() {
        Some(owner) if collapsible.contains(owner) => {
            if !pending.contains(owner) {
                pending.push(*owner);
            }
            false
        }
        _ => true,
    }
}

/// Veto for later passes: items of groups awaiting collapse stay.
fn outside_groups(candidate: &HideCandidate<'_>, pending: &[ComponentId]) -> bool {
    candidate
        .lineage
        .first()
        .is_none_or(|owner| !pending.contains(owner))
}

fn visible_components(tree: &SizeTree, group: GroupId) -> Vec<ComponentId> {
    tree.group(group)
        .tree_list()
        .iter()
        .map(|&id| tree.item(id))
        .filter(|size| !size.is_hidden())
        .map(|size| size.component())
        .collect()
}

fn hide_item(item: &mut ToolbarItem) {
    match item {
        ToolbarItem::Control(control) => control.layout.hidden = true,
        ToolbarItem::Group(group) => group.hide_cascade(),
    }
}

fn collect_ids(item: &ToolbarItem, ids: &mut HashSet<ComponentId>) {
    ids.insert(item.id());
    if let Some(group) = item.as_group() {
        for child in group.items() {
            collect_ids(child, ids);
        }
    }
}

fn check_unique(
    item: &ToolbarItem,
    seen: &mut HashSet<ComponentId>,
) -> Result<(), ToolbarConfigError> {
    if !seen.insert(item.id()) {
        return Err(ToolbarConfigError::DuplicateId(item.id()));
    }
    if let Some(group) = item.as_group() {
        for child in group.items() {
            check_unique(child, seen)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Control, ControlKind};
    use crate::group::Group;
    use std::time::Duration;

    fn button(id: u64, width: f64, priority: Option<i32>) -> Control {
        Control::new(ComponentId(id), ControlKind::Button, width).priority(priority)
    }

    fn floor(min: f64) -> ToolbarConfig {
        ToolbarConfig {
            item_min_width: min,
            ..ToolbarConfig::default()
        }
    }

    fn rows(row_count: usize) -> ToolbarConfig {
        ToolbarConfig {
            no_wrap: false,
            row_count,
            ..ToolbarConfig::default()
        }
    }

    fn toolbar(config: ToolbarConfig, items: Vec<ToolbarItem>) -> Toolbar {
        let mut toolbar = Toolbar::new(config).unwrap();
        for item in items {
            toolbar.push(item).unwrap();
        }
        toolbar
    }

    fn hidden(bar: &Toolbar, id: u64) -> bool {
        bar.find(ComponentId(id)).is_some_and(|i| i.layout().hidden)
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut bar = Toolbar::new(ToolbarConfig::default()).unwrap();
        bar.push(button(1, 10.0, None)).unwrap();
        let nested = Group::new(ComponentId(2)).child(button(1, 10.0, None));
        assert!(matches!(
            bar.push(nested),
            Err(ToolbarConfigError::DuplicateId(ComponentId(1)))
        ));
        let twice = Group::new(ComponentId(3))
            .child(button(4, 10.0, None))
            .child(button(4, 10.0, None));
        assert!(bar.push(twice).is_err());
        assert_eq!(bar.items().len(), 1);
    }

    #[test]
    fn renderer_follows_configuration() {
        let bar = toolbar(ToolbarConfig::default(), Vec::new());
        assert_eq!(bar.renderer(), ToolbarRenderer::Flat);
        assert_eq!(toolbar(rows(3), Vec::new()).renderer(), ToolbarRenderer::Dropdown);
    }

    #[test]
    fn flat_hides_lowest_tier() {
        let mut bar = toolbar(
            floor(40.0),
            vec![
                button(1, 50.0, None).into(),
                button(2, 50.0, Some(0)).into(),
                button(3, 50.0, Some(2)).into(),
            ],
        );
        let layout = bar.layout(&ToolbarMetrics::new(120.0));

        assert_eq!(
            layout,
            ToolbarLayout::Flat {
                row: vec![ComponentId(1), ComponentId(2)],
                width: 100.0,
                overflow: 0.0,
            }
        );
        assert!(hidden(&bar, 3));
        assert_eq!(bar.find(ComponentId(2)).and_then(|i| i.layout().width), Some(50.0));
    }

    #[test]
    fn horizontal_scroll_reports_overflow() {
        let config = ToolbarConfig {
            scroll: ScrollOrientation::Horizontal,
            ..floor(70.0)
        };
        let mut bar = toolbar(
            config,
            vec![button(1, 80.0, None).into(), button(2, 80.0, Some(3)).into()],
        );
        let layout = bar.layout(&ToolbarMetrics::new(100.0));
        assert!(matches!(layout, ToolbarLayout::Flat { overflow, .. } if overflow == 50.0));
        assert!(!hidden(&bar, 2));
    }

    #[test]
    fn flat_collapses_group_before_hiding_its_items() {
        let group = Group::new(ComponentId(10))
            .collapsed_width(20.0)
            .child(button(11, 40.0, Some(1)))
            .child(button(12, 40.0, Some(1)));
        let mut bar = toolbar(floor(40.0), vec![button(1, 40.0, Some(0)).into(), group.into()]);

        let layout = bar.layout(&ToolbarMetrics::new(80.0));

        let collapsed = bar.find(ComponentId(10)).and_then(ToolbarItem::as_group);
        assert_eq!(collapsed.map(|g| g.renderer()), Some(GroupRenderer::Expandable));
        assert_eq!(layout.main_row(), &[ComponentId(1), ComponentId(10)]);
        assert!(matches!(layout, ToolbarLayout::Flat { overflow, .. } if overflow == 0.0));
        assert!(!hidden(&bar, 11));
    }

    #[test]
    fn fixed_flat_groups_hide_their_items() {
        let group = Group::new(ComponentId(10))
            .display_mode(DisplayMode::Flat)
            .child(button(11, 40.0, Some(1)))
            .child(button(12, 40.0, Some(0)));
        let mut bar = toolbar(floor(40.0), vec![button(1, 40.0, Some(0)).into(), group.into()]);

        bar.layout(&ToolbarMetrics::new(80.0));

        assert!(hidden(&bar, 11));
        assert!(!hidden(&bar, 12));
        let group = bar.find(ComponentId(10)).and_then(ToolbarItem::as_group);
        assert_eq!(group.map(|g| g.renderer()), Some(GroupRenderer::Flat));
    }

    #[test]
    fn auto_groups_reopen_flat_when_space_returns() {
        let group = Group::new(ComponentId(10))
            .collapsed_width(20.0)
            .child(button(11, 40.0, Some(1)));
        let mut bar = toolbar(floor(40.0), vec![button(1, 40.0, Some(0)).into(), group.into()]);
        bar.layout(&ToolbarMetrics::new(50.0));
        bar.layout(&ToolbarMetrics::new(500.0));

        let group = bar.find(ComponentId(10)).and_then(ToolbarItem::as_group);
        assert_eq!(group.map(|g| g.renderer()), Some(GroupRenderer::Flat));
    }

    #[test]
    fn dropdown_moves_overflow_to_popup() {
        let items = (1..=5).map(|i| button(i, 40.0, None).into()).collect();
        let mut bar = toolbar(rows(3), items);

        let layout = bar.layout(&ToolbarMetrics::new(100.0).more_button(10.0));

        let ToolbarLayout::Dropdown {
            main,
            popup,
            visible_popup_rows,
            more_visible,
        } = layout
        else {
            panic!("expected dropdown layout");
        };
        assert_eq!(main, vec![ComponentId(1), ComponentId(2)]);
        assert_eq!(popup, vec![vec![ComponentId(3), ComponentId(4)], vec![ComponentId(5)]]);
        assert_eq!(visible_popup_rows, 2);
        assert!(more_visible);
        assert!(bar.set_opened(true));
        assert!(bar.is_opened());
    }

    #[test]
    fn dropdown_single_row_drops_more_button() {
        let items = (1..=2).map(|i| button(i, 30.0, None).into()).collect();
        let mut bar = toolbar(rows(2), items);

        let layout = bar.layout(&ToolbarMetrics::new(100.0).more_button(30.0));

        assert_eq!(layout.main_row(), &[ComponentId(1), ComponentId(2)]);
        assert_eq!(layout.row_count(), 1);
        assert!(!bar.set_opened(true));
        assert!(!bar.is_opened());
    }

    #[test]
    fn dropdown_hides_rows_past_row_count() {
        let items = (1..=4).map(|i| button(i, 60.0, None).into()).collect();
        let mut bar = toolbar(rows(2), items);

        let layout = bar.layout(&ToolbarMetrics::new(100.0));

        assert!(matches!(
            &layout,
            ToolbarLayout::Dropdown { popup, visible_popup_rows: 1, .. } if popup.len() == 1
        ));
        assert!(!hidden(&bar, 2));
        assert!(hidden(&bar, 3));
        assert!(hidden(&bar, 4));
    }

    #[test]
    fn vertical_scroll_keeps_every_row() {
        let config = ToolbarConfig {
            scroll: ScrollOrientation::Vertical,
            ..rows(2)
        };
        let items = (1..=4).map(|i| button(i, 60.0, None).into()).collect();
        let mut bar = toolbar(config, items);

        let layout = bar.layout(&ToolbarMetrics::new(100.0));

        assert_eq!(layout.row_count(), 4);
        assert!(matches!(layout, ToolbarLayout::Dropdown { visible_popup_rows: 1, .. }));
        assert!(bar.items().iter().all(|i| !i.layout().hidden));
    }

    #[test]
    fn popup_closes_when_everything_fits() {
        let items = (1..=3).map(|i| button(i, 60.0, None).into()).collect();
        let mut bar = toolbar(rows(3), items);
        bar.layout(&ToolbarMetrics::new(100.0));
        assert!(bar.set_opened(true));

        bar.layout(&ToolbarMetrics::new(400.0));
        assert!(!bar.is_opened());
    }

    #[test]
    fn resize_is_throttled() {
        let mut bar = toolbar(ToolbarConfig::default(), vec![button(1, 40.0, Some(0)).into()]);
        let t0 = Instant::now();

        assert!(bar.handle_resize(ToolbarMetrics::new(300.0), t0).is_some());
        let held = bar.handle_resize(ToolbarMetrics::new(20.0), t0 + Duration::from_millis(10));
        assert!(held.is_none());
        assert!(bar.tick(t0 + Duration::from_millis(50)).is_none());

        let layout = bar.tick(t0 + Duration::from_millis(200));
        assert!(matches!(layout, Some(ToolbarLayout::Flat { width, .. }) if width == 20.0));
        assert!(bar.last_layout().is_some());
    }
}
