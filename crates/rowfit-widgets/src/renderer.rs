#![forbid(unsafe_code)]

//! Bridges between toolbar items and the width model.
//!
//! Every item kind has a stateless renderer that knows three things:
//! clearing the previous layout output, describing the item to a
//! [`SizeTree`], and writing a fitted size back onto the item. The renderer
//! is picked by [`RendererKind::of`] with a plain match.

use rowfit_layout::{ItemId, ItemSpec, SizeTree};

use crate::group::{GroupRenderer, ToolbarItem};

/// Per-container measuring options, shared by every child.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasureOptions {
    /// Floor for shrinkable items; `0` means none.
    pub item_min_width: f64,
    /// Cap on any measured item width; `0` means none.
    pub item_max_width: f64,
    /// Gap between consecutive items.
    pub indent: f64,
}

impl MeasureOptions {
    /// Clamp a natural width into the configured item bounds.
    ///
    /// ```
    /// use rowfit_widgets::MeasureOptions;
    ///
    /// let options = MeasureOptions { item_min_width: 30.0, item_max_width: 120.0, indent: 4.0 };
    /// assert_eq!(options.measure(10.0), 30.0);
    /// assert_eq!(options.measure(200.0), 120.0);
    /// assert_eq!(MeasureOptions::default().measure(200.0), 200.0);
    /// ```
    #[must_use]
    pub fn measure(&self, natural: f64) -> f64 {
        let mut width = if natural.is_finite() { natural.max(0.0) } else { 0.0 };
        if self.item_max_width > 0.0 {
            width = width.min(self.item_max_width);
        }
        if self.item_min_width > 0.0 {
            width = width.max(self.item_min_width);
        }
        width
    }
}

/// Moves sizes between an item and a [`SizeTree`].
///
/// All methods default to doing nothing, so a renderer only implements the
/// steps it takes part in.
pub trait SizeRenderer {
    /// Clear the output of the previous layout pass.
    fn reset_styles(&self, _item: &mut ToolbarItem, _options: &MeasureOptions) {}

    /// Add the item to `tree` and return its size, or `None` if the item
    /// does not take part in layout.
    fn create_size(
        &self,
        _item: &ToolbarItem,
        _tree: &mut SizeTree,
        _options: &MeasureOptions,
    ) -> Option<ItemId> {
        None
    }

    /// Write a fitted size back onto the item.
    fn apply_size(&self, _item: &mut ToolbarItem, _tree: &mut SizeTree, _size: ItemId) {}
}

/// Renderer for single controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlRenderer;

/// Renderer for groups laid out inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatGroupRenderer;

/// Renderer for groups collapsed into one button.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandableGroupRenderer;

/// Renderer selected for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    /// A single control, sized by its natural width.
    Control,
    /// A group laid out inline, sized by its nested group.
    FlatGroup,
    /// A group collapsed into one button.
    ExpandableGroup,
}

impl RendererKind {
    /// Renderer for `item` in its current presentation.
    #[must_use]
    pub const fn of(item: &ToolbarItem) -> Self {
        match item {
            ToolbarItem::Control(_) => Self::Control,
            ToolbarItem::Group(group) => match group.renderer() {
                GroupRenderer::Flat => Self::FlatGroup,
                GroupRenderer::Expandable => Self::ExpandableGroup,
            },
        }
    }
}

impl SizeRenderer for RendererKind {
    fn reset_styles(&self, item: &mut ToolbarItem, options: &MeasureOptions) {
        match self {
            Self::Control => ControlRenderer.reset_styles(item, options),
            Self::FlatGroup => FlatGroupRenderer.reset_styles(item, options),
            Self::ExpandableGroup => ExpandableGroupRenderer.reset_styles(item, options),
        }
    }

    fn create_size(
        &self,
        item: &ToolbarItem,
        tree: &mut SizeTree,
        options: &MeasureOptions,
    ) -> Option<ItemId> {
        match self {
            Self::Control => ControlRenderer.create_size(item, tree, options),
            Self::FlatGroup => FlatGroupRenderer.create_size(item, tree, options),
            Self::ExpandableGroup => ExpandableGroupRenderer.create_size(item, tree, options),
        }
    }

    fn apply_size(&self, item: &mut ToolbarItem, tree: &mut SizeTree, size: ItemId) {
        match self {
            Self::Control => ControlRenderer.apply_size(item, tree, size),
            Self::FlatGroup => FlatGroupRenderer.apply_size(item, tree, size),
            Self::ExpandableGroup => ExpandableGroupRenderer.apply_size(item, tree, size),
        }
    }
}

impl SizeRenderer for ControlRenderer {
    fn reset_styles(&self, item: &mut ToolbarItem, _options: &MeasureOptions) {
        item.layout_mut().reset();
    }

    fn create_size(
        &self,
        item: &ToolbarItem,
        tree: &mut SizeTree,
        options: &MeasureOptions,
    ) -> Option<ItemId> {
        let control = item.as_control()?;
        if !control.is_visible() {
            return None;
        }
        Some(
            tree.add_leaf(
                ItemSpec::new(control.id(), options.measure(control.natural_width()))
                    .min_width(options.item_min_width)
                    .maybe_priority(control.priority_tier())
                    .wrap(control.is_wrap()),
            ),
        )
    }

    fn apply_size(&self, item: &mut ToolbarItem, tree: &mut SizeTree, size: ItemId) {
        apply_leaf(item, tree, size);
    }
}

impl SizeRenderer for FlatGroupRenderer {
    fn reset_styles(&self, item: &mut ToolbarItem, options: &MeasureOptions) {
        item.layout_mut().reset();
        if let Some(group) = item.as_group_mut() {
            for child in group.items_mut() {
                RendererKind::of(child).reset_styles(child, options);
            }
        }
    }

    /// Children are measured first. The group's own width is its chrome
    /// plus the children, without indents: those are added back by the
    /// nested group when it is measured.
    fn create_size(
        &self,
        item: &ToolbarItem,
        tree: &mut SizeTree,
        options: &MeasureOptions,
    ) -> Option<ItemId> {
        let group = item.as_group()?;
        if !group.is_visible() {
            return None;
        }
        let children = create_sizes(group.items(), tree, options);
        let nested = tree.add_group(children, options.indent);
        let measured = group.chrome() + tree.width_with(nested, None, true);
        Some(
            tree.add_group_item(
                ItemSpec::new(group.id(), measured)
                    .maybe_priority(group.priority_tier())
                    .wrap(group.is_wrap()),
                nested,
            ),
        )
    }

    fn apply_size(&self, item: &mut ToolbarItem, tree: &mut SizeTree, size: ItemId) {
        let Some(group) = item.as_group_mut() else {
            return;
        };
        let fitted = tree.item(size);
        if fitted.is_hidden() {
            group.hide_cascade();
            return;
        }
        group.layout.indent = fitted.indent();
        let Some(nested) = fitted.group() else {
            return;
        };
        tree.apply_indents(nested);
        apply_sizes(group.items_mut(), tree, nested);
    }
}

impl SizeRenderer for ExpandableGroupRenderer {
    fn reset_styles(&self, item: &mut ToolbarItem, _options: &MeasureOptions) {
        item.layout_mut().reset();
    }

    fn create_size(
        &self,
        item: &ToolbarItem,
        tree: &mut SizeTree,
        options: &MeasureOptions,
    ) -> Option<ItemId> {
        let group = item.as_group()?;
        if !group.is_visible() {
            return None;
        }
        Some(
            tree.add_leaf(
                ItemSpec::new(group.id(), options.measure(group.collapsed()))
                    .min_width(options.item_min_width)
                    .wrap(group.is_wrap()),
            ),
        )
    }

    fn apply_size(&self, item: &mut ToolbarItem, tree: &mut SizeTree, size: ItemId) {
        apply_leaf(item, tree, size);
    }
}

fn apply_leaf(item: &mut ToolbarItem, tree: &SizeTree, size: ItemId) {
    let fitted = tree.item(size);
    let layout = item.layout_mut();
    if fitted.is_hidden() {
        layout.hidden = true;
        return;
    }
    layout.width = Some(fitted.width());
    layout.indent = fitted.indent();
}

/// Sizes for the visible entries of `items`, in order.
pub fn create_sizes(
    items: &[ToolbarItem],
    tree: &mut SizeTree,
    options: &MeasureOptions,
) -> Vec<ItemId> {
    items
        .iter()
        .filter_map(|child| RendererKind::of(child).create_size(child, tree, options))
        .collect()
}

/// Apply every direct child size of `group` to the matching entry of `items`.
pub fn apply_sizes(items: &mut [ToolbarItem], tree: &mut SizeTree, group: rowfit_layout::GroupId) {
    let sizes = tree.group(group).tree_list().to_vec();
    for size in sizes {
        let component = tree.item(size).component();
        if let Some(item) = items.iter_mut().find(|item| item.id() == component) {
            RendererKind::of(item).apply_size(item, tree, size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Control, ControlKind};
    use crate::group::Group;
    use rowfit_layout::ComponentId;

    fn button(id: u64, width: f64) -> ToolbarItem {
        Control::new(ComponentId(id), ControlKind::Button, width).into()
    }

    #[test]
    fn control_size_uses_bounds_and_priority() {
        let options = MeasureOptions {
            item_min_width: 20.0,
            item_max_width: 60.0,
            indent: 0.0,
        };
        let mut tree = SizeTree::new();
        let item = button(1, 90.0);
        let size = RendererKind::of(&item).create_size(&item, &mut tree, &options);

        let size = size.map(|id| tree.item(id).clone());
        assert_eq!(size.as_ref().map(|s| s.max_width()), Some(60.0));
        assert_eq!(size.as_ref().map(|s| s.min_width()), Some(20.0));
        assert_eq!(size.map(|s| s.priority()), Some(0));
    }

    #[test]
    fn invisible_items_get_no_size() {
        let mut tree = SizeTree::new();
        let item: ToolbarItem = Control::new(ComponentId(1), ControlKind::Label, 10.0)
            .visible(false)
            .into();
        assert!(ControlRenderer.create_size(&item, &mut tree, &MeasureOptions::default()).is_none());
        assert_eq!(tree.item_count(), 0);
    }

    #[test]
    fn flat_group_paddings_are_its_chrome() {
        let options = MeasureOptions {
            indent: 4.0,
            ..MeasureOptions::default()
        };
        let mut tree = SizeTree::new();
        let item: ToolbarItem = Group::new(ComponentId(1))
            .chrome_width(12.0)
            .child(button(2, 30.0))
            .child(button(3, 40.0))
            .into();

        let size = FlatGroupRenderer.create_size(&item, &mut tree, &options);
        let nested = size.and_then(|id| tree.item(id).group());

        assert_eq!(size.map(|id| tree.item(id).max_width()), Some(82.0));
        assert_eq!(nested.map(|g| tree.group(g).paddings()), Some(12.0));
        assert_eq!(nested.map(|g| tree.width(g)), Some(86.0));
    }

    #[test]
    fn collapsed_group_is_fixed_width_leaf() {
        let mut tree = SizeTree::new();
        let item: ToolbarItem = Group::new(ComponentId(1))
            .collapsed_width(28.0)
            .child(button(2, 30.0))
            .into();

        let size = ExpandableGroupRenderer.create_size(&item, &mut tree, &MeasureOptions::default());
        assert_eq!(size.map(|id| tree.item(id).economy()), Some(0.0));
        assert_eq!(size.and_then(|id| tree.item(id).group()), None);
    }

    #[test]
    fn hidden_flat_group_cascades() {
        let mut tree = SizeTree::new();
        let mut item: ToolbarItem = Group::new(ComponentId(1)).child(button(2, 30.0)).into();
        let size = FlatGroupRenderer.create_size(&item, &mut tree, &MeasureOptions::default());
        let Some(size) = size else {
            panic!("group should be measured");
        };
        tree.item_mut(size).hide();

        FlatGroupRenderer.apply_size(&mut item, &mut tree, size);
        assert!(item.layout().hidden);
        assert!(item.find(ComponentId(2)).is_some_and(|child| child.layout().hidden));
    }
}
