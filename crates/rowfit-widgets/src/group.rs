#![forbid(unsafe_code)]

//! Nested groups of controls.

use rowfit_layout::ComponentId;
use serde::{Deserialize, Serialize};

use crate::control::{Control, ControlLayout};

/// How a group may be presented inside a toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Flat while it fits, collapsed into a button when space runs out.
    #[default]
    Auto,
    /// Always lays its children out inline.
    Flat,
    /// Always collapsed; children open on demand.
    Expandable,
}

/// Presentation currently in use for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupRenderer {
    /// Children laid out inline.
    #[default]
    Flat,
    /// Collapsed into a single button.
    Expandable,
}

/// A captioned container of toolbar items.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    id: ComponentId,
    caption: String,
    icon: Option<String>,
    children: Vec<ToolbarItem>,
    display_mode: DisplayMode,
    renderer: GroupRenderer,
    chrome_width: f64,
    collapsed_width: f64,
    wrap: bool,
    priority: Option<i32>,
    opened: bool,
    visible: bool,
    /// Result of the last layout pass.
    pub layout: ControlLayout,
}

impl Group {
    /// Create an empty, visible group in [`DisplayMode::Auto`].
    pub fn new(id: ComponentId) -> Self {
        Self {
            id,
            caption: String::new(),
            icon: None,
            children: Vec::new(),
            display_mode: DisplayMode::Auto,
            renderer: GroupRenderer::Flat,
            chrome_width: 0.0,
            collapsed_width: 0.0,
            wrap: false,
            priority: None,
            opened: false,
            visible: true,
            layout: ControlLayout::default(),
        }
    }

    /// Set the caption.
    #[must_use]
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Set the icon name.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Append one child.
    #[must_use]
    pub fn child(mut self, item: impl Into<ToolbarItem>) -> Self {
        self.children.push(item.into());
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children(mut self, items: impl IntoIterator<Item = ToolbarItem>) -> Self {
        self.children.extend(items);
        self
    }

    /// Set the display mode. A fixed mode also selects the matching renderer.
    #[must_use]
    pub fn display_mode(mut self, mode: DisplayMode) -> Self {
        self.set_display_mode(mode);
        self
    }

    /// Width of the caption, icon and borders drawn around the children.
    #[must_use]
    pub fn chrome_width(mut self, width: f64) -> Self {
        self.chrome_width = width;
        self
    }

    /// Width of the group when collapsed into a single button.
    #[must_use]
    pub fn collapsed_width(mut self, width: f64) -> Self {
        self.collapsed_width = width;
        self
    }

    /// Force a row break after this group.
    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the priority tier; `None` makes the group fixed-width.
    #[must_use]
    pub fn priority(mut self, priority: Option<i32>) -> Self {
        self.priority = priority;
        self
    }

    /// Set whether the host shows the group at all.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Handle of the group.
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Caption as set by [`caption`](Self::caption).
    pub fn caption_text(&self) -> &str {
        &self.caption
    }

    /// Icon name, if any.
    pub fn icon_name(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Direct children.
    pub fn items(&self) -> &[ToolbarItem] {
        &self.children
    }

    /// Direct children, mutably.
    pub fn items_mut(&mut self) -> &mut [ToolbarItem] {
        &mut self.children
    }

    /// Append a child.
    pub fn push(&mut self, item: impl Into<ToolbarItem>) {
        self.children.push(item.into());
    }

    /// Configured display mode.
    pub const fn mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Change the display mode. A fixed mode also selects the matching renderer.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
        match mode {
            DisplayMode::Flat => self.renderer = GroupRenderer::Flat,
            DisplayMode::Expandable => self.renderer = GroupRenderer::Expandable,
            DisplayMode::Auto => {}
        }
    }

    /// Presentation chosen by the last layout pass.
    pub const fn renderer(&self) -> GroupRenderer {
        self.renderer
    }

    /// Switch presentation. Closing happens implicitly when collapsing.
    pub fn change_renderer(&mut self, renderer: GroupRenderer) {
        if self.renderer != renderer {
            self.renderer = renderer;
            self.opened = false;
        }
    }

    /// Width added around the children when flat.
    pub const fn chrome(&self) -> f64 {
        self.chrome_width
    }

    /// Width when collapsed.
    pub const fn collapsed(&self) -> f64 {
        self.collapsed_width
    }

    /// Whether a row break follows this group.
    pub const fn is_wrap(&self) -> bool {
        self.wrap
    }

    /// Priority tier, `None` for fixed-width groups.
    pub const fn priority_tier(&self) -> Option<i32> {
        self.priority
    }

    /// Whether the host shows the group, regardless of layout.
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or remove the group; invisible groups take no space.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether a collapsed group is open.
    pub const fn is_opened(&self) -> bool {
        self.opened
    }

    /// Open or close a collapsed group. Flat groups are never "open".
    pub fn set_opened(&mut self, opened: bool) -> bool {
        if self.renderer != GroupRenderer::Expandable {
            return false;
        }
        self.opened = opened;
        true
    }

    /// Mark the group and everything inside it hidden.
    pub(crate) fn hide_cascade(&mut self) {
        self.layout.hidden = true;
        for child in &mut self.children {
            match child {
                ToolbarItem::Control(control) => control.layout.hidden = true,
                ToolbarItem::Group(group) => group.hide_cascade(),
            }
        }
    }
}

/// One entry of a toolbar or group.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarItem {
    /// A single widget.
    Control(Control),
    /// A nested container.
    Group(Group),
}

impl ToolbarItem {
    /// Handle of the control or group.
    pub const fn id(&self) -> ComponentId {
        match self {
            Self::Control(control) => control.id(),
            Self::Group(group) => group.id(),
        }
    }

    /// Whether the host shows the item.
    pub const fn is_visible(&self) -> bool {
        match self {
            Self::Control(control) => control.is_visible(),
            Self::Group(group) => group.is_visible(),
        }
    }

    /// Result of the last layout pass.
    pub const fn layout(&self) -> &ControlLayout {
        match self {
            Self::Control(control) => &control.layout,
            Self::Group(group) => &group.layout,
        }
    }

    /// Result of the last layout pass, mutably.
    pub fn layout_mut(&mut self) -> &mut ControlLayout {
        match self {
            Self::Control(control) => &mut control.layout,
            Self::Group(group) => &mut group.layout,
        }
    }

    /// The group, if this item is one.
    pub const fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Control(_) => None,
        }
    }

    /// The group, mutably, if this item is one.
    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Control(_) => None,
        }
    }

    /// The control, if this item is one.
    pub const fn as_control(&self) -> Option<&Control> {
        match self {
            Self::Control(control) => Some(control),
            Self::Group(_) => None,
        }
    }

    /// Depth-first search for an item by id.
    pub fn find(&self, id: ComponentId) -> Option<&ToolbarItem> {
        if self.id() == id {
            return Some(self);
        }
        self.as_group()?.items().iter().find_map(|child| child.find(id))
    }

    /// Depth-first search for an item by id, mutably.
    pub fn find_mut(&mut self, id: ComponentId) -> Option<&mut ToolbarItem> {
        if self.id() == id {
            return Some(self);
        }
        match self {
            Self::Group(group) => group.children.iter_mut().find_map(|child| child.find_mut(id)),
            Self::Control(_) => None,
        }
    }
}

impl From<Control> for ToolbarItem {
    fn from(control: Control) -> Self {
        Self::Control(control)
    }
}

impl From<Group> for ToolbarItem {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}
