#![forbid(unsafe_code)]

//! Declarative toolbars.
//!
//! A toolbar can be described in JSON: the configuration keys sit at the
//! top level next to an `items` list whose entries are tagged by `type`.
//!
//! ```
//! use rowfit_widgets::ToolbarSpec;
//!
//! let toolbar = ToolbarSpec::from_json(r#"{
//!     "indent": 4,
//!     "items": [
//!         { "type": "button", "id": 1, "caption": "Save", "width": 60 },
//!         { "type": "group", "id": 2, "children": [
//!             { "type": "checkbox", "id": 3, "width": 30, "checked": true }
//!         ]}
//!     ]
//! }"#)?
//! .build()?;
//!
//! assert_eq!(toolbar.items().len(), 2);
//! # Ok::<(), rowfit_widgets::ToolbarConfigError>(())
//! ```

use rowfit_layout::ComponentId;
use serde::Deserialize;

use crate::config::{ToolbarConfig, ToolbarConfigError};
use crate::control::{Control, ControlKind, Scale};
use crate::group::{DisplayMode, Group, ToolbarItem};
use crate::toolbar::Toolbar;

/// A whole toolbar in short form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolbarSpec {
    #[serde(flatten)]
    pub config: ToolbarConfig,
    #[serde(default)]
    pub items: Vec<ItemSpecEntry>,
}

/// One entry of `items` or of a group's `children`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemSpecEntry {
    Button(ControlEntry),
    Checkbox(ControlEntry),
    Radio(ControlEntry),
    Label(ControlEntry),
    #[serde(rename = "textinput")]
    TextInput(ControlEntry),
    Spinner(ControlEntry),
    Slider(ControlEntry),
    Dropdown(ControlEntry),
    Group(GroupEntry),
}

/// Fields shared by every control type. Keys that do not apply to a type
/// are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlEntry {
    pub id: u64,
    #[serde(default)]
    pub caption: String,
    /// Natural width measured by the host.
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub priority: Option<i32>,
    /// Make the control fixed-width (no priority tier).
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub wrap: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub checked: bool,
    /// Radio group name.
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub looped: bool,
}

/// A nested group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntry {
    pub id: u64,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub mode: DisplayMode,
    /// Width of the caption and borders around the children.
    #[serde(default)]
    pub chrome: f64,
    #[serde(default)]
    pub collapsed_width: f64,
    #[serde(default)]
    pub wrap: bool,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub children: Vec<ItemSpecEntry>,
}

fn default_visible() -> bool {
    true
}

fn default_max() -> f64 {
    100.0
}

impl ToolbarSpec {
    /// Parse the short form.
    pub fn from_json(json: &str) -> Result<Self, ToolbarConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the toolbar, validating the configuration and item ids.
    pub fn build(self) -> Result<Toolbar, ToolbarConfigError> {
        let mut toolbar = Toolbar::new(self.config)?;
        for entry in self.items {
            toolbar.push(entry.into_item())?;
        }
        Ok(toolbar)
    }
}

impl ItemSpecEntry {
    /// Turn the entry into a toolbar item.
    pub fn into_item(self) -> ToolbarItem {
        let (entry, kind) = match self {
            Self::Group(group) => return group.into_group().into(),
            Self::Button(e) => (e, ControlKind::Button),
            Self::Label(e) => (e, ControlKind::Label),
            Self::Checkbox(e) => {
                let checked = e.checked;
                (e, ControlKind::Checkbox { checked })
            }
            Self::Radio(e) => {
                let kind = ControlKind::RadioButton {
                    group: e.group.clone(),
                    checked: e.checked,
                };
                (e, kind)
            }
            Self::TextInput(e) => {
                let kind = ControlKind::TextEdit {
                    value: e.text.clone(),
                    hint: e.hint.clone(),
                };
                (e, kind)
            }
            Self::Spinner(e) => {
                let scale = e.scale();
                (e, ControlKind::Spinner(scale))
            }
            Self::Slider(e) => {
                let scale = e.scale();
                (e, ControlKind::Slider(scale))
            }
            Self::Dropdown(e) => (e, ControlKind::DropdownButton { opened: false }),
        };
        entry.into_control(kind).into()
    }
}

impl ControlEntry {
    fn scale(&self) -> Scale {
        let mut scale = Scale::new(self.min, self.max).with_looped(self.looped);
        if let Some(step) = self.step {
            scale = scale.with_step(step);
        }
        if let Some(value) = self.value {
            scale = scale.with_value(value);
        }
        scale
    }

    fn into_control(self, kind: ControlKind) -> Control {
        let priority = if self.fixed {
            None
        } else {
            Some(self.priority.unwrap_or(crate::control::DEFAULT_PRIORITY))
        };
        Control::new(ComponentId(self.id), kind, self.width)
            .caption(self.caption)
            .priority(priority)
            .wrap(self.wrap)
            .visible(self.visible)
    }
}

impl GroupEntry {
    fn into_group(self) -> Group {
        let mut group = Group::new(ComponentId(self.id))
            .caption(self.caption)
            .display_mode(self.mode)
            .chrome_width(self.chrome)
            .collapsed_width(self.collapsed_width)
            .wrap(self.wrap)
            .priority(self.priority)
            .visible(self.visible)
            .children(self.children.into_iter().map(ItemSpecEntry::into_item));
        if let Some(icon) = self.icon {
            group = group.icon(icon);
        }
        group
    }
}
