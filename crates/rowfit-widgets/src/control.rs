#![forbid(unsafe_code)]

//! Headless controls.
//!
//! A [`Control`] carries what the layout pass needs (measured width,
//! priority, wrap flag, visibility) plus the small amount of state each
//! control kind keeps. Drawing is the host's business; the host reads the
//! computed [`ControlLayout`] back after every pass.

use rowfit_layout::ComponentId;

/// Layout output applied to one control or group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlLayout {
    /// Assigned width, `None` when the natural width applies.
    pub width: Option<f64>,
    /// Gap after the item.
    pub indent: f64,
    /// Hidden by the last layout pass.
    pub hidden: bool,
}

impl ControlLayout {
    /// Back to natural width, no indent, visible.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Bounded numeric value shared by spinners and sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    looped: bool,
}

impl Scale {
    /// Create a scale over `[min, max]`; the bounds are swapped if reversed.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            value: min,
            min,
            max,
            step: 1.0,
            looped: false,
        }
    }

    /// Set the step used by [`step_up`](Self::step_up) and
    /// [`step_down`](Self::step_down). Non-positive steps are ignored.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 0.0 {
            self.step = step;
        }
        self
    }

    /// Wrap around at the bounds instead of stopping.
    #[must_use]
    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Initial value, clamped.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.set_value(value);
        self
    }

    /// Current value, always within the bounds.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Whether stepping wraps around at the bounds.
    #[must_use]
    pub const fn is_looped(&self) -> bool {
        self.looped
    }

    /// Set the value, clamped into the bounds. Returns whether it changed.
    pub fn set_value(&mut self, value: f64) -> bool {
        let value = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Increase by one step.
    pub fn step_up(&mut self) -> bool {
        let next = self.value + self.step;
        if self.looped && next > self.max {
            return self.set_value(self.value - (self.max - self.min));
        }
        self.set_value(next)
    }

    /// Decrease by one step.
    pub fn step_down(&mut self) -> bool {
        let next = self.value - self.step;
        if self.looped && next < self.min {
            return self.set_value(self.value + (self.max - self.min));
        }
        self.set_value(next)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// What a control is, with its kind-specific state.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Push button.
    Button,
    /// Two-state check box.
    Checkbox { checked: bool },
    /// Member of the radio group named `group`.
    RadioButton { group: String, checked: bool },
    /// Static text.
    Label,
    /// Single-line text input with a placeholder hint.
    TextEdit { value: String, hint: String },
    /// Numeric field stepped with arrows.
    Spinner(Scale),
    /// Numeric value picked on a track.
    Slider(Scale),
    /// Button that opens a popup.
    DropdownButton { opened: bool },
}

impl ControlKind {
    /// Short name used in logs and declarative toolbars.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Checkbox { .. } => "checkbox",
            Self::RadioButton { .. } => "radio",
            Self::Label => "label",
            Self::TextEdit { .. } => "textinput",
            Self::Spinner(_) => "spinner",
            Self::Slider(_) => "slider",
            Self::DropdownButton { .. } => "dropdown",
        }
    }
}

/// Default priority of a control: shrinkable, hidden after any higher tier.
pub const DEFAULT_PRIORITY: i32 = 0;

/// A single widget in a toolbar or group.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    id: ComponentId,
    caption: String,
    kind: ControlKind,
    natural_width: f64,
    priority: Option<i32>,
    wrap: bool,
    visible: bool,
    /// Result of the last layout pass.
    pub layout: ControlLayout,
}

impl Control {
    /// Create a visible control with the default priority.
    pub fn new(id: ComponentId, kind: ControlKind, natural_width: f64) -> Self {
        Self {
            id,
            caption: String::new(),
            kind,
            natural_width,
            priority: Some(DEFAULT_PRIORITY),
            wrap: false,
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

    /// Set the priority tier; `None` makes the control fixed-width.
    #[must_use]
    pub fn priority(mut self, priority: Option<i32>) -> Self {
        self.priority = priority;
        self
    }

    /// Force a row break after this control.
    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set whether the host shows the control at all.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Handle of the control.
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Caption as set by [`caption`](Self::caption).
    pub fn caption_text(&self) -> &str {
        &self.caption
    }

    /// Kind and kind-specific state.
    pub const fn kind(&self) -> &ControlKind {
        &self.kind
    }

    /// Mutable kind-specific state.
    pub fn kind_mut(&mut self) -> &mut ControlKind {
        &mut self.kind
    }

    /// Width the control asks for before layout.
    pub const fn natural_width(&self) -> f64 {
        self.natural_width
    }

    /// Update the measured width, e.g. after the caption changed.
    pub fn set_natural_width(&mut self, width: f64) {
        self.natural_width = width;
    }

    /// Priority tier, `None` for fixed-width controls.
    pub const fn priority_tier(&self) -> Option<i32> {
        self.priority
    }

    /// Whether a row break follows this control.
    pub const fn is_wrap(&self) -> bool {
        self.wrap
    }

    /// Whether the host shows the control, regardless of layout.
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or remove the control; invisible controls take no space.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the control is on screen after layout.
    pub const fn is_shown(&self) -> bool {
        self.visible && !self.layout.hidden
    }

    /// Flip a checkbox. Returns `false` for other kinds.
    pub fn toggle(&mut self) -> bool {
        match &mut self.kind {
            ControlKind::Checkbox { checked } => {
                *checked = !*checked;
                true
            }
            _ => false,
        }
    }

    /// Whether a checkbox or radio button is checked.
    pub fn is_checked(&self) -> bool {
        matches!(
            self.kind,
            ControlKind::Checkbox { checked: true } | ControlKind::RadioButton { checked: true, .. }
        )
    }

    /// Value range of a spinner or slider.
    pub fn scale(&self) -> Option<&Scale> {
        match &self.kind {
            ControlKind::Spinner(scale) | ControlKind::Slider(scale) => Some(scale),
            _ => None,
        }
    }

    /// Mutable value range of a spinner or slider.
    pub fn scale_mut(&mut self) -> Option<&mut Scale> {
        match &mut self.kind {
            ControlKind::Spinner(scale) | ControlKind::Slider(scale) => Some(scale),
            _ => None,
        }
    }

    /// Open or close a dropdown button. Returns `false` for other kinds.
    pub fn set_opened(&mut self, opened: bool) -> bool {
        match &mut self.kind {
            ControlKind::DropdownButton { opened: current } => {
                *current = opened;
                true
            }
            _ => false,
        }
    }

    /// Whether a dropdown button is open.
    pub fn is_opened(&self) -> bool {
        matches!(self.kind, ControlKind::DropdownButton { opened: true })
    }
}

/// Single selection over the radio buttons sharing a group name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioGroup {
    name: String,
}

impl RadioGroup {
    /// Radio group over the buttons named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Shared group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check `id` and uncheck every other member.
    ///
    /// Returns `false` (and changes nothing) when `id` is not a member.
    pub fn select<'a>(
        &self,
        controls: impl IntoIterator<Item = &'a mut Control>,
        id: ComponentId,
    ) -> bool {
        let mut members: Vec<&mut Control> = controls
            .into_iter()
            .filter(|control| self.contains(control))
            .collect();
        if !members.iter().any(|control| control.id() == id) {
            return false;
        }
        for control in &mut members {
            let selected = control.id() == id;
            if let ControlKind::RadioButton { checked, .. } = &mut control.kind {
                *checked = selected;
            }
        }
        true
    }

    /// Currently checked member, if any.
    pub fn selected<'a>(&self, controls: impl IntoIterator<Item = &'a Control>) -> Option<ComponentId> {
        controls
            .into_iter()
            .find(|control| self.contains(control) && control.is_checked())
            .map(Control::id)
    }

    fn contains(&self, control: &Control) -> bool {
        matches!(&control.kind, ControlKind::RadioButton { group, .. } if *group == self.name)
    }
}
