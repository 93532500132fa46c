#![forbid(unsafe_code)]

//! Toolbar configuration and host-supplied metrics.

use std::fmt;

use rowfit_layout::ComponentId;
use serde::{Deserialize, Serialize};

use crate::renderer::MeasureOptions;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised while building a toolbar from configuration.
#[derive(Debug)]
pub enum ToolbarConfigError {
    /// The JSON could not be parsed or did not match the schema.
    Parse(serde_json::Error),
    /// `item_min_width` is larger than `item_max_width`.
    InvalidItemBounds { min: f64, max: f64 },
    /// A width or indent is negative or not finite.
    InvalidNumber { field: &'static str, value: f64 },
    /// Two items share an id.
    DuplicateId(ComponentId),
}

impl fmt::Display for ToolbarConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid toolbar description: {e}"),
            Self::InvalidItemBounds { min, max } => {
                write!(f, "item min width {min} exceeds item max width {max}")
            }
            Self::InvalidNumber { field, value } => {
                write!(f, "{field} must be a finite, non-negative number, got {value}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate item id {}", id.get()),
        }
    }
}

impl std::error::Error for ToolbarConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::InvalidItemBounds { .. } | Self::InvalidNumber { .. } | Self::DuplicateId(_) => {
                None
            }
        }
    }
}

impl From<serde_json::Error> for ToolbarConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Where overflowing content goes instead of being hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollOrientation {
    /// Overflow is hidden by priority.
    #[default]
    None,
    /// A single row scrolls sideways; nothing is hidden.
    Horizontal,
    /// Extra popup rows scroll vertically; nothing is hidden.
    Vertical,
}

/// Layout options of one toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolbarConfig {
    /// Gap between items.
    pub indent: f64,
    /// Floor for shrinkable items; `0` means none.
    #[serde(alias = "minItemWidth")]
    pub item_min_width: f64,
    /// Cap on measured item widths; `0` means none.
    #[serde(alias = "maxItemWidth")]
    pub item_max_width: f64,
    /// Rows shown before further hiding (main row included).
    pub row_count: usize,
    pub scroll: ScrollOrientation,
    /// Single row, no overflow popup.
    pub no_wrap: bool,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            indent: 0.0,
            item_min_width: 0.0,
            item_max_width: 0.0,
            row_count: 1,
            scroll: ScrollOrientation::None,
            no_wrap: true,
        }
    }
}

impl ToolbarConfig {
    /// Check numbers and bounds, and normalize `row_count` to at least one.
    pub fn validate(mut self) -> Result<Self, ToolbarConfigError> {
        for (field, value) in [
            ("indent", self.indent),
            ("item_min_width", self.item_min_width),
            ("item_max_width", self.item_max_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ToolbarConfigError::InvalidNumber { field, value });
            }
        }
        if self.item_min_width > 0.0
            && self.item_max_width > 0.0
            && self.item_min_width > self.item_max_width
        {
            return Err(ToolbarConfigError::InvalidItemBounds {
                min: self.item_min_width,
                max: self.item_max_width,
            });
        }
        self.row_count = self.row_count.max(1);
        Ok(self)
    }

    /// Whether the toolbar lays out a single row without a popup.
    #[must_use]
    pub const fn is_single_row(&self) -> bool {
        self.no_wrap || self.row_count <= 1
    }

    /// Measuring options handed to every item.
    #[must_use]
    pub const fn measure_options(&self) -> MeasureOptions {
        MeasureOptions {
            item_min_width: self.item_min_width,
            item_max_width: self.item_max_width,
            indent: self.indent,
        }
    }
}

/// Default width of a vertical scrollbar.
pub const SCROLLBAR_WIDTH: f64 = 17.0;

/// Geometry the host measures before each layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarMetrics {
    /// Inner width of the toolbar row.
    pub content_width: f64,
    /// Inner width of a popup row.
    pub popup_content_width: f64,
    /// Width of the "more" button opening the popup.
    pub more_button_width: f64,
    pub scrollbar_width: f64,
}

impl ToolbarMetrics {
    /// Metrics with popup rows as wide as the main row.
    #[must_use]
    pub const fn new(content_width: f64) -> Self {
        Self {
            content_width,
            popup_content_width: content_width,
            more_button_width: 0.0,
            scrollbar_width: SCROLLBAR_WIDTH,
        }
    }

    #[must_use]
    pub const fn popup_width(mut self, width: f64) -> Self {
        self.popup_content_width = width;
        self
    }

    #[must_use]
    pub const fn more_button(mut self, width: f64) -> Self {
        self.more_button_width = width;
        self
    }

    #[must_use]
    pub const fn scrollbar(mut self, width: f64) -> Self {
        self.scrollbar_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn defaults_describe_single_flat_row() {
        let config = ToolbarConfig::default();
        assert!(config.is_single_row());
        assert_eq!(config.row_count, 1);
        assert_eq!(config.scroll, ScrollOrientation::None);
    }

    #[test]
    fn short_form_keys_are_accepted() {
        let config: ToolbarConfig = serde_json::from_str(
            r#"{"indent": 4, "minItemWidth": 30, "maxItemWidth": 120, "scroll": "horizontal"}"#,
        )
        .unwrap();
        assert_eq!(config.indent, 4.0);
        assert_eq!(config.item_min_width, 30.0);
        assert_eq!(config.item_max_width, 120.0);
        assert_eq!(config.scroll, ScrollOrientation::Horizontal);
        assert!(config.no_wrap);
    }

    #[test]
    fn validate_rejects_crossed_bounds() {
        let config = ToolbarConfig {
            item_min_width: 50.0,
            item_max_width: 20.0,
            ..ToolbarConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ToolbarConfigError::InvalidItemBounds { .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_indent() {
        let config = ToolbarConfig {
            indent: -1.0,
            ..ToolbarConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("indent"));
        assert!(err.source().is_none());
    }

    #[test]
    fn validate_normalizes_row_count() {
        let config = ToolbarConfig {
            row_count: 0,
            no_wrap: false,
            ..ToolbarConfig::default()
        };
        let config = config.validate().unwrap();
        assert_eq!(config.row_count, 1);
        assert!(config.is_single_row());
    }

    #[test]
    fn parse_error_keeps_source() {
        let err: ToolbarConfigError = serde_json::from_str::<ToolbarConfig>("{")
            .unwrap_err()
            .into();
        assert!(err.source().is_some());
    }
}
