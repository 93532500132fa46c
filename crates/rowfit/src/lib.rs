#![forbid(unsafe_code)]

//! rowfit public facade crate.
//!
//! Re-exports the width model, the widgets and the resize throttle, and
//! offers a prelude for day-to-day use.

use std::fmt;

// --- Layout re-exports -----------------------------------------------------

pub use rowfit_layout::{
    ComponentId, GroupId, GroupSize, HideCandidate, HideVeto, ItemId, ItemSize, ItemSpec,
    NEVER_HIDE, SizeTree,
};

// --- Widget re-exports -----------------------------------------------------

pub use rowfit_widgets::{
    Control, ControlKind, ControlLayout, DisplayMode, Group, RadioGroup, Scale, ScrollOrientation,
    Toolbar, ToolbarConfig, ToolbarConfigError, ToolbarItem, ToolbarLayout, ToolbarMetrics,
    ToolbarSpec,
};

// --- Core re-exports -------------------------------------------------------

pub use rowfit_core::{ResizeAction, ResizeThrottle, ThrottleConfig};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for rowfit.
#[derive(Debug)]
pub enum Error {
    /// Invalid toolbar configuration or description.
    Config(ToolbarConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ToolbarConfigError> for Error {
    fn from(err: ToolbarConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for rowfit APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a toolbar from its JSON short form.
pub fn toolbar_from_json(json: &str) -> Result<Toolbar> {
    Ok(ToolbarSpec::from_json(json)?.build()?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ComponentId, Control, ControlKind, Error, Group, ItemSpec, Result, SizeTree, Toolbar,
        ToolbarConfig, ToolbarItem, ToolbarLayout, ToolbarMetrics,
    };

    pub use crate::{core, layout, widgets};
}

pub use rowfit_core as core;
pub use rowfit_layout as layout;
pub use rowfit_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::error::Error as _;

    #[test]
    fn json_toolbar_lays_out() {
        let mut toolbar = crate::toolbar_from_json(
            r#"{"items": [{"type": "button", "id": 1, "width": 50, "fixed": true}]}"#,
        )
        .unwrap();
        let layout = toolbar.layout(&ToolbarMetrics::new(200.0));
        assert_eq!(layout.main_row(), &[ComponentId(1)]);
    }

    #[test]
    fn config_errors_keep_their_source() {
        let err = crate::toolbar_from_json("[").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("invalid toolbar description"));
    }
}
