#![forbid(unsafe_code)]

//! Headless controls and responsive containers.
//!
//! Widgets here carry only what layout needs: a measured natural width,
//! a priority tier, a wrap flag and visibility. Containers turn them into
//! sizes, let [`rowfit_layout`] fit them, and write the result back into
//! each widget's [`ControlLayout`]. Drawing stays with the host.
//!
//! # Toolbar
//!
//! ```
//! use rowfit_widgets::{Control, ControlKind, Toolbar, ToolbarConfig, ToolbarMetrics};
//! use rowfit_layout::ComponentId;
//!
//! let mut toolbar = Toolbar::new(ToolbarConfig { item_min_width: 40.0, ..Default::default() })?;
//! toolbar.push(Control::new(ComponentId(1), ControlKind::Button, 80.0))?;
//! toolbar.push(Control::new(ComponentId(2), ControlKind::Button, 80.0).priority(Some(2)))?;
//!
//! let layout = toolbar.layout(&ToolbarMetrics::new(60.0));
//! assert_eq!(layout.main_row(), &[ComponentId(1)]);
//! # Ok::<(), rowfit_widgets::ToolbarConfigError>(())
//! ```

pub mod config;
pub mod control;
pub mod declarative;
pub mod group;
pub mod renderer;
pub mod toolbar;

pub use config::{
    SCROLLBAR_WIDTH, ScrollOrientation, ToolbarConfig, ToolbarConfigError, ToolbarMetrics,
};
pub use control::{Control, ControlKind, ControlLayout, DEFAULT_PRIORITY, RadioGroup, Scale};
pub use declarative::{ControlEntry, GroupEntry, ItemSpecEntry, ToolbarSpec};
pub use group::{DisplayMode, Group, GroupRenderer, ToolbarItem};
pub use renderer::{
    ControlRenderer, ExpandableGroupRenderer, FlatGroupRenderer, MeasureOptions, RendererKind,
    SizeRenderer,
};
pub use toolbar::{Toolbar, ToolbarLayout, ToolbarRenderer};
