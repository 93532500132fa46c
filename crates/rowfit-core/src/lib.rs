#![forbid(unsafe_code)]

//! Core: logging macros and resize throttling for rowfit containers.

pub mod logging;
pub mod throttle;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};

pub use throttle::{ResizeAction, ResizeThrottle, ThrottleConfig, ThrottleStats};
