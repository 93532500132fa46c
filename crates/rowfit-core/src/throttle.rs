#![forbid(unsafe_code)]

//! Latest-wins throttle for container resize triggers.
//!
//! A toolbar re-runs its layout pass whenever its width changes. Hosts can
//! deliver dozens of resize notifications per second while a window is being
//! dragged, so triggers are coalesced here before they reach the layout
//! engine:
//!
//! - The first trigger after a quiet period is applied immediately.
//! - Triggers arriving inside the interval are held; only the most recent
//!   width survives.
//! - The held width is released by [`ResizeThrottle::tick`] once the interval
//!   has elapsed since the last applied pass.
//!
//! Time is always supplied by the caller, which keeps decisions
//! deterministic under test.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use rowfit_core::throttle::{ResizeAction, ResizeThrottle, ThrottleConfig};
//!
//! let mut throttle = ResizeThrottle::new(ThrottleConfig::default());
//! let t0 = Instant::now();
//!
//! assert_eq!(throttle.handle_resize(640.0, t0), ResizeAction::Apply(640.0));
//! assert_eq!(throttle.handle_resize(600.0, t0 + Duration::from_millis(10)), ResizeAction::Hold);
//! assert_eq!(throttle.handle_resize(580.0, t0 + Duration::from_millis(20)), ResizeAction::Hold);
//! assert_eq!(throttle.tick(t0 + Duration::from_millis(150)), ResizeAction::Apply(580.0));
//! ```

use std::time::{Duration, Instant};

/// Default throttle interval, matching the classic 150 ms toolbar resize delay.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(150);

/// Configuration for [`ResizeThrottle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Minimum time between two applied layout passes.
    pub interval: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// What the caller should do after feeding an event to the throttle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeAction {
    /// Nothing to do right now.
    Hold,
    /// Run a layout pass for this width.
    Apply(f64),
}

/// Counters describing throttle behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThrottleStats {
    /// Resize triggers received.
    pub events: u64,
    /// Layout passes released.
    pub applies: u64,
    /// Pending widths overwritten by a newer trigger.
    pub coalesced: u64,
}

/// Coalesces resize triggers so at most one layout pass runs per interval.
#[derive(Debug, Clone)]
pub struct ResizeThrottle {
    config: ThrottleConfig,
    last_apply: Option<Instant>,
    pending: Option<f64>,
    stats: ThrottleStats,
}

impl ResizeThrottle {
    /// Create a throttle with the given configuration.
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            last_apply: None,
            pending: None,
            stats: ThrottleStats::default(),
        }
    }

    /// Feed a resize trigger carrying the container's new width.
    pub fn handle_resize(&mut self, width: f64, now: Instant) -> ResizeAction {
        self.stats.events += 1;

        if self.is_ready(now) {
            self.pending = None;
            return self.apply(width, now);
        }

        if self.pending.replace(width).is_some() {
            self.stats.coalesced += 1;
        }
        crate::trace!(width, "resize held");
        ResizeAction::Hold
    }

    /// Release the held width once the interval has elapsed.
    pub fn tick(&mut self, now: Instant) -> ResizeAction {
        match self.pending {
            Some(width) if self.is_ready(now) => {
                self.pending = None;
                self.apply(width, now)
            }
            _ => ResizeAction::Hold,
        }
    }

    /// Time left until a held width can be released.
    ///
    /// Returns `None` when nothing is pending.
    #[must_use]
    pub fn time_until_release(&self, now: Instant) -> Option<Duration> {
        self.pending?;
        let Some(last) = self.last_apply else {
            return Some(Duration::ZERO);
        };
        let elapsed = now.checked_duration_since(last).unwrap_or(Duration::ZERO);
        Some(self.config.interval.saturating_sub(elapsed))
    }

    /// Whether a width is waiting to be released.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any held width. Used when the container is torn down.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Throttle counters.
    #[must_use]
    pub fn stats(&self) -> ThrottleStats {
        self.stats
    }

    fn is_ready(&self, now: Instant) -> bool {
        match self.last_apply {
            None => true,
            Some(last) => {
                now.checked_duration_since(last).unwrap_or(Duration::ZERO) >= self.config.interval
            }
        }
    }

    fn apply(&mut self, width: f64, now: Instant) -> ResizeAction {
        self.last_apply = Some(now);
        self.stats.applies += 1;
        crate::debug!(width, "resize released");
        ResizeAction::Apply(width)
    }
}

impl Default for ResizeThrottle {
    fn default() -> Self {
        Self::new(ThrottleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_resize_applies_immediately() {
        let mut throttle = ResizeThrottle::default();
        let t0 = Instant::now();
        assert_eq!(throttle.handle_resize(320.0, t0), ResizeAction::Apply(320.0));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn burst_keeps_only_latest_width() {
        let mut throttle = ResizeThrottle::default();
        let t0 = Instant::now();
        throttle.handle_resize(500.0, t0);
        for (i, w) in [490.0, 480.0, 470.0].into_iter().enumerate() {
            let at = t0 + ms(10 * (i as u64 + 1));
            assert_eq!(throttle.handle_resize(w, at), ResizeAction::Hold);
        }
        assert_eq!(throttle.tick(t0 + ms(100)), ResizeAction::Hold);
        assert_eq!(throttle.tick(t0 + ms(150)), ResizeAction::Apply(470.0));
        assert_eq!(throttle.tick(t0 + ms(400)), ResizeAction::Hold);

        let stats = throttle.stats();
        assert_eq!(stats.events, 4);
        assert_eq!(stats.applies, 2);
        assert_eq!(stats.coalesced, 2);
    }

    #[test]
    fn resize_after_quiet_period_applies() {
        let mut throttle = ResizeThrottle::default();
        let t0 = Instant::now();
        throttle.handle_resize(500.0, t0);
        assert_eq!(
            throttle.handle_resize(300.0, t0 + ms(200)),
            ResizeAction::Apply(300.0)
        );
    }

    #[test]
    fn time_until_release_counts_down() {
        let mut throttle = ResizeThrottle::new(ThrottleConfig { interval: ms(100) });
        let t0 = Instant::now();
        assert_eq!(throttle.time_until_release(t0), None);
        throttle.handle_resize(10.0, t0);
        throttle.handle_resize(20.0, t0 + ms(30));
        assert_eq!(throttle.time_until_release(t0 + ms(30)), Some(ms(70)));
        assert_eq!(throttle.time_until_release(t0 + ms(500)), Some(Duration::ZERO));
    }

    #[test]
    fn cancel_drops_pending_width() {
        let mut throttle = ResizeThrottle::default();
        let t0 = Instant::now();
        throttle.handle_resize(10.0, t0);
        throttle.handle_resize(20.0, t0 + ms(1));
        throttle.cancel();
        assert_eq!(throttle.tick(t0 + ms(1000)), ResizeAction::Hold);
    }

    proptest! {
        #[test]
        fn last_width_in_burst_is_never_lost(
            widths in proptest::collection::vec(0.0f64..4000.0, 1..40),
        ) {
            let mut throttle = ResizeThrottle::default();
            let t0 = Instant::now();
            let mut last_applied = None;
            for (i, w) in widths.iter().enumerate() {
                if let ResizeAction::Apply(a) = throttle.handle_resize(*w, t0 + ms(i as u64)) {
                    last_applied = Some(a);
                }
            }
            if let ResizeAction::Apply(a) = throttle.tick(t0 + ms(10_000)) {
                last_applied = Some(a);
            }
            prop_assert_eq!(last_applied, widths.last().copied());
        }
    }
}
