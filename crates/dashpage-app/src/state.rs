//! Page state (Model in TEA pattern)

use dashpage_core::{DashboardModel, RouteSnapshot};

use crate::config::Settings;
use crate::focus::FocusState;

/// Lifecycle phase of the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagePhase {
    /// No dashboard requested yet (or torn down).
    #[default]
    Idle,

    /// A load request is in flight.
    Loading,

    /// A dashboard is mounted and focus derivation is live.
    Active,

    /// The load failed; a failure view is rendered in place of the
    /// dashboard and the page is not auto-retried.
    LoadFailed,
}

/// Latest observed scroll offset of the scrollable dashboard surface.
///
/// Fed by the host on every render; read by the reducer when it captures
/// `remember_scroll_top` on a transition in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollTracker {
    offset: u32,
}

impl ScrollTracker {
    pub fn record(&mut self, offset: u32) {
        self.offset = offset;
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}

/// Complete state for one mounted dashboard page session.
#[derive(Debug, Default)]
pub struct PageState {
    /// Current lifecycle phase.
    pub phase: PagePhase,

    /// The active dashboard. Exclusively owned here; the reducer and
    /// tracker only borrow it.
    pub dashboard: Option<DashboardModel>,

    /// Derived focus state, recomputed on every route/dashboard change.
    pub focus: FocusState,

    /// Scroll offset bookkeeping.
    pub scroll: ScrollTracker,

    /// The last adopted route snapshot.
    pub route: Option<RouteSnapshot>,

    /// Last observed route-reload counter. Not part of snapshot equality,
    /// so the controller tracks it itself (default 0).
    pub last_reload_counter: u64,

    /// Loader error message when `phase == LoadFailed`.
    pub load_error: Option<String>,

    /// Application settings from config file.
    pub settings: Settings,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Whether a dashboard session is currently mounted.
    pub fn has_dashboard(&self) -> bool {
        self.dashboard.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle_and_empty() {
        let state = PageState::new();
        assert_eq!(state.phase, PagePhase::Idle);
        assert!(!state.has_dashboard());
        assert!(state.route.is_none());
        assert_eq!(state.last_reload_counter, 0);
        assert_eq!(state.focus, FocusState::default());
    }

    #[test]
    fn test_scroll_tracker_records_latest_offset() {
        let mut tracker = ScrollTracker::default();
        assert_eq!(tracker.offset(), 0);
        tracker.record(120);
        tracker.record(340);
        assert_eq!(tracker.offset(), 340);
    }

    #[test]
    fn test_with_settings_keeps_settings() {
        let mut settings = Settings::default();
        settings.branding.app_title = "Custom".to_string();
        let state = PageState::with_settings(settings);
        assert_eq!(state.settings.branding.app_title, "Custom");
    }
}
