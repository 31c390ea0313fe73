//! Message types for the page (TEA pattern)

use dashpage_core::{DashboardModel, RouteSnapshot};

/// All possible messages driving the page update loop.
#[derive(Debug, Clone)]
pub enum Message {
    /// The navigation URL changed (includes the initial navigation).
    RouteChanged(RouteSnapshot),

    /// The dashboard loader finished successfully.
    DashboardLoaded(DashboardModel),

    /// The dashboard loader failed; the page renders a failure view.
    DashboardLoadFailed { message: String },

    /// The host observed a new scroll offset on the dashboard surface.
    ScrollChanged(u32),

    /// The deferred live-timer push came due.
    LiveSyncDue,

    /// The page is being unmounted.
    Shutdown,
}
