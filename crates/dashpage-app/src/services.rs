//! Collaborator service traits
//!
//! The page core talks to the outside world only through these interfaces.
//! Hosts inject concrete implementations via [`Services`]; tests inject
//! mocks or recording fakes. The dashboard loader is the only asynchronous
//! collaborator.

use dashpage_core::prelude::*;
use dashpage_core::{DashboardEvent, DashboardModel, RouteKind, RouteSnapshot, TimeRange, UrlPatch};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Warning,
    Error,
}

/// A dashboard load request, tagged with its originating route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub uid: Option<String>,
    pub slug: Option<String>,
    pub kind: RouteKind,
    pub folder_id: Option<i64>,

    /// Name of the route that requested the load.
    pub route_name: &'static str,

    /// Whether URL auto-correction is permitted for this session.
    /// Disabled for publicly shared views.
    pub allow_url_fix: bool,
}

impl LoadRequest {
    pub fn from_route(route: &RouteSnapshot) -> Self {
        Self {
            uid: route.uid.clone(),
            slug: route.slug.clone(),
            kind: route.kind,
            folder_id: route.folder_id,
            route_name: route.kind.route_name(),
            allow_url_fix: route.allow_url_fix(),
        }
    }
}

/// Asynchronous dashboard load operation.
#[trait_variant::make(DashboardLoader: Send)]
pub trait LocalDashboardLoader {
    /// Load a dashboard by route identity. Errors surface as
    /// [`Message::DashboardLoadFailed`](crate::Message::DashboardLoadFailed).
    async fn load(&self, request: LoadRequest) -> Result<DashboardModel>;
}

/// Time-range resolution and auto-refresh control.
#[cfg_attr(test, mockall::automock)]
pub trait TimeRangeService {
    /// Resolve the current effective time range.
    fn current_range(&self) -> TimeRange;

    /// Re-resolve the range from the current URL state.
    fn resolve_from_url(&mut self);

    /// Apply a new auto-refresh interval (wire form, e.g. `"30s"`).
    fn set_auto_refresh(&mut self, interval: &str);
}

/// Shared live-update scheduler.
#[cfg_attr(test, mockall::automock)]
pub trait LiveScheduler {
    /// Push the live range; `None` disables fast ticks.
    fn set_live_range(&mut self, range: Option<TimeRange>);
}

/// Template-variable system.
#[cfg_attr(test, mockall::automock)]
pub trait VariableService {
    /// Cancel outstanding variable-resolution work.
    fn cancel_pending(&mut self);

    /// Variable-relevant URL parameters changed.
    fn notify_url_change(&mut self, dashboard_uid: &str, changed: &[String]);
}

/// User-facing notification sink.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    fn notify(&mut self, kind: NotifyKind, message: &str);
}

/// Browser-URL mutator used for error corrections.
#[cfg_attr(test, mockall::automock)]
pub trait UrlMutator {
    fn patch(&mut self, patch: &UrlPatch);
}

/// Page event bus plus editing-presence indicator.
#[cfg_attr(test, mockall::automock)]
pub trait EventBus {
    fn publish(&mut self, event: DashboardEvent);

    fn set_editing_presence(&mut self, editing: bool);
}

/// Externally-visible page surface: title and scroll position.
#[cfg_attr(test, mockall::automock)]
pub trait PageChrome {
    fn set_title(&mut self, title: &str);

    fn set_scroll_top(&mut self, offset: u32);
}

/// The full collaborator set injected into the dispatcher.
pub struct Services<L: DashboardLoader> {
    pub loader: L,
    pub time: Box<dyn TimeRangeService + Send>,
    pub live: Box<dyn LiveScheduler + Send>,
    pub variables: Box<dyn VariableService + Send>,
    pub notifications: Box<dyn NotificationSink + Send>,
    pub url: Box<dyn UrlMutator + Send>,
    pub bus: Box<dyn EventBus + Send>,
    pub chrome: Box<dyn PageChrome + Send>,
}
