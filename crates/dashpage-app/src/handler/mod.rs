//! Message handlers (Update in TEA pattern)
//!
//! [`update`] mutates [`PageState`](crate::state::PageState) and returns the
//! side effects to run as a list of [`UpdateAction`]s. The dispatcher
//! executes them against the injected services; the handlers themselves
//! never touch the outside world.

mod update;

pub use update::update;

use dashpage_core::{DashboardEvent, UrlPatch};

use crate::services::{LoadRequest, NotifyKind};

/// Side effects requested by a handler, executed by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Start loading the dashboard addressed by the request.
    LoadDashboard(LoadRequest),

    /// Cancel outstanding template-variable queries.
    CancelVariableQueries,

    /// Arm the deferred live-timer push after dashboard init.
    ScheduleLiveSync { delay_ms: u64 },

    /// Push the current desired live range to the shared scheduler.
    SyncLiveTimer,

    /// Re-resolve the time range from URL state.
    ResolveTimeFromUrl,

    /// Apply a new auto-refresh interval.
    SetAutoRefresh { interval: String },

    /// Tell the variable system which URL variables changed.
    NotifyVariablesChanged {
        dashboard_uid: String,
        changed: Vec<String>,
    },

    /// Update the page title.
    SetPageTitle { title: String },

    /// Publish a panel lifecycle event on the page bus.
    PublishEvent(DashboardEvent),

    /// Toggle the editing-presence indicator.
    SetEditingPresence(bool),

    /// Show a user-facing notification.
    Notify { kind: NotifyKind, message: String },

    /// Rewrite the browser URL (error correction).
    PatchUrl(UrlPatch),

    /// Restore the dashboard surface scroll offset.
    RestoreScroll { offset: u32 },
}

/// Result of a message handler: zero or more actions, in dispatch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateResult {
    pub actions: Vec<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            actions: vec![action],
        }
    }

    pub fn actions(actions: Vec<UpdateAction>) -> Self {
        Self { actions }
    }
}
