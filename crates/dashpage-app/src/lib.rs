//! Dashboard page orchestration
//!
//! State and update logic for one mounted dashboard page, structured as a
//! TEA-style loop:
//!
//! - [`state::PageState`] — the model: dashboard, route, focus, scroll.
//! - [`message::Message`] — inputs: navigation, load results, scroll, timers.
//! - [`handler::update`] — pure-ish transition returning [`handler::UpdateAction`]s.
//! - [`dispatch::run_actions`] — executes actions against injected [`services`].
//!
//! The focus reducer itself lives in [`focus`] and is fully pure; the
//! handlers diff its output to fire each transition side effect exactly once.

pub mod config;
pub mod dispatch;
pub mod focus;
pub mod handler;
pub mod live;
pub mod message;
pub mod services;
pub mod state;

pub use config::Settings;
pub use dispatch::run_actions;
pub use focus::{derive, FocusDelta, FocusState};
pub use handler::{update, UpdateAction, UpdateResult};
pub use message::Message;
pub use services::{
    DashboardLoader, EventBus, LiveScheduler, LoadRequest, LocalDashboardLoader,
    NotificationSink, NotifyKind, PageChrome, Services, TimeRangeService, UrlMutator,
    VariableService,
};
pub use state::{PagePhase, PageState};
