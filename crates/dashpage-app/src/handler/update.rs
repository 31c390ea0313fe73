//! Page lifecycle handlers

use dashpage_core::prelude::*;
use dashpage_core::{
    DashboardEvent, DashboardEventKind, DashboardModel, RouteSnapshot, UrlPatch,
};

use crate::focus::{self, FocusDelta};
use crate::message::Message;
use crate::services::{LoadRequest, NotifyKind};
use crate::state::{PagePhase, PageState};

use super::{UpdateAction, UpdateResult};

/// Upper bound on derivation passes per navigation event. Each pass either
/// reaches the fixed point or resolves at least one branch, so settling
/// takes at most a handful of iterations.
const MAX_FOCUS_PASSES: usize = 8;

/// Apply a message to the page state and return the side effects to run.
pub fn update(state: &mut PageState, message: Message) -> UpdateResult {
    match message {
        Message::RouteChanged(route) => handle_route_changed(state, route),
        Message::DashboardLoaded(model) => handle_dashboard_loaded(state, model),
        Message::DashboardLoadFailed { message } => {
            warn!("dashboard load failed: {message}");
            state.phase = PagePhase::LoadFailed;
            state.dashboard = None;
            state.load_error = Some(message);
            UpdateResult::none()
        }
        Message::ScrollChanged(offset) => {
            state.scroll.record(offset);
            UpdateResult::none()
        }
        Message::LiveSyncDue => UpdateResult::action(UpdateAction::SyncLiveTimer),
        Message::Shutdown => {
            let mut actions = teardown(state);
            // Push a final (empty) live range so the shared scheduler stops
            // fast-ticking for this page.
            actions.push(UpdateAction::SyncLiveTimer);
            UpdateResult::actions(actions)
        }
    }
}

/// React to a navigation event.
///
/// A change of dashboard identity (or an explicit reload request) tears the
/// session down and starts a fresh load. Within the same dashboard, only the
/// parameters that actually changed get reactions, and the focus pass runs
/// against the new snapshot.
fn handle_route_changed(state: &mut PageState, route: RouteSnapshot) -> UpdateResult {
    let reload_requested = route.reload_counter > state.last_reload_counter;
    let needs_init = match &state.route {
        None => true,
        Some(prev) => !prev.same_dashboard(&route) || reload_requested,
    };
    if reload_requested {
        state.last_reload_counter = route.reload_counter;
    }

    if needs_init {
        debug!(
            kind = route.kind.as_str(),
            uid = route.uid.as_deref().unwrap_or(""),
            "initializing dashboard session"
        );
        let mut actions = teardown(state);
        state.phase = PagePhase::Loading;
        actions.push(UpdateAction::LoadDashboard(LoadRequest::from_route(&route)));
        state.route = Some(route);
        return UpdateResult::actions(actions);
    }

    let prev = state
        .route
        .take()
        .unwrap_or_default();
    let mut actions = Vec::new();

    if prev.from != route.from || prev.to != route.to {
        actions.push(UpdateAction::ResolveTimeFromUrl);
        actions.push(UpdateAction::SyncLiveTimer);
    }
    if prev.refresh.is_none() {
        if let Some(interval) = &route.refresh {
            actions.push(UpdateAction::SetAutoRefresh {
                interval: interval.clone(),
            });
        }
    }
    let changed = prev.changed_variables(&route);
    if !changed.is_empty() {
        if let Some(dashboard) = &state.dashboard {
            actions.push(UpdateAction::NotifyVariablesChanged {
                dashboard_uid: dashboard.uid.clone(),
                changed,
            });
        }
    }

    actions.extend(apply_focus_pass(state, &route));
    state.route = Some(route);
    UpdateResult::actions(actions)
}

/// Clear the dashboard session. An edit or view in progress gets its finish
/// event so bus subscribers never see a start without a matching end.
fn teardown(state: &mut PageState) -> Vec<UpdateAction> {
    let mut actions = vec![UpdateAction::CancelVariableQueries];
    if let Some(id) = state.focus.edit_panel {
        actions.push(UpdateAction::PublishEvent(DashboardEvent::now(
            DashboardEventKind::PanelEditFinished,
            id,
        )));
        actions.push(UpdateAction::SetEditingPresence(false));
    }
    if let Some(id) = state.focus.view_panel {
        actions.push(UpdateAction::PublishEvent(DashboardEvent::now(
            DashboardEventKind::PanelViewFinished,
            id,
        )));
    }
    state.dashboard = None;
    state.focus = Default::default();
    state.phase = PagePhase::Idle;
    state.load_error = None;
    actions
}

fn handle_dashboard_loaded(state: &mut PageState, model: DashboardModel) -> UpdateResult {
    info!(uid = %model.uid, title = %model.title, "dashboard loaded");
    let mut actions = vec![
        UpdateAction::SetPageTitle {
            title: format!("{} - {}", model.title, state.settings.branding.app_title),
        },
        UpdateAction::ScheduleLiveSync {
            delay_ms: state.settings.lifecycle.live_sync_delay_ms,
        },
    ];
    state.dashboard = Some(model);
    state.phase = PagePhase::Active;
    state.load_error = None;

    if let Some(route) = state.route.take() {
        actions.extend(apply_focus_pass(state, &route));
        state.route = Some(route);
    }
    UpdateResult::actions(actions)
}

/// Re-derive the focus state until it settles, translating each pass's
/// edges into one-shot actions.
///
/// One branch resolving can unlock the next within the same navigation
/// event (edit entry first, then view entry from the same URL), so a single
/// pass is not enough: the adopted state must be a fixed point of its own
/// route, otherwise redelivering an identical snapshot would fire effects.
fn apply_focus_pass(state: &mut PageState, route: &RouteSnapshot) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    for _ in 0..MAX_FOCUS_PASSES {
        let Some(dashboard) = &state.dashboard else {
            break;
        };

        let prev = state.focus.clone();
        let mut next = focus::derive(&prev, dashboard, route, state.scroll.offset());
        if next == prev {
            break;
        }
        let delta = FocusDelta::between(&prev, &next);

        if let Some(offset) = next.pending_scroll_restore.take() {
            actions.push(UpdateAction::RestoreScroll { offset });
        }
        state.focus = next;

        if let Some(id) = delta.entered_edit {
            actions.push(UpdateAction::PublishEvent(DashboardEvent::now(
                DashboardEventKind::PanelEditStarted,
                id,
            )));
            actions.push(UpdateAction::SetEditingPresence(true));
        }
        if let Some(id) = delta.exited_edit {
            actions.push(UpdateAction::PublishEvent(DashboardEvent::now(
                DashboardEventKind::PanelEditFinished,
                id,
            )));
            actions.push(UpdateAction::SetEditingPresence(false));
        }
        if let Some(id) = delta.entered_view {
            if let Some(dashboard) = &mut state.dashboard {
                dashboard.init_panel_view(id);
            }
            actions.push(UpdateAction::PublishEvent(DashboardEvent::now(
                DashboardEventKind::PanelViewStarted,
                id,
            )));
        }
        if let Some(id) = delta.exited_view {
            if let Some(dashboard) = &mut state.dashboard {
                dashboard.exit_panel_view(id);
            }
            actions.push(UpdateAction::PublishEvent(DashboardEvent::now(
                DashboardEventKind::PanelViewFinished,
                id,
            )));
        }

        if delta.panel_not_found_raised {
            let url_id = route
                .edit_panel
                .as_deref()
                .or(route.view_panel.as_deref())
                .unwrap_or("?");
            let err = Error::panel_not_found(url_id);
            warn!("{err}");
            actions.push(UpdateAction::Notify {
                kind: NotifyKind::Error,
                message: err.to_string(),
            });
            if route.allow_url_fix() && state.settings.lifecycle.url_auto_fix {
                actions.push(UpdateAction::PatchUrl(
                    UrlPatch::new().remove("editPanel").remove("viewPanel"),
                ));
            }
        }
        if delta.edit_denied_raised {
            let url_id = route.edit_panel.as_deref().unwrap_or("?");
            let err = Error::edit_access_denied(url_id);
            warn!("{err}");
            actions.push(UpdateAction::Notify {
                kind: NotifyKind::Warning,
                message: err.to_string(),
            });
            if route.allow_url_fix() && state.settings.lifecycle.url_auto_fix {
                actions.push(UpdateAction::PatchUrl(UrlPatch::new().remove("editPanel")));
            }
        }
    }

    actions
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
