//! Action dispatcher
//!
//! Executes [`UpdateAction`]s against the injected services. Follow-up
//! messages (load results) are returned to the caller for the next update
//! pass; deferred work (the live-sync delay) is spawned and reports back
//! through the message channel.

use tokio::sync::mpsc::UnboundedSender;

use dashpage_core::prelude::*;

use crate::handler::UpdateAction;
use crate::live;
use crate::message::Message;
use crate::services::{DashboardLoader, Services};
use crate::state::PageState;

/// Run a batch of actions in order, returning any follow-up messages.
pub async fn run_actions<L: DashboardLoader>(
    actions: Vec<UpdateAction>,
    state: &PageState,
    services: &mut Services<L>,
    tx: &UnboundedSender<Message>,
) -> Vec<Message> {
    let mut follow_ups = Vec::new();
    for action in actions {
        if let Some(message) = run_action(action, state, services, tx).await {
            follow_ups.push(message);
        }
    }
    follow_ups
}

async fn run_action<L: DashboardLoader>(
    action: UpdateAction,
    state: &PageState,
    services: &mut Services<L>,
    tx: &UnboundedSender<Message>,
) -> Option<Message> {
    match action {
        UpdateAction::LoadDashboard(request) => {
            debug!(route = request.route_name, "loading dashboard");
            match services.loader.load(request).await {
                Ok(model) => Some(Message::DashboardLoaded(model)),
                Err(err) => Some(Message::DashboardLoadFailed {
                    message: err.to_string(),
                }),
            }
        }
        UpdateAction::CancelVariableQueries => {
            services.variables.cancel_pending();
            None
        }
        UpdateAction::ScheduleLiveSync { delay_ms } => {
            let tx = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                // Receiver gone means the page already shut down.
                let _ = tx.send(Message::LiveSyncDue);
            });
            None
        }
        UpdateAction::SyncLiveTimer => {
            let range = live::desired_live_range(state.dashboard.as_ref(), services.time.as_ref());
            services.live.set_live_range(range);
            None
        }
        UpdateAction::ResolveTimeFromUrl => {
            services.time.resolve_from_url();
            None
        }
        UpdateAction::SetAutoRefresh { interval } => {
            services.time.set_auto_refresh(&interval);
            None
        }
        UpdateAction::NotifyVariablesChanged {
            dashboard_uid,
            changed,
        } => {
            services.variables.notify_url_change(&dashboard_uid, &changed);
            None
        }
        UpdateAction::SetPageTitle { title } => {
            services.chrome.set_title(&title);
            None
        }
        UpdateAction::PublishEvent(event) => {
            services.bus.publish(event);
            None
        }
        UpdateAction::SetEditingPresence(editing) => {
            services.bus.set_editing_presence(editing);
            None
        }
        UpdateAction::Notify { kind, message } => {
            services.notifications.notify(kind, &message);
            None
        }
        UpdateAction::PatchUrl(patch) => {
            services.url.patch(&patch);
            None
        }
        UpdateAction::RestoreScroll { offset } => {
            services.chrome.set_scroll_top(offset);
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
