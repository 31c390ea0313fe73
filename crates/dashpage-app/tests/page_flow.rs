//! End-to-end page flow: navigation messages in, service calls out.

use std::sync::{Arc, Mutex};

use dashpage_app::{
    run_actions, update, DashboardLoader, EventBus, LiveScheduler, LoadRequest, Message,
    NotificationSink, NotifyKind, PageChrome, PagePhase, PageState, Services, TimeRangeService,
    UrlMutator, VariableService,
};
use dashpage_core::{
    DashboardEvent, DashboardModel, Panel, Result, RouteSnapshot, TimeRange, UrlPatch,
};

type Log = Arc<Mutex<Vec<String>>>;

fn record(log: &Log, line: impl Into<String>) {
    log.lock().unwrap().push(line.into());
}

struct FixtureLoader {
    model: DashboardModel,
    log: Log,
}

impl DashboardLoader for FixtureLoader {
    async fn load(&self, request: LoadRequest) -> Result<DashboardModel> {
        record(
            &self.log,
            format!("load {}", request.uid.as_deref().unwrap_or("?")),
        );
        Ok(self.model.clone())
    }
}

struct FakeTime(Log);
impl TimeRangeService for FakeTime {
    fn current_range(&self) -> TimeRange {
        TimeRange::new("now-6h", "now")
    }
    fn resolve_from_url(&mut self) {
        record(&self.0, "time: resolve_from_url");
    }
    fn set_auto_refresh(&mut self, interval: &str) {
        record(&self.0, format!("time: auto_refresh {interval}"));
    }
}

struct FakeLive(Log);
impl LiveScheduler for FakeLive {
    fn set_live_range(&mut self, range: Option<TimeRange>) {
        record(
            &self.0,
            match range {
                Some(r) => format!("live: {}..{}", r.from, r.to),
                None => "live: off".to_string(),
            },
        );
    }
}

struct FakeVariables(Log);
impl VariableService for FakeVariables {
    fn cancel_pending(&mut self) {
        record(&self.0, "vars: cancel");
    }
    fn notify_url_change(&mut self, dashboard_uid: &str, changed: &[String]) {
        record(
            &self.0,
            format!("vars: changed {} {}", dashboard_uid, changed.join(",")),
        );
    }
}

struct FakeNotifications(Log);
impl NotificationSink for FakeNotifications {
    fn notify(&mut self, kind: NotifyKind, message: &str) {
        record(&self.0, format!("notify {kind:?}: {message}"));
    }
}

struct FakeUrl(Log);
impl UrlMutator for FakeUrl {
    fn patch(&mut self, patch: &UrlPatch) {
        record(&self.0, format!("url: patch {patch:?}"));
    }
}

struct FakeBus(Log);
impl EventBus for FakeBus {
    fn publish(&mut self, event: DashboardEvent) {
        record(&self.0, format!("event: {:?} panel {}", event.kind, event.panel_id));
    }
    fn set_editing_presence(&mut self, editing: bool) {
        record(&self.0, format!("presence: {editing}"));
    }
}

struct FakeChrome(Log);
impl PageChrome for FakeChrome {
    fn set_title(&mut self, title: &str) {
        record(&self.0, format!("title: {title}"));
    }
    fn set_scroll_top(&mut self, offset: u32) {
        record(&self.0, format!("scroll: {offset}"));
    }
}

fn fixture_dashboard() -> DashboardModel {
    let mut dash = DashboardModel::new("abc", "Host Overview");
    let mut p1 = Panel::new(1, "CPU");
    p1.url_id = "p1".to_string();
    dash.panels = vec![p1, Panel::new(2, "Memory")];
    dash.meta.can_edit = true;
    dash
}

fn harness(log: &Log) -> Services<FixtureLoader> {
    Services {
        loader: FixtureLoader {
            model: fixture_dashboard(),
            log: log.clone(),
        },
        time: Box::new(FakeTime(log.clone())),
        live: Box::new(FakeLive(log.clone())),
        variables: Box::new(FakeVariables(log.clone())),
        notifications: Box::new(FakeNotifications(log.clone())),
        url: Box::new(FakeUrl(log.clone())),
        bus: Box::new(FakeBus(log.clone())),
        chrome: Box::new(FakeChrome(log.clone())),
    }
}

/// Feed a message through update + dispatch, recursing on follow-ups.
async fn drive(
    state: &mut PageState,
    services: &mut Services<FixtureLoader>,
    tx: &tokio::sync::mpsc::UnboundedSender<Message>,
    message: Message,
) {
    let mut queue = vec![message];
    while !queue.is_empty() {
        let mut next = Vec::new();
        for msg in queue {
            let result = update(state, msg);
            next.extend(run_actions(result.actions, state, services, tx).await);
        }
        queue = next;
    }
}

fn contains(log: &Log, needle: &str) -> bool {
    log.lock().unwrap().iter().any(|line| line.contains(needle))
}

#[tokio::test]
async fn full_edit_session_round_trip() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut services = harness(&log);
    let mut state = PageState::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    // Initial navigation: load kicks off and completes inline.
    drive(
        &mut state,
        &mut services,
        &tx,
        Message::RouteChanged(RouteSnapshot::from_url("/d/abc/host-overview")),
    )
    .await;
    assert_eq!(state.phase, PagePhase::Active);
    assert!(contains(&log, "load abc"));
    assert!(contains(&log, "title: Host Overview - Dashpage"));

    // The deferred live-timer push arrives through the channel.
    let deferred = tokio::time::timeout(std::time::Duration::from_secs(2), rx.recv())
        .await
        .expect("live sync never came due")
        .expect("channel closed");
    drive(&mut state, &mut services, &tx, deferred).await;
    assert!(contains(&log, "live: off"));

    // Scroll down, then enter edit via the URL.
    drive(&mut state, &mut services, &tx, Message::ScrollChanged(420)).await;
    drive(
        &mut state,
        &mut services,
        &tx,
        Message::RouteChanged(RouteSnapshot::from_url("/d/abc/host-overview?editPanel=p1")),
    )
    .await;
    assert_eq!(state.focus.edit_panel, Some(1));
    assert!(contains(&log, "event: PanelEditStarted panel 1"));
    assert!(contains(&log, "presence: true"));

    // Leave edit: scroll restores to where the user was.
    drive(
        &mut state,
        &mut services,
        &tx,
        Message::RouteChanged(RouteSnapshot::from_url("/d/abc/host-overview")),
    )
    .await;
    assert!(state.focus.edit_panel.is_none());
    assert!(contains(&log, "event: PanelEditFinished panel 1"));
    assert!(contains(&log, "presence: false"));
    assert!(contains(&log, "scroll: 420"));

    // Unmount releases the variable system and the live timer.
    drive(&mut state, &mut services, &tx, Message::Shutdown).await;
    assert_eq!(state.phase, PagePhase::Idle);
    assert!(contains(&log, "vars: cancel"));
}

#[tokio::test]
async fn bad_edit_param_notifies_and_corrects_url() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut services = harness(&log);
    let mut state = PageState::new();
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();

    drive(
        &mut state,
        &mut services,
        &tx,
        Message::RouteChanged(RouteSnapshot::from_url("/d/abc/host-overview")),
    )
    .await;
    drive(
        &mut state,
        &mut services,
        &tx,
        Message::RouteChanged(RouteSnapshot::from_url("/d/abc/host-overview?editPanel=p9")),
    )
    .await;

    assert!(contains(&log, "notify Error: Panel not found: p9"));
    assert!(contains(&log, "url: patch"));
    // Rendering continues: the dashboard stays mounted.
    assert_eq!(state.phase, PagePhase::Active);
    assert!(state.has_dashboard());
}

#[tokio::test]
async fn switching_dashboards_reloads_and_cancels_variables() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut services = harness(&log);
    let mut state = PageState::new();
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();

    drive(
        &mut state,
        &mut services,
        &tx,
        Message::RouteChanged(RouteSnapshot::from_url("/d/abc/host-overview")),
    )
    .await;
    log.lock().unwrap().clear();

    drive(
        &mut state,
        &mut services,
        &tx,
        Message::RouteChanged(RouteSnapshot::from_url("/d/other/second")),
    )
    .await;
    assert!(contains(&log, "vars: cancel"));
    assert!(contains(&log, "load other"));
    assert_eq!(state.phase, PagePhase::Active);
}
