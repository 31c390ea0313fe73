//! dashpage - dashboard navigation replay tool
//!
//! Feeds a sequence of navigation URLs through the page lifecycle against a
//! dashboard JSON fixture and prints every resulting service call. Useful
//! for inspecting how a given URL history drives focus transitions.

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc::{self, UnboundedSender};

use dashpage_app::{
    run_actions, update, DashboardLoader, EventBus, LiveScheduler, LoadRequest, Message,
    NotificationSink, NotifyKind, PageChrome, PageState, Services, Settings, TimeRangeService,
    UrlMutator, VariableService,
};
use dashpage_core::{patch_query, DashboardEvent, DashboardModel, Result, TimeRange, UrlPatch};
use dashpage_core::{logging, RouteSnapshot};

/// Replay dashboard navigation URLs and print the resulting page behavior
#[derive(Parser, Debug)]
#[command(name = "dashpage")]
#[command(about = "Replay dashboard navigation URLs against a JSON fixture", long_about = None)]
struct Args {
    /// Path to a dashboard JSON fixture
    #[arg(long, value_name = "FILE")]
    dashboard: PathBuf,

    /// Navigation URLs to replay, in order
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Loader that serves the fixture for every request.
struct FixtureLoader {
    model: DashboardModel,
}

impl DashboardLoader for FixtureLoader {
    async fn load(&self, request: LoadRequest) -> Result<DashboardModel> {
        println!(
            "  -> load {} ({})",
            request.uid.or(request.slug).unwrap_or_default(),
            request.route_name
        );
        Ok(self.model.clone())
    }
}

struct ConsoleTime;
impl TimeRangeService for ConsoleTime {
    fn current_range(&self) -> TimeRange {
        TimeRange::new("now-6h", "now")
    }
    fn resolve_from_url(&mut self) {
        println!("  -> time range re-resolved from url");
    }
    fn set_auto_refresh(&mut self, interval: &str) {
        println!("  -> auto refresh {interval}");
    }
}

struct ConsoleLive;
impl LiveScheduler for ConsoleLive {
    fn set_live_range(&mut self, range: Option<TimeRange>) {
        match range {
            Some(r) => println!("  -> live timer {} .. {}", r.from, r.to),
            None => println!("  -> live timer released"),
        }
    }
}

struct ConsoleVariables;
impl VariableService for ConsoleVariables {
    fn cancel_pending(&mut self) {
        println!("  -> variable queries cancelled");
    }
    fn notify_url_change(&mut self, dashboard_uid: &str, changed: &[String]) {
        println!("  -> variables changed on {dashboard_uid}: {}", changed.join(", "));
    }
}

struct ConsoleNotifications;
impl NotificationSink for ConsoleNotifications {
    fn notify(&mut self, kind: NotifyKind, message: &str) {
        println!("  !! {kind:?}: {message}");
    }
}

/// Applies URL corrections to the replay's notion of the current URL.
struct ReplayUrl {
    current: String,
}

impl UrlMutator for ReplayUrl {
    fn patch(&mut self, patch: &UrlPatch) {
        self.current = patch_query(&self.current, patch);
        println!("  -> url corrected to {}", self.current);
    }
}

struct ConsoleBus;
impl EventBus for ConsoleBus {
    fn publish(&mut self, event: DashboardEvent) {
        println!("  -> event {:?} panel {}", event.kind, event.panel_id);
    }
    fn set_editing_presence(&mut self, editing: bool) {
        println!("  -> editing presence {editing}");
    }
}

struct ConsoleChrome;
impl PageChrome for ConsoleChrome {
    fn set_title(&mut self, title: &str) {
        println!("  -> title \"{title}\"");
    }
    fn set_scroll_top(&mut self, offset: u32) {
        println!("  -> scroll to {offset}");
    }
}

/// One update + dispatch pass, recursing on follow-up messages.
async fn drive(
    state: &mut PageState,
    services: &mut Services<FixtureLoader>,
    tx: &UnboundedSender<Message>,
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

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    let fixture = std::fs::read_to_string(&args.dashboard)?;
    let model = DashboardModel::from_json(&fixture)?;
    tracing::info!(uid = %model.uid, "replaying against fixture dashboard");

    let mut services = Services {
        loader: FixtureLoader { model },
        time: Box::new(ConsoleTime),
        live: Box::new(ConsoleLive),
        variables: Box::new(ConsoleVariables),
        notifications: Box::new(ConsoleNotifications),
        url: Box::new(ReplayUrl {
            current: args.urls[0].clone(),
        }),
        bus: Box::new(ConsoleBus),
        chrome: Box::new(ConsoleChrome),
    };
    let mut state = PageState::with_settings(settings);
    let (tx, mut rx) = mpsc::unbounded_channel();

    for url in &args.urls {
        println!("{url}");
        drive(
            &mut state,
            &mut services,
            &tx,
            Message::RouteChanged(RouteSnapshot::from_url(url)),
        )
        .await;

        // Pick up anything that came due in the meantime, such as the
        // deferred live-timer push after a load.
        while let Ok(Some(deferred)) =
            tokio::time::timeout(std::time::Duration::from_millis(500), rx.recv()).await
        {
            drive(&mut state, &mut services, &tx, deferred).await;
        }
    }

    println!("(unmount)");
    drive(&mut state, &mut services, &tx, Message::Shutdown).await;

    Ok(())
}
