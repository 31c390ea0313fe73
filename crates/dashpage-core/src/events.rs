//! Dashboard event definitions
//!
//! Events published on the page event bus when focus transitions occur.
//! Consumers (presence indicators, analytics, the settings body) subscribe
//! through the event-bus collaborator; this crate only defines the payloads.

use chrono::{DateTime, Utc};

use crate::types::PanelId;

/// What happened on the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEventKind {
    /// A panel entered edit mode.
    PanelEditStarted,

    /// The panel left edit mode.
    PanelEditFinished,

    /// A panel entered fullscreen view mode.
    PanelViewStarted,

    /// The panel left fullscreen view mode.
    PanelViewFinished,
}

/// A timestamped event about a single panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardEvent {
    pub kind: DashboardEventKind,
    pub panel_id: PanelId,
    pub at: DateTime<Utc>,
}

impl DashboardEvent {
    pub fn now(kind: DashboardEventKind, panel_id: PanelId) -> Self {
        Self {
            kind,
            panel_id,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_carries_panel_and_kind() {
        let ev = DashboardEvent::now(DashboardEventKind::PanelEditStarted, 7);
        assert_eq!(ev.panel_id, 7);
        assert_eq!(ev.kind, DashboardEventKind::PanelEditStarted);
        assert!(ev.at <= Utc::now());
    }
}
