//! Core domain types for the dashboard page

use serde::{Deserialize, Serialize};

/// Stable in-memory numeric identifier of a panel.
///
/// Not guaranteed to be URL-stable across repeated edits — library panels
/// embed a secondary identifier — so URLs reference panels by their
/// [`Panel::url_id`] instead.
pub type PanelId = i64;

/// A single panel entry in a dashboard's ordered panel sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// In-memory numeric id.
    pub id: PanelId,

    /// URL-safe identifier, stable across URL round-trips.
    ///
    /// Defaults to the stringified numeric id; library panels carry their
    /// library uid here instead.
    #[serde(default)]
    pub url_id: String,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Panel plugin type (e.g. "timeseries", "row"). Row panels are layout
    /// containers and can never be edited as panels.
    #[serde(default = "Panel::default_type", rename = "type")]
    pub panel_type: String,
}

impl Panel {
    pub fn new(id: PanelId, title: impl Into<String>) -> Self {
        Self {
            id,
            url_id: id.to_string(),
            title: title.into(),
            panel_type: Self::default_type(),
        }
    }

    fn default_type() -> String {
        "timeseries".to_string()
    }

    /// Row panels are layout containers, not editable panels.
    pub fn is_row(&self) -> bool {
        self.panel_type == "row"
    }
}

/// Access metadata attached to a loaded dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMeta {
    /// Whether the current user may edit panels on this dashboard.
    #[serde(default)]
    pub can_edit: bool,

    /// Folder the dashboard lives in, when any.
    #[serde(default)]
    pub folder_id: Option<i64>,
}

/// A loaded dashboard instance.
///
/// Exclusively owned by the lifecycle controller for its active lifetime;
/// the reducer and scroll tracker only look it up by shared reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardModel {
    pub uid: String,

    #[serde(default)]
    pub title: String,

    /// Ordered panel sequence.
    #[serde(default)]
    pub panels: Vec<Panel>,

    /// Whether the dashboard has live-update (fast auto-refresh) enabled.
    #[serde(default)]
    pub live_now: bool,

    #[serde(default)]
    pub meta: DashboardMeta,

    /// Active view panel bookkeeping, maintained through
    /// [`Self::init_panel_view`] / [`Self::exit_panel_view`].
    #[serde(skip)]
    pub active_view_panel: Option<PanelId>,
}

impl DashboardModel {
    pub fn new(uid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            title: title.into(),
            panels: Vec::new(),
            live_now: false,
            meta: DashboardMeta::default(),
            active_view_panel: None,
        }
    }

    /// Deserialize a dashboard from JSON and normalize panel url ids.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let mut model: Self = serde_json::from_str(json)?;
        model.normalize();
        Ok(model)
    }

    /// Fill in defaulted fields after deserialization.
    ///
    /// Panels without an explicit `url_id` get their stringified numeric id.
    pub fn normalize(&mut self) {
        for panel in &mut self.panels {
            if panel.url_id.is_empty() {
                panel.url_id = panel.id.to_string();
            }
        }
    }

    /// Look up a panel by its URL-safe identifier.
    pub fn panel_by_url_id(&self, url_id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.url_id == url_id)
    }

    /// Look up a panel by its numeric id.
    pub fn panel_by_id(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Permission predicate: may the current user edit this panel?
    pub fn can_edit_panel(&self, panel: &Panel) -> bool {
        self.meta.can_edit && !panel.is_row()
    }

    /// View-entry side effect: mark the panel as the active view panel.
    pub fn init_panel_view(&mut self, id: PanelId) {
        self.active_view_panel = Some(id);
    }

    /// View-exit side effect: clear the active view panel if it matches.
    pub fn exit_panel_view(&mut self, id: PanelId) {
        if self.active_view_panel == Some(id) {
            self.active_view_panel = None;
        }
    }
}

/// A time window, kept in wire form (e.g. `"now-6h"` / `"now"`).
///
/// Resolution of relative expressions is the time-range collaborator's
/// responsibility; this core only moves the values around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

impl TimeRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
