//! Focus state derivation
//!
//! The pure core of the page: given the previous focus state, the loaded
//! dashboard, and the latest route snapshot, compute the next focus state.
//! [`derive`] performs no side effects and is safe to call repeatedly with
//! identical inputs; the lifecycle controller diffs consecutive states with
//! [`FocusDelta`] and dispatches one-shot side effects on the edges.

use dashpage_core::{DashboardModel, PanelId, RouteSnapshot};

/// Which panel (if any) is foregrounded for editing or viewing, plus the
/// error flags and scroll bookkeeping that ride along with transitions.
///
/// Invariants:
/// - `edit_panel` and `view_panel` never reference the same panel.
/// - At most one of `panel_not_found` / `edit_access_denied` is true.
/// - `remember_scroll_top` is only meaningful right after a transition in;
///   `pending_scroll_restore` is a one-shot instruction consumed by the
///   controller after each transition out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    pub edit_panel: Option<PanelId>,
    pub view_panel: Option<PanelId>,
    pub panel_not_found: bool,
    pub edit_access_denied: bool,
    pub remember_scroll_top: u32,
    pub pending_scroll_restore: Option<u32>,
}

/// Derive the next focus state from the previous one and the inputs.
///
/// Branches are evaluated in fixed priority order and each is terminal for
/// the call: edit entry, edit exit, view entry, view exit, error clearing.
/// Edit precedence over view means a malformed URL carrying both parameters
/// resolves the edit branch first; the view branch resolves on the next
/// pass once the edit parameter settles.
pub fn derive(
    prev: &FocusState,
    dashboard: &DashboardModel,
    route: &RouteSnapshot,
    scroll_top: u32,
) -> FocusState {
    // 1. Enter edit
    if prev.edit_panel.is_none() {
        if let Some(url_id) = &route.edit_panel {
            let mut next = prev.clone();
            match dashboard.panel_by_url_id(url_id) {
                None => {
                    next.panel_not_found = true;
                    next.edit_access_denied = false;
                }
                Some(panel) if !dashboard.can_edit_panel(panel) => {
                    next.edit_access_denied = true;
                    next.panel_not_found = false;
                }
                Some(panel) => {
                    next.edit_panel = Some(panel.id);
                    next.remember_scroll_top = scroll_top;
                    next.panel_not_found = false;
                    next.edit_access_denied = false;
                }
            }
            return next;
        }
    }

    // 2. Leave edit
    if prev.edit_panel.is_some() && route.edit_panel.is_none() {
        let mut next = prev.clone();
        next.edit_panel = None;
        next.pending_scroll_restore = Some(prev.remember_scroll_top);
        return next;
    }

    // 3. Enter view (only reached when neither edit branch fired)
    if prev.view_panel.is_none() {
        if let Some(url_id) = &route.view_panel {
            let mut next = prev.clone();
            match dashboard.panel_by_url_id(url_id) {
                None => {
                    // Preserves a concurrent edit-not-found signal; a missing
                    // view panel alone does not raise the flag.
                    next.panel_not_found = route.edit_panel.is_some();
                }
                Some(panel) if prev.edit_panel == Some(panel.id) => {
                    // A panel can't be viewed and edited at the same time.
                    return prev.clone();
                }
                Some(panel) => {
                    next.view_panel = Some(panel.id);
                    next.remember_scroll_top = scroll_top;
                    next.pending_scroll_restore = Some(0);
                }
            }
            return next;
        }
    }

    // 4. Leave view
    if prev.view_panel.is_some() && route.view_panel.is_none() {
        let mut next = prev.clone();
        next.view_panel = None;
        next.pending_scroll_restore = Some(prev.remember_scroll_top);
        return next;
    }

    // 5. Error clearing
    if prev.panel_not_found || (prev.edit_access_denied && route.edit_panel.is_none()) {
        let mut next = prev.clone();
        next.panel_not_found = false;
        next.edit_access_denied = false;
        return next;
    }

    prev.clone()
}

/// Edge detection between two consecutive focus states.
///
/// The reducer only decides *that* a transition occurred; the controller
/// uses this delta to run each one-shot side effect exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusDelta {
    pub entered_edit: Option<PanelId>,
    pub exited_edit: Option<PanelId>,
    pub entered_view: Option<PanelId>,
    pub exited_view: Option<PanelId>,
    pub panel_not_found_raised: bool,
    pub edit_denied_raised: bool,
}

impl FocusDelta {
    pub fn between(prev: &FocusState, next: &FocusState) -> Self {
        Self {
            entered_edit: match (prev.edit_panel, next.edit_panel) {
                (None, Some(id)) => Some(id),
                _ => None,
            },
            exited_edit: match (prev.edit_panel, next.edit_panel) {
                (Some(id), None) => Some(id),
                _ => None,
            },
            entered_view: match (prev.view_panel, next.view_panel) {
                (None, Some(id)) => Some(id),
                _ => None,
            },
            exited_view: match (prev.view_panel, next.view_panel) {
                (Some(id), None) => Some(id),
                _ => None,
            },
            panel_not_found_raised: !prev.panel_not_found && next.panel_not_found,
            edit_denied_raised: !prev.edit_access_denied && next.edit_access_denied,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
