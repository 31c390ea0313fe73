//! URL state reader
//!
//! Parses recognized navigation-URL parts into a typed [`RouteSnapshot`].
//! Parsing never fails: unknown parameters are ignored and malformed values
//! fall back to their absent defaults.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

/// Characters that must be escaped when writing a query component.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'&')
    .add(b'=')
    .add(b'+')
    .add(b'%');

/// Which family of dashboard route a URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteKind {
    /// `/d/{uid}/{slug}` — a regular stored dashboard.
    #[default]
    Db,

    /// `/dashboard/snapshot/{slug}` — an immutable snapshot.
    Snapshot,

    /// `/dashboard/script/{slug}` — a scripted dashboard.
    Script,

    /// `/public/...` — a publicly shared view. URL auto-correction is
    /// disabled on public routes.
    Public,

    /// Anything else. Still parsed so query reactions keep working.
    Unknown,
}

impl RouteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Db => "db",
            RouteKind::Snapshot => "snapshot",
            RouteKind::Script => "script",
            RouteKind::Public => "public",
            RouteKind::Unknown => "unknown",
        }
    }

    /// Route name tag attached to load requests.
    pub fn route_name(&self) -> &'static str {
        match self {
            RouteKind::Public => "public-dashboard",
            _ => "dashboard",
        }
    }
}

/// Typed, immutable view of one navigation event.
///
/// Compared field-by-field against the previous snapshot to decide
/// reactions. `reload_counter` is carried in navigation state rather than
/// the URL and is deliberately excluded from equality — the lifecycle
/// controller tracks the last-seen value itself.
#[derive(Debug, Clone, Default)]
pub struct RouteSnapshot {
    pub kind: RouteKind,
    pub uid: Option<String>,
    pub slug: Option<String>,
    pub folder_id: Option<i64>,

    /// URL-safe id of the panel requested for editing (`editPanel`).
    pub edit_panel: Option<String>,

    /// URL-safe id of the panel requested for fullscreen view (`viewPanel`).
    pub view_panel: Option<String>,

    /// URL-safe id of the panel requested for inspection (`inspect`).
    pub inspect_panel: Option<String>,

    /// Active inspector tab (`tab`).
    pub tab: Option<String>,

    /// Active settings edit view (`editview`).
    pub edit_view: Option<String>,

    pub from: Option<String>,
    pub to: Option<String>,
    pub refresh: Option<String>,

    /// Template-variable parameters (`var-*`), keyed by variable name.
    pub variables: BTreeMap<String, String>,

    /// Route-level reload request counter from navigation state.
    pub reload_counter: u64,
}

impl PartialEq for RouteSnapshot {
    fn eq(&self, other: &Self) -> bool {
        // reload_counter intentionally excluded: a reload request must not
        // make two otherwise-identical snapshots look like a route change.
        self.kind == other.kind
            && self.uid == other.uid
            && self.slug == other.slug
            && self.folder_id == other.folder_id
            && self.edit_panel == other.edit_panel
            && self.view_panel == other.view_panel
            && self.inspect_panel == other.inspect_panel
            && self.tab == other.tab
            && self.edit_view == other.edit_view
            && self.from == other.from
            && self.to == other.to
            && self.refresh == other.refresh
            && self.variables == other.variables
    }
}

impl Eq for RouteSnapshot {}

impl RouteSnapshot {
    /// Parse a navigation URL (absolute or root-relative) into a snapshot.
    ///
    /// Never fails. Unrecognized paths produce [`RouteKind::Unknown`] with
    /// query reactions intact; a completely unparsable input yields the
    /// default snapshot.
    pub fn from_url(raw: &str) -> Self {
        let parsed = Url::parse(raw)
            .or_else(|_| Url::parse("http://localhost").and_then(|base| base.join(raw)));
        let Ok(url) = parsed else {
            tracing::warn!("unparsable navigation url: {raw}");
            return Self::default();
        };

        let mut snapshot = Self::default();
        snapshot.read_path(&url);
        snapshot.read_query(&url);
        snapshot
    }

    /// Builder-style override for the navigation-state reload counter.
    pub fn with_reload_counter(mut self, counter: u64) -> Self {
        self.reload_counter = counter;
        self
    }

    fn read_path(&mut self, url: &Url) {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            ["d", uid, rest @ ..] => {
                self.kind = RouteKind::Db;
                self.uid = Some((*uid).to_string());
                self.slug = rest.first().map(|s| (*s).to_string());
            }
            ["dashboard", "snapshot", slug] => {
                self.kind = RouteKind::Snapshot;
                self.slug = Some((*slug).to_string());
            }
            ["dashboard", "script", slug] => {
                self.kind = RouteKind::Script;
                self.slug = Some((*slug).to_string());
            }
            ["public", rest @ ..] => {
                self.kind = RouteKind::Public;
                self.uid = rest.first().map(|s| (*s).to_string());
            }
            _ => self.kind = RouteKind::Unknown,
        }
    }

    fn read_query(&mut self, url: &Url) {
        for (key, value) in url.query_pairs() {
            let value = value.into_owned();
            match key.as_ref() {
                "editPanel" => self.edit_panel = Some(value),
                "viewPanel" => self.view_panel = Some(value),
                "inspect" => self.inspect_panel = Some(value),
                "tab" => self.tab = Some(value),
                "editview" => self.edit_view = Some(value),
                "from" => self.from = Some(value),
                "to" => self.to = Some(value),
                "refresh" => self.refresh = Some(value),
                "folderId" => self.folder_id = value.parse().ok(),
                key if key.starts_with("var-") => {
                    self.variables
                        .insert(key.trim_start_matches("var-").to_string(), value);
                }
                // Unknown parameters are ignored, not errors.
                _ => {}
            }
        }
    }

    /// Whether two snapshots address the same dashboard.
    ///
    /// Route identity is the (kind, uid-or-slug) tuple; snapshot and script
    /// routes have no uid and are identified by slug.
    pub fn same_dashboard(&self, other: &Self) -> bool {
        self.kind == other.kind
            && match (&self.uid, &other.uid) {
                (Some(a), Some(b)) => a == b,
                (None, None) => self.slug == other.slug,
                _ => false,
            }
    }

    /// Whether the controller may rewrite the browser URL on errors.
    pub fn allow_url_fix(&self) -> bool {
        self.kind != RouteKind::Public
    }

    /// Names of template variables whose values differ between snapshots.
    pub fn changed_variables(&self, other: &Self) -> Vec<String> {
        let mut changed: Vec<String> = Vec::new();
        for name in self.variables.keys().chain(other.variables.keys()) {
            if self.variables.get(name) != other.variables.get(name)
                && !changed.iter().any(|c| c == name)
            {
                changed.push(name.clone());
            }
        }
        changed
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// URL patching
// ─────────────────────────────────────────────────────────────────────────────

/// A partial query-parameter update: set values overwrite, `None` removes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlPatch {
    params: BTreeMap<String, Option<String>>,
}

impl UrlPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a parameter from the URL.
    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.params.insert(key.into(), None);
        self
    }

    /// Set a parameter on the URL.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), Some(value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn get(&self, key: &str) -> Option<&Option<String>> {
        self.params.get(key)
    }

    fn additions<'a>(&'a self, existing: &'a [String]) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.params.iter().filter_map(move |(k, v)| match v {
            Some(v) if !existing.contains(k) => Some((k.as_str(), v.as_str())),
            _ => None,
        })
    }
}

/// Apply a [`UrlPatch`] to a navigation URL, returning the corrected
/// `path?query` form. Unrelated parameters pass through untouched, in their
/// original order; patched-in parameters append at the end.
pub fn patch_query(raw: &str, patch: &UrlPatch) -> String {
    let parsed = Url::parse(raw)
        .or_else(|_| Url::parse("http://localhost").and_then(|base| base.join(raw)));
    let Ok(url) = parsed else {
        return raw.to_string();
    };

    let mut seen: Vec<String> = Vec::new();
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in url.query_pairs() {
        seen.push(key.to_string());
        match patch.get(key.as_ref()) {
            Some(None) => {}
            Some(Some(replacement)) => pairs.push((key.into_owned(), replacement.clone())),
            None => pairs.push((key.into_owned(), value.into_owned())),
        }
    }
    for (key, value) in patch.additions(&seen) {
        pairs.push((key.to_string(), value.to_string()));
    }

    let query = pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, QUERY_COMPONENT),
                utf8_percent_encode(v, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        url.path().to_string()
    } else {
        format!("{}?{}", url.path(), query)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
