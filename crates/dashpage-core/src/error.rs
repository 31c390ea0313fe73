//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Focus/Panel Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Panel not found: {url_id}")]
    PanelNotFound { url_id: String },

    #[error("Not allowed to edit panel: {url_id}")]
    EditAccessDenied { url_id: String },

    // ─────────────────────────────────────────────────────────────
    // Dashboard Load Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to load dashboard: {message}")]
    DashboardLoadFailed { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn panel_not_found(url_id: impl Into<String>) -> Self {
        Self::PanelNotFound {
            url_id: url_id.into(),
        }
    }

    pub fn edit_access_denied(url_id: impl Into<String>) -> Self {
        Self::EditAccessDenied {
            url_id: url_id.into(),
        }
    }

    pub fn dashboard_load_failed(message: impl Into<String>) -> Self {
        Self::DashboardLoadFailed {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error.
    ///
    /// Recoverable errors produce a one-shot notification plus a URL
    /// correction and never block rendering of the rest of the dashboard.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::PanelNotFound { .. } | Error::EditAccessDenied { .. } | Error::Config { .. }
        )
    }

    /// Check if this error terminates the current page session.
    ///
    /// A failed dashboard load is rendered as a failure state in place of
    /// the dashboard and is not auto-retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::DashboardLoadFailed { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
