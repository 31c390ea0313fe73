//! # dashpage-core - Core Domain Types
//!
//! Foundation crate for dashpage. Provides the dashboard data model, the
//! URL state reader, error handling, and page event definitions.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, url, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`DashboardModel`] - A loaded dashboard: panel sequence, permission
//!   predicate, active-view-panel bookkeeping
//! - [`Panel`] - One panel entry with numeric id and URL-safe id
//! - [`TimeRange`] - A from/to window in wire form
//!
//! ### URL State Reader (`route`)
//! - [`RouteSnapshot`] - Typed snapshot of one navigation event
//! - [`RouteKind`] - Dashboard route family (db, snapshot, script, public)
//! - [`UrlPatch`] / [`patch_query()`] - Partial query-parameter corrections
//!
//! ### Events (`events`)
//! - [`DashboardEvent`] - Focus-transition events for the page event bus
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use dashpage_core::prelude::*;
//! ```

pub mod error;
pub mod events;
pub mod logging;
pub mod prelude;
pub mod route;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use events::{DashboardEvent, DashboardEventKind};
pub use route::{patch_query, RouteKind, RouteSnapshot, UrlPatch};
pub use types::{DashboardMeta, DashboardModel, Panel, PanelId, TimeRange};
