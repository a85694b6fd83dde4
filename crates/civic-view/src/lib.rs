//! civicmap views
//!
//! Read-only projections over [`civic_store::ReportSnapshot`]s plus the UI
//! state that decides what is shown. Nothing here mutates a report.
//!
//! # Core Concepts
//!
//! - [`CategoryFilter`] / [`FilterView`]: memoized category projection
//! - [`UiState`]: sidebar, creation form, pending map click, selection by id
//! - [`MarkerView`], [`SidebarView`], [`DetailView`]: what each component renders
//! - [`ReportDraft`]: creation form input and validation
//!
//! # Architecture
//!
//! ```text
//! ReportStore ──snapshot──► FilterView ──► markers / sidebar list
//!                 │
//!                 └──────► UiState::resolve_selection(id) ──► DetailView
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod detail;
pub mod filter;
pub mod form;
pub mod map;
pub mod sidebar;
pub mod ui;

pub use detail::DetailView;
pub use filter::{filter, CategoryFilter, FilterView};
pub use form::{normalize_comment, Axis, FormError, FormErrors, ReportDraft};
pub use map::{initial_center, markers, GeolocationError, GeolocationOptions, MarkerView};
pub use sidebar::{FilterOption, ReportSummary, SidebarView};
pub use ui::{FormState, UiIntent, UiState, Visibility};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
