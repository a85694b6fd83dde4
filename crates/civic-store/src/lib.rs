//! civicmap Report Store
//!
//! The single source of truth for the report collection.
//!
//! # Core Concepts
//!
//! - [`ReportStore`]: owns the collection and exposes the only mutations
//!   (`submit`, `toggle_support`, `add_comment`)
//! - [`ReportSnapshot`]: immutable, cheaply cloned view handed to everything
//!   else
//! - [`Mutation`]: outcome of a mutation; stale ids are [`Mutation::Ignored`],
//!   never an error
//!
//! Every applied mutation publishes a new snapshot with a higher revision.
//! Untouched reports keep their `Arc` identity, so consumers can detect
//! "this report changed" with [`std::sync::Arc::ptr_eq`].
//!
//! # Example
//!
//! ```rust,ignore
//! use civic_model::{Category, CreateReport, Location, SessionUser};
//! use civic_store::ReportStore;
//!
//! let store = ReportStore::seeded(SessionUser::default());
//! let report = store.submit(CreateReport::new(
//!     "Pothole",
//!     Category::Traffic,
//!     Location::new(52.5, 13.4),
//! ));
//! store.toggle_support(&report.id);
//!
//! let snapshot = store.snapshot();
//! assert_eq!(snapshot.get(&report.id).unwrap().votes.supports, 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod snapshot;
mod store;

pub use snapshot::ReportSnapshot;
pub use store::{Mutation, ReportStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
