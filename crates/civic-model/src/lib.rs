//! civicmap data model
//!
//! Value types shared by every layer of the client:
//!
//! - [`Report`]: a geotagged civic-issue record with votes and comments
//! - [`Comment`]: an immutable remark owned by its report
//! - [`Category`], [`Status`], [`Location`], [`Votes`]
//! - [`SessionUser`]: the fixed local identity attributed to new content
//! - [`IdSource`] and [`Clock`]: injectable id and time seams
//! - [`seed`]: the demo collection every session starts from
//!
//! Reports are never mutated in place. Every change produces a new value
//! (see [`Report::with_support_toggled`], [`Report::with_comment`]) that keeps
//! the original `id`.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod category;
mod ids;
mod report;
mod session;

pub mod seed;

pub use category::{Category, ParseCategoryError, Status};
pub use ids::{CommentId, IdSource, ReportId, UuidIdSource};
pub use report::{Comment, CreateReport, Location, Report, Votes};
pub use session::{Clock, SessionUser, SystemClock};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
