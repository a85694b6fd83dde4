//! civicmap Session
//!
//! Wires the store and the views into one client session.
//!
//! # Core Concepts
//!
//! - [`ClientConfig`]: session user, default centre, geolocation options, seed
//! - [`Session`]: dispatches [`Intent`]s, renders [`Frame`]s
//! - [`simulator`]: seeded random-intent run with invariant checks
//!
//! # Example
//!
//! ```rust,ignore
//! use civic_session::{ClientConfig, Intent, Session};
//! use civic_model::{Category, Location};
//!
//! let mut session = Session::new(ClientConfig::default());
//! session.dispatch(Intent::MapClicked(Location::new(52.5, 13.4)))?;
//! let draft = session.draft().with_title("Pothole").with_category(Category::Traffic);
//! session.dispatch(Intent::SubmitDraft(draft))?;
//!
//! let frame = session.render(false);
//! assert_eq!(frame.markers.len(), 10);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod error;
mod session;
pub mod simulator;

pub use config::{ClientConfig, SeedMode};
pub use error::{ConfigError, IntentError};
pub use session::{Frame, Intent, Outcome, Session};
pub use simulator::{run_simulator, SimulatorConfig, SimulatorReport, SimulatorStats, Violation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
