//! Session identity and time source

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed local identity attributed to every report and comment created
/// during a session. There is no authentication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionUser {
    /// User id copied into `Report::user_id` / `Comment::user_id`
    pub id: String,
    /// Display name copied into `user_name`
    pub name: String,
}

impl SessionUser {
    /// Create a session user
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Default for SessionUser {
    /// The demo user that owns several seed reports
    fn default() -> Self {
        Self::new("user1", "John Doe")
    }
}

/// Wall clock used for `created_at` stamps
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Real system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
