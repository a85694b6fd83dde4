//! Report and comment entities

use crate::category::{Category, Status};
use crate::ids::{CommentId, ReportId};
use crate::session::SessionUser;
use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

/// Geographic position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Location {
    /// Create location
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both coordinates are finite numbers
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Support votes on a report
///
/// Toggle model: the session user either supports a report or does not.
/// `supports` counts every supporter, the session user included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Votes {
    /// Aggregate support count
    pub supports: u32,
    /// Whether the session user currently supports the report
    #[serde(default)]
    pub user_support: bool,
}

impl Votes {
    /// Create vote aggregate
    #[inline]
    #[must_use]
    pub const fn new(supports: u32, user_support: bool) -> Self {
        Self {
            supports,
            user_support,
        }
    }

    /// Flip the session user's support, adjusting the count by one
    #[must_use]
    pub const fn toggled(self) -> Self {
        if self.user_support {
            Self {
                supports: self.supports.saturating_sub(1),
                user_support: false,
            }
        } else {
            Self {
                supports: self.supports.saturating_add(1),
                user_support: true,
            }
        }
    }
}

/// Immutable remark attached to a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment id
    pub id: CommentId,
    /// Author id
    pub user_id: String,
    /// Author display name
    pub user_name: String,
    /// Non-empty body
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create comment authored by `user`
    #[must_use]
    pub fn new(
        id: CommentId,
        user: &SessionUser,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            content: content.into(),
            created_at,
        }
    }
}

/// Input for creating a report
///
/// Produced by the creation form after its own validation. The store trusts
/// it: `title` non-empty, `location` finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReport {
    /// Short summary
    pub title: String,
    /// Optional details
    pub description: Option<String>,
    /// Issue category
    pub category: Category,
    /// Where the issue is
    pub location: Location,
}

impl CreateReport {
    /// Create request with no description
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>, category: Category, location: Location) -> Self {
        Self {
            title: title.into(),
            description: None,
            category,
            location,
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Geotagged civic-issue record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Stable id
    pub id: ReportId,
    /// Short summary
    pub title: String,
    /// Optional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Issue category
    pub category: Category,
    /// Where the issue is
    pub location: Location,
    /// Moderation status
    pub status: Status,
    /// Support votes
    pub votes: Votes,
    /// Comments, oldest first
    pub comments: Vector<Comment>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Author id
    pub user_id: String,
    /// Author display name
    pub user_name: String,
}

impl Report {
    /// Build a freshly submitted report: pending, no votes, no comments
    #[must_use]
    pub fn submitted(
        id: ReportId,
        data: CreateReport,
        user: &SessionUser,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: data.title,
            description: data.description,
            category: data.category,
            location: data.location,
            status: Status::Pending,
            votes: Votes::default(),
            comments: Vector::new(),
            created_at,
            user_id: user.id.clone(),
            user_name: user.name.clone(),
        }
    }

    /// Copy of this report with the session user's support flipped
    #[must_use]
    pub fn with_support_toggled(&self) -> Self {
        Self {
            votes: self.votes.toggled(),
            ..self.clone()
        }
    }

    /// Copy of this report with `comment` appended
    #[must_use]
    pub fn with_comment(&self, comment: Comment) -> Self {
        let mut next = self.clone();
        next.comments.push_back(comment);
        next
    }

    /// Number of comments
    #[inline]
    #[must_use]
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Whether `user` authored this report
    #[inline]
    #[must_use]
    pub fn is_authored_by(&self, user: &SessionUser) -> bool {
        self.user_id == user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    fn pothole() -> Report {
        Report::submitted(
            ReportId::from("r1"),
            CreateReport::new("Pothole", Category::Traffic, Location::new(52.5, 13.4)),
            &SessionUser::default(),
            at(9),
        )
    }

    #[test]
    fn submitted_report_starts_pending_and_empty() {
        let report = pothole();
        assert_eq!(report.status, Status::Pending);
        assert_eq!(report.votes, Votes::new(0, false));
        assert!(report.comments.is_empty());
        assert_eq!(report.user_id, "user1");
        assert_eq!(report.user_name, "John Doe");
    }

    #[test]
    fn toggle_support_flips_flag_and_count() {
        let report = pothole();
        let supported = report.with_support_toggled();
        assert_eq!(supported.votes, Votes::new(1, true));
        assert_eq!(supported.id, report.id);

        let back = supported.with_support_toggled();
        assert_eq!(back.votes, report.votes);
    }

    #[test]
    fn toggle_never_underflows() {
        // Inconsistent input: flag set but zero count
        let votes = Votes::new(0, true).toggled();
        assert_eq!(votes, Votes::new(0, false));
    }

    #[test]
    fn with_comment_appends_and_leaves_original() {
        let report = pothole();
        let user = SessionUser::default();
        let first = report.with_comment(Comment::new(CommentId::from("c1"), &user, "first", at(10)));
        let second = first.with_comment(Comment::new(CommentId::from("c2"), &user, "second", at(11)));

        assert!(report.comments.is_empty());
        assert_eq!(first.comment_count(), 1);
        let contents: Vec<_> = second.comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn json_shape_is_camel_case() {
        let value = serde_json::to_value(pothole().with_support_toggled()).unwrap();
        assert_eq!(value["userId"], "user1");
        assert_eq!(value["votes"]["userSupport"], true);
        assert_eq!(value["category"], "traffic");
        assert!(value.get("description").is_none());
    }

    proptest! {
        #[test]
        fn prop_double_toggle_is_identity(supports in 0u32..10_000, flag in any::<bool>()) {
            let supports = if flag { supports.max(1) } else { supports };
            let votes = Votes::new(supports, flag);
            prop_assert_eq!(votes.toggled().toggled(), votes);
        }
    }
}
