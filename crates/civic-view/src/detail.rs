//! Detail modal projection

use civic_model::{Comment, Report};
use serde::Serialize;
use std::sync::Arc;

/// What the detail modal renders for the selected report
///
/// Built from the selection re-resolved against the current snapshot, never
/// from a report captured at selection time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    /// The live report
    pub report: Arc<Report>,
    /// Category label for the header badge
    pub category_label: &'static str,
    /// Support count next to the vote button
    pub supports: u32,
    /// Vote button pressed state
    pub user_support: bool,
    /// Comment list, oldest first
    pub comments: Vec<Comment>,
}

impl DetailView {
    /// Build from a resolved report
    #[must_use]
    pub fn new(report: Arc<Report>) -> Self {
        Self {
            category_label: report.category.label(),
            supports: report.votes.supports,
            user_support: report.votes.user_support,
            comments: report.comments.iter().cloned().collect(),
            report,
        }
    }

    /// Heading shown above the comment list
    #[must_use]
    pub fn comments_heading(&self) -> String {
        format!("Comments ({})", self.comments.len())
    }
}
