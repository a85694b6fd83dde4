//! Sidebar projection: filter buttons, the report list and "My Reports"

use crate::filter::CategoryFilter;
use chrono::{DateTime, Utc};
use civic_model::{Category, Report, ReportId, SessionUser, Status};
use civic_store::ReportSnapshot;
use im::Vector;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One row in a sidebar list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Report to open on click
    pub id: ReportId,
    /// Title
    pub title: String,
    /// Category tag
    pub category: Category,
    /// Status badge
    pub status: Status,
    /// Support count
    pub supports: u32,
    /// Comment count
    pub comment_count: usize,
    /// Author display name
    pub user_name: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<&Report> for ReportSummary {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            title: report.title.clone(),
            category: report.category,
            status: report.status,
            supports: report.votes.supports,
            comment_count: report.comment_count(),
            user_name: report.user_name.clone(),
            created_at: report.created_at,
        }
    }
}

/// A filter button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Criterion applied when clicked
    pub filter: CategoryFilter,
    /// Button label
    pub label: String,
    /// Reports the criterion would keep
    pub count: usize,
    /// Currently active
    pub selected: bool,
}

/// Everything the sidebar renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarView {
    /// "All" followed by one button per category
    pub filter_options: Vec<FilterOption>,
    /// Reports passing the active filter
    pub reports: Vec<ReportSummary>,
    /// Reports authored by the session user, unfiltered
    pub my_reports: Vec<ReportSummary>,
}

impl SidebarView {
    /// Build the sidebar from the full snapshot and the filtered projection
    #[must_use]
    pub fn build(
        snapshot: &ReportSnapshot,
        filtered: &Vector<Arc<Report>>,
        active: CategoryFilter,
        user: &SessionUser,
    ) -> Self {
        let mut filter_options = Vec::with_capacity(Category::ALL.len() + 1);
        filter_options.push(FilterOption {
            filter: CategoryFilter::All,
            label: "All".to_string(),
            count: snapshot.len(),
            selected: active == CategoryFilter::All,
        });
        for category in Category::ALL {
            let criterion = CategoryFilter::Only(category);
            filter_options.push(FilterOption {
                filter: criterion,
                label: category.label().to_string(),
                count: snapshot.iter().filter(|r| criterion.matches(r)).count(),
                selected: active == criterion,
            });
        }

        Self {
            filter_options,
            reports: filtered.iter().map(|r| ReportSummary::from(r.as_ref())).collect(),
            my_reports: snapshot
                .iter()
                .filter(|r| r.is_authored_by(user))
                .map(|r| ReportSummary::from(r.as_ref()))
                .collect(),
        }
    }

    /// The active filter button
    #[must_use]
    pub fn active_filter(&self) -> Option<&FilterOption> {
        self.filter_options.iter().find(|o| o.selected)
    }
}
