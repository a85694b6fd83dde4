//! Category filter and its memoized projection

use civic_model::{Category, ParseCategoryError, Report};
use civic_store::ReportSnapshot;
use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Filter criterion: every report, or one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Pass every report through
    #[default]
    All,
    /// Keep only reports of this category
    Only(Category),
}

impl CategoryFilter {
    /// Whether `report` passes the filter
    #[inline]
    #[must_use]
    pub fn matches(&self, report: &Report) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => report.category == *category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    /// `"all"` or a category tag
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Order-preserving subsequence of `reports` that passes `filter`
///
/// [`CategoryFilter::All`] returns the input itself (an O(1) clone).
#[must_use]
pub fn filter(reports: &Vector<Arc<Report>>, filter: &CategoryFilter) -> Vector<Arc<Report>> {
    match filter {
        CategoryFilter::All => reports.clone(),
        CategoryFilter::Only(_) => reports
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect(),
    }
}

#[derive(Debug, Clone)]
struct Memo {
    revision: u64,
    criterion: CategoryFilter,
    reports: Vector<Arc<Report>>,
}

/// Memoized filter projection
///
/// Keyed on (snapshot revision, criterion). A `FilterView` must only ever
/// be fed snapshots of a single store, since revisions are per store.
#[derive(Debug, Clone, Default)]
pub struct FilterView {
    memo: Option<Memo>,
    recomputations: u64,
}

impl FilterView {
    /// Create empty view
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filtered reports for `snapshot`, recomputed only when the revision or
    /// the criterion changed since the last call
    pub fn project(
        &mut self,
        snapshot: &ReportSnapshot,
        criterion: CategoryFilter,
    ) -> Vector<Arc<Report>> {
        if let Some(memo) = &self.memo {
            if memo.revision == snapshot.revision() && memo.criterion == criterion {
                tracing::trace!(revision = memo.revision, %criterion, "filter memo hit");
                return memo.reports.clone();
            }
        }

        let reports = filter(snapshot.reports(), &criterion);
        self.recomputations += 1;
        tracing::trace!(
            revision = snapshot.revision(),
            %criterion,
            matched = reports.len(),
            "filter recomputed"
        );

        self.memo = Some(Memo {
            revision: snapshot.revision(),
            criterion,
            reports: reports.clone(),
        });
        reports
    }

    /// Number of times the projection was actually recomputed
    #[inline]
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Drop the cached projection
    #[inline]
    pub fn invalidate(&mut self) {
        self.memo = None;
    }
}
