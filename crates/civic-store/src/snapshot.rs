//! Immutable view of the collection at one revision

use civic_model::{Report, ReportId};
use im::Vector;
use std::sync::Arc;

/// Report collection at a given revision, newest first
///
/// Cloning is O(1): the underlying vector is persistent and shares structure
/// with every other snapshot.
#[derive(Debug, Clone, Default)]
pub struct ReportSnapshot {
    revision: u64,
    reports: Vector<Arc<Report>>,
}

impl ReportSnapshot {
    pub(crate) fn new(revision: u64, reports: Vector<Arc<Report>>) -> Self {
        Self { revision, reports }
    }

    /// Monotonic revision; bumps on every applied mutation
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All reports, newest first
    #[inline]
    #[must_use]
    pub fn reports(&self) -> &Vector<Arc<Report>> {
        &self.reports
    }

    /// Iterate reports, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Report>> + '_ {
        self.reports.iter()
    }

    /// Look up a report by id
    #[must_use]
    pub fn get(&self, id: &ReportId) -> Option<&Arc<Report>> {
        self.reports.iter().find(|r| &r.id == id)
    }

    /// Index of a report by id
    #[must_use]
    pub fn position(&self, id: &ReportId) -> Option<usize> {
        self.reports.iter().position(|r| &r.id == id)
    }

    /// Whether a report with `id` exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &ReportId) -> bool {
        self.position(id).is_some()
    }

    /// Number of reports
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether the collection is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReportSnapshot {
    type Item = &'a Arc<Report>;
    type IntoIter = im::vector::Iter<'a, Arc<Report>>;

    fn into_iter(self) -> Self::IntoIter {
        self.reports.iter()
    }
}
