//! The owning report store
//!
//! All writes go through [`ReportStore`]. Each mutation runs as one
//! read-modify-write under the write lock and publishes a complete new
//! [`ReportSnapshot`], so readers see either the state before or the state
//! after, never a half-applied vote.

use crate::snapshot::ReportSnapshot;
use civic_model::{
    Clock, Comment, CreateReport, IdSource, Report, ReportId, SessionUser, SystemClock,
    UuidIdSource,
};
use im::Vector;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// Outcome of a mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// The report was replaced by this new value
    Applied(Arc<Report>),
    /// No report with the given id; nothing changed
    Ignored,
}

impl Mutation {
    /// Whether the collection changed
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The updated report, if any
    #[inline]
    #[must_use]
    pub fn report(&self) -> Option<&Arc<Report>> {
        match self {
            Self::Applied(report) => Some(report),
            Self::Ignored => None,
        }
    }
}

/// Single source of truth for the report collection
#[derive(Debug)]
pub struct ReportStore {
    state: RwLock<ReportSnapshot>,
    user: SessionUser,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
}

impl ReportStore {
    /// Create an empty store for `user`
    #[must_use]
    pub fn new(user: SessionUser) -> Self {
        Self {
            state: RwLock::new(ReportSnapshot::default()),
            user,
            ids: Arc::new(UuidIdSource),
            clock: Arc::new(SystemClock),
        }
    }

    /// Create a store holding the demo collection
    #[must_use]
    pub fn seeded(user: SessionUser) -> Self {
        Self::new(user).with_reports(civic_model::seed::demo_reports())
    }

    /// Replace the initial collection (newest first)
    ///
    /// Reports whose id already appeared earlier in `reports` are dropped.
    #[must_use]
    pub fn with_reports(self, reports: impl IntoIterator<Item = Report>) -> Self {
        let mut seen = HashSet::new();
        let mut collection = Vector::new();
        for report in reports {
            if seen.insert(report.id.clone()) {
                collection.push_back(Arc::new(report));
            } else {
                tracing::warn!(report_id = %report.id, "dropping seed report with duplicate id");
            }
        }

        *self.state.write() = ReportSnapshot::new(0, collection);
        self
    }

    /// Use a custom id source
    #[must_use]
    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Use a custom clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Session user attributed to new reports and comments
    #[inline]
    #[must_use]
    pub fn session_user(&self) -> &SessionUser {
        &self.user
    }

    /// Current snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> ReportSnapshot {
        self.state.read().clone()
    }

    /// Current revision
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.read().revision()
    }

    /// Look up a report in the current snapshot
    #[must_use]
    pub fn get(&self, id: &ReportId) -> Option<Arc<Report>> {
        self.state.read().get(id).cloned()
    }

    /// Number of reports
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    /// Whether the store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Create a report and insert it at the head of the collection
    ///
    /// The caller has already validated `data`; the store does not.
    pub fn submit(&self, data: CreateReport) -> Arc<Report> {
        let report = Arc::new(Report::submitted(
            self.ids.next_report_id(),
            data,
            &self.user,
            self.clock.now(),
        ));

        let mut state = self.state.write();
        let mut reports = state.reports().clone();
        reports.push_front(Arc::clone(&report));
        *state = ReportSnapshot::new(state.revision() + 1, reports);

        tracing::info!(
            report_id = %report.id,
            category = %report.category,
            revision = state.revision(),
            "report submitted"
        );
        report
    }

    /// Flip the session user's support on a report
    ///
    /// Unknown ids are ignored.
    pub fn toggle_support(&self, id: &ReportId) -> Mutation {
        self.replace(id, "toggle_support", Report::with_support_toggled)
    }

    /// Append a comment by the session user
    ///
    /// Unknown ids are ignored. `content` is stored as given; blank input is
    /// rejected upstream.
    pub fn add_comment(&self, id: &ReportId, content: impl Into<String>) -> Mutation {
        let comment = Comment::new(
            self.ids.next_comment_id(),
            &self.user,
            content,
            self.clock.now(),
        );
        self.replace(id, "add_comment", move |report| report.with_comment(comment))
    }

    fn replace<F>(&self, id: &ReportId, op: &'static str, f: F) -> Mutation
    where
        F: FnOnce(&Report) -> Report,
    {
        let mut state = self.state.write();
        let Some(index) = state.position(id) else {
            tracing::debug!(report_id = %id, op, "mutation ignored: unknown report");
            return Mutation::Ignored;
        };

        let updated = Arc::new(f(state.reports()[index].as_ref()));
        let mut reports = state.reports().clone();
        reports.set(index, Arc::clone(&updated));
        *state = ReportSnapshot::new(state.revision() + 1, reports);

        tracing::debug!(report_id = %id, op, revision = state.revision(), "mutation applied");
        Mutation::Applied(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_model::{Category, Location, Status, Votes};
    use civic_test_utils::{fixed_clock, sample_create, SequentialIds};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn store() -> ReportStore {
        ReportStore::seeded(SessionUser::default())
            .with_id_source(Arc::new(SequentialIds::default()))
            .with_clock(fixed_clock())
    }

    fn ids(snapshot: &ReportSnapshot) -> Vec<String> {
        snapshot.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn submit_prepends_pending_report() {
        let store = store();
        let before = store.len();

        let report = store.submit(CreateReport::new(
            "Pothole",
            Category::Traffic,
            Location::new(52.5, 13.4),
        ));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), before + 1);
        assert_eq!(snapshot.reports()[0].id, report.id);
        assert_eq!(report.status, Status::Pending);
        assert_eq!(report.votes, Votes::new(0, false));
        assert!(report.comments.is_empty());
        assert_eq!(report.user_name, "John Doe");
        assert_eq!(report.created_at, fixed_clock().now());
    }

    #[test]
    fn toggle_support_round_trip() {
        let store = store();
        let report = store.submit(sample_create("Dark alley"));

        let first = store.toggle_support(&report.id);
        assert_eq!(first.report().unwrap().votes, Votes::new(1, true));

        let second = store.toggle_support(&report.id);
        assert_eq!(second.report().unwrap().votes, Votes::new(0, false));
        assert_eq!(store.get(&report.id).unwrap().votes, report.votes);
    }

    #[test]
    fn toggle_support_on_seed_report_withdraws() {
        let store = store();
        let id = ReportId::from("1");

        store.toggle_support(&id);
        assert_eq!(store.get(&id).unwrap().votes, Votes::new(11, false));
    }

    #[test]
    fn ghost_mutations_change_nothing() {
        let store = store();
        let before = store.snapshot();
        let ghost = ReportId::from("ghost");

        assert_eq!(store.toggle_support(&ghost), Mutation::Ignored);
        assert_eq!(store.add_comment(&ghost, "hello?"), Mutation::Ignored);

        let after = store.snapshot();
        assert_eq!(after.revision(), before.revision());
        assert_eq!(ids(&after), ids(&before));
        for (old, new) in before.iter().zip(after.iter()) {
            assert!(Arc::ptr_eq(old, new));
        }
    }

    #[test]
    fn add_comment_appends_in_order() {
        let store = store();
        let id = ReportId::from("1");
        let prior: Vec<_> = store.get(&id).unwrap().comments.iter().cloned().collect();

        store.add_comment(&id, "Still broken today");

        let report = store.get(&id).unwrap();
        assert_eq!(report.comment_count(), prior.len() + 1);
        let kept: Vec<_> = report.comments.iter().take(prior.len()).cloned().collect();
        assert_eq!(kept, prior);

        let last = report.comments.back().unwrap();
        assert_eq!(last.content, "Still broken today");
        assert_eq!(last.user_id, "user1");
    }

    #[test]
    fn mutation_replaces_only_touched_report() {
        let store = store();
        let before = store.snapshot();

        store.toggle_support(&ReportId::from("3"));
        let after = store.snapshot();

        assert_eq!(after.revision(), before.revision() + 1);
        for (old, new) in before.iter().zip(after.iter()) {
            if old.id.as_str() == "3" {
                assert!(!Arc::ptr_eq(old, new));
            } else {
                assert!(Arc::ptr_eq(old, new));
            }
        }
    }

    #[test]
    fn duplicate_seed_ids_are_dropped() {
        let mut reports: Vec<Report> = civic_model::seed::demo_reports().into_iter().collect();
        reports.push(reports[0].clone());

        let store = ReportStore::new(SessionUser::default()).with_reports(reports);
        assert_eq!(store.len(), 9);
    }

    proptest! {
        #[test]
        fn prop_submits_prepend_with_distinct_ids(titles in proptest::collection::vec("[a-z]{1,12}", 0..20)) {
            let store = ReportStore::new(SessionUser::default());
            for title in &titles {
                let report = store.submit(sample_create(title));
                let current = store.snapshot();
                prop_assert_eq!(&current.reports()[0].id, &report.id);
            }

            let snapshot = store.snapshot();
            prop_assert_eq!(snapshot.len(), titles.len());

            let unique: HashSet<_> = snapshot.iter().map(|r| r.id.clone()).collect();
            prop_assert_eq!(unique.len(), titles.len());

            let stored: Vec<_> = snapshot.iter().map(|r| r.title.clone()).collect();
            let expected: Vec<_> = titles.iter().rev().cloned().collect();
            prop_assert_eq!(stored, expected);
        }

        #[test]
        fn prop_comments_grow_by_one(contents in proptest::collection::vec("[a-z ]{1,20}", 1..10)) {
            let store = store();
            let id = ReportId::from("7");
            for content in &contents {
                let before = store.get(&id).unwrap();
                store.add_comment(&id, content.clone());
                let after = store.get(&id).unwrap();

                prop_assert_eq!(after.comment_count(), before.comment_count() + 1);
                for (old, new) in before.comments.iter().zip(after.comments.iter()) {
                    prop_assert_eq!(old, new);
                }
            }
        }
    }
}
