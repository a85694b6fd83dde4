//! Testing utilities for civicmap workspace
//!
//! Shared test helpers, fixtures, and deterministic seams.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use civic_model::{Category, Clock, CommentId, CreateReport, IdSource, Location, ReportId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(fixed_instant()))
}

/// Predictable ids: `report-1`, `report-2`, ... and `comment-1`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    reports: AtomicU64,
    comments: AtomicU64,
}

impl IdSource for SequentialIds {
    fn next_report_id(&self) -> ReportId {
        let n = self.reports.fetch_add(1, Ordering::SeqCst) + 1;
        ReportId(format!("report-{n}"))
    }

    fn next_comment_id(&self) -> CommentId {
        let n = self.comments.fetch_add(1, Ordering::SeqCst) + 1;
        CommentId(format!("comment-{n}"))
    }
}

pub fn berlin() -> Location {
    Location::new(52.52, 13.405)
}

pub fn sample_create(title: &str) -> CreateReport {
    CreateReport::new(title, Category::Other, berlin())
}

pub fn sample_create_in(title: &str, category: Category) -> CreateReport {
    CreateReport::new(title, category, berlin())
}
