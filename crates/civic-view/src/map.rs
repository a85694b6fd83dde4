//! Map widget boundary: markers out, clicks and the initial centre in

use civic_model::{Category, Location, Report, ReportId, Status};
use im::Vector;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// One marker per filtered report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerView {
    /// Report the marker opens
    pub id: ReportId,
    /// Marker position
    pub location: Location,
    /// Drives the marker icon
    pub category: Category,
    /// Shown in the popup
    pub status: Status,
    /// Shown in the popup
    pub supports: u32,
    /// Shown in the popup
    pub comment_count: usize,
    /// Report title for the popup
    pub title: String,
}

impl From<&Report> for MarkerView {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            location: report.location,
            category: report.category,
            status: report.status,
            supports: report.votes.supports,
            comment_count: report.comment_count(),
            title: report.title.clone(),
        }
    }
}

/// Markers for the given (already filtered) reports
#[must_use]
pub fn markers(reports: &Vector<Arc<Report>>) -> Vec<MarkerView> {
    reports.iter().map(|r| MarkerView::from(r.as_ref())).collect()
}

/// Options handed to the browser-style geolocation provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationOptions {
    /// Accept a cached position up to this old, in seconds
    pub maximum_age_secs: u64,
    /// Give up after this many seconds
    pub timeout_secs: u64,
    /// Ask for a GPS-grade fix
    pub high_accuracy: bool,
}

impl GeolocationOptions {
    /// Maximum cached-position age
    #[inline]
    #[must_use]
    pub fn maximum_age(&self) -> Duration {
        Duration::from_secs(self.maximum_age_secs)
    }

    /// Acquisition timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            maximum_age_secs: 300,
            timeout_secs: 10,
            high_accuracy: false,
        }
    }
}

/// Why the position could not be acquired
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    /// User refused the permission prompt
    #[error("geolocation permission denied")]
    PermissionDenied,

    /// No fix within the configured timeout
    #[error("geolocation timed out after {0:?}")]
    Timeout(Duration),

    /// Position source failed
    #[error("position unavailable: {0}")]
    Unavailable(String),

    /// Environment has no geolocation support
    #[error("geolocation not supported")]
    Unsupported,
}

/// Initial map centre from a best-effort geolocation result
///
/// Any failure, and any non-finite fix, falls back to `fallback`.
#[must_use]
pub fn initial_center(result: Result<Location, GeolocationError>, fallback: Location) -> Location {
    match result {
        Ok(location) if location.is_finite() => location,
        Ok(location) => {
            tracing::warn!(?location, "ignoring non-finite geolocation fix");
            fallback
        }
        Err(err) => {
            tracing::debug!(error = %err, "geolocation failed, using default centre");
            fallback
        }
    }
}
