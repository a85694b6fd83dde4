//! Creation form draft and input validation
//!
//! Validation happens here, before anything reaches the store. The store
//! trusts whatever [`CreateReport`] it receives.

use crate::ui::FormState;
use civic_model::{Category, CreateReport, Location};
use serde::{Deserialize, Serialize};

/// A single field-level validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum FormError {
    /// Title missing or blank
    #[error("Title is required")]
    TitleRequired,

    /// Location never set by map click or manual entry
    #[error("Please click on the map to set a location")]
    LocationRequired,

    /// Comment blank after trimming
    #[error("Comment cannot be empty")]
    EmptyComment,
}

impl FormError {
    /// Form field the message is shown under
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            FormError::TitleRequired => "title",
            FormError::LocationRequired => "location",
            FormError::EmptyComment => "comment",
        }
    }
}

/// All failures of one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, thiserror::Error)]
#[error("{}", join_messages(.0))]
pub struct FormErrors(pub Vec<FormError>);

impl FormErrors {
    /// Whether `error` was reported
    #[inline]
    #[must_use]
    pub fn contains(&self, error: FormError) -> bool {
        self.0.contains(&error)
    }

    /// Message for a field, if it failed
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<FormError> {
        self.0.iter().copied().find(|e| e.field() == field)
    }

    /// Number of failures
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No failures
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn join_messages(errors: &[FormError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Coordinate field of the manual location entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Latitude input
    Lat,
    /// Longitude input
    Lng,
}

/// In-progress report creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    /// Title input
    pub title: String,
    /// Description input
    pub description: String,
    /// Category select, `other` by default
    pub category: Category,
    location: Location,
    location_set: bool,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: Category::Other,
            location: Location::new(0.0, 0.0),
            location_set: false,
        }
    }
}

impl ReportDraft {
    /// Empty draft
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft for a freshly opened form, pre-filled with the pending map click
    #[must_use]
    pub fn for_form(form: FormState) -> Self {
        let mut draft = Self::new();
        if let Some(location) = form.pending_location() {
            draft.set_location(location);
        }
        draft
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// With location
    #[inline]
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.set_location(location);
        self
    }

    /// Set both coordinates, e.g. from a map click
    ///
    /// Non-finite locations are ignored.
    pub fn set_location(&mut self, location: Location) {
        if location.is_finite() {
            self.location = location;
            self.location_set = true;
        }
    }

    /// Manual numeric entry for one coordinate
    ///
    /// Input that does not parse to a finite number is ignored and leaves the
    /// draft unchanged. Returns whether the value was taken.
    pub fn set_coordinate(&mut self, axis: Axis, input: &str) -> bool {
        let Ok(value) = input.trim().parse::<f64>() else {
            return false;
        };
        if !value.is_finite() {
            return false;
        }

        match axis {
            Axis::Lat => self.location.lat = value,
            Axis::Lng => self.location.lng = value,
        }
        self.location_set = true;
        true
    }

    /// Current location inputs
    #[inline]
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Whether a location was set by click or manual entry
    #[inline]
    #[must_use]
    pub fn is_location_set(&self) -> bool {
        self.location_set
    }

    /// Check the draft and produce a store request
    ///
    /// # Errors
    /// Every failing field is reported, not just the first.
    pub fn validate(&self) -> Result<CreateReport, FormErrors> {
        let mut errors = Vec::new();
        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FormError::TitleRequired);
        }
        if !self.location_set {
            errors.push(FormError::LocationRequired);
        }
        if !errors.is_empty() {
            return Err(FormErrors(errors));
        }

        let description = self.description.trim();
        Ok(CreateReport {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            category: self.category,
            location: self.location,
        })
    }

    /// Back to an empty draft
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Trim comment input; blank input never reaches the store
///
/// # Errors
/// [`FormError::EmptyComment`] when nothing but whitespace was typed.
pub fn normalize_comment(input: &str) -> Result<String, FormError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(FormError::EmptyComment)
    } else {
        Ok(trimmed.to_string())
    }
}
