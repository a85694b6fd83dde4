//! Error types for the session layer
//!
//! Only two things can go wrong in a session:
//! - an intent carries input the form layer rejects
//! - a config file cannot be read or is invalid
//!
//! Mutations that target a vanished report are not errors; they come back as
//! [`crate::Outcome::Ignored`].

use civic_view::{FormError, FormErrors};
use std::path::PathBuf;

/// Rejected intent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    /// Creation form input failed validation; the store was not touched
    #[error("report draft rejected: {0}")]
    Validation(#[from] FormErrors),

    /// Comment input failed validation
    #[error("comment rejected: {0}")]
    Comment(#[from] FormError),
}

impl IntentError {
    /// Field-level failures to show inline
    #[must_use]
    pub fn form_errors(&self) -> Vec<FormError> {
        match self {
            Self::Validation(errors) => errors.0.clone(),
            Self::Comment(error) => vec![*error],
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or shape error
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Session user id or name blank
    #[error("session user id and name must not be empty")]
    EmptyUser,

    /// Default centre not a valid coordinate
    #[error("invalid default center: ({lat}, {lng})")]
    InvalidCenter {
        /// Latitude given
        lat: f64,
        /// Longitude given
        lng: f64,
    },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
