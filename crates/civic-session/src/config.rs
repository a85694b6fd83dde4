//! Client configuration
//!
//! Every field has a default, so an empty TOML file is a valid config:
//!
//! ```toml
//! seed = "demo"
//! mobile = false
//!
//! [session_user]
//! id = "user1"
//! name = "John Doe"
//!
//! [default_center]
//! lat = 52.52
//! lng = 13.405
//!
//! [geolocation]
//! maximum_age_secs = 300
//! timeout_secs = 10
//! high_accuracy = false
//! ```

use crate::error::ConfigError;
use civic_model::seed::DEFAULT_CENTER;
use civic_model::{Location, SessionUser};
use civic_view::GeolocationOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial collection for a new session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// The nine demo reports
    #[default]
    Demo,
    /// No reports
    Empty,
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Identity attributed to new reports and comments
    pub session_user: SessionUser,
    /// Map centre when geolocation fails
    pub default_center: Location,
    /// Geolocation provider options
    pub geolocation: GeolocationOptions,
    /// Initial collection
    pub seed: SeedMode,
    /// Layout hint for non-interactive front ends
    pub mobile: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session_user: SessionUser::default(),
            default_center: DEFAULT_CENTER,
            geolocation: GeolocationOptions::default(),
            seed: SeedMode::Demo,
            mobile: false,
        }
    }
}

impl ClientConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With session user
    #[inline]
    #[must_use]
    pub fn with_session_user(mut self, user: SessionUser) -> Self {
        self.session_user = user;
        self
    }

    /// With seed mode
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: SeedMode) -> Self {
        self.seed = seed;
        self
    }

    /// With default map centre
    #[inline]
    #[must_use]
    pub fn with_default_center(mut self, center: Location) -> Self {
        self.default_center = center;
        self
    }

    /// With mobile layout hint
    #[inline]
    #[must_use]
    pub fn with_mobile(mut self, mobile: bool) -> Self {
        self.mobile = mobile;
        self
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// Syntax errors and failed [`ClientConfig::validate`] checks.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// IO failures plus everything [`ClientConfig::from_toml_str`] reports.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml_str(&input)?;
        tracing::debug!(path = %path.display(), "loaded client config");
        Ok(config)
    }

    /// Check semantic constraints
    ///
    /// # Errors
    /// Blank session user id or name, or a non-finite / out-of-range centre.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_user.id.trim().is_empty() || self.session_user.name.trim().is_empty() {
            return Err(ConfigError::EmptyUser);
        }

        let Location { lat, lng } = self.default_center;
        if !self.default_center.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
            return Err(ConfigError::InvalidCenter { lat, lng });
        }

        Ok(())
    }
}
