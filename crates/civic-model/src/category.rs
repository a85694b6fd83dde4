//! Report classification: category tags and moderation status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of issue categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Unsafe routes to and from schools
    SchoolRoute,
    /// Broken or missing street lighting
    Lighting,
    /// Congestion and dangerous crossings
    Traffic,
    /// Derelict or empty buildings
    AbandonedBuilding,
    /// Noise disturbance
    Noise,
    /// Graffiti and damage to property
    Vandalism,
    /// Loitering groups
    Loitering,
    /// Illegal dumping of waste
    WildDumping,
    /// Anything else
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 9] = [
        Category::SchoolRoute,
        Category::Lighting,
        Category::Traffic,
        Category::AbandonedBuilding,
        Category::Noise,
        Category::Vandalism,
        Category::Loitering,
        Category::WildDumping,
        Category::Other,
    ];

    /// Wire tag (`snake_case`)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::SchoolRoute => "school_route",
            Category::Lighting => "lighting",
            Category::Traffic => "traffic",
            Category::AbandonedBuilding => "abandoned_building",
            Category::Noise => "noise",
            Category::Vandalism => "vandalism",
            Category::Loitering => "loitering",
            Category::WildDumping => "wild_dumping",
            Category::Other => "other",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Category::SchoolRoute => "School Route",
            Category::Lighting => "Lighting",
            Category::Traffic => "Traffic",
            Category::AbandonedBuilding => "Abandoned Building",
            Category::Noise => "Noise",
            Category::Vandalism => "Vandalism",
            Category::Loitering => "Loitering",
            Category::WildDumping => "Wild Dumping",
            Category::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown category tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Moderation status
///
/// Set to [`Status::Pending`] at creation. Only an external moderation
/// collaborator moves a report forward; the client never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Awaiting moderation
    #[default]
    Pending,
    /// Visible to everyone
    Published,
    /// Issue fixed
    Resolved,
}

impl Status {
    /// Wire tag
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Published => "published",
            Status::Resolved => "resolved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_parses_back() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = "potholes".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: 'potholes'");
    }

    #[test]
    fn serde_uses_snake_case_tags() {
        let json = serde_json::to_string(&Category::WildDumping).unwrap();
        assert_eq!(json, "\"wild_dumping\"");

        let status: Status = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(status, Status::Resolved);
    }

    #[test]
    fn defaults() {
        assert_eq!(Category::default(), Category::Other);
        assert_eq!(Status::default(), Status::Pending);
        assert_eq!(Category::AbandonedBuilding.label(), "Abandoned Building");
    }
}
