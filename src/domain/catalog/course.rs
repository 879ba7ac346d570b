//! Course catalog entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{CourseId, Timestamp, ValidationError};

/// Training track a course belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseTrack {
    Wellness,
    Clinical,
}

impl CourseTrack {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseTrack::Wellness => "wellness",
            CourseTrack::Clinical => "clinical",
        }
    }
}

impl fmt::Display for CourseTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseTrack {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wellness" => Ok(CourseTrack::Wellness),
            "clinical" => Ok(CourseTrack::Clinical),
            other => Err(ValidationError::invalid_format(
                "track",
                format!("unknown track '{}'", other),
            )),
        }
    }
}

/// Position of a course within its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Prerequisite,
    Level1,
    Level2,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Prerequisite => "prerequisite",
            CourseLevel::Level1 => "level1",
            CourseLevel::Level2 => "level2",
            CourseLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for CourseLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prerequisite" => Ok(CourseLevel::Prerequisite),
            "level1" => Ok(CourseLevel::Level1),
            "level2" => Ok(CourseLevel::Level2),
            "advanced" => Ok(CourseLevel::Advanced),
            other => Err(ValidationError::invalid_format(
                "level",
                format!("unknown level '{}'", other),
            )),
        }
    }
}

/// A purchasable course.
///
/// Prices are held in minor currency units (paise for INR).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub track: CourseTrack,
    pub level: CourseLevel,
    pub description: String,
    pub detailed_description: String,
    pub price_minor: i64,
    pub equipment_fee_minor: i64,
    pub currency: String,
    pub duration: String,
    pub location: String,
    pub schedule: String,
    pub instructor: String,
    pub max_participants: u32,
    pub features: Vec<String>,
    pub is_coming_soon: bool,
    pub created_at: Timestamp,
}

impl Course {
    /// Amount charged at checkout: course price plus equipment fee.
    pub fn total_price_minor(&self) -> i64 {
        self.price_minor + self.equipment_fee_minor
    }

    /// Whether learners can currently enroll.
    pub fn is_open_for_enrollment(&self) -> bool {
        !self.is_coming_soon
    }

    /// Checks the invariants the catalog relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if self.price_minor < 0 {
            return Err(ValidationError::invalid_format("price", "must not be negative"));
        }
        if self.equipment_fee_minor < 0 {
            return Err(ValidationError::invalid_format(
                "equipment_fee",
                "must not be negative",
            ));
        }
        Ok(())
    }
}
