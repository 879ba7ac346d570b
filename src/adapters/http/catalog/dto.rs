//! Request and response DTOs for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Course;

/// Query string for `GET /api/courses`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCoursesParams {
    /// `wellness` or `clinical`; absent lists every track.
    pub track: Option<String>,
}

/// A course as shown in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub track: String,
    pub level: String,
    pub description: String,
    pub detailed_description: String,
    /// Price in minor currency units.
    pub price: i64,
    pub equipment_fee: i64,
    pub currency: String,
    pub duration: String,
    pub location: String,
    pub schedule: String,
    pub instructor: String,
    pub max_participants: u32,
    pub features: Vec<String>,
    pub is_coming_soon: bool,
    pub created_at: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title,
            track: course.track.as_str().to_string(),
            level: course.level.as_str().to_string(),
            description: course.description,
            detailed_description: course.detailed_description,
            price: course.price_minor,
            equipment_fee: course.equipment_fee_minor,
            currency: course.currency,
            duration: course.duration,
            location: course.location,
            schedule: course.schedule,
            instructor: course.instructor,
            max_participants: course.max_participants,
            features: course.features,
            is_coming_soon: course.is_coming_soon,
            created_at: course.created_at.to_rfc3339(),
        }
    }
}
