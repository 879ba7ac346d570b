//! PostgreSQL implementation of CourseReader and ModuleReader.
//!
//! Module content and assessments are stored as JSONB.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Assessment, Course, CourseTrack, Module, ModuleContent};
use crate::domain::foundation::{CourseId, DomainError, ModuleId, Timestamp};
use crate::ports::{CourseReader, ModuleReader};

/// PostgreSQL catalog reader.
pub struct PostgresCatalogReader {
    pool: PgPool,
}

impl PostgresCatalogReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    track: String,
    level: String,
    description: String,
    detailed_description: String,
    price_minor: i64,
    equipment_fee_minor: i64,
    currency: String,
    duration: String,
    location: String,
    schedule: String,
    instructor: String,
    max_participants: i32,
    features: Vec<String>,
    is_coming_soon: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = DomainError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Ok(Course {
            id: CourseId::from_uuid(row.id),
            track: row
                .track
                .parse()
                .map_err(|e| DomainError::database(format!("Invalid track value: {}", e)))?,
            level: row
                .level
                .parse()
                .map_err(|e| DomainError::database(format!("Invalid level value: {}", e)))?,
            title: row.title,
            description: row.description,
            detailed_description: row.detailed_description,
            price_minor: row.price_minor,
            equipment_fee_minor: row.equipment_fee_minor,
            currency: row.currency,
            duration: row.duration,
            location: row.location,
            schedule: row.schedule,
            instructor: row.instructor,
            max_participants: u32::try_from(row.max_participants).unwrap_or(0),
            features: row.features,
            is_coming_soon: row.is_coming_soon,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ModuleRow {
    id: Uuid,
    course_id: Uuid,
    module_number: i32,
    title: String,
    description: String,
    duration: String,
    content: Json<ModuleContent>,
    assessment: Json<Assessment>,
}

impl TryFrom<ModuleRow> for Module {
    type Error = DomainError;

    fn try_from(row: ModuleRow) -> Result<Self, Self::Error> {
        let module_number = u32::try_from(row.module_number).map_err(|_| {
            DomainError::database(format!("Invalid module_number: {}", row.module_number))
        })?;
        Ok(Module {
            id: ModuleId::from_uuid(row.id),
            course_id: CourseId::from_uuid(row.course_id),
            module_number,
            title: row.title,
            description: row.description,
            duration: row.duration,
            content: row.content.0,
            assessment: row.assessment.0,
        })
    }
}

const COURSE_COLUMNS: &str = r#"
    id, title, track, level, description, detailed_description, price_minor,
    equipment_fee_minor, currency, duration, location, schedule, instructor,
    max_participants, features, is_coming_soon, created_at
"#;

const MODULE_COLUMNS: &str = r#"
    id, course_id, module_number, title, description, duration, content, assessment
"#;

#[async_trait]
impl CourseReader for PostgresCatalogReader {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let row: Option<CourseRow> =
            sqlx::query_as(&format!("SELECT {} FROM courses WHERE id = $1", COURSE_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to fetch course: {}", e)))?;

        row.map(Course::try_from).transpose()
    }

    async fn list(&self, track: Option<CourseTrack>) -> Result<Vec<Course>, DomainError> {
        let rows: Vec<CourseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM courses WHERE ($1::TEXT IS NULL OR track = $1) ORDER BY created_at, title",
            COURSE_COLUMNS
        ))
        .bind(track.map(|t| t.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list courses: {}", e)))?;

        rows.into_iter().map(Course::try_from).collect()
    }
}

#[async_trait]
impl ModuleReader for PostgresCatalogReader {
    async fn find_by_id(&self, id: &ModuleId) -> Result<Option<Module>, DomainError> {
        let row: Option<ModuleRow> =
            sqlx::query_as(&format!("SELECT {} FROM modules WHERE id = $1", MODULE_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to fetch module: {}", e)))?;

        row.map(Module::try_from).transpose()
    }

    async fn list_by_course(&self, course_id: &CourseId) -> Result<Vec<Module>, DomainError> {
        let rows: Vec<ModuleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM modules WHERE course_id = $1 ORDER BY module_number ASC",
            MODULE_COLUMNS
        ))
        .bind(course_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list modules: {}", e)))?;

        rows.into_iter().map(Module::try_from).collect()
    }

    async fn find_by_number(
        &self,
        course_id: &CourseId,
        module_number: u32,
    ) -> Result<Option<Module>, DomainError> {
        let row: Option<ModuleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM modules WHERE course_id = $1 AND module_number = $2",
            MODULE_COLUMNS
        ))
        .bind(course_id.as_uuid())
        .bind(module_number as i32)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch module: {}", e)))?;

        row.map(Module::try_from).transpose()
    }

    async fn count_by_course(&self, course_id: &CourseId) -> Result<u32, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM modules WHERE course_id = $1")
            .bind(course_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to count modules: {}", e)))?;

        Ok(count as u32)
    }
}
