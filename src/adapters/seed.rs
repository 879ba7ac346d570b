//! YAML catalog seed loader.
//!
//! Development mode runs without a database: courses, their modules and any
//! pre-paid enrollments are read from a YAML file into the in-memory stores.
//!
//! ```yaml
//! courses:
//!   - id: 7f0c6f5e-5d0e-4d3e-9a59-2f1a4f2b9c11
//!     title: Wellness Prerequisite
//!     track: wellness
//!     level: prerequisite
//!     price_minor: 2500000
//!     modules:
//!       - module_number: 1
//!         title: Foundations
//!         assessment:
//!           questions: [...]
//! enrollments:
//!   - user_id: learner-1
//!     course_id: 7f0c6f5e-5d0e-4d3e-9a59-2f1a4f2b9c11
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::adapters::memory::{InMemoryCatalog, InMemoryEnrollmentStore};
use crate::domain::catalog::{
    validate_sequence, Assessment, Course, CourseLevel, CourseTrack, Module, ModuleContent,
};
use crate::domain::foundation::{CourseId, ModuleId, Timestamp, UserId, ValidationError};

/// Errors loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid seed entry '{context}': {source}")]
    Invalid {
        context: String,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    courses: Vec<SeedCourse>,
    #[serde(default)]
    enrollments: Vec<SeedEnrollment>,
}

#[derive(Debug, Deserialize)]
struct SeedCourse {
    id: CourseId,
    title: String,
    track: CourseTrack,
    level: CourseLevel,
    #[serde(default)]
    description: String,
    #[serde(default)]
    detailed_description: String,
    price_minor: i64,
    #[serde(default)]
    equipment_fee_minor: i64,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    schedule: String,
    #[serde(default)]
    instructor: String,
    #[serde(default)]
    max_participants: u32,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    is_coming_soon: bool,
    #[serde(default)]
    modules: Vec<SeedModule>,
}

#[derive(Debug, Deserialize)]
struct SeedModule {
    #[serde(default)]
    id: Option<ModuleId>,
    module_number: u32,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    content: ModuleContent,
    assessment: Assessment,
}

#[derive(Debug, Deserialize)]
struct SeedEnrollment {
    user_id: String,
    course_id: CourseId,
}

fn default_currency() -> String {
    "inr".to_string()
}

/// Parsed and validated seed data.
#[derive(Debug, Clone)]
pub struct CatalogSeed {
    pub courses: Vec<Course>,
    pub modules: Vec<Module>,
    pub enrollments: Vec<(UserId, CourseId)>,
}

/// Counts of what a seed put into the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub courses: usize,
    pub modules: usize,
    pub enrollments: usize,
}

impl CatalogSeed {
    /// Parses seed YAML and checks every course and module.
    pub fn from_yaml(yaml: &str) -> Result<Self, SeedError> {
        let file: SeedFile = serde_yaml::from_str(yaml)?;
        let created_at = Timestamp::now();

        let mut courses = Vec::with_capacity(file.courses.len());
        let mut modules = Vec::new();
        for seed in file.courses {
            let course_id = seed.id;
            let mut course_modules: Vec<Module> = seed
                .modules
                .into_iter()
                .map(|m| Module {
                    id: m.id.unwrap_or_default(),
                    course_id,
                    module_number: m.module_number,
                    title: m.title,
                    description: m.description,
                    duration: m.duration,
                    content: m.content,
                    assessment: m.assessment,
                })
                .collect();
            course_modules.sort_by_key(|m| m.module_number);

            for module in &course_modules {
                module.validate().map_err(|source| SeedError::Invalid {
                    context: format!("{} / module {}", seed.title, module.module_number),
                    source,
                })?;
            }
            validate_sequence(&course_modules).map_err(|source| SeedError::Invalid {
                context: seed.title.clone(),
                source,
            })?;

            let course = Course {
                id: course_id,
                title: seed.title,
                track: seed.track,
                level: seed.level,
                description: seed.description,
                detailed_description: seed.detailed_description,
                price_minor: seed.price_minor,
                equipment_fee_minor: seed.equipment_fee_minor,
                currency: seed.currency,
                duration: seed.duration,
                location: seed.location,
                schedule: seed.schedule,
                instructor: seed.instructor,
                max_participants: seed.max_participants,
                features: seed.features,
                is_coming_soon: seed.is_coming_soon,
                created_at,
            };
            course.validate().map_err(|source| SeedError::Invalid {
                context: course.title.clone(),
                source,
            })?;

            courses.push(course);
            modules.extend(course_modules);
        }

        let enrollments = file
            .enrollments
            .into_iter()
            .map(|e| {
                UserId::new(e.user_id)
                    .map(|user| (user, e.course_id))
                    .map_err(|source| SeedError::Invalid {
                        context: format!("enrollment for course {}", e.course_id),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            courses,
            modules,
            enrollments,
        })
    }

    /// Reads and parses a seed file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Loads the seed into in-memory stores.
    pub async fn load_into(
        self,
        catalog: &InMemoryCatalog,
        enrollments: &InMemoryEnrollmentStore,
    ) -> SeedSummary {
        let summary = SeedSummary {
            courses: self.courses.len(),
            modules: self.modules.len(),
            enrollments: self.enrollments.len(),
        };
        for course in self.courses {
            catalog.add_course(course).await;
        }
        for module in self.modules {
            catalog.add_module(module).await;
        }
        for (user_id, course_id) in self.enrollments {
            enrollments.enroll_paid(user_id, course_id).await;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Fraction;
    use crate::ports::{CourseReader, EnrollmentChecker, ModuleReader};
    use std::io::Write;

    const SEED: &str = r#"
courses:
  - id: 7f0c6f5e-5d0e-4d3e-9a59-2f1a4f2b9c11
    title: Wellness Prerequisite
    track: wellness
    level: prerequisite
    price_minor: 2500000
    modules:
      - module_number: 2
        title: Tapping Sequence
        assessment:
          questions:
            - id: q1
              question: How many points?
              options: ["Five", "Nine"]
              correct_answer: 1
      - module_number: 1
        title: Foundations
        content:
          concept_explanation: Energy meridians
          exercises:
            - name: Breathing
              type: practical
              instructions: Breathe slowly
              duration: 5 minutes
        assessment:
          passing_score: 0.75
          questions:
            - id: q1
              question: What is EFT?
              options: ["A technique", "A drug"]
              correct_answer: 0
              explanation: EFT is a tapping technique.
enrollments:
  - user_id: learner-1
    course_id: 7f0c6f5e-5d0e-4d3e-9a59-2f1a4f2b9c11
"#;

    #[test]
    fn parses_courses_modules_and_enrollments() {
        let seed = CatalogSeed::from_yaml(SEED).unwrap();

        assert_eq!(seed.courses.len(), 1);
        assert_eq!(seed.courses[0].currency, "inr");
        assert_eq!(seed.modules.len(), 2);
        assert_eq!(seed.modules[0].module_number, 1);
        assert_eq!(
            seed.modules[0].assessment.passing_score(),
            Fraction::new(3, 4).unwrap()
        );
        assert_eq!(
            seed.modules[1].assessment.passing_score(),
            Assessment::DEFAULT_PASSING_SCORE
        );
        assert_eq!(seed.modules[0].content.exercises[0].kind, "practical");
        assert_eq!(seed.enrollments.len(), 1);
    }

    #[test]
    fn rejects_gap_in_module_numbers() {
        let yaml = SEED.replace("module_number: 2", "module_number: 3");

        let result = CatalogSeed::from_yaml(&yaml);

        assert!(matches!(result, Err(SeedError::Invalid { .. })));
    }

    #[test]
    fn rejects_answer_key_outside_options() {
        let yaml = SEED.replace("correct_answer: 1", "correct_answer: 4");

        assert!(matches!(
            CatalogSeed::from_yaml(&yaml),
            Err(SeedError::Invalid { .. })
        ));
    }

    #[test]
    fn reports_missing_file() {
        let result = CatalogSeed::from_path("/nonexistent/seed.yaml");
        assert!(matches!(result, Err(SeedError::Io { .. })));
    }

    #[tokio::test]
    async fn loads_file_into_memory_stores() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let catalog = InMemoryCatalog::new();
        let enrollments = InMemoryEnrollmentStore::new();
        let summary = CatalogSeed::from_path(file.path())
            .unwrap()
            .load_into(&catalog, &enrollments)
            .await;

        assert_eq!(
            summary,
            SeedSummary {
                courses: 1,
                modules: 2,
                enrollments: 1
            }
        );
        let course_id: CourseId = "7f0c6f5e-5d0e-4d3e-9a59-2f1a4f2b9c11".parse().unwrap();
        assert!(CourseReader::find_by_id(&catalog, &course_id).await.unwrap().is_some());
        assert_eq!(catalog.count_by_course(&course_id).await.unwrap(), 2);
        let learner = UserId::new("learner-1").unwrap();
        assert!(enrollments.has_paid_enrollment(&learner, &course_id).await.unwrap());
    }
}
