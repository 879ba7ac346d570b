//! Course modules and their teaching content.

use serde::{Deserialize, Serialize};

use super::Assessment;
use crate::domain::foundation::{CourseId, ModuleId, ValidationError};

/// A hands-on exercise within a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub instructions: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

/// Teaching material shown once a module is unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContent {
    #[serde(default)]
    pub concept_explanation: String,
    #[serde(default)]
    pub instructor_script: String,
    #[serde(default)]
    pub student_activities: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub expected_outcome: String,
}

/// Where a module sits within its course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModulePosition {
    pub module_id: ModuleId,
    pub course_id: CourseId,
    pub module_number: u32,
}

/// One ordered unit of a course, gated by its assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub course_id: CourseId,
    /// 1-based, contiguous within the course.
    pub module_number: u32,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub content: ModuleContent,
    pub assessment: Assessment,
}

impl Module {
    pub fn position(&self) -> ModulePosition {
        ModulePosition {
            module_id: self.id,
            course_id: self.course_id,
            module_number: self.module_number,
        }
    }

    pub fn belongs_to(&self, course_id: &CourseId) -> bool {
        &self.course_id == course_id
    }

    pub fn is_first(&self) -> bool {
        self.module_number == 1
    }

    /// Listing view without content or answer key.
    pub fn summary(&self) -> ModuleSummary {
        ModuleSummary {
            id: self.id,
            course_id: self.course_id,
            module_number: self.module_number,
            title: self.title.clone(),
            description: self.description.clone(),
            duration: self.duration.clone(),
            question_count: self.assessment.question_count(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.module_number == 0 {
            return Err(ValidationError::out_of_range(
                "module_number",
                1,
                i32::MAX,
                0,
            ));
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        self.assessment.validate()
    }
}

/// Module as listed alongside a learner's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub id: ModuleId,
    pub course_id: CourseId,
    pub module_number: u32,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub question_count: usize,
}

/// Checks that module numbers in a course run 1..=n without gaps.
///
/// `modules` must already be sorted by `module_number`.
pub fn validate_sequence(modules: &[Module]) -> Result<(), ValidationError> {
    for (index, module) in modules.iter().enumerate() {
        let expected = index as u32 + 1;
        if module.module_number != expected {
            return Err(ValidationError::invalid_format(
                "module_number",
                format!(
                    "expected module {} but found {} ('{}')",
                    expected, module.module_number, module.title
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::catalog::assessment::fixtures::five_question_assessment;

    pub fn module(course_id: CourseId, number: u32) -> Module {
        Module {
            id: ModuleId::new(),
            course_id,
            module_number: number,
            title: format!("Module {}", number),
            description: format!("Description {}", number),
            duration: "45 minutes".to_string(),
            content: ModuleContent {
                concept_explanation: "Tapping on meridian points".to_string(),
                ..ModuleContent::default()
            },
            assessment: five_question_assessment(),
        }
    }

    pub fn course_modules(course_id: CourseId, count: u32) -> Vec<Module> {
        (1..=count).map(|n| module(course_id, n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn summary_reports_question_count_only() {
        let m = module(CourseId::new(), 2);
        let summary = m.summary();
        assert_eq!(summary.module_number, 2);
        assert_eq!(summary.question_count, 5);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("content").is_none());
        assert!(json.get("assessment").is_none());
    }

    #[test]
    fn module_number_zero_is_invalid() {
        let mut m = module(CourseId::new(), 1);
        m.module_number = 0;
        assert!(m.validate().is_err());
    }

    #[test]
    fn sequence_must_be_contiguous() {
        let course = CourseId::new();
        let mut modules = course_modules(course, 3);
        assert!(validate_sequence(&modules).is_ok());
        modules.remove(1);
        assert!(validate_sequence(&modules).is_err());
    }

    #[test]
    fn exercise_type_field_round_trips_as_type() {
        let json = r#"{"name":"EFT basics","type":"practical","instructions":"Tap","duration":"10 min"}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.kind, "practical");
        assert!(exercise.outcome.is_none());
    }

    #[test]
    fn belongs_to_checks_course() {
        let course = CourseId::new();
        let m = module(course, 1);
        assert!(m.belongs_to(&course));
        assert!(!m.belongs_to(&CourseId::new()));
        assert!(m.is_first());
    }
}
