//! Request and response DTOs for progression endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{ModuleDetail, ModuleWithProgress, QuizView, SubmitQuizResult};
use crate::domain::catalog::{ModuleContent, PublicQuestion};
use crate::domain::foundation::CourseId;
use crate::domain::progression::{CourseProgress, ModuleProgress, ModuleStatus, QuestionReview};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST .../submit-quiz`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuizRequest {
    /// Chosen option index per question, in question order.
    pub answers: Vec<i64>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// A learner's standing on one module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub status: ModuleStatus,
    pub is_unlocked: bool,
    pub is_completed: bool,
    pub quiz_attempts: u32,
    /// Best score as a fraction in `[0, 1]`.
    pub best_score: f64,
    pub best_score_correct: u32,
    pub best_score_total: u32,
    pub last_attempt_at: Option<String>,
    pub completed_at: Option<String>,
}

impl From<&ModuleProgress> for ProgressResponse {
    fn from(progress: &ModuleProgress) -> Self {
        let best = progress.best_score();
        Self {
            status: progress.status(),
            is_unlocked: progress.is_unlocked(),
            is_completed: progress.is_completed(),
            quiz_attempts: progress.quiz_attempts(),
            best_score: best.as_fraction(),
            best_score_correct: best.correct(),
            best_score_total: best.total(),
            last_attempt_at: progress.last_attempt_at().map(|t| t.to_rfc3339()),
            completed_at: progress.completed_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// Module listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleListItemResponse {
    pub id: String,
    pub module_number: u32,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub question_count: usize,
    pub progress: ProgressResponse,
}

impl From<ModuleWithProgress> for ModuleListItemResponse {
    fn from(item: ModuleWithProgress) -> Self {
        Self {
            id: item.module.id.to_string(),
            module_number: item.module.module_number,
            title: item.module.title,
            description: item.module.description,
            duration: item.module.duration,
            question_count: item.module.question_count,
            progress: ProgressResponse::from(&item.progress),
        }
    }
}

/// Full module content for an unlocked module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDetailResponse {
    pub id: String,
    pub course_id: String,
    pub module_number: u32,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub content: ModuleContent,
    pub question_count: usize,
    pub progress: ProgressResponse,
}

impl From<ModuleDetail> for ModuleDetailResponse {
    fn from(detail: ModuleDetail) -> Self {
        let ModuleDetail { module, progress } = detail;
        Self {
            id: module.id.to_string(),
            course_id: module.course_id.to_string(),
            module_number: module.module_number,
            question_count: module.assessment.question_count(),
            title: module.title,
            description: module.description,
            duration: module.duration,
            content: module.content,
            progress: ProgressResponse::from(&progress),
        }
    }
}

/// Quiz questions without the answer key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub module_id: String,
    pub module_number: u32,
    pub module_title: String,
    pub questions: Vec<PublicQuestion>,
    /// Fraction of questions needed to pass.
    pub passing_score: f64,
    pub attempts: u32,
    pub best_score: f64,
}

impl From<QuizView> for QuizResponse {
    fn from(view: QuizView) -> Self {
        Self {
            module_id: view.module_id.to_string(),
            module_number: view.module_number,
            module_title: view.module_title,
            questions: view.questions,
            passing_score: view.passing_score.as_f64(),
            attempts: view.attempts,
            best_score: view.best_score.as_fraction(),
        }
    }
}

/// Graded submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuizResponse {
    pub module_id: String,
    /// Score of this submission as a fraction in `[0, 1]`.
    pub score: f64,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub passed: bool,
    pub results: Vec<QuestionReviewResponse>,
    pub newly_completed: bool,
    pub next_module_unlocked: bool,
    pub unlocked_module_id: Option<String>,
    pub progress: ProgressResponse,
}

/// Per-question feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionReviewResponse {
    pub question_id: String,
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

impl From<QuestionReview> for QuestionReviewResponse {
    fn from(review: QuestionReview) -> Self {
        Self {
            question_id: review.question_id,
            question: review.question,
            your_answer: review.your_answer,
            correct_answer: review.correct_answer,
            is_correct: review.is_correct,
            explanation: review.explanation,
        }
    }
}

impl From<SubmitQuizResult> for SubmitQuizResponse {
    fn from(result: SubmitQuizResult) -> Self {
        Self {
            module_id: result.module_id.to_string(),
            score: result.score.as_fraction(),
            correct_answers: result.score.correct(),
            total_questions: result.score.total(),
            passed: result.passed,
            results: result
                .reviews
                .into_iter()
                .map(QuestionReviewResponse::from)
                .collect(),
            newly_completed: result.newly_completed,
            next_module_unlocked: result.unlocked_module_id.is_some(),
            unlocked_module_id: result.unlocked_module_id.map(|id| id.to_string()),
            progress: ProgressResponse::from(&result.progress),
        }
    }
}

/// Aggregate standing in a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseProgressResponse {
    pub course_id: String,
    pub total_modules: u32,
    pub completed_modules: u32,
    pub current_module: u32,
    pub overall_progress: f64,
}

impl CourseProgressResponse {
    pub fn new(course_id: CourseId, progress: CourseProgress) -> Self {
        Self {
            course_id: course_id.to_string(),
            total_modules: progress.total_modules,
            completed_modules: progress.completed_modules,
            current_module: progress.current_module,
            overall_progress: progress.overall_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::progression::fixtures::{learner, position};
    use crate::domain::progression::Score;

    #[test]
    fn progress_response_reports_fraction_and_parts() {
        let pos = position(CourseId::new(), 1);
        let mut progress = ModuleProgress::first_visit(learner(), &pos, None, Timestamp::now());
        progress.record_attempt(Score::new(4, 5), true, Timestamp::now());

        let response = ProgressResponse::from(&progress);

        assert!((response.best_score - 0.8).abs() < f64::EPSILON);
        assert_eq!(response.best_score_correct, 4);
        assert_eq!(response.status, ModuleStatus::Completed);
        assert!(response.completed_at.is_some());
    }

    #[test]
    fn submit_request_parses_negative_indices() {
        let request: SubmitQuizRequest = serde_json::from_str(r#"{"answers":[1,-1,7]}"#).unwrap();
        assert_eq!(request.answers, vec![1, -1, 7]);
    }
}
