//! Quiz grading with exact score arithmetic.
//!
//! A score is the rational `correct / total`; it is never rounded before
//! comparison, so 4/5 against an 80% threshold passes.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use super::ProgressionError;
use crate::domain::catalog::Assessment;
use crate::domain::foundation::Fraction;

/// Rendered in a review when the submitted index addresses no option.
pub const NO_ANSWER: &str = "No answer";

/// Fraction of questions answered correctly.
#[derive(Debug, Clone, Copy)]
pub struct Score {
    correct: u32,
    total: u32,
}

impl Score {
    /// Creates a score, clamping `correct` to `total`.
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    /// The score of a module never attempted.
    pub fn zero() -> Self {
        Self { correct: 0, total: 0 }
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Score in `0.0..=1.0` for display. Never used for pass decisions.
    pub fn as_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total)
        }
    }

    /// True when the score is at or above `threshold`.
    pub fn meets(&self, threshold: Fraction) -> bool {
        threshold.is_met_by(u64::from(self.correct), u64::from(self.total))
    }

    /// (numerator, denominator) with 0/0 read as 0/1.
    fn normalized(&self) -> (u64, u64) {
        if self.total == 0 {
            (0, 1)
        } else {
            (u64::from(self.correct), u64::from(self.total))
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.normalized();
        let (c, d) = other.normalized();
        (a * d).cmp(&(c * b))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// Per-question feedback returned after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionReview {
    pub question_id: String,
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// Outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizGrade {
    pub score: Score,
    pub passed: bool,
    pub reviews: Vec<QuestionReview>,
}

/// Grades `answers` against the assessment's answer key.
///
/// `answers[i]` is the chosen option index for question `i`. Any index that
/// is not exactly the stored correct one, including negative and
/// out-of-range values, counts as wrong.
pub fn grade(assessment: &Assessment, answers: &[i64]) -> Result<QuizGrade, ProgressionError> {
    let questions = assessment.questions();
    if questions.is_empty() {
        return Err(ProgressionError::validation(
            "assessment",
            "module has no quiz questions",
        ));
    }
    if answers.len() != questions.len() {
        return Err(ProgressionError::validation(
            "answers",
            format!(
                "expected {} answers, got {}",
                questions.len(),
                answers.len()
            ),
        ));
    }

    let reviews: Vec<QuestionReview> = questions
        .iter()
        .zip(answers)
        .map(|(question, &answer)| QuestionReview {
            question_id: question.id.clone(),
            question: question.question.clone(),
            your_answer: question.option_text(answer).unwrap_or(NO_ANSWER).to_string(),
            correct_answer: question.correct_option_text().to_string(),
            is_correct: question.is_correct(answer),
            explanation: question.explanation.clone(),
        })
        .collect();

    let correct = reviews.iter().filter(|r| r.is_correct).count() as u32;
    let score = Score::new(correct, questions.len() as u32);
    Ok(QuizGrade {
        passed: score.meets(assessment.passing_score()),
        score,
        reviews,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::fixtures::{five_question_assessment, question};
    use proptest::prelude::*;

    #[test]
    fn four_of_five_passes_at_eighty_percent() {
        let grade = grade(&five_question_assessment(), &[1, 1, 1, 1, 0]).unwrap();
        assert_eq!(grade.score, Score::new(4, 5));
        assert!((grade.score.as_fraction() - 0.8).abs() < f64::EPSILON);
        assert!(grade.passed);
    }

    #[test]
    fn one_of_five_fails() {
        let grade = grade(&five_question_assessment(), &[1, 0, 0, 0, 0]).unwrap();
        assert_eq!(grade.score.correct(), 1);
        assert!((grade.score.as_fraction() - 0.2).abs() < f64::EPSILON);
        assert!(!grade.passed);
    }

    #[test]
    fn out_of_range_answer_reads_no_answer() {
        let grade = grade(&five_question_assessment(), &[1, 1, 1, 1, 9]).unwrap();
        let last = &grade.reviews[4];
        assert!(!last.is_correct);
        assert_eq!(last.your_answer, NO_ANSWER);
        assert_eq!(last.correct_answer, "Option 1");
    }

    #[test]
    fn negative_answer_is_incorrect() {
        let grade = grade(&five_question_assessment(), &[-1, 1, 1, 1, 1]).unwrap();
        assert!(!grade.reviews[0].is_correct);
        assert_eq!(grade.reviews[0].your_answer, NO_ANSWER);
        assert_eq!(grade.score.correct(), 4);
    }

    #[test]
    fn review_carries_explanation_and_chosen_text() {
        let grade = grade(&five_question_assessment(), &[2, 1, 1, 1, 1]).unwrap();
        let first = &grade.reviews[0];
        assert_eq!(first.question_id, "q1");
        assert_eq!(first.your_answer, "Option 2");
        assert_eq!(first.explanation, "Because of reason 1");
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let result = grade(&five_question_assessment(), &[1, 1, 1, 1]);
        assert!(matches!(
            result,
            Err(ProgressionError::ValidationFailed { ref field, .. }) if field == "answers"
        ));
    }

    #[test]
    fn empty_quiz_cannot_be_graded() {
        // Stored assessments are deserialized without validation.
        let assessment: Assessment = serde_json::from_str(r#"{"questions": []}"#).unwrap();
        assert!(matches!(
            grade(&assessment, &[]),
            Err(ProgressionError::ValidationFailed { ref field, .. }) if field == "assessment"
        ));
    }

    #[test]
    fn seven_of_eight_passes_at_seven_eighths() {
        let questions = (1..=8).map(|n| question(n, 0)).collect::<Vec<_>>();
        let threshold = Fraction::try_from_decimal(0.875).unwrap();
        let assessment = Assessment::new(questions, threshold).unwrap();

        let passed = grade(&assessment, &[0, 0, 0, 0, 0, 0, 0, 1]).unwrap();
        let failed = grade(&assessment, &[0, 0, 0, 0, 0, 0, 1, 1]).unwrap();

        assert_eq!(passed.score, Score::new(7, 8));
        assert!(passed.passed);
        assert!(!failed.passed);
    }

    #[test]
    fn threshold_is_exact_for_non_terminating_fractions() {
        // 2/3 is 66.66...%, which must fail a 67% threshold and pass 66%.
        let questions = (1..=3).map(|n| question(n, 0)).collect::<Vec<_>>();
        let strict = Assessment::new(questions.clone(), Fraction::percent(67)).unwrap();
        let lenient = Assessment::new(questions, Fraction::percent(66)).unwrap();
        assert!(!grade(&strict, &[0, 0, 1]).unwrap().passed);
        assert!(grade(&lenient, &[0, 0, 1]).unwrap().passed);
    }

    #[test]
    fn equivalent_fractions_compare_equal() {
        assert_eq!(Score::new(2, 4), Score::new(1, 2));
        assert!(Score::new(3, 4) > Score::new(2, 3));
        assert!(Score::zero() < Score::new(1, 5));
        assert_eq!(Score::zero(), Score::new(0, 5));
    }

    proptest! {
        #[test]
        fn score_counts_exact_matches(answers in prop::collection::vec(-2i64..6, 5)) {
            let graded = grade(&five_question_assessment(), &answers).unwrap();
            let expected = answers.iter().filter(|&&a| a == 1).count() as u32;
            prop_assert_eq!(graded.score.correct(), expected);
            prop_assert_eq!(graded.score.total(), 5);
            prop_assert_eq!(graded.passed, expected * 100 >= 80 * 5);
        }

        #[test]
        fn more_correct_never_lowers_the_score(correct in 0u32..50, total in 1u32..50) {
            let lower = Score::new(correct.min(total), total);
            let higher = Score::new((correct + 1).min(total), total);
            prop_assert!(higher >= lower);
        }

        #[test]
        fn passing_is_monotone_in_threshold(correct in 0u32..20, total in 1u32..20, pct in 0u8..=100) {
            let score = Score::new(correct, total);
            if score.meets(Fraction::percent(pct)) && pct > 0 {
                prop_assert!(score.meets(Fraction::percent(pct - 1)));
            }
        }
    }
}
