//! Module assessments: the quiz that gates progression to the next module.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Fraction, ValidationError};

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    /// Text of the option at `index`, if the index addresses an option.
    ///
    /// Negative and out-of-range indices yield `None`.
    pub fn option_text(&self, index: i64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// True only when `index` is exactly the stored correct option.
    pub fn is_correct(&self, index: i64) -> bool {
        usize::try_from(index).map_or(false, |i| i == self.correct_answer)
    }

    pub fn correct_option_text(&self) -> &str {
        self.options
            .get(self.correct_answer)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The learner-facing form of the question, without the answer key.
    pub fn without_answer(&self) -> PublicQuestion {
        PublicQuestion {
            id: self.id.clone(),
            question: self.question.clone(),
            options: self.options.clone(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.question.trim().is_empty() {
            return Err(ValidationError::empty_field("question"));
        }
        if self.options.len() < 2 {
            return Err(ValidationError::invalid_format(
                "options",
                format!("question '{}' needs at least two options", self.id),
            ));
        }
        if self.correct_answer >= self.options.len() {
            return Err(ValidationError::out_of_range(
                "correct_answer",
                0,
                self.options.len() as i32 - 1,
                self.correct_answer as i32,
            ));
        }
        Ok(())
    }
}

/// A question as served to learners before they answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
}

/// Ordered quiz questions plus the score needed to pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    questions: Vec<QuizQuestion>,
    /// Fraction of questions needed to pass, e.g. `0.8`.
    #[serde(default = "Assessment::default_passing_score")]
    passing_score: Fraction,
}

impl Assessment {
    pub const DEFAULT_PASSING_SCORE: Fraction = Fraction::percent(80);

    pub fn new(
        questions: Vec<QuizQuestion>,
        passing_score: Fraction,
    ) -> Result<Self, ValidationError> {
        let assessment = Self {
            questions,
            passing_score,
        };
        assessment.validate()?;
        Ok(assessment)
    }

    /// Requires at least one question and checks every question's options
    /// and answer key.
    ///
    /// Deserialized assessments are unchecked until this is called.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.questions.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }
        self.questions.iter().try_for_each(QuizQuestion::validate)
    }

    /// Assessment with the default 80% threshold.
    pub fn with_default_threshold(questions: Vec<QuizQuestion>) -> Result<Self, ValidationError> {
        Self::new(questions, Self::DEFAULT_PASSING_SCORE)
    }

    fn default_passing_score() -> Fraction {
        Self::DEFAULT_PASSING_SCORE
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn passing_score(&self) -> Fraction {
        self.passing_score
    }

    pub fn public_questions(&self) -> Vec<PublicQuestion> {
        self.questions.iter().map(QuizQuestion::without_answer).collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Question whose correct option is `correct`, out of four.
    pub fn question(n: usize, correct: usize) -> QuizQuestion {
        QuizQuestion {
            id: format!("q{}", n),
            question: format!("Question {}?", n),
            options: (0..4).map(|i| format!("Option {}", i)).collect(),
            correct_answer: correct,
            explanation: format!("Because of reason {}", n),
        }
    }

    /// Five questions, each with the correct answer at index 1.
    pub fn five_question_assessment() -> Assessment {
        Assessment::with_default_threshold((1..=5).map(|n| question(n, 1)).collect()).unwrap()
    }
}
