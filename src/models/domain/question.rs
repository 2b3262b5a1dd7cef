use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    SingleChoice,   // One correct option out of at least two
    MultipleChoice, // One or more correct options, all-or-nothing grading
    Boolean,        // True/False
    TextMatch,      // Free text compared verbatim against a reference string
}

impl QuestionType {
    pub fn is_choice_based(&self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultipleChoice)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub test_id: String,
    pub question_type: QuestionType,
    pub prompt: String,
    pub options: Option<Vec<String>>, // Present only for choice-based types
    pub correct_answers: Vec<String>,
    pub points: i16,
    pub question_order: i16,
}

impl Question {
    /// Structural validity rules for a question and its answer key.
    /// Rejected questions never reach the grading engine.
    pub fn validate(&self) -> AppResult<()> {
        if self.points <= 0 {
            return Err(AppError::ValidationError(format!(
                "Question '{}' must have a positive point value",
                self.id
            )));
        }

        if self.correct_answers.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Question '{}' has no correct answers defined",
                self.id
            )));
        }

        match self.question_type {
            QuestionType::SingleChoice | QuestionType::Boolean | QuestionType::TextMatch => {
                if self.correct_answers.len() != 1 {
                    return Err(AppError::ValidationError(format!(
                        "Question '{}' must have exactly one correct answer",
                        self.id
                    )));
                }
            }
            QuestionType::MultipleChoice => {}
        }

        if self.question_type.is_choice_based() {
            let options = self.options.as_deref().unwrap_or_default();
            if options.len() < 2 {
                return Err(AppError::ValidationError(format!(
                    "Question '{}' requires at least two options",
                    self.id
                )));
            }

            for answer in &self.correct_answers {
                if !options.iter().any(|o| o == answer) {
                    return Err(AppError::ValidationError(format!(
                        "Question '{}' has correct answer '{}' that is not among its options",
                        self.id, answer
                    )));
                }
            }
        }

        Ok(())
    }
}
