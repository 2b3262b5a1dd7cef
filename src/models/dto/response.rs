use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{ContentItem, Question, QuestionType, Test, TestAttempt};

/// Learner-facing question view. Grading happens server-side, so the answer
/// key never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub question_type: QuestionType,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub points: i16,
    pub question_order: i16,
}

impl From<Question> for QuestionView {
    fn from(question: Question) -> Self {
        QuestionView {
            id: question.id,
            question_type: question.question_type,
            prompt: question.prompt,
            options: question.options,
            points: question.points,
            question_order: question.question_order,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TestView {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub min_pass_percentage: i16,
    pub test_order: i16,
    pub questions: Vec<QuestionView>,
}

impl From<Test> for TestView {
    fn from(test: Test) -> Self {
        let mut questions: Vec<QuestionView> =
            test.questions.into_iter().map(QuestionView::from).collect();
        questions.sort_by_key(|q| q.question_order);

        TestView {
            id: test.id,
            course_id: test.course_id,
            title: test.title,
            min_pass_percentage: test.min_pass_percentage,
            test_order: test.test_order,
            questions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HasPassedResponse {
    pub has_passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionStatusResponse {
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttemptHistoryResponse {
    pub attempts: Vec<TestAttempt>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SequenceStateResponse {
    pub items: Vec<ContentItem>,
    pub completion_percentage: i16,
}
