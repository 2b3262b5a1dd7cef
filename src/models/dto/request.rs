use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::ContentKind;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionAnswerInput {
    #[validate(length(min = 1))]
    pub question_id: String,

    /// Submitted values for the question; may be empty for an unanswered
    /// question, but the entry itself must be present.
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitTestAttemptRequest {
    #[validate(nested)]
    pub answers: Vec<QuestionAnswerInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ReorderItem {
    #[validate(length(min = 1))]
    pub id: String,

    pub kind: ContentKind,

    #[validate(range(min = 0))]
    pub order: i16,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReorderContentRequest {
    #[validate(length(min = 1, message = "Reorder batch must not be empty"), nested)]
    pub updates: Vec<ReorderItem>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttemptHistoryParams {
    pub test_id: Option<String>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl AttemptHistoryParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_accepts_empty_answer_lists() {
        let request = SubmitTestAttemptRequest {
            answers: vec![QuestionAnswerInput {
                question_id: "q-1".to_string(),
                answers: vec![],
            }],
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn submit_request_rejects_blank_question_id() {
        let request = SubmitTestAttemptRequest {
            answers: vec![QuestionAnswerInput {
                question_id: "".to_string(),
                answers: vec!["Paris".to_string()],
            }],
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn reorder_request_rejects_empty_batch() {
        let request = ReorderContentRequest { updates: vec![] };

        assert!(request.validate().is_err());
    }

    #[test]
    fn reorder_item_deserializes_wire_kind() {
        let json = r#"{"id":"l-1","kind":"LESSON","order":2}"#;
        let item: ReorderItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.kind, ContentKind::Lesson);
        assert_eq!(item.order, 2);
    }

    #[test]
    fn history_params_clamp_limit() {
        let params = AttemptHistoryParams {
            test_id: None,
            offset: None,
            limit: Some(500),
        };

        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);
    }
}
