#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Lesson, Question, QuestionType, Test};

    /// Single-choice question with a two-option key.
    pub fn single_choice(id: &str, order: i16, options: &[&str], correct: &str) -> Question {
        Question {
            id: id.to_string(),
            test_id: "test-1".to_string(),
            question_type: QuestionType::SingleChoice,
            prompt: format!("Question {}", id),
            options: Some(options.iter().map(|o| o.to_string()).collect()),
            correct_answers: vec![correct.to_string()],
            points: 1,
            question_order: order,
        }
    }

    pub fn boolean(id: &str, order: i16, correct: bool) -> Question {
        Question {
            id: id.to_string(),
            test_id: "test-1".to_string(),
            question_type: QuestionType::Boolean,
            prompt: format!("Question {}", id),
            options: None,
            correct_answers: vec![correct.to_string()],
            points: 1,
            question_order: order,
        }
    }

    /// Two-question test passing at 50%, as used across the grading tests.
    pub fn capitals_test() -> Test {
        let mut test = Test::new("course-1", "Capitals", 50, 0);
        test.id = "test-1".to_string();
        test.questions = vec![
            single_choice("q1", 0, &["Paris", "Rome"], "Paris"),
            boolean("q2", 1, true),
        ];
        test
    }

    pub fn lesson(id: &str, order: i16) -> Lesson {
        let mut lesson = Lesson::new("course-1", &format!("Lesson {}", id), "body", order);
        lesson.id = id.to_string();
        lesson
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn capitals_test_fixture_is_structurally_valid() {
        let test = capitals_test();

        assert!(test.validate().is_ok());
        assert_eq!(test.max_score(), 2);
    }

    #[test]
    fn lesson_fixture_uses_given_id() {
        let lesson = lesson("l-9", 4);

        assert_eq!(lesson.id, "l-9");
        assert_eq!(lesson.lesson_order, 4);
    }
}
