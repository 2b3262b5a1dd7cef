pub mod course_handler;
pub mod health_handler;
pub mod lesson_handler;
pub mod test_handler;

pub use course_handler::{get_sequence, reorder_content};
pub use health_handler::health_check;
pub use lesson_handler::{complete_lesson, get_completion_status};
pub use test_handler::{get_attempt_history, get_has_passed, get_test, submit_attempt};
