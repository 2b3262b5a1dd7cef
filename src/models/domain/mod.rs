pub mod content;
pub mod lesson;
pub mod question;
pub mod test_attempt;

pub use content::{ContentItem, ContentKind};
pub use lesson::{Lesson, LessonCompletion};
pub use question::{Question, QuestionType};
pub use test::Test;
pub use test_attempt::TestAttempt;
