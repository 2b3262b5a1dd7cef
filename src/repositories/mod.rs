pub mod attempt_repository;
pub mod completion_repository;
pub mod lesson_repository;
pub mod test_repository;

pub use attempt_repository::{AttemptRepository, MongoAttemptRepository};
pub use completion_repository::{CompletionRepository, MongoCompletionRepository};
pub use lesson_repository::{LessonRepository, MongoLessonRepository};
pub use test_repository::{MongoTestRepository, TestRepository};
