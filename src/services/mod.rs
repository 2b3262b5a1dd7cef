pub mod attempt_service;
pub mod grading;
pub mod lesson_service;
pub mod sequence_service;

pub use attempt_service::AttemptService;
pub use lesson_service::LessonService;
pub use sequence_service::SequenceService;
