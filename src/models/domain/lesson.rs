use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Lesson {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub content: String,
    pub lesson_order: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Lesson {
    pub fn new(course_id: &str, title: &str, content: &str, lesson_order: i16) -> Self {
        Lesson {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            lesson_order,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }
}

/// At most one completion exists per (user, lesson) pair; completing again
/// returns the existing record instead of inserting a duplicate.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LessonCompletion {
    pub id: String,
    pub lesson_id: String,
    pub user_id: String,
    pub completed_at: DateTime<Utc>,
}

impl LessonCompletion {
    pub fn new(lesson_id: &str, user_id: &str) -> Self {
        LessonCompletion {
            id: Uuid::new_v4().to_string(),
            lesson_id: lesson_id.to_string(),
            user_id: user_id.to_string(),
            completed_at: Utc::now(),
        }
    }
}
