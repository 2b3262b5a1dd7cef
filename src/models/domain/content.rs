use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    Lesson,
    Test,
}

/// Uniform view over a lesson or test used for sequencing. This is a derived
/// projection, rebuilt on demand from the persisted lessons, tests,
/// completions and attempts; it is never stored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentItem {
    pub id: String,
    pub kind: ContentKind,
    pub title: String,
    pub order: i16,
    pub completed: bool,
    /// Pass state for tests; lessons have no pass concept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_kind_serializes_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ContentKind::Lesson).unwrap(),
            "\"LESSON\""
        );
        assert_eq!(
            serde_json::to_string(&ContentKind::Test).unwrap(),
            "\"TEST\""
        );
    }

    #[test]
    fn lesson_item_omits_passed_field() {
        let item = ContentItem {
            id: "l-1".to_string(),
            kind: ContentKind::Lesson,
            title: "Intro".to_string(),
            order: 0,
            completed: false,
            passed: None,
            created_at: None,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("passed"));
    }
}
