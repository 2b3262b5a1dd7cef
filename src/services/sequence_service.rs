use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{ContentItem, ContentKind, Lesson, Test},
    models::dto::request::ReorderItem,
    models::dto::response::SequenceStateResponse,
    repositories::{AttemptRepository, CompletionRepository, LessonRepository, TestRepository},
};

/// Composes the lessons and tests of a course into one ordered sequence and
/// computes per-learner completion over it.
pub struct SequenceService {
    lessons: Arc<dyn LessonRepository>,
    tests: Arc<dyn TestRepository>,
    completions: Arc<dyn CompletionRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl SequenceService {
    pub fn new(
        lessons: Arc<dyn LessonRepository>,
        tests: Arc<dyn TestRepository>,
        completions: Arc<dyn CompletionRepository>,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            lessons,
            tests,
            completions,
            attempts,
        }
    }

    pub async fn sequence_state(
        &self,
        course_id: &str,
        user_id: &str,
    ) -> AppResult<SequenceStateResponse> {
        let lessons = self.lessons.find_by_course(course_id).await?;
        let tests = self.tests.find_by_course(course_id).await?;

        // Progress lookups degrade to "incomplete" on error: a storage fault
        // must never surface an item as passed or completed.
        let lesson_ids: Vec<String> = lessons.iter().map(|l| l.id.clone()).collect();
        let completed_lessons: HashSet<String> = match self
            .completions
            .find_by_user_and_lessons(user_id, &lesson_ids)
            .await
        {
            Ok(completions) => completions.into_iter().map(|c| c.lesson_id).collect(),
            Err(err) => {
                log::warn!(
                    "Completion lookup failed for user {} in course {}: {}",
                    user_id,
                    course_id,
                    err
                );
                HashSet::new()
            }
        };

        let mut passed_tests = HashSet::new();
        for test in &tests {
            match self.attempts.find_by_user_and_test(user_id, &test.id).await {
                Ok(attempts) => {
                    if attempts.iter().any(|a| a.is_passed) {
                        passed_tests.insert(test.id.clone());
                    }
                }
                Err(err) => {
                    log::warn!(
                        "Attempt lookup failed for user {} on test {}: {}",
                        user_id,
                        test.id,
                        err
                    );
                }
            }
        }

        let items = build_sequence(&lessons, &tests, &completed_lessons, &passed_tests);
        let completion_percentage = completion_percentage(&items);

        Ok(SequenceStateResponse {
            items,
            completion_percentage,
        })
    }

    /// Apply a batch of order updates. Every update is attempted; a single
    /// failure does not stop the rest, but the batch as a whole reports which
    /// ids were applied and which were not. Applied writes are not rolled
    /// back.
    pub async fn reorder(&self, course_id: &str, updates: Vec<ReorderItem>) -> AppResult<()> {
        let mut applied = Vec::new();
        let mut failed = Vec::new();

        for update in updates {
            let result = match update.kind {
                ContentKind::Lesson => self.lessons.update_order(&update.id, update.order).await,
                ContentKind::Test => self.tests.update_order(&update.id, update.order).await,
            };

            match result {
                Ok(()) => applied.push(update.id),
                Err(err) => {
                    log::error!(
                        "Reorder of {:?} '{}' in course {} failed: {}",
                        update.kind,
                        update.id,
                        course_id,
                        err
                    );
                    failed.push(update.id);
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(AppError::PartialBatch { applied, failed })
        }
    }
}

/// Pure projection of the four persisted inputs into the merged sequence.
/// Sorted ascending by order; equal orders break deterministically to lesson
/// before test, then earlier creation time.
pub fn build_sequence(
    lessons: &[Lesson],
    tests: &[Test],
    completed_lessons: &HashSet<String>,
    passed_tests: &HashSet<String>,
) -> Vec<ContentItem> {
    let mut items: Vec<ContentItem> = Vec::with_capacity(lessons.len() + tests.len());

    for lesson in lessons {
        items.push(ContentItem {
            id: lesson.id.clone(),
            kind: ContentKind::Lesson,
            title: lesson.title.clone(),
            order: lesson.lesson_order,
            completed: completed_lessons.contains(&lesson.id),
            passed: None,
            created_at: lesson.created_at,
        });
    }

    for test in tests {
        let passed = passed_tests.contains(&test.id);
        items.push(ContentItem {
            id: test.id.clone(),
            kind: ContentKind::Test,
            title: test.title.clone(),
            order: test.test_order,
            completed: passed,
            passed: Some(passed),
            created_at: test.created_at,
        });
    }

    items.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| kind_rank(a.kind).cmp(&kind_rank(b.kind)))
            .then_with(|| a.created_at.cmp(&b.created_at))
    });

    items
}

fn kind_rank(kind: ContentKind) -> u8 {
    match kind {
        ContentKind::Lesson => 0,
        ContentKind::Test => 1,
    }
}

/// Completed items over total, as a percentage rounded to nearest. An empty
/// course reads as 0, not 100.
pub fn completion_percentage(items: &[ContentItem]) -> i16 {
    if items.is_empty() {
        return 0;
    }

    let completed = items.iter().filter(|i| i.completed).count();
    ((completed as f64 / items.len() as f64) * 100.0).round() as i16
}

/// Successor of the given item in the merged sequence, regardless of its
/// completion state. Navigation is not hard-blocked by incomplete items.
pub fn next_after<'a>(items: &'a [ContentItem], current_id: &str) -> Option<&'a ContentItem> {
    let position = items.iter().position(|i| i.id == current_id)?;
    items.get(position + 1)
}
