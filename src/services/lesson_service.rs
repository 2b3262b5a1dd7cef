use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    errors::{AppError, AppResult},
    models::domain::LessonCompletion,
    repositories::{CompletionRepository, LessonRepository},
};

pub struct LessonService {
    lessons: Arc<dyn LessonRepository>,
    completions: Arc<dyn CompletionRepository>,
}

impl LessonService {
    pub fn new(
        lessons: Arc<dyn LessonRepository>,
        completions: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            lessons,
            completions,
        }
    }

    /// Create-or-fetch: completing a lesson twice returns the original
    /// completion record, never a duplicate.
    pub async fn mark_complete(
        &self,
        lesson_id: &str,
        user_id: &str,
    ) -> AppResult<LessonCompletion> {
        self.lessons
            .find_by_id(lesson_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Lesson with id '{}' not found", lesson_id))
            })?;

        if let Some(existing) = self
            .completions
            .find_by_user_and_lesson(user_id, lesson_id)
            .await?
        {
            return Ok(existing);
        }

        let completion = LessonCompletion::new(lesson_id, user_id);
        match self.completions.create(completion).await {
            Ok(created) => {
                log::info!("User {} completed lesson {}", user_id, lesson_id);
                Ok(created)
            }
            // A concurrent request may have won the insert race; the unique
            // (user, lesson) index rejects the second row, so fall back to the
            // row that got in.
            Err(err) => match self
                .completions
                .find_by_user_and_lesson(user_id, lesson_id)
                .await?
            {
                Some(existing) => Ok(existing),
                None => Err(err),
            },
        }
    }

    pub async fn completion_status(
        &self,
        lesson_id: &str,
        user_id: &str,
    ) -> AppResult<(bool, Option<DateTime<Utc>>)> {
        let completion = self
            .completions
            .find_by_user_and_lesson(user_id, lesson_id)
            .await?;

        Ok(match completion {
            Some(c) => (true, Some(c.completed_at)),
            None => (false, None),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Lesson;
    use crate::repositories::completion_repository::MockCompletionRepository;
    use crate::repositories::lesson_repository::MockLessonRepository;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryCompletions {
        rows: Mutex<Vec<LessonCompletion>>,
    }

    #[async_trait]
    impl CompletionRepository for InMemoryCompletions {
        async fn create(&self, completion: LessonCompletion) -> AppResult<LessonCompletion> {
            let mut rows = self.rows.lock().unwrap();
            if rows
                .iter()
                .any(|c| c.user_id == completion.user_id && c.lesson_id == completion.lesson_id)
            {
                return Err(AppError::DatabaseError("duplicate key".to_string()));
            }
            rows.push(completion.clone());
            Ok(completion)
        }

        async fn find_by_user_and_lesson(
            &self,
            user_id: &str,
            lesson_id: &str,
        ) -> AppResult<Option<LessonCompletion>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.user_id == user_id && c.lesson_id == lesson_id)
                .cloned())
        }

        async fn find_by_user_and_lessons(
            &self,
            user_id: &str,
            lesson_ids: &[String],
        ) -> AppResult<Vec<LessonCompletion>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.user_id == user_id && lesson_ids.contains(&c.lesson_id))
                .cloned()
                .collect())
        }
    }

    fn known_lesson_repo() -> MockLessonRepository {
        let mut lessons = MockLessonRepository::new();
        lessons.expect_find_by_id().returning(|id| {
            let mut lesson = Lesson::new("course-1", "Intro", "Welcome", 0);
            lesson.id = id.to_string();
            Ok(Some(lesson))
        });
        lessons
    }

    #[tokio::test]
    async fn completing_twice_returns_the_same_record() {
        let service = LessonService::new(
            Arc::new(known_lesson_repo()),
            Arc::new(InMemoryCompletions::default()),
        );

        let first = service.mark_complete("lesson-1", "user-1").await.unwrap();
        let second = service.mark_complete("lesson-1", "user-1").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.completed_at, second.completed_at);
    }

    #[tokio::test]
    async fn completions_are_scoped_per_user() {
        let service = LessonService::new(
            Arc::new(known_lesson_repo()),
            Arc::new(InMemoryCompletions::default()),
        );

        let mine = service.mark_complete("lesson-1", "user-1").await.unwrap();
        let theirs = service.mark_complete("lesson-1", "user-2").await.unwrap();

        assert_ne!(mine.id, theirs.id);
    }

    #[tokio::test]
    async fn unknown_lesson_is_not_found() {
        let mut lessons = MockLessonRepository::new();
        lessons.expect_find_by_id().returning(|_| Ok(None));

        let service = LessonService::new(
            Arc::new(lessons),
            Arc::new(InMemoryCompletions::default()),
        );

        let result = service.mark_complete("ghost", "user-1").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn insert_race_falls_back_to_existing_row() {
        let mut completions = MockCompletionRepository::new();
        let winner = LessonCompletion::new("lesson-1", "user-1");
        let winner_clone = winner.clone();

        // First lookup misses, the insert hits the unique index, the retry
        // lookup finds the row the concurrent request created.
        let mut lookups = 0;
        completions
            .expect_find_by_user_and_lesson()
            .returning(move |_, _| {
                lookups += 1;
                if lookups == 1 {
                    Ok(None)
                } else {
                    Ok(Some(winner_clone.clone()))
                }
            });
        completions
            .expect_create()
            .returning(|_| Err(AppError::DatabaseError("duplicate key".to_string())));

        let service = LessonService::new(Arc::new(known_lesson_repo()), Arc::new(completions));

        let result = service.mark_complete("lesson-1", "user-1").await.unwrap();
        assert_eq!(result.id, winner.id);
    }

    #[tokio::test]
    async fn completion_status_reports_timestamp() {
        let service = LessonService::new(
            Arc::new(known_lesson_repo()),
            Arc::new(InMemoryCompletions::default()),
        );

        let (before, at_before) = service.completion_status("lesson-1", "user-1").await.unwrap();
        assert!(!before);
        assert!(at_before.is_none());

        let completion = service.mark_complete("lesson-1", "user-1").await.unwrap();

        let (after, at_after) = service.completion_status("lesson-1", "user-1").await.unwrap();
        assert!(after);
        assert_eq!(at_after, Some(completion.completed_at));
    }
}
