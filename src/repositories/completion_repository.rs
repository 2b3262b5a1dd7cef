use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::LessonCompletion};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    async fn create(&self, completion: LessonCompletion) -> AppResult<LessonCompletion>;
    async fn find_by_user_and_lesson(
        &self,
        user_id: &str,
        lesson_id: &str,
    ) -> AppResult<Option<LessonCompletion>>;
    async fn find_by_user_and_lessons(
        &self,
        user_id: &str,
        lesson_ids: &[String],
    ) -> AppResult<Vec<LessonCompletion>>;
}

pub struct MongoCompletionRepository {
    collection: Collection<LessonCompletion>,
}

impl MongoCompletionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("lesson_completions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for lesson_completions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // Backstop for the create-or-fetch flow: even if two requests race,
        // only one completion row can exist per (user, lesson).
        let user_lesson_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "lesson_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_lesson_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_lesson_index).await?;

        Ok(())
    }
}

#[async_trait]
impl CompletionRepository for MongoCompletionRepository {
    async fn create(&self, completion: LessonCompletion) -> AppResult<LessonCompletion> {
        self.collection.insert_one(&completion).await?;
        Ok(completion)
    }

    async fn find_by_user_and_lesson(
        &self,
        user_id: &str,
        lesson_id: &str,
    ) -> AppResult<Option<LessonCompletion>> {
        let completion = self
            .collection
            .find_one(doc! {
                "user_id": user_id,
                "lesson_id": lesson_id,
            })
            .await?;
        Ok(completion)
    }

    async fn find_by_user_and_lessons(
        &self,
        user_id: &str,
        lesson_ids: &[String],
    ) -> AppResult<Vec<LessonCompletion>> {
        if lesson_ids.is_empty() {
            return Ok(Vec::new());
        }

        let completions = self
            .collection
            .find(doc! {
                "user_id": user_id,
                "lesson_id": { "$in": lesson_ids },
            })
            .await?
            .try_collect()
            .await?;
        Ok(completions)
    }
}
