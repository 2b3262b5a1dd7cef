use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Test,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Test>>;
    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<Test>>;
    async fn update_order(&self, id: &str, order: i16) -> AppResult<()>;
}

pub struct MongoTestRepository {
    collection: Collection<Test>,
}

impl MongoTestRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("tests");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for tests collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let course_index = IndexModel::builder()
            .keys(doc! { "course_id": 1 })
            .options(IndexOptions::builder().name("course_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(course_index).await?;

        Ok(())
    }
}

#[async_trait]
impl TestRepository for MongoTestRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Test>> {
        let test = self.collection.find_one(doc! { "id": id }).await?;
        Ok(test)
    }

    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<Test>> {
        let tests = self
            .collection
            .find(doc! { "course_id": course_id })
            .await?
            .try_collect()
            .await?;
        Ok(tests)
    }

    async fn update_order(&self, id: &str, order: i16) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "test_order": order as i32,
                    "updated_at": Utc::now().to_rfc3339(),
                }},
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Test with id '{}' not found", id)));
        }

        Ok(())
    }
}
