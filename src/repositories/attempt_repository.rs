use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::TestAttempt};

/// Append-only store of graded attempts. There is deliberately no update or
/// delete: an attempt is an immutable fact, and concurrent submissions from
/// multiple tabs are both kept.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn create(&self, attempt: TestAttempt) -> AppResult<TestAttempt>;
    async fn find_by_user_and_test(
        &self,
        user_id: &str,
        test_id: &str,
    ) -> AppResult<Vec<TestAttempt>>;
    async fn get_user_attempts(
        &self,
        user_id: &str,
        test_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<TestAttempt>, i64)>;
}

pub struct MongoAttemptRepository {
    collection: Collection<TestAttempt>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("test_attempts");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for test_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_test_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "test_id": 1 })
            .options(IndexOptions::builder().name("user_test".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_test_index).await?;

        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn create(&self, attempt: TestAttempt) -> AppResult<TestAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_user_and_test(
        &self,
        user_id: &str,
        test_id: &str,
    ) -> AppResult<Vec<TestAttempt>> {
        let attempts = self
            .collection
            .find(doc! {
                "user_id": user_id,
                "test_id": test_id,
            })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn get_user_attempts(
        &self,
        user_id: &str,
        test_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<TestAttempt>, i64)> {
        let mut filter = doc! { "user_id": user_id };

        if let Some(tid) = test_id {
            filter.insert("test_id", tid);
        }

        let total = self.collection.count_documents(filter.clone()).await?;

        let attempts = self
            .collection
            .find(filter)
            .skip(offset as u64)
            .limit(limit)
            .sort(doc! { "completed_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok((attempts, total as i64))
    }
}
