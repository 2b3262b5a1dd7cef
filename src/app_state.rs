use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoAttemptRepository, MongoCompletionRepository, MongoLessonRepository,
        MongoTestRepository,
    },
    services::{AttemptService, LessonService, SequenceService},
};

#[derive(Clone)]
pub struct AppState {
    pub attempt_service: Arc<AttemptService>,
    pub lesson_service: Arc<LessonService>,
    pub sequence_service: Arc<SequenceService>,
    pub config: Arc<Config>,
    pub db: Database,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let test_repository = Arc::new(MongoTestRepository::new(&db));
        test_repository.ensure_indexes().await?;

        let lesson_repository = Arc::new(MongoLessonRepository::new(&db));
        lesson_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let completion_repository = Arc::new(MongoCompletionRepository::new(&db));
        completion_repository.ensure_indexes().await?;

        let attempt_service = Arc::new(AttemptService::new(
            test_repository.clone(),
            attempt_repository.clone(),
        ));
        let lesson_service = Arc::new(LessonService::new(
            lesson_repository.clone(),
            completion_repository.clone(),
        ));
        let sequence_service = Arc::new(SequenceService::new(
            lesson_repository,
            test_repository,
            completion_repository,
            attempt_repository,
        ));

        Ok(Self {
            attempt_service,
            lesson_service,
            sequence_service,
            config: Arc::new(config),
            db,
        })
    }
}
