use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Test, TestAttempt},
    models::dto::request::{AttemptHistoryParams, QuestionAnswerInput},
    repositories::{AttemptRepository, TestRepository},
    services::grading::{self, Submission},
};

/// The attempt ledger: grades submissions and keeps the append-only attempt
/// history with its derived queries.
pub struct AttemptService {
    tests: Arc<dyn TestRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl AttemptService {
    pub fn new(tests: Arc<dyn TestRepository>, attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { tests, attempts }
    }

    pub async fn get_test(&self, test_id: &str) -> AppResult<Test> {
        self.tests
            .find_by_id(test_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test with id '{}' not found", test_id)))
    }

    /// Grade a submission and record the outcome. A validation failure
    /// surfaces before anything is persisted, so no attempt row exists for a
    /// rejected submission.
    pub async fn submit_attempt(
        &self,
        test_id: &str,
        user_id: &str,
        answers: Vec<QuestionAnswerInput>,
    ) -> AppResult<TestAttempt> {
        let test = self.get_test(test_id).await?;

        let mut answer_map: HashMap<String, Vec<String>> = HashMap::with_capacity(answers.len());
        for input in answers {
            if answer_map.insert(input.question_id.clone(), input.answers).is_some() {
                return Err(AppError::ValidationError(format!(
                    "Duplicate answer entry for question '{}'",
                    input.question_id
                )));
            }
        }

        let submission = Submission {
            test_id: test.id.clone(),
            user_id: user_id.to_string(),
            answers: answer_map,
        };

        let report = grading::grade(&test, &submission)?;

        let attempt = TestAttempt::new(
            &test.id,
            user_id,
            report.score,
            report.max_score,
            report.is_passed,
        );

        let recorded = self.attempts.create(attempt).await?;

        log::info!(
            "Recorded attempt {} for user {} on test {}: {}/{} ({})",
            recorded.id,
            user_id,
            test_id,
            recorded.score,
            recorded.max_score,
            if recorded.is_passed { "passed" } else { "failed" }
        );

        Ok(recorded)
    }

    pub async fn attempts_for(&self, user_id: &str, test_id: &str) -> AppResult<Vec<TestAttempt>> {
        self.attempts.find_by_user_and_test(user_id, test_id).await
    }

    /// True iff any recorded attempt passed. Monotonic by construction:
    /// attempts are never removed, so a later failure cannot revoke a pass.
    pub async fn has_passed(&self, user_id: &str, test_id: &str) -> AppResult<bool> {
        let attempts = self.attempts.find_by_user_and_test(user_id, test_id).await?;
        Ok(attempts.iter().any(|a| a.is_passed))
    }

    /// Attempt with the highest score ratio; ties go to the most recent.
    pub async fn best_attempt(
        &self,
        user_id: &str,
        test_id: &str,
    ) -> AppResult<Option<TestAttempt>> {
        let attempts = self.attempts.find_by_user_and_test(user_id, test_id).await?;

        Ok(attempts.into_iter().fold(None, |best, candidate| match best {
            None => Some(candidate),
            Some(current) => {
                let candidate_wins = candidate.scored_higher_than(&current)
                    || (!current.scored_higher_than(&candidate)
                        && candidate.completed_at > current.completed_at);
                if candidate_wins {
                    Some(candidate)
                } else {
                    Some(current)
                }
            }
        }))
    }

    pub async fn attempt_history(
        &self,
        user_id: &str,
        params: &AttemptHistoryParams,
    ) -> AppResult<(Vec<TestAttempt>, i64)> {
        self.attempts
            .get_user_attempts(
                user_id,
                params.test_id.as_deref(),
                params.offset(),
                params.limit(),
            )
            .await
    }
}
