use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One graded submission of a test by a user. Attempts are immutable facts:
/// they are inserted once and never updated or deleted, and every derived
/// query (has-passed, best attempt) folds over the full history at read time.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestAttempt {
    pub id: String,
    pub test_id: String,
    pub user_id: String,
    pub score: i16,
    pub max_score: i16,
    pub is_passed: bool,
    pub completed_at: DateTime<Utc>,
}

impl TestAttempt {
    pub fn new(test_id: &str, user_id: &str, score: i16, max_score: i16, is_passed: bool) -> Self {
        TestAttempt {
            id: Uuid::new_v4().to_string(),
            test_id: test_id.to_string(),
            user_id: user_id.to_string(),
            score,
            max_score,
            is_passed,
            completed_at: Utc::now(),
        }
    }

    /// Ratio comparison without floating point: a/b vs c/d as a*d vs c*b.
    /// Widened to i32 so large point totals cannot overflow.
    pub fn scored_higher_than(&self, other: &TestAttempt) -> bool {
        (self.score as i32) * (other.max_score as i32)
            > (other.score as i32) * (self.max_score as i32)
    }
}
