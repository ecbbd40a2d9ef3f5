use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Question, Submission, TestCaseResult};

/// Errors surfaced by the question and submission stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Read access to questions and their test cases.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Fetch a question with only its active test cases, in a consistent
    /// stored order. Returns `None` when no such question exists.
    async fn question_with_active_test_cases(
        &self,
        question_id: i32,
    ) -> Result<Option<Question>, StoreError>;
}

/// Write access to judged submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a submission plus its test-case results as one atomic unit.
    /// Either everything is written or nothing is.
    async fn save(
        &self,
        submission: &Submission,
        results: &[TestCaseResult],
    ) -> Result<(), StoreError>;
}
