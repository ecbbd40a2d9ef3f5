//! In-memory stores for tests and local wiring. Production deployments
//! implement the store traits against their own persistence layer.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use super::traits::{QuestionStore, StoreError, SubmissionStore};
use crate::models::{Question, Submission, TestCaseResult};

/// Question store backed by a map.
#[derive(Default)]
pub struct MemoryQuestionStore {
    questions: RwLock<HashMap<i32, Question>>,
}

impl MemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, question: Question) {
        self.questions
            .write()
            .expect("question store lock poisoned")
            .insert(question.id, question);
    }
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    async fn question_with_active_test_cases(
        &self,
        question_id: i32,
    ) -> Result<Option<Question>, StoreError> {
        let questions = self
            .questions
            .read()
            .map_err(|_| StoreError::Unavailable("question store lock poisoned".into()))?;
        Ok(questions.get(&question_id).cloned())
    }
}

/// Submission store backed by a map. Writes can be forced to fail to
/// exercise the judged-but-not-recorded path in tests.
#[derive(Default)]
pub struct MemorySubmissionStore {
    submissions: RwLock<HashMap<Uuid, (Submission, Vec<TestCaseResult>)>>,
    fail_writes: AtomicBool,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn get(&self, id: Uuid) -> Option<(Submission, Vec<TestCaseResult>)> {
        self.submissions
            .read()
            .expect("submission store lock poisoned")
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.submissions
            .read()
            .expect("submission store lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn save(
        &self,
        submission: &Submission,
        results: &[TestCaseResult],
    ) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed("simulated write failure".into()));
        }
        let mut submissions = self
            .submissions
            .write()
            .map_err(|_| StoreError::Unavailable("submission store lock poisoned".into()))?;
        submissions.insert(submission.id, (submission.clone(), results.to_vec()));
        Ok(())
    }
}
