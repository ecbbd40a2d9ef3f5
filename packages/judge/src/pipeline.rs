use chrono::Utc;
use common::Language;
use common::config::SubmissionConfig;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::error::{JudgeError, Result};
use crate::executor::Execute;
use crate::models::{
    ExecutionOutcome, ExecutionRequest, Question, QuestionKind, Submission, TestCaseResult,
};
use crate::orchestrator::run_test_cases;
use crate::safety;
use crate::store::{QuestionStore, SubmissionStore};
use crate::verdict::{self, JudgeOutcome};

/// Top-level coordinator: validates input, resolves the question, runs the
/// test cases, reduces the verdict, and persists the judged submission.
///
/// One pipeline instance judges one submission at a time end to end; many
/// submissions are judged concurrently by sharing the instance across
/// tasks (it holds no per-submission state).
pub struct JudgePipeline<Q, S, E> {
    questions: Q,
    submissions: S,
    executor: E,
    config: SubmissionConfig,
}

impl<Q, S, E> JudgePipeline<Q, S, E>
where
    Q: QuestionStore,
    S: SubmissionStore,
    E: Execute,
{
    pub fn new(questions: Q, submissions: S, executor: E, config: SubmissionConfig) -> Self {
        Self {
            questions,
            submissions,
            executor,
            config,
        }
    }

    /// Judge a submission end to end and persist the result.
    ///
    /// Equivalent to [`submit_with_cancel`](Self::submit_with_cancel) with a
    /// token that never fires.
    pub async fn submit(
        &self,
        user_id: i32,
        question_id: i32,
        source_code: &str,
        language: &str,
    ) -> Result<Submission> {
        self.submit_with_cancel(
            user_id,
            question_id,
            source_code,
            language,
            &CancellationToken::new(),
        )
        .await
    }

    /// Judge a submission end to end, honoring a cancellation signal.
    ///
    /// Cancellation aborts the in-flight executor call, stops dispatching
    /// further test cases, and discards partial results; nothing is
    /// persisted. Judging is all-or-nothing.
    #[instrument(skip(self, source_code, cancel))]
    pub async fn submit_with_cancel(
        &self,
        user_id: i32,
        question_id: i32,
        source_code: &str,
        language: &str,
        cancel: &CancellationToken,
    ) -> Result<Submission> {
        let language = self.validate_source(source_code, language)?;
        let question = self.resolve_judgeable(question_id).await?;

        let mut submission = Submission::new(question_id, user_id, language, source_code);

        let results = run_test_cases(
            &self.executor,
            source_code,
            language,
            &question.test_cases,
            cancel,
        )
        .await?;

        let outcome = verdict::decide(&results, question.test_cases.len(), question.points);

        submission.verdict = Some(outcome.verdict);
        submission.score = outcome.score;
        submission.time_used_ms = outcome.time_used_ms;
        submission.memory_used_kb = outcome.memory_used_kb;
        submission.compile_output = outcome.compile_output;
        submission.judged_at = Some(Utc::now());

        // A judged verdict is only committed once the atomic write lands;
        // until then the failure is "judged but not recorded", which callers
        // must not conflate with a judging verdict.
        if let Err(e) = self.submissions.save(&submission, &results).await {
            warn!(submission_id = %submission.id, error = %e, "Failed to persist judged submission");
            return Err(JudgeError::Persistence(e.to_string()));
        }

        info!(
            submission_id = %submission.id,
            verdict = %outcome.verdict,
            score = submission.score,
            executed = results.len(),
            total = question.test_cases.len(),
            "Submission judged"
        );

        Ok(submission)
    }

    /// Dry-run the code against caller-supplied stdin: same execution path,
    /// no verdict and no persistence. The raw outcome is returned for
    /// immediate display.
    #[instrument(skip(self, source_code, custom_input))]
    pub async fn run(
        &self,
        user_id: i32,
        question_id: i32,
        source_code: &str,
        language: &str,
        custom_input: &str,
    ) -> Result<ExecutionOutcome> {
        let language = self.validate_source(source_code, language)?;
        let question = self.resolve_question(question_id).await?;

        // Borrow the first test case's limits; fall back to configured
        // defaults for questions without any.
        let (time_limit_ms, memory_limit_mb) = question
            .test_cases
            .first()
            .map(|tc| (tc.time_limit_ms, tc.memory_limit_mb))
            .unwrap_or((
                self.config.run_time_limit_ms,
                self.config.run_memory_limit_mb,
            ));

        let request = ExecutionRequest {
            source_code: source_code.to_string(),
            language,
            stdin: custom_input.to_string(),
            time_limit_ms,
            memory_limit_mb,
        };

        Ok(self.executor.execute(&request).await)
    }

    /// Re-run the verdict reduction over a stored result set. Produces the
    /// same `(verdict, score)` the original judging did, which is what makes
    /// stored submissions auditable and re-judging idempotent.
    pub fn rederive(
        &self,
        results: &[TestCaseResult],
        total_test_cases: usize,
        points: i32,
    ) -> JudgeOutcome {
        verdict::decide(results, total_test_cases, points)
    }

    /// Shared validation for submit and run: language parse (hard error on
    /// anything unsupported), size cap, and the surface safety scan.
    fn validate_source(&self, source_code: &str, language: &str) -> Result<Language> {
        let language: Language = language.parse()?;

        if source_code.trim().is_empty() {
            return Err(JudgeError::Validation("Source code is empty".into()));
        }
        if source_code.len() > self.config.max_source_bytes {
            return Err(JudgeError::Validation(format!(
                "Source code exceeds {} bytes",
                self.config.max_source_bytes
            )));
        }
        if let Some(pattern) = safety::first_denied(source_code) {
            return Err(JudgeError::UnsafeSource(format!(
                "disallowed pattern '{pattern}'"
            )));
        }

        Ok(language)
    }

    async fn resolve_question(&self, question_id: i32) -> Result<Question> {
        let question = self
            .questions
            .question_with_active_test_cases(question_id)
            .await
            .map_err(|e| JudgeError::Store(e.to_string()))?;

        match question {
            Some(q) if q.is_active => Ok(q),
            // Inactive questions are indistinguishable from missing ones.
            _ => Err(JudgeError::NotFound("Question not found".into())),
        }
    }

    /// A question is judgeable when it is active, of coding kind, and has
    /// at least one active test case.
    async fn resolve_judgeable(&self, question_id: i32) -> Result<Question> {
        let question = self.resolve_question(question_id).await?;
        if question.kind != QuestionKind::Coding || question.test_cases.is_empty() {
            return Err(JudgeError::NotFound("Question not found".into()));
        }
        Ok(question)
    }
}

/// Externally visible form of a result set: hidden test cases keep their
/// pass/fail and resource figures but have their text withheld.
pub fn visible_results(results: &[TestCaseResult]) -> Vec<TestCaseResult> {
    results.iter().map(TestCaseResult::redacted).collect()
}
