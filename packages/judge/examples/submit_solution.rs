//! Wire the pipeline against a running execution service and judge one
//! submission. Seed data lives in the in-memory stores; a real deployment
//! implements the store traits against its own persistence layer.
//!
//! Usage: `JUDGE__EXECUTOR__BASE_URL=http://localhost:2358 cargo run --example submit_solution`

use anyhow::Context;
use common::config::JudgeAppConfig;
use judge::store::{MemoryQuestionStore, MemorySubmissionStore};
use judge::{HttpExecutor, JudgePipeline, Question, QuestionKind, TestCase};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = JudgeAppConfig::load().context("Failed to load config")?;
    info!(executor = %config.executor.base_url, "Judge starting");

    let questions = MemoryQuestionStore::new();
    questions.insert(Question {
        id: 1,
        title: "A + B".into(),
        points: 100,
        is_active: true,
        kind: QuestionKind::Coding,
        test_cases: vec![
            TestCase {
                id: 1,
                input: "1 2".into(),
                expected_output: "3".into(),
                is_hidden: false,
                time_limit_ms: 1000,
                memory_limit_mb: 64,
            },
            TestCase {
                id: 2,
                input: "40 2".into(),
                expected_output: "42".into(),
                is_hidden: true,
                time_limit_ms: 1000,
                memory_limit_mb: 64,
            },
        ],
    });

    let pipeline = JudgePipeline::new(
        questions,
        MemorySubmissionStore::new(),
        HttpExecutor::new(config.executor),
        config.submission,
    );

    let submission = pipeline
        .submit(
            1,
            1,
            "a, b = map(int, input().split())\nprint(a + b)",
            "python",
        )
        .await
        .context("Judging failed")?;

    info!(
        submission_id = %submission.id,
        verdict = ?submission.verdict,
        score = submission.score,
        time_used_ms = submission.time_used_ms,
        "Submission judged"
    );

    Ok(())
}
