//! Submission judging pipeline.
//!
//! Takes untrusted source code submitted against a question's test cases,
//! dispatches each case to an external sandboxed execution service, and
//! reduces the per-case outcomes into one verdict and score. The executor
//! is treated as an opaque remote collaborator; so are the question and
//! submission stores.

pub mod error;
pub mod executor;
pub mod models;
pub mod orchestrator;
pub mod pipeline;
pub mod safety;
pub mod store;
pub mod verdict;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{JudgeError, Result};
pub use executor::{Execute, HttpExecutor};
pub use models::{
    ExecutionOutcome, ExecutionRequest, Question, QuestionKind, Submission, TestCase,
    TestCaseResult,
};
pub use pipeline::{JudgePipeline, visible_results};
pub use verdict::JudgeOutcome;
