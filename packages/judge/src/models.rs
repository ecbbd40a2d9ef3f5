use chrono::{DateTime, Utc};
use common::{ExecutionStatus, Language, Verdict};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of question. Only coding questions carry test cases and can be
/// judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Coding,
    MultipleChoice,
    ShortAnswer,
}

/// A question as returned by the question store, with its active test cases
/// in stored order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    /// Question ID
    pub id: i32,
    /// Question title
    pub title: String,
    /// Maximum points awarded for a fully accepted submission
    pub points: i32,
    /// Whether the question is open for submissions
    pub is_active: bool,
    /// Question kind; only `Coding` questions are judgeable
    pub kind: QuestionKind,
    /// Active test cases, ordered. Execution proceeds in this order.
    pub test_cases: Vec<TestCase>,
}

/// A single test case belonging to a question. Read-only input to judging.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestCase {
    /// Test case ID
    pub id: i32,
    /// Input fed to the program on stdin
    pub input: String,
    /// Expected output for comparison
    pub expected_output: String,
    /// Hidden test cases count toward the verdict but their text is
    /// withheld from externally visible results
    pub is_hidden: bool,
    /// Time limit in milliseconds
    pub time_limit_ms: i64,
    /// Memory limit in megabytes
    pub memory_limit_mb: i64,
}

/// One request/response cycle against the execution service. Built fresh
/// per test case; never persisted.
#[derive(Clone, Debug)]
pub struct ExecutionRequest {
    /// Source code to compile and run
    pub source_code: String,
    /// Logical language of the source
    pub language: Language,
    /// Data fed to the program on stdin
    pub stdin: String,
    /// CPU time limit in milliseconds
    pub time_limit_ms: i64,
    /// Memory limit in megabytes
    pub memory_limit_mb: i64,
}

/// Normalized result of one execution. The execution client always returns
/// one of these; transport failures surface as `InternalError` outcomes,
/// never as errors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Status after mapping the executor's numeric code
    pub status: ExecutionStatus,
    /// Program stdout (decoded)
    pub stdout: String,
    /// Program stderr (decoded)
    pub stderr: String,
    /// Compiler diagnostics, when compilation ran
    pub compile_output: Option<String>,
    /// Wall time in milliseconds
    pub time_ms: i64,
    /// Peak memory in kilobytes
    pub memory_kb: i64,
    /// Human-readable description of an internal failure
    pub error_message: Option<String>,
}

impl ExecutionOutcome {
    /// Outcome for a call that never produced a usable executor response.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::InternalError,
            stdout: String::new(),
            stderr: String::new(),
            compile_output: None,
            time_ms: 0,
            memory_kb: 0,
            error_message: Some(message.into()),
        }
    }
}

/// One execution outcome tied back to its test case.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestCaseResult {
    /// Test case that was executed
    pub test_case_id: i32,
    /// Test case input
    pub input: String,
    /// Expected output
    pub expected_output: String,
    /// Actual program output
    pub actual_output: String,
    /// Whether the outcome was accepted and the outputs compared equal
    pub passed: bool,
    /// Execution status for this case
    pub status: ExecutionStatus,
    /// Wall time in milliseconds
    pub time_ms: i64,
    /// Peak memory in kilobytes
    pub memory_kb: i64,
    /// Error detail (stderr excerpt or internal failure description)
    pub error_message: Option<String>,
    /// Propagated from the test case
    pub is_hidden: bool,
}

impl TestCaseResult {
    /// Externally visible form: hidden test cases keep their pass/fail,
    /// status, and resource figures, but input/expected/actual text and
    /// error detail are withheld.
    pub fn redacted(&self) -> Self {
        if !self.is_hidden {
            return self.clone();
        }
        Self {
            input: String::new(),
            expected_output: String::new(),
            actual_output: String::new(),
            error_message: None,
            ..self.clone()
        }
    }
}

/// A judging attempt. Created pending, mutated exactly once to a terminal
/// verdict, then immutable history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    /// Submission ID
    pub id: Uuid,
    /// Question the code was submitted against
    pub question_id: i32,
    /// Submitting user
    pub user_id: i32,
    /// Language of the source
    pub language: Language,
    /// Submitted source code
    pub source_code: String,
    /// When the submission was created
    pub created_at: DateTime<Utc>,
    /// Final verdict; None until judged
    pub verdict: Option<Verdict>,
    /// Points earned
    pub score: i32,
    /// Maximum wall time across executed test cases (ms)
    pub time_used_ms: i64,
    /// Maximum memory across executed test cases (KB)
    pub memory_used_kb: i64,
    /// Compiler diagnostics when the verdict is a compilation error
    pub compile_output: Option<String>,
    /// When judging completed
    pub judged_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// Create a pending submission with a fresh id.
    pub fn new(
        question_id: i32,
        user_id: i32,
        language: Language,
        source_code: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_id,
            user_id,
            language,
            source_code: source_code.into(),
            created_at: Utc::now(),
            verdict: None,
            score: 0,
            time_used_ms: 0,
            memory_used_kb: 0,
            compile_output: None,
            judged_at: None,
        }
    }

    /// Returns true once a terminal verdict has been recorded.
    pub fn is_judged(&self) -> bool {
        self.verdict.is_some()
    }
}
