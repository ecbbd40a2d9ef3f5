use common::{ExecutionStatus, Language};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::error::{JudgeError, Result};
use crate::executor::Execute;
use crate::models::{ExecutionRequest, TestCase, TestCaseResult};

/// Compare program output to the expected output: leading/trailing
/// whitespace is trimmed and the comparison is case-insensitive. Documented
/// policy; it may mask case-sensitivity bugs in submitted programs, which
/// is accepted product behavior.
pub fn outputs_match(actual: &str, expected: &str) -> bool {
    actual.trim().eq_ignore_ascii_case(expected.trim())
}

/// Run a submission's code against its test cases in stored order.
///
/// Each test case is executed with its own time and memory limits. A
/// `CompilationError` or `RuntimeError` outcome stops iteration: those are
/// attributes of the program, not the input, and recur identically on every
/// remaining case. Wrong answers and limit violations do not stop the loop,
/// so later cases still contribute to a partial score, and neither does
/// `InternalError` (a flaky executor call must not skip the remaining
/// cases).
///
/// Cancellation aborts the in-flight executor call and stops dispatching;
/// collected results are discarded by returning `JudgeError::Canceled`.
#[instrument(skip_all, fields(language = %language, test_cases = test_cases.len()))]
pub async fn run_test_cases<E: Execute>(
    executor: &E,
    source_code: &str,
    language: Language,
    test_cases: &[TestCase],
    cancel: &CancellationToken,
) -> Result<Vec<TestCaseResult>> {
    let mut results = Vec::with_capacity(test_cases.len());

    for test_case in test_cases {
        if cancel.is_cancelled() {
            return Err(JudgeError::Canceled);
        }

        let request = ExecutionRequest {
            source_code: source_code.to_string(),
            language,
            stdin: test_case.input.clone(),
            time_limit_ms: test_case.time_limit_ms,
            memory_limit_mb: test_case.memory_limit_mb,
        };

        let outcome = tokio::select! {
            outcome = executor.execute(&request) => outcome,
            _ = cancel.cancelled() => return Err(JudgeError::Canceled),
        };

        let passed = outcome.status.is_accepted()
            && outputs_match(&outcome.stdout, &test_case.expected_output);

        let error_message = match outcome.status {
            ExecutionStatus::InternalError => outcome.error_message.clone(),
            ExecutionStatus::CompilationError => outcome.compile_output.clone(),
            ExecutionStatus::RuntimeError if !outcome.stderr.is_empty() => {
                Some(outcome.stderr.clone())
            }
            _ => None,
        };

        debug!(
            test_case_id = test_case.id,
            status = %outcome.status,
            passed,
            time_ms = outcome.time_ms,
            "Test case executed"
        );

        let halt = outcome.status.halts_submission();

        results.push(TestCaseResult {
            test_case_id: test_case.id,
            input: test_case.input.clone(),
            expected_output: test_case.expected_output.clone(),
            actual_output: outcome.stdout,
            passed,
            status: outcome.status,
            time_ms: outcome.time_ms,
            memory_kb: outcome.memory_kb,
            error_message,
            is_hidden: test_case.is_hidden,
        });

        if halt {
            info!(
                test_case_id = test_case.id,
                executed = results.len(),
                remaining = test_cases.len() - results.len(),
                "Program-level failure, skipping remaining test cases"
            );
            break;
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExecutionOutcome;
    use crate::testutil::{StubExecutor, outcome};

    fn cases(n: usize) -> Vec<TestCase> {
        (0..n)
            .map(|i| TestCase {
                id: i as i32 + 1,
                input: format!("in{i}"),
                expected_output: format!("out{i}"),
                is_hidden: false,
                time_limit_ms: 1000,
                memory_limit_mb: 64,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_all_accepted() {
        let executor = StubExecutor::new(vec![
            outcome(ExecutionStatus::Accepted, "out0"),
            outcome(ExecutionStatus::Accepted, "out1"),
            outcome(ExecutionStatus::Accepted, "out2"),
        ]);
        let results = run_test_cases(
            &executor,
            "code",
            Language::Python,
            &cases(3),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed));
        assert_eq!(executor.calls(), 3);
        // Stored order is preserved.
        let ids: Vec<i32> = results.iter().map(|r| r.test_case_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_comparison_trims_and_folds_case() {
        let executor = StubExecutor::new(vec![outcome(ExecutionStatus::Accepted, "  OUT0 \n")]);
        let results = run_test_cases(
            &executor,
            "code",
            Language::Python,
            &cases(1),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        assert!(results[0].passed);
    }

    #[tokio::test]
    async fn test_accepted_status_with_wrong_output_fails() {
        let executor = StubExecutor::new(vec![outcome(ExecutionStatus::Accepted, "nope")]);
        let results = run_test_cases(
            &executor,
            "code",
            Language::Python,
            &cases(1),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        assert!(!results[0].passed);
        assert_eq!(results[0].status, ExecutionStatus::Accepted);
    }

    #[tokio::test]
    async fn test_compilation_error_stops_immediately() {
        let mut first = outcome(ExecutionStatus::CompilationError, "");
        first.compile_output = Some("expected ';'".into());
        let executor = StubExecutor::new(vec![
            first,
            outcome(ExecutionStatus::Accepted, "out1"),
        ]);
        let results = run_test_cases(
            &executor,
            "code",
            Language::Cpp,
            &cases(3),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(executor.calls(), 1);
        assert_eq!(results[0].error_message.as_deref(), Some("expected ';'"));
    }

    #[tokio::test]
    async fn test_runtime_error_stops_even_if_next_would_pass() {
        let executor = StubExecutor::new(vec![
            outcome(ExecutionStatus::RuntimeError, ""),
            outcome(ExecutionStatus::Accepted, "out1"),
        ]);
        let results = run_test_cases(
            &executor,
            "code",
            Language::Python,
            &cases(2),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ExecutionStatus::RuntimeError);
        assert_eq!(executor.calls(), 1);
    }

    #[tokio::test]
    async fn test_input_level_failures_do_not_stop() {
        for status in [
            ExecutionStatus::WrongAnswer,
            ExecutionStatus::TimeLimitExceeded,
            ExecutionStatus::MemoryLimitExceeded,
        ] {
            let executor = StubExecutor::new(vec![
                outcome(status, ""),
                outcome(ExecutionStatus::Accepted, "out1"),
                outcome(ExecutionStatus::Accepted, "out2"),
            ]);
            let results = run_test_cases(
                &executor,
                "code",
                Language::Python,
                &cases(3),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

            assert_eq!(results.len(), 3, "{status}");
            assert_eq!(executor.calls(), 3, "{status}");
        }
    }

    #[tokio::test]
    async fn test_internal_error_does_not_stop_dispatch() {
        // Executor unreachable for the first case; the remaining three are
        // still attempted.
        let executor = StubExecutor::new(vec![
            ExecutionOutcome::internal_error("unreachable"),
            outcome(ExecutionStatus::Accepted, "out1"),
            outcome(ExecutionStatus::Accepted, "out2"),
            outcome(ExecutionStatus::Accepted, "out3"),
        ]);
        let results = run_test_cases(
            &executor,
            "code",
            Language::Python,
            &cases(4),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(executor.calls(), 4);
        assert_eq!(results[0].status, ExecutionStatus::InternalError);
        assert_eq!(results[0].error_message.as_deref(), Some("unreachable"));
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_runs_nothing() {
        let executor = StubExecutor::new(vec![outcome(ExecutionStatus::Accepted, "out0")]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = run_test_cases(&executor, "code", Language::Python, &cases(1), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, JudgeError::Canceled));
        assert_eq!(executor.calls(), 0);
    }
}
