use common::{ExecutionStatus, Verdict};

use crate::models::TestCaseResult;

/// Submission-level reduction of a result set: verdict, score, and
/// worst-case resource usage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JudgeOutcome {
    pub verdict: Verdict,
    /// Points earned, floored to an integer.
    pub score: i32,
    /// Maximum wall time observed across results (ms).
    pub time_used_ms: i64,
    /// Maximum memory observed across results (KB).
    pub memory_used_kb: i64,
    /// First compilation diagnostic, when the verdict is CompilationError.
    pub compile_output: Option<String>,
}

/// Reduce per-case results into one verdict and score.
///
/// Pure function of the result set plus the early-stop policy: re-running it
/// over a stored result set always reproduces the same value, which is what
/// makes idempotent re-judging and auditing possible.
///
/// Reported time/memory are the maxima across results (worst case), not the
/// sum.
pub fn decide(results: &[TestCaseResult], total_test_cases: usize, points: i32) -> JudgeOutcome {
    let time_used_ms = results.iter().map(|r| r.time_ms).max().unwrap_or(0);
    let memory_used_kb = results.iter().map(|r| r.memory_kb).max().unwrap_or(0);

    // Judging never ran.
    if results.is_empty() {
        return JudgeOutcome {
            verdict: Verdict::InternalError,
            score: 0,
            time_used_ms,
            memory_used_kb,
            compile_output: None,
        };
    }

    if let Some(first_ce) = results
        .iter()
        .find(|r| r.status == ExecutionStatus::CompilationError)
    {
        return JudgeOutcome {
            verdict: Verdict::CompilationError,
            score: 0,
            time_used_ms,
            memory_used_kb,
            compile_output: first_ce.error_message.clone(),
        };
    }

    if results
        .iter()
        .any(|r| r.status == ExecutionStatus::RuntimeError)
    {
        return JudgeOutcome {
            verdict: Verdict::RuntimeError,
            score: 0,
            time_used_ms,
            memory_used_kb,
            compile_output: None,
        };
    }

    // The orchestrator only truncates on compile/runtime failures, so a
    // short result set past this point means judging was interrupted.
    if results.len() < total_test_cases {
        return JudgeOutcome {
            verdict: Verdict::InternalError,
            score: 0,
            time_used_ms,
            memory_used_kb,
            compile_output: None,
        };
    }

    // An executor failure on any case means the submission was not reliably
    // judged; no partial credit is awarded for the cases that did run.
    if results
        .iter()
        .any(|r| r.status == ExecutionStatus::InternalError)
    {
        return JudgeOutcome {
            verdict: Verdict::InternalError,
            score: 0,
            time_used_ms,
            memory_used_kb,
            compile_output: None,
        };
    }

    let passed = results.iter().filter(|r| r.passed).count();
    match results.iter().find(|r| !r.passed) {
        None => JudgeOutcome {
            verdict: Verdict::Accepted,
            score: points,
            time_used_ms,
            memory_used_kb,
            compile_output: None,
        },
        Some(first_failing) => {
            // An Accepted status with mismatched output is a wrong answer
            // at the submission level.
            let verdict = if first_failing.status.is_accepted() {
                Verdict::WrongAnswer
            } else {
                first_failing.status.into()
            };
            let score = (points as i64 * passed as i64 / total_test_cases as i64) as i32;
            JudgeOutcome {
                verdict,
                score,
                time_used_ms,
                memory_used_kb,
                compile_output: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: ExecutionStatus, passed: bool, time_ms: i64) -> TestCaseResult {
        TestCaseResult {
            test_case_id: 0,
            input: String::new(),
            expected_output: String::new(),
            actual_output: String::new(),
            passed,
            status,
            time_ms,
            memory_kb: 1000,
            error_message: None,
            is_hidden: false,
        }
    }

    #[test]
    fn test_empty_results_is_internal_error() {
        let outcome = decide(&[], 3, 30);
        assert_eq!(outcome.verdict, Verdict::InternalError);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.time_used_ms, 0);
    }

    #[test]
    fn test_all_passed_gets_full_points() {
        let results = vec![
            result(ExecutionStatus::Accepted, true, 5),
            result(ExecutionStatus::Accepted, true, 9),
        ];
        let outcome = decide(&results, 2, 100);
        assert_eq!(outcome.verdict, Verdict::Accepted);
        assert_eq!(outcome.score, 100);
    }

    #[test]
    fn test_first_failure_sets_verdict_and_partial_score() {
        // 3 cases, 30 points, [Accepted, WrongAnswer, Accepted]:
        // verdict WrongAnswer, score floor(2/3 * 30) = 20, time = max.
        let results = vec![
            result(ExecutionStatus::Accepted, true, 11),
            result(ExecutionStatus::WrongAnswer, false, 40),
            result(ExecutionStatus::Accepted, true, 25),
        ];
        let outcome = decide(&results, 3, 30);
        assert_eq!(outcome.verdict, Verdict::WrongAnswer);
        assert_eq!(outcome.score, 20);
        assert_eq!(outcome.time_used_ms, 40);
    }

    #[test]
    fn test_score_is_floored() {
        let results = vec![
            result(ExecutionStatus::Accepted, true, 1),
            result(ExecutionStatus::WrongAnswer, false, 1),
            result(ExecutionStatus::WrongAnswer, false, 1),
        ];
        // 1/3 of 10 points floors to 3.
        assert_eq!(decide(&results, 3, 10).score, 3);
    }

    #[test]
    fn test_score_monotone_in_passed_count() {
        let total = 4;
        let mut last = -1;
        for passed_count in 0..=total {
            let results: Vec<TestCaseResult> = (0..total)
                .map(|i| {
                    if i < passed_count {
                        result(ExecutionStatus::Accepted, true, 1)
                    } else {
                        result(ExecutionStatus::WrongAnswer, false, 1)
                    }
                })
                .collect();
            let score = decide(&results, total, 100).score;
            assert!(score > last, "score must grow with passed count");
            last = score;
        }
    }

    #[test]
    fn test_compilation_error_wins_and_surfaces_diagnostic() {
        let mut ce = result(ExecutionStatus::CompilationError, false, 0);
        ce.error_message = Some("expected ';'".into());
        let results = vec![ce, result(ExecutionStatus::RuntimeError, false, 1)];
        let outcome = decide(&results, 2, 50);
        assert_eq!(outcome.verdict, Verdict::CompilationError);
        assert_eq!(outcome.compile_output.as_deref(), Some("expected ';'"));
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_runtime_error_verdict() {
        let results = vec![
            result(ExecutionStatus::Accepted, true, 1),
            result(ExecutionStatus::RuntimeError, false, 1),
        ];
        assert_eq!(decide(&results, 3, 30).verdict, Verdict::RuntimeError);
    }

    #[test]
    fn test_incomplete_result_set_is_internal_error() {
        let results = vec![
            result(ExecutionStatus::Accepted, true, 1),
            result(ExecutionStatus::Accepted, true, 1),
        ];
        assert_eq!(decide(&results, 3, 30).verdict, Verdict::InternalError);
    }

    #[test]
    fn test_internal_error_result_collapses_submission() {
        let results = vec![
            result(ExecutionStatus::InternalError, false, 0),
            result(ExecutionStatus::Accepted, true, 1),
            result(ExecutionStatus::Accepted, true, 1),
        ];
        let outcome = decide(&results, 3, 30);
        assert_eq!(outcome.verdict, Verdict::InternalError);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_tle_and_mle_verdicts_follow_first_failing() {
        let results = vec![
            result(ExecutionStatus::TimeLimitExceeded, false, 2000),
            result(ExecutionStatus::MemoryLimitExceeded, false, 5),
        ];
        assert_eq!(decide(&results, 2, 20).verdict, Verdict::TimeLimitExceeded);

        let results = vec![
            result(ExecutionStatus::MemoryLimitExceeded, false, 5),
            result(ExecutionStatus::TimeLimitExceeded, false, 2000),
        ];
        assert_eq!(decide(&results, 2, 20).verdict, Verdict::MemoryLimitExceeded);
    }

    #[test]
    fn test_accepted_status_with_output_mismatch_is_wrong_answer() {
        let results = vec![result(ExecutionStatus::Accepted, false, 1)];
        assert_eq!(decide(&results, 1, 10).verdict, Verdict::WrongAnswer);
    }

    #[test]
    fn test_decide_is_idempotent() {
        let results = vec![
            result(ExecutionStatus::Accepted, true, 7),
            result(ExecutionStatus::WrongAnswer, false, 3),
        ];
        let first = decide(&results, 2, 40);
        let second = decide(&results, 2, 40);
        assert_eq!(first, second);
    }
}
