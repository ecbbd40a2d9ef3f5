use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a single test-case execution, as reported by the execution
/// client after mapping the executor's numeric status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ExecutionStatus {
    /// Program ran to completion within limits.
    Accepted,
    /// Executor-side output check failed.
    WrongAnswer,
    /// Exceeded the CPU time limit.
    TimeLimitExceeded,
    /// Exceeded the memory limit.
    MemoryLimitExceeded,
    /// Program crashed or exited with non-zero code.
    RuntimeError,
    /// Failed to compile.
    CompilationError,
    /// Executor unreachable, returned garbage, or reported its own failure.
    InternalError,
}

impl ExecutionStatus {
    /// Returns true if this status halts the submission: a compile failure or
    /// crash is an attribute of the program, not the input, so it recurs
    /// identically on every remaining test case.
    pub fn halts_submission(&self) -> bool {
        matches!(self, Self::CompilationError | Self::RuntimeError)
    }

    /// Returns true if the program ran to completion within limits.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// All possible status values.
    pub const ALL: &'static [ExecutionStatus] = &[
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::RuntimeError,
        Self::CompilationError,
        Self::InternalError,
    ];

    /// Returns the string representation (PascalCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "WrongAnswer",
            Self::TimeLimitExceeded => "TimeLimitExceeded",
            Self::MemoryLimitExceeded => "MemoryLimitExceeded",
            Self::RuntimeError => "RuntimeError",
            Self::CompilationError => "CompilationError",
            Self::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final submission-level judging outcome.
///
/// A submission's verdict is derived purely from its test-case results, so
/// re-running the reduction over a stored result set reproduces the same
/// value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Verdict {
    /// Every test case passed.
    Accepted,
    /// At least one test case produced mismatched output.
    WrongAnswer,
    /// At least one test case exceeded its time limit.
    TimeLimitExceeded,
    /// At least one test case exceeded its memory limit.
    MemoryLimitExceeded,
    /// The program crashed on a test case.
    RuntimeError,
    /// The program failed to compile.
    CompilationError,
    /// Judging could not complete.
    InternalError,
}

impl Verdict {
    /// Returns true if this is a successful verdict.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// All possible verdict values.
    pub const ALL: &'static [Verdict] = &[
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::RuntimeError,
        Self::CompilationError,
        Self::InternalError,
    ];

    /// Returns the string representation (PascalCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "WrongAnswer",
            Self::TimeLimitExceeded => "TimeLimitExceeded",
            Self::MemoryLimitExceeded => "MemoryLimitExceeded",
            Self::RuntimeError => "RuntimeError",
            Self::CompilationError => "CompilationError",
            Self::InternalError => "InternalError",
        }
    }
}

impl From<ExecutionStatus> for Verdict {
    fn from(status: ExecutionStatus) -> Self {
        match status {
            ExecutionStatus::Accepted => Verdict::Accepted,
            ExecutionStatus::WrongAnswer => Verdict::WrongAnswer,
            ExecutionStatus::TimeLimitExceeded => Verdict::TimeLimitExceeded,
            ExecutionStatus::MemoryLimitExceeded => Verdict::MemoryLimitExceeded,
            ExecutionStatus::RuntimeError => Verdict::RuntimeError,
            ExecutionStatus::CompilationError => Verdict::CompilationError,
            ExecutionStatus::InternalError => Verdict::InternalError,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid verdict string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVerdictError {
    invalid: String,
}

impl fmt::Display for ParseVerdictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid verdict '{}'. Valid values: {}",
            self.invalid,
            Verdict::ALL
                .iter()
                .map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseVerdictError {}

impl FromStr for Verdict {
    type Err = ParseVerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Accepted" => Ok(Self::Accepted),
            "WrongAnswer" => Ok(Self::WrongAnswer),
            "TimeLimitExceeded" => Ok(Self::TimeLimitExceeded),
            "MemoryLimitExceeded" => Ok(Self::MemoryLimitExceeded),
            "RuntimeError" => Ok(Self::RuntimeError),
            "CompilationError" => Ok(Self::CompilationError),
            "InternalError" => Ok(Self::InternalError),
            _ => Err(ParseVerdictError {
                invalid: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        for status in ExecutionStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            let parsed: ExecutionStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*status, parsed);
        }
        for verdict in Verdict::ALL {
            let json = serde_json::to_string(verdict).unwrap();
            let parsed: Verdict = serde_json::from_str(&json).unwrap();
            assert_eq!(*verdict, parsed);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "Accepted".parse::<Verdict>().unwrap(),
            Verdict::Accepted
        );
        assert!("Invalid".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_halts_submission_only_for_program_level_failures() {
        for status in ExecutionStatus::ALL {
            let expected = matches!(
                status,
                ExecutionStatus::CompilationError | ExecutionStatus::RuntimeError
            );
            assert_eq!(status.halts_submission(), expected, "{status}");
        }
    }

    #[test]
    fn test_verdict_from_status_is_total() {
        for status in ExecutionStatus::ALL {
            let verdict: Verdict = (*status).into();
            assert_eq!(verdict.as_str(), status.as_str());
        }
    }
}
