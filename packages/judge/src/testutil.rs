use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use common::ExecutionStatus;

use crate::executor::Execute;
use crate::models::{ExecutionOutcome, ExecutionRequest};

/// Scripted executor for unit tests: returns pre-built outcomes in order
/// and records how many calls it served.
pub(crate) struct StubExecutor {
    outcomes: Mutex<Vec<ExecutionOutcome>>,
    calls: AtomicUsize,
}

impl StubExecutor {
    pub(crate) fn new(outcomes: Vec<ExecutionOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Execute for StubExecutor {
    async fn execute(&self, _request: &ExecutionRequest) -> ExecutionOutcome {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let outcomes = self.outcomes.lock().unwrap();
        outcomes
            .get(index)
            .cloned()
            .unwrap_or_else(|| ExecutionOutcome::internal_error("stub exhausted"))
    }
}

/// Outcome whose stdout is `stdout` and whose status is `status`.
pub(crate) fn outcome(status: ExecutionStatus, stdout: &str) -> ExecutionOutcome {
    ExecutionOutcome {
        status,
        stdout: stdout.to_string(),
        stderr: String::new(),
        compile_output: None,
        time_ms: 10,
        memory_kb: 512,
        error_message: None,
    }
}
