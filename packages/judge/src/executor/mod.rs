pub mod client;
pub mod wire;

pub use client::HttpExecutor;

use async_trait::async_trait;

use crate::models::{ExecutionOutcome, ExecutionRequest};

/// One (code, language, stdin, limits) tuple executed against the sandbox
/// service.
///
/// Implementations never fail: transport problems, bad responses, and
/// executor-side faults all come back as an outcome with status
/// `InternalError`, so a single flaky test case cannot abort a whole
/// submission ungracefully.
#[async_trait]
pub trait Execute: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> ExecutionOutcome;
}
