use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use common::ExecutionStatus;
use common::backoff::calculate_backoff;
use common::config::ExecutorConfig;
use tracing::{debug, instrument, warn};

use super::Execute;
use super::wire::{self, WireRequest, WireResponse};
use crate::models::{ExecutionOutcome, ExecutionRequest};

/// HTTP client for the execution service.
///
/// Holds one shared `reqwest::Client` (connection pool) across all
/// invocations; stateless otherwise. Configuration is constructor-supplied,
/// never ambient.
pub struct HttpExecutor {
    client: reqwest::Client,
    config: ExecutorConfig,
}

/// Transport-level failure of a single attempt. These are retryable;
/// executor-judged outcomes are not.
#[derive(Debug)]
enum CallError {
    Transport(String),
    Status(u16),
    Body(String),
    Deadline,
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Transport(msg) => write!(f, "transport error: {msg}"),
            CallError::Status(code) => write!(f, "unexpected response status {code}"),
            CallError::Body(msg) => write!(f, "malformed response body: {msg}"),
            CallError::Deadline => write!(f, "request deadline exceeded"),
        }
    }
}

impl HttpExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Deadline for one attempt: the test case's wall-clock limit plus a
    /// configured margin, so a hung executor cannot stall the submission.
    fn attempt_deadline(&self, request: &ExecutionRequest) -> Duration {
        let wall_ms = (request.time_limit_ms + wire::WALL_GRACE_MS).max(0) as u64;
        Duration::from_millis(wall_ms + self.config.request_margin_ms)
    }

    async fn call_once(&self, body: &WireRequest) -> Result<WireResponse, CallError> {
        let url = format!("{}/execute", self.config.base_url.trim_end_matches('/'));

        let mut request = self.client.post(&url).json(body);
        if let Some(ref token) = self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CallError::Status(status.as_u16()));
        }

        response
            .json::<WireResponse>()
            .await
            .map_err(|e| CallError::Body(e.to_string()))
    }

    fn outcome_from(response: WireResponse) -> ExecutionOutcome {
        let status = wire::map_status_code(response.status);
        let error_message = match status {
            ExecutionStatus::InternalError => {
                Some("Execution service reported an internal failure".to_string())
            }
            _ => None,
        };
        ExecutionOutcome {
            status,
            stdout: wire::decode_lossy(&response.stdout_b64),
            stderr: wire::decode_lossy(&response.stderr_b64),
            compile_output: response
                .compile_output_b64
                .as_deref()
                .map(wire::decode_lossy),
            time_ms: response.time_ms,
            memory_kb: response.memory_kb,
            error_message,
        }
    }
}

#[async_trait]
impl Execute for HttpExecutor {
    /// Execute one request. Transport failures are retried with exponential
    /// backoff up to the configured count, then degrade to an
    /// `InternalError` outcome with a generic message. Never returns an
    /// error and never panics.
    #[instrument(skip(self, request), fields(language = %request.language, time_limit_ms = request.time_limit_ms))]
    async fn execute(&self, request: &ExecutionRequest) -> ExecutionOutcome {
        let body = WireRequest::from_request(request);
        let deadline = self.attempt_deadline(request);

        let mut attempt: u8 = 0;
        loop {
            // The deadline covers the full attempt, response body included.
            let result = match tokio::time::timeout(deadline, self.call_once(&body)).await {
                Ok(result) => result,
                Err(_) => Err(CallError::Deadline),
            };
            match result {
                Ok(response) => {
                    debug!(status = response.status, time_ms = response.time_ms, "Executor responded");
                    return Self::outcome_from(response);
                }
                Err(e) if attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = calculate_backoff(
                        attempt,
                        self.config.retry_base_delay_ms,
                        self.config.retry_max_delay_ms,
                    );
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Executor call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(attempts = attempt + 1, error = %e, "Executor call failed");
                    return ExecutionOutcome::internal_error(format!(
                        "Execution service unavailable after {} attempt(s)",
                        attempt + 1
                    ));
                }
            }
        }
    }
}
