//! Wire protocol for the execution service.
//!
//! A synchronous POST carries base64-encoded source and stdin plus limits;
//! the service responds with base64-encoded streams, resource figures, and
//! a numeric status code from a fixed table. The mapping into
//! [`ExecutionStatus`] is total: codes outside the table degrade to
//! `InternalError`, never crash and never pass as `Accepted`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use common::ExecutionStatus;
use serde::{Deserialize, Serialize};

use crate::models::ExecutionRequest;

/// Grace added to the CPU limit to form the wall-clock limit, tolerating
/// scheduling jitter in the remote sandbox.
pub const WALL_GRACE_MS: i64 = 2000;

/// Request body for `POST {base_url}/execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRequest {
    /// Base64-encoded source code
    pub source_b64: String,
    /// Executor's numeric language id
    pub language_id: u32,
    /// Base64-encoded stdin
    pub stdin_b64: String,
    /// CPU time limit in milliseconds
    pub cpu_time_limit_ms: i64,
    /// Wall-clock limit in milliseconds (CPU limit plus grace)
    pub wall_time_limit_ms: i64,
    /// Memory limit in kilobytes
    pub memory_limit_kb: i64,
}

impl WireRequest {
    pub fn from_request(req: &ExecutionRequest) -> Self {
        Self {
            source_b64: encode(&req.source_code),
            language_id: req.language.executor_id(),
            stdin_b64: encode(&req.stdin),
            cpu_time_limit_ms: req.time_limit_ms,
            wall_time_limit_ms: req.time_limit_ms + WALL_GRACE_MS,
            memory_limit_kb: req.memory_limit_mb * 1024,
        }
    }
}

/// Response body from the execution service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResponse {
    /// Numeric status code (see the table in `map_status_code`)
    pub status: i32,
    /// Base64-encoded stdout
    #[serde(default)]
    pub stdout_b64: String,
    /// Base64-encoded stderr
    #[serde(default)]
    pub stderr_b64: String,
    /// Base64-encoded compiler diagnostics, when compilation ran
    #[serde(default)]
    pub compile_output_b64: Option<String>,
    /// Elapsed wall time in milliseconds
    #[serde(default)]
    pub time_ms: i64,
    /// Peak memory in kilobytes
    #[serde(default)]
    pub memory_kb: i64,
}

/// Encode text into the transport representation.
pub fn encode(text: &str) -> String {
    BASE64.encode(text.as_bytes())
}

/// Decode text from the transport representation, falling back to the raw
/// input when it is not valid base64 or not valid UTF-8. Decoding never
/// hard-fails; a garbled stream must not abort a submission.
pub fn decode_lossy(encoded: &str) -> String {
    match BASE64.decode(encoded.trim()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => encoded.to_string(),
    }
}

/// Map the executor's numeric status code to an [`ExecutionStatus`].
///
/// | code | meaning               |
/// |------|-----------------------|
/// | 1    | in queue              |
/// | 2    | processing            |
/// | 3    | accepted              |
/// | 4    | wrong answer          |
/// | 5    | time limit exceeded   |
/// | 6    | compilation error     |
/// | 7-12 | runtime error family  |
/// | 13   | internal error        |
/// | 14   | exec format error     |
/// | 15   | memory limit exceeded |
///
/// Codes 1 and 2 are queue states and must not appear in a synchronous
/// response; they degrade to `InternalError`, as does anything unknown.
pub fn map_status_code(code: i32) -> ExecutionStatus {
    match code {
        3 => ExecutionStatus::Accepted,
        4 => ExecutionStatus::WrongAnswer,
        5 => ExecutionStatus::TimeLimitExceeded,
        6 => ExecutionStatus::CompilationError,
        7..=12 => ExecutionStatus::RuntimeError,
        14 => ExecutionStatus::RuntimeError,
        15 => ExecutionStatus::MemoryLimitExceeded,
        _ => ExecutionStatus::InternalError,
    }
}
