use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Execution-service client configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ExecutorConfig {
    /// Base URL of the execution service. Default: "http://localhost:2358".
    #[serde(default = "default_executor_base_url")]
    pub base_url: String,
    /// Bearer token sent with each request, if the service requires one.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Client-side margin added to a test case's wall-clock limit before the
    /// request deadline fires. Default: 5000.
    #[serde(default = "default_request_margin_ms")]
    pub request_margin_ms: u64,
    /// Retries for transport-level failures before the call degrades to an
    /// internal-error outcome. Default: 2.
    #[serde(default = "default_max_retries")]
    pub max_retries: u8,
    /// Base delay for retry backoff in milliseconds. Default: 500.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    /// Maximum delay for retry backoff in milliseconds. Default: 5000.
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

fn default_executor_base_url() -> String {
    "http://localhost:2358".into()
}
fn default_request_margin_ms() -> u64 {
    5000
}
fn default_max_retries() -> u8 {
    2
}
fn default_retry_base_delay_ms() -> u64 {
    500
}
fn default_retry_max_delay_ms() -> u64 {
    5000
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            base_url: default_executor_base_url(),
            auth_token: None,
            request_margin_ms: default_request_margin_ms(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

/// Submission validation and dry-run defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct SubmissionConfig {
    /// Maximum accepted source size in bytes. Default: 65536.
    #[serde(default = "default_max_source_bytes")]
    pub max_source_bytes: usize,
    /// Time limit for dry-runs against a question without test cases (ms).
    /// Default: 2000.
    #[serde(default = "default_run_time_limit_ms")]
    pub run_time_limit_ms: i64,
    /// Memory limit for dry-runs against a question without test cases (MB).
    /// Default: 256.
    #[serde(default = "default_run_memory_limit_mb")]
    pub run_memory_limit_mb: i64,
}

fn default_max_source_bytes() -> usize {
    65536
}
fn default_run_time_limit_ms() -> i64 {
    2000
}
fn default_run_memory_limit_mb() -> i64 {
    256
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            max_source_bytes: default_max_source_bytes(),
            run_time_limit_ms: default_run_time_limit_ms(),
            run_memory_limit_mb: default_run_memory_limit_mb(),
        }
    }
}

/// Judge application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct JudgeAppConfig {
    #[serde(default)]
    pub executor: ExecutorConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
}

impl JudgeAppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("JUDGE_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("executor.base_url", "http://localhost:2358")?
            .set_default("executor.request_margin_ms", 5000_i64)?
            .set_default("executor.max_retries", 2_i64)?
            .set_default("executor.retry_base_delay_ms", 500_i64)?
            .set_default("executor.retry_max_delay_ms", 5000_i64)?
            .set_default("submission.max_source_bytes", 65536_i64)?
            .set_default("submission.run_time_limit_ms", 2000_i64)?
            .set_default("submission.run_memory_limit_mb", 256_i64)?
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::with_prefix("JUDGE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
