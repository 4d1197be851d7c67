//! Tracing initialization for the Lambda function.
//!
//! Output is JSON by default so CloudWatch Logs Insights can query fields
//! such as `request_id` and `post_id`. Set `LOG_FORMAT=text` for readable
//! output when running the function locally.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level filter (default: `info`)
//! - `LOG_FORMAT`: `json` (default) or `text`

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event (CloudWatch).
    #[default]
    Json,
    /// Human-readable lines for local runs.
    Text,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value. Anything unrecognized selects JSON.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }

    fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// Initialize tracing for the function.
///
/// Call once at the start of `main`, before `lambda_runtime::run()`.
/// Subsequent calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // try_init so a second call (e.g. from tests) does not panic.
    let _ = match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_current_span(false)
                    .flatten_event(true),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).without_time())
            .try_init(),
    };
}
