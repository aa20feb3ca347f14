//! # Wallet Telemetry
//!
//! Observability for the Proxy-Wallet.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` registry with an env filter and either
//!   JSON (containers) or pretty (development) output.
//! - **Metrics**: Prometheus counters, text-encoded on demand.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wallet_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Wallet calls are now logged and counted
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PW_SERVICE_NAME` | `proxy-wallet` | Service name attached to logs |
//! | `PW_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `PW_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |
//! | `PW_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_env_filter, init_logging, LoggingGuard};
pub use metrics::{
    gather_metrics, register_metrics, CALL_REJECTIONS, GAS_REFUNDS, SESSIONS_CLOSED,
    SESSIONS_STARTED, SIGNATURES_RECOVERED, TRANSFERS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A metric could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The log filter directive is malformed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize metrics and logging.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so early calls are counted
    register_metrics()?;

    let logging = init_logging(&config)?;

    Ok(TelemetryGuard { _logging: logging })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _logging: LoggingGuard,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}
