//! Prometheus metrics for the Proxy-Wallet.
//!
//! All metrics follow the naming convention: `pw_<subject>_<metric>_total`

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // SIGNATURES
    // =========================================================================

    /// Signers recovered through the wallet (address recovery, sessions,
    /// relayed authorizations)
    pub static ref SIGNATURES_RECOVERED: IntCounter = IntCounter::new(
        "pw_signatures_recovered_total",
        "Total signers recovered from signed digests"
    ).expect("metric creation failed");

    // =========================================================================
    // SESSIONS
    // =========================================================================

    /// Sessions opened
    pub static ref SESSIONS_STARTED: IntCounter = IntCounter::new(
        "pw_sessions_started_total",
        "Total device sessions opened"
    ).expect("metric creation failed");

    /// Sessions closed
    pub static ref SESSIONS_CLOSED: IntCounter = IntCounter::new(
        "pw_sessions_closed_total",
        "Total device sessions closed"
    ).expect("metric creation failed");

    // =========================================================================
    // LEDGER / GAS
    // =========================================================================

    /// Committed transfers
    pub static ref TRANSFERS: IntCounter = IntCounter::new(
        "pw_transfers_total",
        "Total committed ledger transfers"
    ).expect("metric creation failed");

    /// Gas refunds paid (including zero-amount refunds)
    pub static ref GAS_REFUNDS: IntCounter = IntCounter::new(
        "pw_gas_refunded_total",
        "Total gas refunds paid to administrators"
    ).expect("metric creation failed");

    // =========================================================================
    // ERRORS
    // =========================================================================

    /// Rejected calls by operation
    pub static ref CALL_REJECTIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("pw_call_rejections_total", "Rejected wallet calls by operation"),
        &["operation"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SIGNATURES_RECOVERED.clone()),
        Box::new(SESSIONS_STARTED.clone()),
        Box::new(SESSIONS_CLOSED.clone()),
        Box::new(TRANSFERS.clone()),
        Box::new(GAS_REFUNDS.clone()),
        Box::new(CALL_REJECTIONS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics in the Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    register_metrics()?;

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
