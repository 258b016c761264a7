//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use crate::notification::NotificationKind;

use super::{
    DISPATCH_LATENCY, NOTIFICATIONS_FAILED_TOTAL, NOTIFICATIONS_SENT_TOTAL,
    NOTIFICATIONS_SKIPPED_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording notification metrics
pub struct NotificationMetrics;

impl NotificationMetrics {
    /// Record a successful delivery
    pub fn record_sent(kind: NotificationKind) {
        NOTIFICATIONS_SENT_TOTAL
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    /// Record a template failure
    pub fn record_render_failed(kind: NotificationKind) {
        NOTIFICATIONS_FAILED_TOTAL
            .with_label_values(&[kind.as_str(), "render"])
            .inc();
    }

    /// Record a transport failure
    pub fn record_transport_failed(kind: NotificationKind) {
        NOTIFICATIONS_FAILED_TOTAL
            .with_label_values(&[kind.as_str(), "transport"])
            .inc();
    }

    /// Record a send skipped for a missing address
    pub fn record_skipped(kind: NotificationKind) {
        NOTIFICATIONS_SKIPPED_TOTAL
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    /// Record time spent in the transport
    pub fn record_dispatch_latency(transport: &str, seconds: f64) {
        DISPATCH_LATENCY
            .with_label_values(&[transport])
            .observe(seconds);
    }
}
