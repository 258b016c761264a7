//! Prometheus metrics for the notification service.
//!
//! - Notification metrics (sent, failed, skipped by kind)
//! - Dispatch latency by transport

mod helpers;

pub use helpers::{encode_metrics, NotificationMetrics};

use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "storefront";

lazy_static! {
    /// Emails handed to the transport successfully, by kind
    pub static ref NOTIFICATIONS_SENT_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_sent_total", METRIC_PREFIX),
        "Total notifications delivered to the transport",
        &["kind"]
    ).unwrap();

    /// Notifications that failed, by kind and stage (render or transport)
    pub static ref NOTIFICATIONS_FAILED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_failed_total", METRIC_PREFIX),
        "Total notifications that failed to render or deliver",
        &["kind", "reason"]
    ).unwrap();

    /// Notifications skipped because the recipient had no address
    pub static ref NOTIFICATIONS_SKIPPED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_skipped_total", METRIC_PREFIX),
        "Total notifications skipped for missing recipient address",
        &["kind"]
    ).unwrap();

    /// Time spent inside the transport per delivery attempt
    pub static ref DISPATCH_LATENCY: HistogramVec = register_histogram_vec!(
        format!("{}_notification_dispatch_seconds", METRIC_PREFIX),
        "Notification dispatch latency in seconds",
        &["transport"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    ).unwrap();
}
