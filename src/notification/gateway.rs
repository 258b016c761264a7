use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::metrics::NotificationMetrics;
use crate::template::RenderedMessage;
use crate::transport::Transport;

use super::DispatchResult;

/// Boundary between the notifier and the configured [`Transport`].
///
/// `send` never fails: transport errors come back as an unsuccessful
/// [`DispatchResult`]. Every call is its own delivery attempt; nothing is
/// deduplicated or retried.
pub struct DispatchGateway {
    transport: Arc<dyn Transport>,
}

impl DispatchGateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    #[tracing::instrument(
        name = "gateway.send",
        skip(self, message),
        fields(
            delivery_id = %Uuid::new_v4(),
            transport = self.transport.name(),
            subject = %message.subject
        )
    )]
    pub async fn send(&self, to: &str, message: &RenderedMessage) -> DispatchResult {
        let started = Instant::now();
        let outcome = self.transport.deliver(to, message).await;
        NotificationMetrics::record_dispatch_latency(
            self.transport.name(),
            started.elapsed().as_secs_f64(),
        );

        match outcome {
            Ok(()) => {
                tracing::debug!(to = %to, "Email dispatched");
                DispatchResult::sent()
            }
            Err(e) => {
                tracing::warn!(to = %to, error = %e, "Email dispatch failed");
                DispatchResult::failed("Failed to send email", e.to_string())
            }
        }
    }
}
