use async_trait::async_trait;

use crate::template::RenderedMessage;

use super::{Transport, TransportError};

/// Development transport: nothing leaves the process, the message is logged
#[derive(Debug, Default, Clone)]
pub struct LogTransport;

impl LogTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, to: &str, message: &RenderedMessage) -> Result<(), TransportError> {
        tracing::info!(
            to = %to,
            subject = %message.subject,
            text = %message.text,
            html = %message.html,
            "Email delivered to log sink"
        );
        Ok(())
    }
}
