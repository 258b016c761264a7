//! Delivery transports for rendered emails.
//!
//! The gateway only talks to the [`Transport`] trait, so deployments pick the
//! implementation through configuration:
//!
//! - `LogTransport`: writes every message to the tracing sink (default)
//! - `SmtpTransport`: delivers through an SMTP relay using lettre
//!
//! Use `create_transport()` to build the configured one.

mod log;
mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{MailConfig, TransportKind};
use crate::template::RenderedMessage;

pub use self::log::LogTransport;
pub use self::smtp::SmtpTransport;

/// Transport-level error type
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Hands a rendered message to an external delivery mechanism.
///
/// Implementations do not retry; a failed attempt is reported once.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name used in logs and metrics
    fn name(&self) -> &'static str;

    /// Deliver one message to one recipient
    async fn deliver(&self, to: &str, message: &RenderedMessage) -> Result<(), TransportError>;
}

/// Create the transport selected by `mail.transport`.
///
/// # Example
///
/// ```rust,ignore
/// let transport = create_transport(&settings.mail)?;
/// let notifier = Notifier::new(settings.mail.template_config(), transport)?;
/// ```
pub fn create_transport(config: &MailConfig) -> Result<Arc<dyn Transport>, TransportError> {
    match config.transport {
        TransportKind::Smtp => {
            tracing::info!(
                transport = "smtp",
                host = %config.smtp.host,
                port = config.smtp.port,
                "Creating SMTP transport"
            );
            Ok(Arc::new(SmtpTransport::new(config)?))
        }
        TransportKind::Log => {
            tracing::info!(transport = "log", "Creating log transport");
            Ok(Arc::new(LogTransport::new()))
        }
    }
}
