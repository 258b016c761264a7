use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;
use crate::template::RenderedMessage;

use super::{Transport, TransportError};

/// Delivers through an SMTP relay as multipart/alternative (text + HTML)
pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpTransport {
    pub fn new(config: &MailConfig) -> Result<Self, TransportError> {
        let from = Mailbox::new(
            Some(config.from_name.clone()),
            config
                .from_address
                .parse()
                .map_err(|e: lettre::address::AddressError| {
                    TransportError::InvalidAddress(format!("invalid from address: {}", e))
                })?,
        );

        let smtp = &config.smtp;
        let mut builder = if smtp.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
                .map_err(|e| TransportError::Connection(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
        };

        builder = builder
            .port(smtp.port)
            .timeout(Some(Duration::from_secs(smtp.timeout_seconds)));

        if let (Some(username), Some(password)) = (&smtp.username, &smtp.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
            from,
        })
    }

    fn build_message(&self, to: &str, message: &RenderedMessage) -> Result<Message, TransportError> {
        let to: Mailbox = to.parse().map_err(|e: lettre::address::AddressError| {
            TransportError::InvalidAddress(format!("invalid recipient address: {}", e))
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                message.text.clone(),
                message.html.clone(),
            ))
            .map_err(|e| TransportError::Build(e.to_string()))
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn deliver(&self, to: &str, message: &RenderedMessage) -> Result<(), TransportError> {
        let email = self.build_message(to, message)?;

        self.mailer
            .send(email)
            .await
            .map_err(|e: lettre::transport::smtp::Error| TransportError::Connection(e.to_string()))?;

        Ok(())
    }
}
