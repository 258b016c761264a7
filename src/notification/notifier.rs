use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::metrics::NotificationMetrics;
use crate::template::{NotificationPayload, OrderConfirmation, TemplateConfig, TemplateRenderer};
use crate::transport::Transport;

use super::gateway::DispatchGateway;
use super::{
    BatchDispatchResult, BirthdayWish, Customer, DispatchResult, NotificationKind,
    NotificationResult, Order, OtpPurpose, RecipientResult,
};

/// Maximum number of birthday wishes in flight at once
const MAX_CONCURRENT_SENDS: usize = 16;

/// Entry points for every business event that sends an email.
///
/// Each call runs guard, render, dispatch and returns the outcome. Nothing is
/// queued or retried, and no call returns an error: failures are reported in
/// the [`DispatchResult`].
pub struct Notifier {
    renderer: TemplateRenderer,
    gateway: DispatchGateway,
}

impl Notifier {
    pub fn new(config: TemplateConfig, transport: Arc<dyn Transport>) -> NotificationResult<Self> {
        Ok(Self {
            renderer: TemplateRenderer::new(config)?,
            gateway: DispatchGateway::new(transport),
        })
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    pub fn transport_name(&self) -> &'static str {
        self.gateway.transport_name()
    }

    /// Greet a newly registered customer
    #[tracing::instrument(name = "notifier.welcome", skip(self, user))]
    pub async fn send_welcome_email(&self, user: &Customer) -> DispatchResult {
        let payload = NotificationPayload::Welcome {
            name: user.name.clone(),
            phone: user.phone.clone(),
            role: user.role.clone(),
        };
        self.deliver(user.email_address(), "No email address provided", payload)
            .await
    }

    /// Send a one-time password to an address supplied by the caller
    #[tracing::instrument(name = "notifier.otp", skip(self, code))]
    pub async fn send_otp_email(&self, to: &str, code: &str, purpose: OtpPurpose) -> DispatchResult {
        let to = Some(to.trim()).filter(|to| !to.is_empty());
        let payload = NotificationPayload::Otp {
            code: code.to_string(),
            purpose,
        };
        self.deliver(to, "No email address provided for OTP", payload)
            .await
    }

    /// Send a birthday greeting carrying `coupon_code`
    #[tracing::instrument(name = "notifier.birthday", skip(self, user))]
    pub async fn send_birthday_wish(&self, user: &Customer, coupon_code: &str) -> DispatchResult {
        let payload = NotificationPayload::Birthday {
            name: user.name.clone(),
            coupon_code: coupon_code.to_string(),
        };
        self.deliver(
            user.email_address(),
            "No email address provided for birthday wish",
            payload,
        )
        .await
    }

    /// Confirm a placed order.
    ///
    /// The order totals are displayed as given. A `final_amount` that does not
    /// match the itemised totals is logged and still sent.
    #[tracing::instrument(
        name = "notifier.order_confirmation",
        skip(self, user, order),
        fields(order_number = %order.order_number)
    )]
    pub async fn send_order_confirmation_email(&self, user: &Customer, order: &Order) -> DispatchResult {
        if !order.totals_consistent() {
            tracing::warn!(
                final_amount = order.final_amount,
                expected = order.expected_final_amount(),
                "Order final amount does not match itemised totals"
            );
        }

        let payload = NotificationPayload::OrderConfirmation(OrderConfirmation::from(order));
        self.deliver(
            user.email_address(),
            "No email address provided for order confirmation",
            payload,
        )
        .await
    }

    /// Send a password reset link built from `reset_token`
    #[tracing::instrument(name = "notifier.password_reset", skip(self, user, reset_token))]
    pub async fn send_password_reset_email(&self, user: &Customer, reset_token: &str) -> DispatchResult {
        let payload = NotificationPayload::PasswordReset {
            name: user.name.clone(),
            reset_token: reset_token.to_string(),
        };
        self.deliver(
            user.email_address(),
            "No email address provided for password reset",
            payload,
        )
        .await
    }

    /// Send one birthday wish per entry.
    ///
    /// Sends run concurrently with bounded parallelism and are independent:
    /// a failure for one recipient does not stop the others. Results keep the
    /// input order.
    #[tracing::instrument(name = "notifier.birthday_batch", skip(self, wishes), fields(count = wishes.len()))]
    pub async fn send_birthday_wishes(&self, wishes: &[BirthdayWish]) -> BatchDispatchResult {
        let sends: Vec<_> = wishes.iter().map(|wish| self.wish_result(wish)).collect();
        let results: Vec<RecipientResult> = stream::iter(sends)
            .buffered(MAX_CONCURRENT_SENDS)
            .collect()
            .await;

        let batch = BatchDispatchResult::from_results(results);
        tracing::info!(
            total = batch.total,
            sent = batch.sent,
            failed = batch.failed,
            "Birthday wishes dispatched"
        );
        batch
    }

    async fn wish_result(&self, wish: &BirthdayWish) -> RecipientResult {
        let result = self.send_birthday_wish(&wish.user, &wish.coupon_code).await;
        RecipientResult {
            name: wish.user.name.clone(),
            email: wish.user.email_address().map(str::to_string),
            result,
        }
    }

    async fn deliver(
        &self,
        to: Option<&str>,
        missing_message: &str,
        payload: NotificationPayload,
    ) -> DispatchResult {
        let kind = payload.kind();

        let Some(to) = to else {
            tracing::debug!(kind = %kind, "Skipping notification, recipient has no email address");
            NotificationMetrics::record_skipped(kind);
            return DispatchResult::skipped(missing_message);
        };

        let message = match self.renderer.render(&payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(kind = %kind, error = %e, "Failed to render notification");
                NotificationMetrics::record_render_failed(kind);
                return DispatchResult::failed(render_failure_message(kind), e.to_string());
            }
        };

        let result = self.gateway.send(to, &message).await;
        if result.success {
            NotificationMetrics::record_sent(kind);
        } else {
            NotificationMetrics::record_transport_failed(kind);
        }
        result
    }
}

fn render_failure_message(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Welcome => "Failed to render welcome email",
        NotificationKind::Otp => "Failed to render OTP email",
        NotificationKind::Birthday => "Failed to render birthday email",
        NotificationKind::OrderConfirmation => "Failed to render order confirmation email",
        NotificationKind::PasswordReset => "Failed to render password reset email",
    }
}
