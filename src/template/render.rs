//! Renders notification payloads through the built-in email templates

use handlebars::Handlebars;
use serde_json::json;

use crate::notification::{NotificationError, NotificationKind, NotificationResult, OtpPurpose};

use super::format::{
    format_currency, require_amount, require_optional_amount, require_text, shown_amount,
};
use super::types::{NotificationPayload, OrderConfirmation, RenderedMessage, TemplateConfig};

/// OTP codes expire after this long
pub const OTP_VALIDITY: &str = "10 minutes";
/// Birthday coupons expire after this long
pub const BIRTHDAY_COUPON_VALIDITY: &str = "7 days";
pub const BIRTHDAY_DISCOUNT: &str = "15%";
pub const FIRST_PURCHASE_DISCOUNT: &str = "10%";
/// Reset links expire after this long
pub const PASSWORD_RESET_EXPIRY: &str = "1 hour";

const WELCOME_SUBJECT: &str = "Welcome to our store!";
const BIRTHDAY_SUBJECT: &str = "🎉 Happy Birthday! A special gift inside";
const PASSWORD_RESET_SUBJECT: &str = "Reset your password";

/// (template name, html source, text source)
const TEMPLATES: [(&str, &str, &str); 5] = [
    (
        "welcome",
        include_str!("templates/welcome.html.hbs"),
        include_str!("templates/welcome.txt.hbs"),
    ),
    (
        "otp",
        include_str!("templates/otp.html.hbs"),
        include_str!("templates/otp.txt.hbs"),
    ),
    (
        "birthday",
        include_str!("templates/birthday.html.hbs"),
        include_str!("templates/birthday.txt.hbs"),
    ),
    (
        "order_confirmation",
        include_str!("templates/order_confirmation.html.hbs"),
        include_str!("templates/order_confirmation.txt.hbs"),
    ),
    (
        "password_reset",
        include_str!("templates/password_reset.html.hbs"),
        include_str!("templates/password_reset.txt.hbs"),
    ),
];

/// Turns a [`NotificationPayload`] into a [`RenderedMessage`].
///
/// Rendering is pure: the same payload and config always produce the same
/// bytes. HTML bodies escape interpolated values, text bodies do not.
pub struct TemplateRenderer {
    html: Handlebars<'static>,
    text: Handlebars<'static>,
    config: TemplateConfig,
}

impl TemplateRenderer {
    /// Compile the built-in templates
    pub fn new(config: TemplateConfig) -> NotificationResult<Self> {
        let mut html = Handlebars::new();
        html.set_strict_mode(true);

        let mut text = Handlebars::new();
        text.set_strict_mode(true);
        text.register_escape_fn(handlebars::no_escape);

        for (name, html_source, text_source) in TEMPLATES {
            html.register_template_string(name, html_source)
                .map_err(|e| NotificationError::Template(format!("{}.html: {}", name, e)))?;
            text.register_template_string(name, text_source)
                .map_err(|e| NotificationError::Template(format!("{}.txt: {}", name, e)))?;
        }

        Ok(Self { html, text, config })
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Render a payload. Fails with `InvalidArgument` and no output when a
    /// required field is empty or an amount is negative or non-finite.
    pub fn render(&self, payload: &NotificationPayload) -> NotificationResult<RenderedMessage> {
        match payload {
            NotificationPayload::Welcome { name, phone, role } => {
                self.render_welcome(name, phone, role)
            }
            NotificationPayload::Otp { code, purpose } => self.render_otp(code, *purpose),
            NotificationPayload::Birthday { name, coupon_code } => {
                self.render_birthday(name, coupon_code)
            }
            NotificationPayload::OrderConfirmation(order) => self.render_order_confirmation(order),
            NotificationPayload::PasswordReset { name, reset_token } => {
                self.render_password_reset(name, reset_token)
            }
        }
    }

    fn render_welcome(&self, name: &str, phone: &str, role: &str) -> NotificationResult<RenderedMessage> {
        require_text("name", name)?;

        let data = json!({
            "name": name,
            "phone": phone,
            "role": role,
            "first_purchase_discount": FIRST_PURCHASE_DISCOUNT,
        });

        self.render_template(NotificationKind::Welcome, WELCOME_SUBJECT.to_string(), &data)
    }

    fn render_otp(&self, code: &str, purpose: OtpPurpose) -> NotificationResult<RenderedMessage> {
        require_text("code", code)?;

        let label = purpose.label();
        let data = json!({
            "code": code,
            "purpose_label": label,
            "validity": OTP_VALIDITY,
        });

        self.render_template(
            NotificationKind::Otp,
            format!("Your {} OTP Code", label),
            &data,
        )
    }

    fn render_birthday(&self, name: &str, coupon_code: &str) -> NotificationResult<RenderedMessage> {
        require_text("name", name)?;
        require_text("coupon_code", coupon_code)?;

        let data = json!({
            "name": name,
            "coupon_code": coupon_code,
            "discount": BIRTHDAY_DISCOUNT,
            "validity": BIRTHDAY_COUPON_VALIDITY,
        });

        self.render_template(NotificationKind::Birthday, BIRTHDAY_SUBJECT.to_string(), &data)
    }

    fn render_order_confirmation(&self, order: &OrderConfirmation) -> NotificationResult<RenderedMessage> {
        require_text("order_number", &order.order_number)?;
        require_text("tracking_id", &order.tracking_id)?;
        require_amount("subtotal", order.subtotal)?;
        require_optional_amount("shipping_cost", order.shipping_cost)?;
        require_optional_amount("tax_amount", order.tax_amount)?;
        require_optional_amount("discount_amount", order.discount_amount)?;
        require_amount("final_amount", order.final_amount)?;

        let symbol = self.config.currency_symbol.as_str();
        let money = |value: f64| format_currency(symbol, value);

        let mut items = Vec::with_capacity(order.items.len());
        for (index, item) in order.items.iter().enumerate() {
            require_text(&format!("items[{}].name", index), &item.name)?;
            require_amount(&format!("items[{}].unit_price", index), item.unit_price)?;
            items.push(json!({
                "name": item.name,
                "quantity": item.quantity,
                "unit_price": money(item.unit_price),
                "line_total": money(item.line_total()),
            }));
        }

        let address = &order.shipping_address;
        let data = json!({
            "order_number": order.order_number,
            "items": items,
            "subtotal": money(order.subtotal),
            "shipping_cost": shown_amount(order.shipping_cost).map(money),
            "tax_amount": shown_amount(order.tax_amount).map(money),
            "discount_amount": shown_amount(order.discount_amount).map(money),
            "final_amount": money(order.final_amount),
            "address": {
                "street": address.street,
                "city": address.city,
                "state": address.state,
                "zip_code": address.zip_code,
                "country": address.country,
            },
            "tracking_link": self.config.tracking_link(&order.tracking_id),
        });

        self.render_template(
            NotificationKind::OrderConfirmation,
            format!("Order Confirmation - {}", order.order_number),
            &data,
        )
    }

    fn render_password_reset(&self, name: &str, reset_token: &str) -> NotificationResult<RenderedMessage> {
        require_text("reset_token", reset_token)?;

        let data = json!({
            "name": name,
            "reset_link": self.config.reset_link(reset_token),
            "expiry": PASSWORD_RESET_EXPIRY,
        });

        self.render_template(
            NotificationKind::PasswordReset,
            PASSWORD_RESET_SUBJECT.to_string(),
            &data,
        )
    }

    fn render_template(
        &self,
        kind: NotificationKind,
        subject: String,
        data: &serde_json::Value,
    ) -> NotificationResult<RenderedMessage> {
        let name = kind.as_str();
        let html = self
            .html
            .render(name, data)
            .map_err(|e| NotificationError::InvalidArgument(e.to_string()))?;
        let text = self
            .text
            .render(name, data)
            .map_err(|e| NotificationError::InvalidArgument(e.to_string()))?;

        Ok(RenderedMessage { subject, html, text })
    }
}
