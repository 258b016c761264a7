//! Email templates for storefront lifecycle notifications.
//!
//! This module provides:
//! - Typed payloads, one variant per notification kind
//! - Built-in handlebars templates for the HTML and plain-text bodies
//! - Currency formatting and link building from [`TemplateConfig`]
//!
//! # Example
//!
//! ```ignore
//! let renderer = TemplateRenderer::new(TemplateConfig::default())?;
//!
//! let rendered = renderer.render(&NotificationPayload::Otp {
//!     code: "482913".to_string(),
//!     purpose: OtpPurpose::Login,
//! })?;
//!
//! assert_eq!(rendered.subject, "Your Login OTP Code");
//! ```

mod format;
mod render;
mod types;

pub use format::format_currency;
pub use render::{
    TemplateRenderer, BIRTHDAY_COUPON_VALIDITY, BIRTHDAY_DISCOUNT, FIRST_PURCHASE_DISCOUNT,
    OTP_VALIDITY, PASSWORD_RESET_EXPIRY,
};
pub use types::{LineItem, NotificationPayload, OrderConfirmation, RenderedMessage, TemplateConfig};
