use serde::{Deserialize, Serialize};

use crate::notification::{NotificationKind, Order, OtpPurpose, ShippingAddress};

/// Values the templates need from the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Base URL of the storefront app, used for order tracking links
    pub app_url: String,
    /// Base URL of the frontend, used for password reset links
    pub frontend_url: String,
    /// Glyph prefixed to every monetary value
    pub currency_symbol: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            app_url: "http://localhost:5000".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl TemplateConfig {
    /// `{app_url}/orders/track/{tracking_id}`
    pub fn tracking_link(&self, tracking_id: &str) -> String {
        format!(
            "{}/orders/track/{}",
            self.app_url.trim_end_matches('/'),
            urlencoding::encode(tracking_id)
        )
    }

    /// `{frontend_url}/reset-password?token={reset_token}`
    pub fn reset_link(&self, reset_token: &str) -> String {
        format!(
            "{}/reset-password?token={}",
            self.frontend_url.trim_end_matches('/'),
            urlencoding::encode(reset_token)
        )
    }
}

/// A purchased line as the order template displays it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Everything the order confirmation template renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: String,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub shipping_cost: Option<f64>,
    #[serde(default)]
    pub tax_amount: Option<f64>,
    #[serde(default)]
    pub discount_amount: Option<f64>,
    pub final_amount: f64,
    pub shipping_address: ShippingAddress,
    pub tracking_id: String,
}

impl From<&Order> for OrderConfirmation {
    fn from(order: &Order) -> Self {
        Self {
            order_number: order.order_number.clone(),
            items: order
                .order_items
                .iter()
                .map(|item| LineItem {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.price,
                })
                .collect(),
            subtotal: order.total_price,
            shipping_cost: order.shipping_cost,
            tax_amount: order.tax_amount,
            discount_amount: order.discount_amount,
            final_amount: order.final_amount,
            shipping_address: order.shipping_address.clone(),
            tracking_id: order.tracking_id.clone(),
        }
    }
}

/// Input to the renderer, one variant per notification kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationPayload {
    Welcome {
        name: String,
        #[serde(default)]
        phone: String,
        #[serde(default)]
        role: String,
    },
    Otp {
        code: String,
        purpose: OtpPurpose,
    },
    #[serde(rename_all = "camelCase")]
    Birthday { name: String, coupon_code: String },
    OrderConfirmation(OrderConfirmation),
    #[serde(rename_all = "camelCase")]
    PasswordReset { name: String, reset_token: String },
}

impl NotificationPayload {
    pub fn kind(&self) -> NotificationKind {
        match self {
            NotificationPayload::Welcome { .. } => NotificationKind::Welcome,
            NotificationPayload::Otp { .. } => NotificationKind::Otp,
            NotificationPayload::Birthday { .. } => NotificationKind::Birthday,
            NotificationPayload::OrderConfirmation(_) => NotificationKind::OrderConfirmation,
            NotificationPayload::PasswordReset { .. } => NotificationKind::PasswordReset,
        }
    }
}

/// Subject plus both body variants of one email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub subject: String,
    pub html: String,
    pub text: String,
}
