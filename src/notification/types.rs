use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transport::TransportError;

/// Notification-layer error type
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("Template error: {0}")]
    Template(String),
}

/// Result type for notification operations
pub type NotificationResult<T> = Result<T, NotificationError>;

/// The business events that trigger an email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Welcome,
    Otp,
    Birthday,
    OrderConfirmation,
    PasswordReset,
}

impl NotificationKind {
    /// Stable label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Welcome => "welcome",
            NotificationKind::Otp => "otp",
            NotificationKind::Birthday => "birthday",
            NotificationKind::OrderConfirmation => "order_confirmation",
            NotificationKind::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an OTP code is being issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpPurpose {
    Register,
    Login,
    Reset,
}

impl OtpPurpose {
    /// Human-readable label shown in the subject and body
    pub fn label(&self) -> &'static str {
        match self {
            OtpPurpose::Register => "Registration",
            OtpPurpose::Login => "Login",
            OtpPurpose::Reset => "Password Reset",
        }
    }
}

impl FromStr for OtpPurpose {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "register" => Ok(OtpPurpose::Register),
            "login" => Ok(OtpPurpose::Login),
            "reset" => Ok(OtpPurpose::Reset),
            other => Err(NotificationError::InvalidArgument(format!(
                "unknown OTP purpose '{}', expected register, login or reset",
                other
            ))),
        }
    }
}

fn default_role() -> String {
    "customer".to_string()
}

/// A storefront user as the backend hands it to the notifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_role")]
    pub role: String,
}

impl Customer {
    /// Deliverable address, if any. Blank strings count as absent.
    pub fn email_address(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// One purchased line on an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    /// Unit price
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A placed order with totals already computed upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_number: String,
    pub order_items: Vec<OrderItem>,
    /// Subtotal before shipping, tax and discount
    pub total_price: f64,
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

impl Order {
    /// `subtotal - discount + shipping + tax`
    pub fn expected_final_amount(&self) -> f64 {
        self.total_price - self.discount_amount.unwrap_or(0.0)
            + self.shipping_cost.unwrap_or(0.0)
            + self.tax_amount.unwrap_or(0.0)
    }

    /// Whether `final_amount` agrees with the itemised totals to within half a cent
    pub fn totals_consistent(&self) -> bool {
        (self.expected_final_amount() - self.final_amount).abs() < 0.005
    }
}

/// A single birthday wish in a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayWish {
    pub user: Customer,
    pub coupon_code: String,
}

/// Outcome of one delivery attempt, handed back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Email sent successfully".to_string(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(error.into()),
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
        }
    }
}

/// Per-recipient entry of a batch send
#[derive(Debug, Clone, Serialize)]
pub struct RecipientResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub result: DispatchResult,
}

/// Aggregate of a batch send; results keep the input order
#[derive(Debug, Clone, Serialize)]
pub struct BatchDispatchResult {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub results: Vec<RecipientResult>,
}

impl BatchDispatchResult {
    pub fn from_results(results: Vec<RecipientResult>) -> Self {
        let sent = results.iter().filter(|r| r.result.success).count();
        Self {
            total: results.len(),
            sent,
            failed: results.len() - sent,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_otp_purpose_parsing() {
        assert_eq!("register".parse::<OtpPurpose>().unwrap(), OtpPurpose::Register);
        assert_eq!("login".parse::<OtpPurpose>().unwrap(), OtpPurpose::Login);
        assert_eq!("reset".parse::<OtpPurpose>().unwrap(), OtpPurpose::Reset);
        assert!(matches!(
            "signup".parse::<OtpPurpose>(),
            Err(NotificationError::InvalidArgument(_))
        ));
        assert!("Register".parse::<OtpPurpose>().is_err());
    }

    #[test]
    fn test_otp_purpose_labels() {
        assert_eq!(OtpPurpose::Register.label(), "Registration");
        assert_eq!(OtpPurpose::Login.label(), "Login");
        assert_eq!(OtpPurpose::Reset.label(), "Password Reset");
    }

    #[test]
    fn test_customer_email_address() {
        let mut customer: Customer =
            serde_json::from_value(json!({"name": "Bob", "phone": "", "email": null})).unwrap();
        assert_eq!(customer.role, "customer");
        assert_eq!(customer.email_address(), None);

        customer.email = Some("   ".to_string());
        assert_eq!(customer.email_address(), None);

        customer.email = Some(" bob@example.com ".to_string());
        assert_eq!(customer.email_address(), Some("bob@example.com"));
    }

    #[test]
    fn test_order_deserialize_camel_case() {
        let order: Order = serde_json::from_value(json!({
            "orderNumber": "ORD100",
            "orderItems": [{"name": "Fan", "quantity": 2, "price": 1000}],
            "totalPrice": 2000,
            "finalAmount": 2000,
            "shippingAddress": {
                "street": "1 Rd", "city": "Town", "state": "ST",
                "zipCode": "000001", "country": "India"
            },
            "trackingId": "T1"
        }))
        .unwrap();

        assert_eq!(order.order_items.len(), 1);
        assert_eq!(order.shipping_cost, None);
        assert_eq!(order.shipping_address.zip_code, "000001");
        assert!(order.totals_consistent());
    }

    #[test]
    fn test_order_totals_consistency() {
        let order = Order {
            order_number: "ORD1".to_string(),
            order_items: vec![],
            total_price: 100.0,
            shipping_cost: Some(40.0),
            tax_amount: Some(18.0),
            discount_amount: Some(10.0),
            final_amount: 148.0,
            shipping_address: ShippingAddress::default(),
            tracking_id: "T".to_string(),
        };
        assert!(order.totals_consistent());

        let off = Order {
            final_amount: 150.0,
            ..order
        };
        assert!(!off.totals_consistent());
    }

    #[test]
    fn test_dispatch_result_serialization() {
        let sent = serde_json::to_value(DispatchResult::sent()).unwrap();
        assert_eq!(sent["success"], true);
        assert!(sent.get("error").is_none());

        let failed = serde_json::to_value(DispatchResult::failed("Failed", "boom")).unwrap();
        assert_eq!(failed["success"], false);
        assert_eq!(failed["error"], "boom");
    }

    #[test]
    fn test_batch_result_counts() {
        let results = vec![
            RecipientResult {
                name: "A".to_string(),
                email: Some("a@x.com".to_string()),
                result: DispatchResult::sent(),
            },
            RecipientResult {
                name: "B".to_string(),
                email: None,
                result: DispatchResult::skipped("No email address provided"),
            },
        ];

        let batch = BatchDispatchResult::from_results(results);
        assert_eq!(batch.total, 2);
        assert_eq!(batch.sent, 1);
        assert_eq!(batch.failed, 1);
        assert_eq!(batch.results[1].name, "B");
    }
}
