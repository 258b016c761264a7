//! Notification facade, dispatch gateway and the domain types they share.
//!
//! Callers use [`Notifier`], one method per business event. Each method
//! checks the recipient address, renders the email through
//! [`crate::template::TemplateRenderer`] and hands it to the
//! [`DispatchGateway`], which owns the configured transport.

mod gateway;
mod notifier;
mod types;

pub use gateway::DispatchGateway;
pub use notifier::Notifier;
pub use types::{
    BatchDispatchResult, BirthdayWish, Customer, DispatchResult, NotificationError,
    NotificationKind, NotificationResult, Order, OrderItem, OtpPurpose, RecipientResult,
    ShippingAddress,
};
