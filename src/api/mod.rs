//! API layer - HTTP endpoint handlers.

mod health;
mod metrics;
mod notifications;
mod response;
mod routes;

pub use health::{health, HealthResponse};
pub use metrics::prometheus_metrics;
pub use notifications::{
    preview, send_birthday, send_birthday_batch, send_order_confirmation, send_otp,
    send_password_reset, send_welcome,
};
pub use response::ApiResponse;
pub use routes::api_routes;
