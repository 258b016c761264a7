use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::server::{api_key_auth, AppState};

use super::health::health;
use super::metrics::prometheus_metrics;
use super::notifications::{
    preview, send_birthday, send_birthday_batch, send_order_confirmation, send_otp,
    send_password_reset, send_welcome,
};

pub fn api_routes(state: AppState) -> Router<AppState> {
    let notifications = Router::new()
        .route("/notifications/welcome", post(send_welcome))
        .route("/notifications/otp", post(send_otp))
        .route("/notifications/birthday", post(send_birthday))
        .route("/notifications/birthday/batch", post(send_birthday_batch))
        .route("/notifications/order-confirmation", post(send_order_confirmation))
        .route("/notifications/password-reset", post(send_password_reset))
        .route("/notifications/preview", post(preview))
        .route_layer(middleware::from_fn_with_state(state, api_key_auth));

    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .nest("/api/v1", notifications)
}
