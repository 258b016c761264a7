//! Notification trigger endpoints.
//!
//! Send endpoints always answer 200; `success` in the envelope mirrors the
//! underlying [`DispatchResult`]. Bodies that fail to parse are answered with
//! a 400 `VALIDATION_ERROR` envelope.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::error::Result;
use crate::notification::{
    BatchDispatchResult, BirthdayWish, Customer, DispatchResult, Order, OtpPurpose,
};
use crate::server::AppState;
use crate::template::{NotificationPayload, RenderedMessage};

use super::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct WelcomeRequest {
    pub user: Customer,
}

#[derive(Debug, Deserialize)]
pub struct OtpRequest {
    pub email: String,
    pub otp: String,
    /// `register`, `login` or `reset`
    pub purpose: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayRequest {
    pub user: Customer,
    pub coupon_code: String,
}

#[derive(Debug, Deserialize)]
pub struct BirthdayBatchRequest {
    pub recipients: Vec<BirthdayWish>,
}

#[derive(Debug, Deserialize)]
pub struct OrderConfirmationRequest {
    pub user: Customer,
    pub order: Order,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub user: Customer,
    pub reset_token: String,
}

fn envelope(result: DispatchResult) -> Json<ApiResponse<DispatchResult>> {
    let success = result.success;
    let message = result.message.clone();
    Json(ApiResponse::with_status(success, result, message))
}

/// POST /api/v1/notifications/welcome
#[tracing::instrument(name = "http.send_welcome", skip(state, request))]
pub async fn send_welcome(
    State(state): State<AppState>,
    request: std::result::Result<Json<WelcomeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DispatchResult>>> {
    let Json(request) = request?;
    Ok(envelope(state.notifier.send_welcome_email(&request.user).await))
}

/// POST /api/v1/notifications/otp
#[tracing::instrument(name = "http.send_otp", skip(state, request))]
pub async fn send_otp(
    State(state): State<AppState>,
    request: std::result::Result<Json<OtpRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DispatchResult>>> {
    let Json(request) = request?;
    let purpose: OtpPurpose = request.purpose.parse()?;
    let result = state
        .notifier
        .send_otp_email(&request.email, &request.otp, purpose)
        .await;
    Ok(envelope(result))
}

/// POST /api/v1/notifications/birthday
#[tracing::instrument(name = "http.send_birthday", skip(state, request))]
pub async fn send_birthday(
    State(state): State<AppState>,
    request: std::result::Result<Json<BirthdayRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DispatchResult>>> {
    let Json(request) = request?;
    Ok(envelope(
        state
            .notifier
            .send_birthday_wish(&request.user, &request.coupon_code)
            .await,
    ))
}

/// POST /api/v1/notifications/birthday/batch
#[tracing::instrument(name = "http.send_birthday_batch", skip(state, request))]
pub async fn send_birthday_batch(
    State(state): State<AppState>,
    request: std::result::Result<Json<BirthdayBatchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BatchDispatchResult>>> {
    let Json(request) = request?;
    let batch = state.notifier.send_birthday_wishes(&request.recipients).await;
    let message = format!("Sent {} of {} birthday wishes", batch.sent, batch.total);
    Ok(Json(ApiResponse::with_status(batch.failed == 0, batch, message)))
}

/// POST /api/v1/notifications/order-confirmation
#[tracing::instrument(name = "http.send_order_confirmation", skip(state, request))]
pub async fn send_order_confirmation(
    State(state): State<AppState>,
    request: std::result::Result<Json<OrderConfirmationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DispatchResult>>> {
    let Json(request) = request?;
    Ok(envelope(
        state
            .notifier
            .send_order_confirmation_email(&request.user, &request.order)
            .await,
    ))
}

/// POST /api/v1/notifications/password-reset
#[tracing::instrument(name = "http.send_password_reset", skip(state, request))]
pub async fn send_password_reset(
    State(state): State<AppState>,
    request: std::result::Result<Json<PasswordResetRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DispatchResult>>> {
    let Json(request) = request?;
    Ok(envelope(
        state
            .notifier
            .send_password_reset_email(&request.user, &request.reset_token)
            .await,
    ))
}

/// POST /api/v1/notifications/preview - Render without sending
#[tracing::instrument(name = "http.preview", skip(state, payload))]
pub async fn preview(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NotificationPayload>, JsonRejection>,
) -> Result<Json<ApiResponse<RenderedMessage>>> {
    let Json(payload) = payload?;
    let rendered = state.notifier.renderer().render(&payload)?;
    Ok(Json(ApiResponse::ok(rendered)))
}
