//! HTTP API integration tests
//!
//! Requests are sent straight into the router with `oneshot`, so no socket
//! is bound.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront_notifications::config::{ApiConfig, MailConfig, ServerConfig, Settings};
use storefront_notifications::server::{create_app, AppState};
use storefront_notifications::transport::LogTransport;

fn settings(api_key: Option<&str>) -> Settings {
    Settings {
        server: ServerConfig::default(),
        api: ApiConfig {
            key: api_key.map(str::to_string),
        },
        mail: MailConfig {
            app_url: "https://shop.test".to_string(),
            frontend_url: "https://www.shop.test".to_string(),
            ..MailConfig::default()
        },
    }
}

fn app(api_key: Option<&str>) -> Router {
    let state = AppState::new(settings(api_key), Arc::new(LogTransport::new())).unwrap();
    create_app(state)
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// =============================================================================
// Health & Metrics
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let response = app(None)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["transport"], "log");
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let response = app(None)
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

// =============================================================================
// Notification endpoints
// =============================================================================

mod notification_tests {
    use super::*;

    #[tokio::test]
    async fn test_welcome_envelope() {
        let (status, body) = post(
            app(None),
            "/api/v1/notifications/welcome",
            json!({"user": {"name": "Asha", "email": "a@x.com", "phone": "1", "role": "customer"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["success"], true);
        assert_eq!(body["message"], "Email sent successfully");
    }

    #[tokio::test]
    async fn test_welcome_without_email_envelope() {
        let (status, body) = post(
            app(None),
            "/api/v1/notifications/welcome",
            json!({"user": {"name": "Bob", "phone": "", "role": "customer", "email": null}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No email address provided");
    }

    #[tokio::test]
    async fn test_otp_unknown_purpose_is_rejected() {
        let (status, body) = post(
            app(None),
            "/api/v1/notifications/otp",
            json!({"email": "u@x.com", "otp": "482913", "purpose": "signup"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_otp_send() {
        let (status, body) = post(
            app(None),
            "/api/v1/notifications/otp",
            json!({"email": "u@x.com", "otp": "482913", "purpose": "login"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_order_confirmation() {
        let (status, body) = post(
            app(None),
            "/api/v1/notifications/order-confirmation",
            json!({
                "user": {"name": "Asha", "email": "a@x.com"},
                "order": {
                    "orderNumber": "ORD100",
                    "orderItems": [{"name": "Fan", "quantity": 2, "price": 1000}],
                    "totalPrice": 2000,
                    "finalAmount": 2000,
                    "shippingAddress": {
                        "street": "1 Rd", "city": "Town", "state": "ST",
                        "zipCode": "000001", "country": "India"
                    },
                    "trackingId": "T1"
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_birthday_batch() {
        let (status, body) = post(
            app(None),
            "/api/v1/notifications/birthday/batch",
            json!({"recipients": [
                {"user": {"name": "A", "email": "a@x.com"}, "couponCode": "BDAY-A"},
                {"user": {"name": "B"}, "couponCode": "BDAY-B"}
            ]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["sent"], 1);
        assert_eq!(body["message"], "Sent 1 of 2 birthday wishes");
    }

    #[tokio::test]
    async fn test_preview_renders_without_sending() {
        let (status, body) = post(
            app(None),
            "/api/v1/notifications/preview",
            json!({"kind": "password_reset", "name": "Asha", "resetToken": "tok"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["subject"], "Reset your password");
        assert!(body["data"]["text"]
            .as_str()
            .unwrap()
            .contains("https://www.shop.test/reset-password?token=tok"));
    }

    #[tokio::test]
    async fn test_missing_field_gets_error_envelope() {
        let (status, body) = post(
            app(None),
            "/api/v1/notifications/otp",
            json!({"email": "u@x.com", "purpose": "login"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("otp"));
    }

    #[tokio::test]
    async fn test_malformed_json_gets_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/notifications/welcome")
            .header("content-type", "application/json")
            .body(Body::from("{\"user\": "))
            .unwrap();

        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_preview_rejects_invalid_payload() {
        let (status, body) = post(
            app(None),
            "/api/v1/notifications/preview",
            json!({"kind": "otp", "code": "", "purpose": "login"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }
}

// =============================================================================
// API key middleware
// =============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_key_is_rejected() {
        let (status, _) = post(
            app(Some("secret")),
            "/api/v1/notifications/welcome",
            json!({"user": {"name": "Asha", "email": "a@x.com"}}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_api_key_is_accepted() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/notifications/welcome")
            .header("content-type", "application/json")
            .header("X-API-Key", "secret")
            .body(Body::from(
                json!({"user": {"name": "Asha", "email": "a@x.com"}}).to_string(),
            ))
            .unwrap();

        let response = app(Some("secret")).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_needs_no_key() {
        let response = app(Some("secret"))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

// =============================================================================
// CORS
// =============================================================================

mod cors_tests {
    use super::*;

    fn app_with_origins(origins: &[&str]) -> Router {
        let mut settings = settings(None);
        settings.server.cors_origins = origins.iter().map(|o| o.to_string()).collect();
        create_app(AppState::new(settings, Arc::new(LogTransport::new())).unwrap())
    }

    async fn allow_origin_header(app: Router, origin: &str) -> Option<String> {
        let request = Request::get("/health")
            .header("origin", origin)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_any_origin_when_unconfigured() {
        let header = allow_origin_header(app_with_origins(&[]), "https://elsewhere.test").await;
        assert_eq!(header.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_configured_origins_are_enforced() {
        let origins = ["https://www.shop.test"];

        let allowed = allow_origin_header(app_with_origins(&origins), "https://www.shop.test").await;
        assert_eq!(allowed.as_deref(), Some("https://www.shop.test"));

        let denied = allow_origin_header(app_with_origins(&origins), "https://evil.test").await;
        assert_eq!(denied, None);
    }
}
