use serde::Serialize;

/// `{ success, data, message? }`, the envelope every storefront screen expects
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_status(success: bool, data: T, message: impl Into<String>) -> Self {
        Self {
            success,
            data,
            message: Some(message.into()),
        }
    }
}
