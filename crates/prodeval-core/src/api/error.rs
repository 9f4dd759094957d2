use serde_json::Value;
use thiserror::Error;

use crate::auth::StoreError;

/// Message used when an error response carries no usable `detail`.
pub const FALLBACK_ERROR_MESSAGE: &str = "API request failed";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build the error for a failed response from its parsed body.
    pub fn from_body(status: reqwest::StatusCode, body: &Value) -> Self {
        ApiError::Request {
            status: status.as_u16(),
            message: detail_message(body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// The body's `detail` field when it is set to something truthy, otherwise
/// the fallback message. Non-string details (FastAPI validation errors are
/// arrays) are rendered as JSON text.
fn detail_message(body: &Value) -> String {
    match body.get("detail") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(detail) if is_truthy(detail) => detail.to_string(),
        _ => FALLBACK_ERROR_MESSAGE.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn test_detail_string_becomes_message() {
        let err = ApiError::from_body(StatusCode::BAD_REQUEST, &json!({"detail": "Product not found"}));
        assert_eq!(err.to_string(), "Product not found");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_missing_or_falsy_detail_falls_back() {
        for body in [json!({}), json!({"detail": ""}), json!({"detail": null}), json!({"detail": 0})] {
            let err = ApiError::from_body(StatusCode::INTERNAL_SERVER_ERROR, &body);
            assert_eq!(err.to_string(), FALLBACK_ERROR_MESSAGE);
        }
    }

    #[test]
    fn test_structured_detail_rendered_as_json() {
        let body = json!({"detail": [{"loc": ["body", "name"], "msg": "field required"}]});
        let err = ApiError::from_body(StatusCode::UNPROCESSABLE_ENTITY, &body);
        assert!(err.to_string().contains("field required"));
    }
}
