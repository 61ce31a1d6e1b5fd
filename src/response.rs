//! Uniform response envelope.
//!
//! Every API reply, success or failure, is wrapped in the same shape:
//!
//! ```json
//! {
//!   "_data": { ... },
//!   "_metadata": { "message": "...", "statusCode": 201 }
//! }
//! ```
//!
//! Error replies additionally carry a `code` string in `_metadata`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Envelope wrapping a response payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    #[serde(rename = "_data")]
    pub data: T,

    #[serde(rename = "_metadata")]
    pub metadata: Metadata,
}

/// Reply metadata carried alongside the payload.
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Human-readable outcome message
    pub message: String,

    /// HTTP status code, duplicated into the body for clients that only
    /// look at the payload
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Machine-readable error code, present on failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap `data` with an arbitrary status and message.
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            data,
            metadata: Metadata {
                message: message.into(),
                status_code: status.as_u16(),
                code: None,
            },
        }
    }

    /// 200 OK envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, data)
    }

    /// 201 Created envelope.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, data)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.metadata.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let envelope = Envelope::created("Account successfully created", json!({"id": 1}));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["_data"]["id"], 1);
        assert_eq!(value["_metadata"]["message"], "Account successfully created");
        assert_eq!(value["_metadata"]["statusCode"], 201);
        // No error code on success replies
        assert!(value["_metadata"].get("code").is_none());
    }

    #[test]
    fn ok_envelope_uses_200() {
        let envelope = Envelope::ok("fetched", Vec::<u32>::new());
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["_metadata"]["statusCode"], 200);
        assert!(value["_data"].as_array().unwrap().is_empty());
    }
}
