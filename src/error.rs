//! Error types and their HTTP mapping.
//!
//! Domain errors keep their own code on the wire; anything unexpected,
//! including database failures, is flattened into a generic bad-request
//! with code `UNEXPECTED_ERROR`. The root cause is logged server-side and
//! never returned to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::response::{Envelope, Metadata};

/// Application-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed. Wraps any sqlx::Error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Bearer token is missing, invalid, or revoked.
    #[error("Invalid auth token")]
    InvalidToken,

    /// Requested record does not exist, is soft-deleted, or belongs to
    /// another user.
    #[error("Resource not found")]
    ResourceNotFound,

    /// A live record with the same identity already exists.
    #[error("Resource already exists")]
    ResourceAlreadyExists,

    /// Source account balance cannot cover the requested movement.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Request body or parameters are invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                self.to_string(),
            ),
            AppError::ResourceNotFound => (
                StatusCode::NOT_FOUND,
                "RESOURCE_NOT_FOUND",
                self.to_string(),
            ),
            AppError::ResourceAlreadyExists => (
                StatusCode::BAD_REQUEST,
                "RESOURCE_ALREADY_EXISTS",
                self.to_string(),
            ),
            AppError::InsufficientBalance => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INSUFFICIENT_BALANCE",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::BAD_REQUEST,
                    "UNEXPECTED_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        Envelope {
            data: json!({}),
            metadata: Metadata {
                message,
                status_code: status.as_u16(),
                code: Some(code.to_string()),
            },
        }
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_code() {
        let response = AppError::ResourceNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["_metadata"]["code"], "RESOURCE_NOT_FOUND");
        assert_eq!(body["_metadata"]["statusCode"], 404);
    }

    #[tokio::test]
    async fn already_exists_maps_to_400_with_code() {
        let response = AppError::ResourceAlreadyExists.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["_metadata"]["code"], "RESOURCE_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn database_errors_are_flattened() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["_metadata"]["code"], "UNEXPECTED_ERROR");
        // Root cause must not leak to the caller
        assert_eq!(body["_metadata"]["message"], "An unexpected error occurred");
    }

    #[tokio::test]
    async fn invalid_token_maps_to_401() {
        let response = AppError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn insufficient_balance_maps_to_422() {
        let response = AppError::InsufficientBalance.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["_metadata"]["code"], "INSUFFICIENT_BALANCE");
    }
}
