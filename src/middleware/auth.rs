//! Bearer-token authentication middleware.
//!
//! Every `/v1` request passes through here:
//! 1. Extract the token from the `Authorization: Bearer <token>` header
//! 2. Hash it with SHA-256 and look the hash up in `auth_tokens`
//! 3. Inject the authenticated user into the request extensions
//! 4. Reject with 401 when any step fails

use crate::{db::DbPool, error::AppError, models::auth_token::AuthToken};
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Authenticated-user context attached to each request.
///
/// Handlers extract this with `Extension<AuthUser>` and scope every query
/// by `user_id`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// SHA-256 hash of a bearer token, as lowercase hex.
///
/// Tokens are only ever stored and compared in this form.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Authentication middleware for the `/v1` route group.
///
/// On success the request gains an [`AuthUser`] extension and continues
/// down the chain; on failure the request ends with
/// `Err(AppError::InvalidToken)`.
pub async fn auth_middleware(
    State(pool): State<DbPool>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::InvalidToken)?;
    let token_hash = hash_token(token);

    let token_record = sqlx::query_as::<_, AuthToken>(
        "SELECT id, token_hash, user_id, created_at, is_active
         FROM auth_tokens
         WHERE token_hash = $1 AND is_active = true",
    )
    .bind(&token_hash)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::InvalidToken)?;

    request.extensions_mut().insert(AuthUser {
        user_id: token_record.user_id,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn hash_is_hex_sha256() {
        let hash = hash_token("some-token");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        // Deterministic, and distinct inputs produce distinct hashes
        assert_eq!(hash, hash_token("some-token"));
        assert_ne!(hash, hash_token("other-token"));
    }

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn missing_or_malformed_header_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);
    }
}
