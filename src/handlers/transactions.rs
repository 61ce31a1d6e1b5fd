//! Transaction HTTP handlers.
//!
//! - `POST /v1/transactions` - record a movement of value
//! - `GET  /v1/transactions?limit&offset` - page through the caller's history

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthUser,
    models::transaction::{
        CreateTransactionRequest, Pagination, TransactionPage, TransactionView,
    },
    response::Envelope,
    services::transaction_service,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};

/// Record a transaction for the authenticated user.
///
/// # Response
///
/// - 201 with the recorded transaction, category resolved
/// - 400 `INVALID_REQUEST` on bad amount, missing links, or unknown category
/// - 404 `RESOURCE_NOT_FOUND` when a linked account is not the caller's
/// - 422 `INSUFFICIENT_BALANCE` when the source cannot cover the amount
pub async fn create_transaction(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<Envelope<TransactionView>, AppError> {
    let transaction = transaction_service::create(&pool, auth.user_id, request).await?;

    Ok(Envelope::created(
        "Transaction successfully created",
        transaction,
    ))
}

/// Fetch one page of the caller's transactions, newest first.
///
/// `limit` defaults to 20 and is capped at 100; `offset` defaults to 0.
pub async fn list_transactions(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthUser>,
    Query(pagination): Query<Pagination>,
) -> Result<Envelope<TransactionPage>, AppError> {
    let page = transaction_service::list(&pool, auth.user_id, pagination).await?;

    Ok(Envelope::ok("Transactions successfully fetched", page))
}
