//! Account HTTP handlers.
//!
//! - `POST   /v1/accounts` - create an account (and its bootstrap transaction)
//! - `GET    /v1/accounts` - list the caller's live accounts
//! - `GET    /v1/accounts/{id}` - one account with flattened history
//! - `PATCH  /v1/accounts/{id}` - rename
//! - `DELETE /v1/accounts/{id}` - soft delete

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthUser,
    models::account::{
        AccountDetail, AccountSummary, CreateAccountRequest, UpdateAccountRequest,
    },
    response::Envelope,
    services::account_service,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use uuid::Uuid;

/// Create a new account for the authenticated user.
///
/// # Response
///
/// - 201 with the created account summary
/// - 400 `RESOURCE_ALREADY_EXISTS` when a live account with the same
///   `subType` exists
pub async fn create_account(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Envelope<AccountSummary>, AppError> {
    let account = account_service::create(&pool, auth.user_id, request).await?;

    Ok(Envelope::created(
        "Account successfully created",
        account.into(),
    ))
}

/// List the caller's live accounts, summaries only.
pub async fn list_accounts(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Envelope<Vec<AccountSummary>>, AppError> {
    let accounts = account_service::list(&pool, auth.user_id).await?;

    Ok(Envelope::ok(
        "Accounts successfully fetched",
        accounts.into_iter().map(Into::into).collect(),
    ))
}

/// Fetch one account with its full transaction history.
///
/// # Response
///
/// - 200 with the detail payload
/// - 404 `RESOURCE_NOT_FOUND` when the account is missing, soft-deleted,
///   or another user's
pub async fn get_account(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthUser>,
    Path(account_id): Path<Uuid>,
) -> Result<Envelope<AccountDetail>, AppError> {
    let (account, transactions) =
        account_service::get_detail(&pool, auth.user_id, account_id).await?;

    Ok(Envelope::ok(
        "Account successfully fetched",
        AccountDetail::from_account(account, transactions),
    ))
}

/// Rename an account. Only `name` changes.
pub async fn update_account(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthUser>,
    Path(account_id): Path<Uuid>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Envelope<Value>, AppError> {
    account_service::rename(&pool, auth.user_id, account_id, &request.name).await?;

    Ok(Envelope::ok("Account successfully updated", json!({})))
}

/// Soft-delete an account. The row stays in the store; every subsequent
/// read treats it as gone.
pub async fn delete_account(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthUser>,
    Path(account_id): Path<Uuid>,
) -> Result<Envelope<Value>, AppError> {
    account_service::soft_delete(&pool, auth.user_id, account_id).await?;

    Ok(Envelope::ok("Account successfully deleted", json!({})))
}
