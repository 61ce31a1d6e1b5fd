//! Transaction service - recording and listing movements of value.
//!
//! A recorded transaction both inserts its row and moves the linked
//! account balances, all inside one database transaction with the account
//! rows locked. Which links are required depends on the transaction type:
//!
//! - INCOME credits `to_id`
//! - EXPENSE debits `from_id`
//! - TRANSFER debits `from_id` and credits `to_id`

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        category::CategoryRef,
        transaction::{
            CreateTransactionRequest, Pagination, Transaction, TransactionPage, TransactionRow,
            TransactionType, TransactionView,
        },
    },
};
use sqlx::{Postgres, Transaction as SqlxTransaction};
use uuid::Uuid;

/// Account links a transaction must carry, validated against its type.
///
/// Links that the type does not use are dropped rather than stored.
fn validate_links(
    request: &CreateTransactionRequest,
) -> Result<(Option<Uuid>, Option<Uuid>), AppError> {
    match request.transaction_type {
        TransactionType::Income => {
            let to = request.to_id.ok_or_else(|| {
                AppError::InvalidRequest("INCOME requires toId".to_string())
            })?;
            Ok((None, Some(to)))
        }
        TransactionType::Expense => {
            let from = request.from_id.ok_or_else(|| {
                AppError::InvalidRequest("EXPENSE requires fromId".to_string())
            })?;
            Ok((Some(from), None))
        }
        TransactionType::Transfer => {
            let from = request.from_id.ok_or_else(|| {
                AppError::InvalidRequest("TRANSFER requires fromId".to_string())
            })?;
            let to = request.to_id.ok_or_else(|| {
                AppError::InvalidRequest("TRANSFER requires toId".to_string())
            })?;
            if from == to {
                return Err(AppError::InvalidRequest(
                    "Cannot transfer to the same account".to_string(),
                ));
            }
            Ok((Some(from), Some(to)))
        }
    }
}

/// Record a transaction and apply its balance movement.
///
/// # Process
///
/// 1. Validate amount and per-type account links
/// 2. Start database transaction
/// 3. Lock each linked account, scoped to the calling user and live rows
/// 4. Check the source balance for debiting types
/// 5. Apply the balance movement and insert the transaction row
/// 6. Commit
///
/// # Errors
///
/// - `InvalidRequest`: non-positive amount, missing links, or unknown category
/// - `ResourceNotFound`: a linked account is missing, deleted, or not the
///   caller's
/// - `InsufficientBalance`: source balance cannot cover the amount
/// - `Database`: database error occurred
pub async fn create(
    pool: &DbPool,
    user_id: Uuid,
    request: CreateTransactionRequest,
) -> Result<TransactionView, AppError> {
    if request.amount <= 0 {
        return Err(AppError::InvalidRequest(
            "Amount must be positive".to_string(),
        ));
    }

    let (from_id, to_id) = validate_links(&request)?;

    let category = match request.category_id {
        Some(category_id) => Some(
            sqlx::query_as::<_, (Uuid, String, String)>(
                "SELECT id, name, icon FROM categories WHERE id = $1",
            )
            .bind(category_id)
            .fetch_optional(pool)
            .await?
            .map(|(id, name, icon)| CategoryRef { id, name, icon })
            .ok_or_else(|| AppError::InvalidRequest("Unknown category".to_string()))?,
        ),
        None => None,
    };

    let mut tx = pool.begin().await?;

    if let Some(from) = from_id {
        let balance = lock_account(&mut tx, user_id, from).await?;
        if balance < request.amount {
            tx.rollback().await?;
            return Err(AppError::InsufficientBalance);
        }

        sqlx::query(
            "UPDATE accounts SET balance_cents = balance_cents - $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(request.amount)
        .bind(from)
        .execute(&mut *tx)
        .await?;
    }

    if let Some(to) = to_id {
        lock_account(&mut tx, user_id, to).await?;

        sqlx::query(
            "UPDATE accounts SET balance_cents = balance_cents + $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(request.amount)
        .bind(to)
        .execute(&mut *tx)
        .await?;
    }

    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (
            user_id, remark, description, amount_cents,
            transaction_type, from_id, to_id, category_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&request.remark)
    .bind(&request.description)
    .bind(request.amount)
    .bind(request.transaction_type.as_str())
    .bind(from_id)
    .bind(to_id)
    .bind(request.category_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(TransactionView::from_transaction(transaction, category))
}

/// Lock one of the caller's live accounts and return its balance.
///
/// `FOR UPDATE` holds the row until the surrounding transaction ends.
async fn lock_account(
    tx: &mut SqlxTransaction<'_, Postgres>,
    user_id: Uuid,
    account_id: Uuid,
) -> Result<i64, AppError> {
    sqlx::query_scalar(
        "SELECT balance_cents FROM accounts
         WHERE id = $1 AND user_id = $2 AND is_deleted = false
         FOR UPDATE",
    )
    .bind(account_id)
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(AppError::ResourceNotFound)
}

/// Fetch one page of the user's transactions, newest first, categories
/// resolved inline.
pub async fn list(
    pool: &DbPool,
    user_id: Uuid,
    pagination: Pagination,
) -> Result<TransactionPage, AppError> {
    let pagination = pagination.clamped();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query_as::<_, TransactionRow>(
        r#"
        SELECT t.id, t.remark, t.description, t.amount_cents, t.transaction_type,
               t.from_id, t.to_id, t.created_at,
               c.id AS category_id, c.name AS category_name, c.icon AS category_icon
        FROM transactions t
        LEFT JOIN categories c ON c.id = t.category_id
        WHERE t.user_id = $1
        ORDER BY t.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(pagination.limit)
    .bind(pagination.offset)
    .fetch_all(pool)
    .await?;

    Ok(TransactionPage {
        items: rows.into_iter().map(TransactionView::from).collect(),
        total,
        limit: pagination.limit,
        offset: pagination.offset,
    })
}
