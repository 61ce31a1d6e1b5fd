//! Account service - create/read/rename/soft-delete of ledger accounts.
//!
//! Every operation is scoped to the calling user, and soft-deleted rows are
//! invisible to all of them. Creating an account also records its bootstrap
//! INCOME transaction; both inserts commit in one database transaction.

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        account::{Account, CreateAccountRequest},
        transaction::{TransactionRow, TransactionView},
    },
};
use uuid::Uuid;

/// Remark and description stamped on the balance-establishing transaction.
const BOOTSTRAP_REMARK: &str = "account create transaction";

/// Create an account and its bootstrap transaction.
///
/// # Process
///
/// 1. Reject when a live account with the same `(user, sub_type)` exists
/// 2. Start database transaction
/// 3. Insert the account row
/// 4. Insert the INCOME transaction carrying the initial balance
/// 5. Commit
///
/// A partial unique index on `(user_id, sub_type) WHERE NOT is_deleted`
/// backs the duplicate check at the store.
///
/// # Errors
///
/// - `InvalidRequest`: initial balance is negative
/// - `ResourceAlreadyExists`: duplicate live `(user, sub_type)` account
/// - `Database`: database error occurred
pub async fn create(
    pool: &DbPool,
    user_id: Uuid,
    request: CreateAccountRequest,
) -> Result<Account, AppError> {
    if request.balance < 0 {
        return Err(AppError::InvalidRequest(
            "Initial balance cannot be negative".to_string(),
        ));
    }

    let existing: Option<Uuid> = sqlx::query_scalar(
        "SELECT id FROM accounts WHERE user_id = $1 AND sub_type = $2 AND is_deleted = false",
    )
    .bind(user_id)
    .bind(&request.sub_type)
    .fetch_optional(pool)
    .await?;

    if existing.is_some() {
        return Err(AppError::ResourceAlreadyExists);
    }

    let mut tx = pool.begin().await?;

    let account = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (user_id, name, account_type, sub_type, balance_cents)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&request.name)
    .bind(&request.account_type)
    .bind(&request.sub_type)
    .bind(request.balance)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO transactions (user_id, remark, description, amount_cents, transaction_type, to_id)
        VALUES ($1, $2, $2, $3, 'INCOME', $4)
        "#,
    )
    .bind(user_id)
    .bind(BOOTSTRAP_REMARK)
    .bind(request.balance)
    .bind(account.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(account)
}

/// List the user's live accounts, newest first.
///
/// The list view carries summaries only; transaction history is served by
/// [`get_detail`].
pub async fn list(pool: &DbPool, user_id: Uuid) -> Result<Vec<Account>, AppError> {
    let accounts = sqlx::query_as::<_, Account>(
        r#"
        SELECT *
        FROM accounts
        WHERE user_id = $1 AND is_deleted = false
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(accounts)
}

/// Fetch one live account with its full transaction history.
///
/// Outbound (`from_id`) and inbound (`to_id`) transactions are loaded with
/// their categories resolved, then flattened into a single sequence.
///
/// # Errors
///
/// - `ResourceNotFound`: no live account with this id belongs to the user
pub async fn get_detail(
    pool: &DbPool,
    user_id: Uuid,
    account_id: Uuid,
) -> Result<(Account, Vec<TransactionView>), AppError> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT * FROM accounts WHERE id = $1 AND user_id = $2 AND is_deleted = false",
    )
    .bind(account_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::ResourceNotFound)?;

    let outbound = fetch_linked(pool, OUTBOUND_SQL, account_id).await?;
    let inbound = fetch_linked(pool, INBOUND_SQL, account_id).await?;

    Ok((account, flatten_history(outbound, inbound)))
}

/// Transactions leaving an account, categories joined in.
const OUTBOUND_SQL: &str = r#"
    SELECT t.id, t.remark, t.description, t.amount_cents, t.transaction_type,
           t.from_id, t.to_id, t.created_at,
           c.id AS category_id, c.name AS category_name, c.icon AS category_icon
    FROM transactions t
    LEFT JOIN categories c ON c.id = t.category_id
    WHERE t.from_id = $1
    ORDER BY t.created_at DESC
"#;

/// Transactions arriving at an account, categories joined in.
const INBOUND_SQL: &str = r#"
    SELECT t.id, t.remark, t.description, t.amount_cents, t.transaction_type,
           t.from_id, t.to_id, t.created_at,
           c.id AS category_id, c.name AS category_name, c.icon AS category_icon
    FROM transactions t
    LEFT JOIN categories c ON c.id = t.category_id
    WHERE t.to_id = $1
    ORDER BY t.created_at DESC
"#;

async fn fetch_linked(
    pool: &DbPool,
    query: &str,
    account_id: Uuid,
) -> Result<Vec<TransactionRow>, AppError> {
    let rows = sqlx::query_as::<_, TransactionRow>(query)
        .bind(account_id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Merge the two relation roles into one response sequence.
///
/// Outbound entries come first; the sequence is not re-sorted.
fn flatten_history(
    outbound: Vec<TransactionRow>,
    inbound: Vec<TransactionRow>,
) -> Vec<TransactionView> {
    outbound
        .into_iter()
        .chain(inbound)
        .map(TransactionView::from)
        .collect()
}

/// Rename a live account. Touches `name` and nothing else.
///
/// # Errors
///
/// - `ResourceNotFound`: no live account with this id belongs to the user
pub async fn rename(
    pool: &DbPool,
    user_id: Uuid,
    account_id: Uuid,
    name: &str,
) -> Result<(), AppError> {
    let updated = sqlx::query(
        r#"
        UPDATE accounts
        SET name = $1, updated_at = NOW()
        WHERE id = $2 AND user_id = $3 AND is_deleted = false
        "#,
    )
    .bind(name)
    .bind(account_id)
    .bind(user_id)
    .execute(pool)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(AppError::ResourceNotFound);
    }

    Ok(())
}

/// Soft-delete an account. The row stays in the table with `is_deleted`
/// set, which frees its `(user, sub_type)` slot for future creates.
///
/// # Errors
///
/// - `ResourceNotFound`: no live account with this id belongs to the user
pub async fn soft_delete(pool: &DbPool, user_id: Uuid, account_id: Uuid) -> Result<(), AppError> {
    let updated = sqlx::query(
        r#"
        UPDATE accounts
        SET is_deleted = true, updated_at = NOW()
        WHERE id = $1 AND user_id = $2 AND is_deleted = false
        "#,
    )
    .bind(account_id)
    .bind(user_id)
    .execute(pool)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(AppError::ResourceNotFound);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(remark: &str, category: bool) -> TransactionRow {
        TransactionRow {
            id: Uuid::new_v4(),
            remark: remark.to_string(),
            description: String::new(),
            amount_cents: 1000,
            transaction_type: "INCOME".to_string(),
            from_id: None,
            to_id: Some(Uuid::new_v4()),
            created_at: Utc::now(),
            category_id: category.then(Uuid::new_v4),
            category_name: category.then(|| "Salary".to_string()),
            category_icon: category.then(|| "briefcase".to_string()),
        }
    }

    #[test]
    fn flatten_keeps_every_entry_from_both_roles() {
        let outbound = vec![row("out-1", false), row("out-2", true)];
        let inbound = vec![row("in-1", false), row("in-2", false), row("in-3", true)];

        let history = flatten_history(outbound, inbound);

        assert_eq!(history.len(), 5);
        // Outbound entries precede inbound ones
        assert_eq!(history[0].remark, "out-1");
        assert_eq!(history[2].remark, "in-1");
    }

    #[test]
    fn flatten_resolves_categories_per_entry() {
        let history = flatten_history(vec![row("a", true)], vec![row("b", false)]);

        assert_eq!(history[0].category.as_ref().unwrap().name, "Salary");
        assert!(history[1].category.is_none());
    }

    #[test]
    fn flatten_of_empty_roles_is_empty() {
        assert!(flatten_history(vec![], vec![]).is_empty());
    }
}
