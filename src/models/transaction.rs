//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `TransactionType`: the INCOME / EXPENSE / TRANSFER enumeration
//! - `Transaction`: database entity for a recorded movement of value
//! - `CreateTransactionRequest`: request body
//! - `TransactionView` / `TransactionPage`: response bodies
//!
//! Amounts are stored as `i64` cents, never floats. Transaction rows are
//! append-only; nothing in the API mutates or deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::category::CategoryRef;

/// Kind of value movement a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Credits the destination account
    Income,
    /// Debits the source account
    Expense,
    /// Debits the source and credits the destination
    Transfer,
}

impl TransactionType {
    /// Wire and database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
            TransactionType::Transfer => "TRANSFER",
        }
    }
}

/// Row of the `transactions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,

    /// User who recorded this transaction
    pub user_id: Uuid,

    pub remark: String,
    pub description: String,

    /// Amount in cents, never negative; direction comes from the type.
    /// Zero only appears on the bootstrap row of a zero-balance account.
    pub amount_cents: i64,

    pub transaction_type: String,

    /// Source account, NULL for INCOME
    pub from_id: Option<Uuid>,

    /// Destination account, NULL for EXPENSE
    pub to_id: Option<Uuid>,

    pub category_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /v1/transactions`.
///
/// ```json
/// {
///   "remark": "Week 31 groceries",
///   "description": "Saturday market run",
///   "amount": 4250,
///   "type": "EXPENSE",
///   "fromId": "550e8400-e29b-41d4-a716-446655440000",
///   "categoryId": "660e8400-e29b-41d4-a716-446655440001"
/// }
/// ```
///
/// Which account links are required depends on `type`: INCOME needs `toId`,
/// EXPENSE needs `fromId`, TRANSFER needs both.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[serde(default)]
    pub remark: String,

    #[serde(default)]
    pub description: String,

    /// Amount in cents
    pub amount: i64,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    pub from_id: Option<Uuid>,
    pub to_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

/// Transaction as returned to clients, with the category link resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: Uuid,
    pub remark: String,
    pub description: String,

    /// Amount in cents
    pub amount: i64,

    #[serde(rename = "type")]
    pub transaction_type: String,

    pub from_id: Option<Uuid>,
    pub to_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,

    /// `{id, name, icon}` or null when the transaction has no category
    pub category: Option<CategoryRef>,
}

impl TransactionView {
    /// Build a view from a freshly inserted entity and its already-resolved
    /// category.
    pub fn from_transaction(transaction: Transaction, category: Option<CategoryRef>) -> Self {
        Self {
            id: transaction.id,
            remark: transaction.remark,
            description: transaction.description,
            amount: transaction.amount_cents,
            transaction_type: transaction.transaction_type,
            from_id: transaction.from_id,
            to_id: transaction.to_id,
            created_at: transaction.created_at,
            category,
        }
    }
}

/// Flat row produced by LEFT-JOINing transactions to categories.
#[derive(Debug, sqlx::FromRow)]
pub struct TransactionRow {
    pub id: Uuid,
    pub remark: String,
    pub description: String,
    pub amount_cents: i64,
    pub transaction_type: String,
    pub from_id: Option<Uuid>,
    pub to_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,

    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
}

impl From<TransactionRow> for TransactionView {
    fn from(row: TransactionRow) -> Self {
        let category = match (row.category_id, row.category_name, row.category_icon) {
            (Some(id), Some(name), Some(icon)) => Some(CategoryRef { id, name, icon }),
            _ => None,
        };

        Self {
            id: row.id,
            remark: row.remark,
            description: row.description,
            amount: row.amount_cents,
            transaction_type: row.transaction_type,
            from_id: row.from_id,
            to_id: row.to_id,
            created_at: row.created_at,
            category,
        }
    }
}

/// Query parameters for `GET /v1/transactions`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Pagination {
    /// Largest page a single request may fetch.
    pub const MAX_LIMIT: i64 = 100;

    /// Force the parameters into usable ranges: limit in [1, MAX_LIMIT],
    /// offset non-negative.
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, Self::MAX_LIMIT),
            offset: self.offset.max(0),
        }
    }
}

/// One page of a user's transactions.
#[derive(Debug, Serialize)]
pub struct TransactionPage {
    pub items: Vec<TransactionView>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_wire_values() {
        assert_eq!(
            serde_json::to_value(TransactionType::Income).unwrap(),
            "INCOME"
        );
        let parsed: TransactionType = serde_json::from_str(r#""TRANSFER""#).unwrap();
        assert_eq!(parsed, TransactionType::Transfer);
        assert_eq!(TransactionType::Expense.as_str(), "EXPENSE");
    }

    #[test]
    fn create_request_defaults() {
        let request: CreateTransactionRequest =
            serde_json::from_str(r#"{"amount": 4250, "type": "EXPENSE"}"#).unwrap();

        assert_eq!(request.remark, "");
        assert_eq!(request.description, "");
        assert_eq!(request.transaction_type, TransactionType::Expense);
        assert!(request.from_id.is_none());
        assert!(request.category_id.is_none());
    }

    #[test]
    fn pagination_defaults() {
        let pagination: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn pagination_clamps_out_of_range_values() {
        let pagination = Pagination {
            limit: 5000,
            offset: -3,
        }
        .clamped();
        assert_eq!(pagination.limit, Pagination::MAX_LIMIT);
        assert_eq!(pagination.offset, 0);

        let pagination = Pagination {
            limit: 0,
            offset: 10,
        }
        .clamped();
        assert_eq!(pagination.limit, 1);
        assert_eq!(pagination.offset, 10);
    }

    fn row(category: bool) -> TransactionRow {
        TransactionRow {
            id: Uuid::new_v4(),
            remark: "Week 31 groceries".to_string(),
            description: String::new(),
            amount_cents: 4250,
            transaction_type: "EXPENSE".to_string(),
            from_id: Some(Uuid::new_v4()),
            to_id: None,
            created_at: Utc::now(),
            category_id: category.then(Uuid::new_v4),
            category_name: category.then(|| "Groceries".to_string()),
            category_icon: category.then(|| "cart".to_string()),
        }
    }

    #[test]
    fn view_resolves_category() {
        let view = TransactionView::from(row(true));
        let category = view.category.expect("category should resolve");
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.icon, "cart");
    }

    #[test]
    fn view_without_category_serializes_null() {
        let view = TransactionView::from(row(false));
        assert!(view.category.is_none());

        let value = serde_json::to_value(&view).unwrap();
        assert!(value["category"].is_null());
        assert_eq!(value["type"], "EXPENSE");
        assert_eq!(value["amount"], 4250);
    }
}
