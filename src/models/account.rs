//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: database entity for a user-owned ledger account
//! - `CreateAccountRequest` / `UpdateAccountRequest`: request bodies
//! - `AccountSummary` / `AccountDetail`: response bodies
//!
//! Balances are stored as `i64` cents, never floats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::transaction::TransactionView;

/// Row of the `accounts` table.
///
/// Each account belongs to one user via `user_id`; every read path filters
/// by that column so one user can never see another's accounts. Deletion
/// sets `is_deleted` instead of removing the row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    pub name: String,

    /// Broad classification, e.g. "CASH" or "BANK"
    pub account_type: String,

    /// Narrow classification, unique per user among live accounts,
    /// e.g. "WALLET" or "SAVINGS"
    pub sub_type: String,

    /// Running balance in cents
    pub balance_cents: i64,

    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /v1/accounts`.
///
/// ```json
/// {
///   "name": "Daily wallet",
///   "type": "CASH",
///   "subType": "WALLET",
///   "balance": 125000
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub name: String,

    #[serde(rename = "type")]
    pub account_type: String,

    pub sub_type: String,

    /// Initial balance in cents; becomes the bootstrap transaction amount
    #[serde(default)]
    pub balance: i64,
}

/// Request body for `PATCH /v1/accounts/{id}`. Renames only.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: String,
}

/// Account as returned by the list and create endpoints.
///
/// The list view carries no transaction detail.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: Uuid,
    pub name: String,

    #[serde(rename = "type")]
    pub account_type: String,

    pub sub_type: String,

    /// Balance in cents
    pub balance: i64,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            account_type: account.account_type,
            sub_type: account.sub_type,
            balance: account.balance_cents,
        }
    }
}

/// Account as returned by the detail endpoint: the summary fields plus the
/// flattened inbound + outbound transaction history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    pub id: Uuid,
    pub name: String,

    #[serde(rename = "type")]
    pub account_type: String,

    pub sub_type: String,
    pub balance: i64,

    pub transactions: Vec<TransactionView>,
}

impl AccountDetail {
    pub fn from_account(account: Account, transactions: Vec<TransactionView>) -> Self {
        Self {
            id: account.id,
            name: account.name,
            account_type: account.account_type,
            sub_type: account.sub_type,
            balance: account.balance_cents,
            transactions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Daily wallet".to_string(),
            account_type: "CASH".to_string(),
            sub_type: "WALLET".to_string(),
            balance_cents: 125_000,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn create_request_wire_names() {
        let request: CreateAccountRequest = serde_json::from_str(
            r#"{"name": "Daily wallet", "type": "CASH", "subType": "WALLET", "balance": 125000}"#,
        )
        .unwrap();

        assert_eq!(request.account_type, "CASH");
        assert_eq!(request.sub_type, "WALLET");
        assert_eq!(request.balance, 125_000);
    }

    #[test]
    fn create_request_balance_defaults_to_zero() {
        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"name": "n", "type": "CASH", "subType": "WALLET"}"#).unwrap();

        assert_eq!(request.balance, 0);
    }

    #[test]
    fn summary_drops_internal_fields() {
        let value = serde_json::to_value(AccountSummary::from(account())).unwrap();

        assert_eq!(value["type"], "CASH");
        assert_eq!(value["subType"], "WALLET");
        assert_eq!(value["balance"], 125_000);
        assert!(value.get("userId").is_none());
        assert!(value.get("isDeleted").is_none());
    }
}
