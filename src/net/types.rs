//! Wire types for the LedgerX REST API.
//!
//! DESIGN
//! ======
//! Response types accept the extra fields the backend sends (and ignore any
//! others) so a backend DTO change does not break decoding of the fields the
//! UI actually renders.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Currency used when the user does not pick one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Body of `POST /auth/register` and `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful auth response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// A ledger account as listed by `GET /v1/accounts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_minor: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Body of `POST /v1/accounts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub name: String,
    pub currency: String,
}

/// Body of `POST /v1/transactions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub user_id: i64,
    pub account_id: i64,
    /// Signed minor units: positive is inflow, negative is outflow.
    pub amount_minor: i64,
    pub currency: String,
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A transaction as echoed back by the backend after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub user_id: i64,
    pub account_id: i64,
    pub amount_minor: i64,
    pub currency: String,
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Per-account monthly totals in minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub inflow: i64,
    pub outflow: i64,
    pub net: i64,
}

impl MonthlySummary {
    /// Whether `net == inflow - outflow`, which every conformant backend
    /// response satisfies.
    pub fn is_balanced(&self) -> bool {
        self.inflow.checked_sub(self.outflow) == Some(self.net)
    }
}

/// Current balance from `GET /v1/accounts/{id}/balance`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account_id: i64,
    pub as_of: String,
    pub balance_minor: i64,
}

/// A CSV export job. `status` is a backend-owned label and is never matched
/// against a fixed set of values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportJob {
    pub id: i64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl ExportJob {
    /// A job is downloadable once the backend reports where the file lives.
    pub fn is_downloadable(&self) -> bool {
        self.file_path.as_deref().is_some_and(|path| !path.is_empty())
    }
}
