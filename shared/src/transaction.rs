use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionKind {
    Reward,
    Spend,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

/// One entry in the append-only token ledger.
///
/// The ledger records that tokens moved; it does not validate balances.
/// Balance checks live with the user store, which is the authority for
/// how many tokens a user actually holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub kind: TransactionKind,
    pub from: String,
    pub to: String,
    pub amount: u32,
    pub status: TransactionStatus,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields of a ledger entry; the store assigns the id and
/// timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub from: String,
    pub to: String,
    pub amount: u32,
    pub status: TransactionStatus,
    pub description: String,
}
