use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// A student's profile and token balance.
///
/// The balance is unsigned; every debit path checks the amount against the
/// current balance before mutating, so the balance can never go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub tokens: u32,
    pub courses_completed: u32,
    pub joined_at: DateTime<Utc>,
    pub wallet_address: String,
}

impl UserProfile {
    pub fn new(id: UserId, name: String, email: String, wallet_address: String) -> Self {
        Self {
            id,
            name,
            email,
            tokens: 0,
            courses_completed: 0,
            joined_at: Utc::now(),
            wallet_address,
        }
    }
}
