use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

mod event;
mod profile;
mod service;
mod submission;
mod transaction;

pub use event::*;
pub use profile::*;
pub use service::*;
pub use submission::*;
pub use transaction::*;

pub use strum::IntoEnumIterator;

/// Opaque user identifier handed out by the identity provider.
pub type UserId = String;

pub type ActivityId = u64;
pub type ServiceId = u64;

/// Reward-earning task categories and their default token payout.
///
/// The amounts here are the advertised rewards for new tasks; every
/// submission snapshots its own `tokens` value at creation time, so editing
/// this table never changes an in-flight claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskKind {
    Attendance,
    Assignment,
    Certification,
    Quiz,
    Project,
}

impl TaskKind {
    pub const fn default_reward(&self) -> u32 {
        match self {
            Self::Attendance => 10,
            Self::Assignment => 25,
            Self::Quiz => 20,
            Self::Certification => 50,
            Self::Project => 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_task_kind_pays_something() {
        for kind in TaskKind::iter() {
            assert!(kind.default_reward() > 0);
        }
    }
}
