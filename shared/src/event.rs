use serde::{Deserialize, Serialize};

use crate::{ActivityId, ServiceId, UserId};

/// Outcome of a successful workflow step, returned to the caller for
/// logging and user feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    SubmissionReceived {
        activity_id: ActivityId,
        student_id: UserId,
        tokens: u32,
    },
    SubmissionApproved {
        activity_id: ActivityId,
        student_id: UserId,
        tokens: u32,
    },
    SubmissionRejected {
        activity_id: ActivityId,
        student_id: UserId,
    },
    TokensRedeemed {
        activity_id: ActivityId,
        student_id: UserId,
        amount: u32,
        new_balance: u32,
    },
    TokensSpent {
        user_id: UserId,
        service_id: ServiceId,
        amount: u32,
        new_balance: u32,
    },
}
