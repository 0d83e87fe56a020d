use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{ActivityId, UserId};

/// Lifecycle of a student's claim to have completed an activity.
///
/// `NotSubmitted` is derived, never stored: the absence of a record for an
/// `(activity, student)` pair means the student has not submitted yet. A
/// rejected claim is the only failure state a student can recover from by
/// submitting again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
    Redeemed,
}

impl SubmissionStatus {
    /// A fresh submission is accepted only when there is nothing in flight
    /// for the pair.
    pub const fn is_resubmittable(&self) -> bool {
        matches!(self, Self::NotSubmitted | Self::Rejected)
    }
}

/// Shape of the evidence a student attaches to a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProofKind {
    File,
    Text,
    Link,
    Percentage,
}

/// Caller-supplied fields of a new submission. The store fills in the
/// status and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub activity_id: ActivityId,
    pub activity_title: String,
    pub student_id: UserId,
    pub student_name: String,
    pub student_email: String,
    pub proof_kind: ProofKind,
    pub proof_value: String,
    pub tokens: u32,
}

/// A stored claim, keyed by `(activity_id, student_id)`.
///
/// `activity_title` and `tokens` are snapshotted when the student submits;
/// later edits to the task catalog never change what a pending claim is
/// worth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub activity_id: ActivityId,
    pub activity_title: String,
    pub student_id: UserId,
    pub student_name: String,
    pub student_email: String,
    pub proof_kind: ProofKind,
    pub proof_value: String,
    pub tokens: u32,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(draft: SubmissionDraft, submitted_at: DateTime<Utc>) -> Self {
        Self {
            activity_id: draft.activity_id,
            activity_title: draft.activity_title,
            student_id: draft.student_id,
            student_name: draft.student_name,
            student_email: draft.student_email,
            proof_kind: draft.proof_kind,
            proof_value: draft.proof_value,
            tokens: draft.tokens,
            status: SubmissionStatus::Pending,
            submitted_at,
        }
    }

    pub fn key(&self) -> (ActivityId, &str) {
        (self.activity_id, self.student_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_absent_and_rejected_are_resubmittable() {
        assert!(SubmissionStatus::NotSubmitted.is_resubmittable());
        assert!(SubmissionStatus::Rejected.is_resubmittable());
        assert!(!SubmissionStatus::Pending.is_resubmittable());
        assert!(!SubmissionStatus::Approved.is_resubmittable());
        assert!(!SubmissionStatus::Redeemed.is_resubmittable());
    }

    #[test]
    fn status_strings_match_wire_format() {
        assert_eq!(SubmissionStatus::NotSubmitted.to_string(), "not_submitted");
        assert_eq!(SubmissionStatus::Pending.to_string(), "pending");
        assert_eq!(
            "redeemed".parse::<SubmissionStatus>().unwrap(),
            SubmissionStatus::Redeemed
        );
    }
}
