use chrono::Utc;
use shared::{ActivityId, Submission, SubmissionDraft, SubmissionStatus};

/// Tracks the lifecycle of every student claim.
///
/// Records live in insertion order. The legal transitions are:
///
/// ```text
/// not_submitted --submit--> pending --approve--> approved --redeem--> redeemed
///                              |
///                              +-----reject----> rejected --submit--> pending
/// ```
///
/// Every mutating operation is a total function: an illegal transition
/// returns `false` and leaves the store untouched, it never panics.
#[derive(Debug, Default)]
pub struct ActivitySubmissionsStore {
    submissions: Vec<Submission>,
}

impl ActivitySubmissionsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new claim with status `Pending`.
    ///
    /// Returns `false` without touching the store when a pending, approved
    /// or redeemed record already exists for the pair, so a double submit
    /// is a no-op. A rejected record is replaced in place, which is what
    /// makes rejection recoverable.
    pub fn submit_activity(&mut self, draft: SubmissionDraft) -> bool {
        match self.find_index(draft.activity_id, &draft.student_id) {
            Some(index) => {
                if !self.submissions[index].status.is_resubmittable() {
                    return false;
                }
                self.submissions[index] = Submission::new(draft, Utc::now());
                true
            }
            None => {
                self.submissions.push(Submission::new(draft, Utc::now()));
                true
            }
        }
    }

    pub fn all_submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn pending_submissions(&self) -> Vec<&Submission> {
        self.submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Pending)
            .collect()
    }

    /// Absence of a record reads as `NotSubmitted`.
    pub fn activity_status(&self, activity_id: ActivityId, student_id: &str) -> SubmissionStatus {
        self.get(activity_id, student_id)
            .map(|s| s.status)
            .unwrap_or_default()
    }

    pub fn get(&self, activity_id: ActivityId, student_id: &str) -> Option<&Submission> {
        self.find_index(activity_id, student_id)
            .map(|index| &self.submissions[index])
    }

    /// `Pending` -> `Approved`. Approval authorizes the reward; it does not
    /// credit anything. Crediting happens in the separate, student-initiated
    /// redeem step.
    pub fn approve_submission(&mut self, activity_id: ActivityId, student_id: &str) -> bool {
        self.transition(
            activity_id,
            student_id,
            SubmissionStatus::Pending,
            SubmissionStatus::Approved,
        )
    }

    /// `Pending` -> `Rejected`. The pair becomes resubmittable again.
    pub fn reject_submission(&mut self, activity_id: ActivityId, student_id: &str) -> bool {
        self.transition(
            activity_id,
            student_id,
            SubmissionStatus::Pending,
            SubmissionStatus::Rejected,
        )
    }

    /// `Approved` -> `Redeemed`. Terminal: nothing moves a redeemed record
    /// back.
    pub fn redeem_activity(&mut self, activity_id: ActivityId, student_id: &str) -> bool {
        self.transition(
            activity_id,
            student_id,
            SubmissionStatus::Approved,
            SubmissionStatus::Redeemed,
        )
    }

    fn transition(
        &mut self,
        activity_id: ActivityId,
        student_id: &str,
        from: SubmissionStatus,
        to: SubmissionStatus,
    ) -> bool {
        match self.find_index(activity_id, student_id) {
            Some(index) if self.submissions[index].status == from => {
                self.submissions[index].status = to;
                true
            }
            _ => false,
        }
    }

    fn find_index(&self, activity_id: ActivityId, student_id: &str) -> Option<usize> {
        self.submissions
            .iter()
            .position(|s| s.key() == (activity_id, student_id))
    }
}
