use std::collections::HashSet;

use shared::{
    ActivityId, Event, ServiceId, SubmissionDraft, SubmissionStatus, TransactionDraft,
    TransactionKind, TransactionStatus, UserId,
};
use thiserror::Error;

use crate::{ActivitySubmissionsStore, AdminDataStore, SubmissionKey, UserDataStore};

/// Account name used as the counterparty on reward ledger entries.
const TREASURY: &str = "learn2earn";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("operation not allowed from status '{0}'")]
    IllegalTransition(SubmissionStatus),
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u32, available: u32 },
    #[error("unknown user '{0}'")]
    UnknownUser(UserId),
    #[error("unknown service {0}")]
    UnknownService(ServiceId),
    #[error("another operation for this submission is still in flight")]
    InFlight,
}

/// Counters for the admin dashboard, folded from the three stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowSummary {
    pub total_submissions: u64,
    pub pending_submissions: u64,
    pub approved_submissions: u64,
    pub rejected_submissions: u64,
    pub redeemed_submissions: u64,
    pub tokens_issued: u64,
    pub tokens_spent: u64,
    pub services: u64,
    pub enrollments: u64,
    pub users: u64,
}

/// The composed submission workflow.
///
/// Owns the three stores and sequences the multi-store steps: approval
/// appends a ledger entry, redemption credits the student's balance.
///
/// Approval only authorizes the reward; the student must redeem explicitly
/// before the balance moves. An admin action alone never mutates a balance.
#[derive(Debug, Default)]
pub struct Workflow {
    submissions: ActivitySubmissionsStore,
    admin: AdminDataStore,
    users: UserDataStore,
    in_flight: HashSet<SubmissionKey>,
}

impl Workflow {
    pub fn new(
        submissions: ActivitySubmissionsStore,
        admin: AdminDataStore,
        users: UserDataStore,
    ) -> Self {
        Self {
            submissions,
            admin,
            users,
            in_flight: HashSet::new(),
        }
    }

    pub fn submissions(&self) -> &ActivitySubmissionsStore {
        &self.submissions
    }

    pub fn admin(&self) -> &AdminDataStore {
        &self.admin
    }

    pub fn admin_mut(&mut self) -> &mut AdminDataStore {
        &mut self.admin
    }

    pub fn users(&self) -> &UserDataStore {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut UserDataStore {
        &mut self.users
    }

    /// Marks a submission key as having a mutation in progress. Callers
    /// that run the actual mutation after an await point use this to
    /// refuse a duplicate trigger (a double click, a retried request)
    /// until `finish_action` releases the key.
    pub fn begin_action(&mut self, key: SubmissionKey) -> Result<(), WorkflowError> {
        if self.in_flight.insert(key) {
            Ok(())
        } else {
            Err(WorkflowError::InFlight)
        }
    }

    pub fn finish_action(&mut self, key: &SubmissionKey) {
        self.in_flight.remove(key);
    }

    /// Folds the current store contents into dashboard counters.
    pub fn summary(&self) -> WorkflowSummary {
        let mut summary = WorkflowSummary {
            users: self.users.all_profiles().len() as u64,
            services: self.admin.services().len() as u64,
            enrollments: self
                .admin
                .services()
                .iter()
                .map(|s| s.enrollments as u64)
                .sum(),
            ..Default::default()
        };

        for submission in self.submissions.all_submissions() {
            summary.total_submissions += 1;
            match submission.status {
                SubmissionStatus::Pending => summary.pending_submissions += 1,
                SubmissionStatus::Approved => summary.approved_submissions += 1,
                SubmissionStatus::Rejected => summary.rejected_submissions += 1,
                SubmissionStatus::Redeemed => summary.redeemed_submissions += 1,
                SubmissionStatus::NotSubmitted => {}
            }
        }

        for tx in self.admin.transactions() {
            match tx.kind {
                TransactionKind::Reward => summary.tokens_issued += tx.amount as u64,
                TransactionKind::Spend => summary.tokens_spent += tx.amount as u64,
                TransactionKind::Transfer => {}
            }
        }

        summary
    }

    /// Records a student's claim of completed work.
    pub fn submit(&mut self, draft: SubmissionDraft) -> Result<Event, WorkflowError> {
        if draft.proof_value.trim().is_empty() {
            return Err(WorkflowError::Validation("proof must not be empty".into()));
        }
        if draft.tokens == 0 {
            return Err(WorkflowError::Validation(
                "token reward must be positive".into(),
            ));
        }
        if self.users.profile(&draft.student_id).is_none() {
            return Err(WorkflowError::UnknownUser(draft.student_id));
        }

        let (activity_id, student_id, tokens) =
            (draft.activity_id, draft.student_id.clone(), draft.tokens);
        if !self.submissions.submit_activity(draft) {
            let status = self.submissions.activity_status(activity_id, &student_id);
            return Err(WorkflowError::IllegalTransition(status));
        }

        Ok(Event::SubmissionReceived {
            activity_id,
            student_id,
            tokens,
        })
    }

    /// Admin approval. Flips the claim to `Approved` and appends a reward
    /// entry to the ledger. The two writes are not atomic.
    pub fn approve(
        &mut self,
        activity_id: ActivityId,
        student_id: &str,
    ) -> Result<Event, WorkflowError> {
        let Some(submission) = self.submissions.get(activity_id, student_id) else {
            return Err(WorkflowError::IllegalTransition(
                SubmissionStatus::NotSubmitted,
            ));
        };
        let (tokens, title) = (submission.tokens, submission.activity_title.clone());

        if !self.submissions.approve_submission(activity_id, student_id) {
            let status = self.submissions.activity_status(activity_id, student_id);
            return Err(WorkflowError::IllegalTransition(status));
        }

        self.admin.add_transaction(TransactionDraft {
            kind: TransactionKind::Reward,
            from: TREASURY.to_owned(),
            to: student_id.to_owned(),
            amount: tokens,
            status: TransactionStatus::Completed,
            description: format!("Reward approved for '{title}'"),
        });

        Ok(Event::SubmissionApproved {
            activity_id,
            student_id: student_id.to_owned(),
            tokens,
        })
    }

    /// Admin rejection. The pair becomes resubmittable again.
    pub fn reject(
        &mut self,
        activity_id: ActivityId,
        student_id: &str,
    ) -> Result<Event, WorkflowError> {
        if !self.submissions.reject_submission(activity_id, student_id) {
            let status = self.submissions.activity_status(activity_id, student_id);
            return Err(WorkflowError::IllegalTransition(status));
        }

        Ok(Event::SubmissionRejected {
            activity_id,
            student_id: student_id.to_owned(),
        })
    }

    /// Student-initiated redemption of an approved claim. Credits the
    /// snapshotted token amount; a credit is never blocked by the current
    /// balance.
    pub fn redeem(
        &mut self,
        activity_id: ActivityId,
        student_id: &str,
    ) -> Result<Event, WorkflowError> {
        if self.users.profile(student_id).is_none() {
            return Err(WorkflowError::UnknownUser(student_id.to_owned()));
        }
        let Some(submission) = self.submissions.get(activity_id, student_id) else {
            return Err(WorkflowError::IllegalTransition(
                SubmissionStatus::NotSubmitted,
            ));
        };
        let amount = submission.tokens;

        if !self.submissions.redeem_activity(activity_id, student_id) {
            let status = self.submissions.activity_status(activity_id, student_id);
            return Err(WorkflowError::IllegalTransition(status));
        }

        self.users.add_tokens(student_id, amount);
        let new_balance = self
            .users
            .profile(student_id)
            .map(|p| p.tokens)
            .unwrap_or_default();

        Ok(Event::TokensRedeemed {
            activity_id,
            student_id: student_id.to_owned(),
            amount,
            new_balance,
        })
    }

    /// Spends tokens on a catalog service: debits the balance, bumps the
    /// service's enrollment counter and appends a spend entry to the
    /// ledger.
    pub fn spend(&mut self, user_id: &str, service_id: ServiceId) -> Result<Event, WorkflowError> {
        let Some(service) = self.admin.service(service_id) else {
            return Err(WorkflowError::UnknownService(service_id));
        };
        if !service.active {
            return Err(WorkflowError::Validation(format!(
                "service '{}' is not active",
                service.name
            )));
        }
        let (cost, name, wallet) = (
            service.token_cost,
            service.name.clone(),
            service.wallet_address.clone(),
        );

        let Some(profile) = self.users.profile(user_id) else {
            return Err(WorkflowError::UnknownUser(user_id.to_owned()));
        };
        if profile.tokens < cost {
            return Err(WorkflowError::InsufficientBalance {
                needed: cost,
                available: profile.tokens,
            });
        }

        self.users.spend_tokens(user_id, cost);
        self.admin.record_enrollment(service_id);
        self.admin.add_transaction(TransactionDraft {
            kind: TransactionKind::Spend,
            from: user_id.to_owned(),
            to: wallet,
            amount: cost,
            status: TransactionStatus::Completed,
            description: format!("Enrolled in '{name}'"),
        });

        let new_balance = self
            .users
            .profile(user_id)
            .map(|p| p.tokens)
            .unwrap_or_default();

        Ok(Event::TokensSpent {
            user_id: user_id.to_owned(),
            service_id,
            amount: cost,
            new_balance,
        })
    }
}
