use shared::{
    Event, ProofKind, ServiceDraft, ServiceKind, ServicePatch, SubmissionDraft, SubmissionStatus,
    TransactionKind, UserProfile,
};

use super::*;

pub fn student(id: u8) -> String {
    format!("student-{id}")
}

pub struct WorkflowExt {
    pub workflow: Workflow,
}

impl WorkflowExt {
    pub fn new() -> Self {
        let mut workflow = Workflow::new(
            ActivitySubmissionsStore::new(),
            AdminDataStore::new(),
            UserDataStore::new(),
        );
        for id in 0..3u8 {
            workflow.users_mut().upsert_profile(UserProfile::new(
                student(id),
                format!("Student {id}"),
                format!("student-{id}@example.com"),
                format!("0x{id:040}"),
            ));
        }
        Self { workflow }
    }

    pub fn draft(&self, activity_id: u64, id: u8, tokens: u32) -> SubmissionDraft {
        SubmissionDraft {
            activity_id,
            activity_title: format!("Activity {activity_id}"),
            student_id: student(id),
            student_name: format!("Student {id}"),
            student_email: format!("student-{id}@example.com"),
            proof_kind: ProofKind::Percentage,
            proof_value: "95".to_owned(),
            tokens,
        }
    }

    pub fn submit(&mut self, activity_id: u64, id: u8, tokens: u32) -> Result<Event, WorkflowError> {
        let draft = self.draft(activity_id, id, tokens);
        self.workflow.submit(draft)
    }

    pub fn status(&self, activity_id: u64, id: u8) -> SubmissionStatus {
        self.workflow
            .submissions()
            .activity_status(activity_id, &student(id))
    }

    pub fn balance(&self, id: u8) -> u32 {
        self.workflow
            .users()
            .profile(&student(id))
            .map(|p| p.tokens)
            .unwrap_or_default()
    }

    pub fn add_service(&mut self, token_cost: u32, active: bool) -> u64 {
        self.workflow
            .admin_mut()
            .add_service(ServiceDraft {
                name: "Rust Workshop".to_owned(),
                kind: ServiceKind::Workshop,
                token_cost,
                wallet_address: "0xservice".to_owned(),
                description: "Hands-on workshop".to_owned(),
                active,
            })
            .id
    }
}

#[test]
fn submit_creates_single_pending_record() {
    let mut ext = WorkflowExt::new();

    assert!(ext.submit(1, 0, 50).is_ok());
    assert_eq!(ext.status(1, 0), SubmissionStatus::Pending);
    assert_eq!(ext.workflow.submissions().all_submissions().len(), 1);
}

#[test]
fn double_submit_is_refused_and_leaves_record_unchanged() {
    let mut ext = WorkflowExt::new();

    ext.submit(1, 0, 50).unwrap();
    let before = ext.workflow.submissions().get(1, &student(0)).cloned();

    let result = ext.submit(1, 0, 75);
    assert_eq!(
        result,
        Err(WorkflowError::IllegalTransition(SubmissionStatus::Pending))
    );
    assert_eq!(
        ext.workflow.submissions().get(1, &student(0)),
        before.as_ref()
    );
    assert_eq!(ext.workflow.submissions().all_submissions().len(), 1);
}

#[test]
fn same_activity_different_students_are_independent_records() {
    let mut ext = WorkflowExt::new();

    ext.submit(1, 0, 50).unwrap();
    ext.submit(1, 1, 50).unwrap();

    assert_eq!(ext.workflow.submissions().all_submissions().len(), 2);
    assert_eq!(ext.workflow.submissions().pending_submissions().len(), 2);
}

#[test]
fn approve_requires_pending() {
    let mut ext = WorkflowExt::new();

    // Absent record.
    assert_eq!(
        ext.workflow.approve(1, &student(0)),
        Err(WorkflowError::IllegalTransition(
            SubmissionStatus::NotSubmitted
        ))
    );

    ext.submit(1, 0, 50).unwrap();
    assert!(ext.workflow.approve(1, &student(0)).is_ok());
    assert_eq!(ext.status(1, 0), SubmissionStatus::Approved);

    // Second approval must not mutate anything.
    let ledger_len = ext.workflow.admin().transactions().len();
    assert_eq!(
        ext.workflow.approve(1, &student(0)),
        Err(WorkflowError::IllegalTransition(SubmissionStatus::Approved))
    );
    assert_eq!(ext.workflow.admin().transactions().len(), ledger_len);
}

#[test]
fn approval_appends_reward_ledger_entry() {
    let mut ext = WorkflowExt::new();

    ext.submit(1, 0, 50).unwrap();
    ext.workflow.approve(1, &student(0)).unwrap();

    let ledger = ext.workflow.admin().transactions();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].kind, TransactionKind::Reward);
    assert_eq!(ledger[0].to, student(0));
    assert_eq!(ledger[0].amount, 50);

    // Approval alone never touches the balance.
    assert_eq!(ext.balance(0), 0);
}

#[test]
fn rejected_submission_is_resubmittable() {
    let mut ext = WorkflowExt::new();

    ext.submit(2, 0, 30).unwrap();
    assert!(ext.workflow.reject(2, &student(0)).is_ok());
    assert_eq!(ext.status(2, 0), SubmissionStatus::Rejected);

    assert!(ext.submit(2, 0, 30).is_ok());
    assert_eq!(ext.status(2, 0), SubmissionStatus::Pending);
    assert_eq!(ext.workflow.submissions().all_submissions().len(), 1);
}

#[test]
fn reject_requires_pending() {
    let mut ext = WorkflowExt::new();

    ext.submit(1, 0, 50).unwrap();
    ext.workflow.approve(1, &student(0)).unwrap();

    assert_eq!(
        ext.workflow.reject(1, &student(0)),
        Err(WorkflowError::IllegalTransition(SubmissionStatus::Approved))
    );
    assert_eq!(ext.status(1, 0), SubmissionStatus::Approved);
}

#[test]
fn redeem_requires_approved_and_is_terminal() {
    let mut ext = WorkflowExt::new();

    ext.submit(1, 0, 50).unwrap();
    assert_eq!(
        ext.workflow.redeem(1, &student(0)),
        Err(WorkflowError::IllegalTransition(SubmissionStatus::Pending))
    );

    ext.workflow.approve(1, &student(0)).unwrap();
    assert!(ext.workflow.redeem(1, &student(0)).is_ok());
    assert_eq!(ext.status(1, 0), SubmissionStatus::Redeemed);
    assert_eq!(ext.balance(0), 50);

    // Redeemed is terminal: no double credit, no transition back.
    assert_eq!(
        ext.workflow.redeem(1, &student(0)),
        Err(WorkflowError::IllegalTransition(SubmissionStatus::Redeemed))
    );
    assert_eq!(ext.balance(0), 50);
    assert!(!ext
        .workflow
        .submissions()
        .activity_status(1, &student(0))
        .is_resubmittable());
}

#[test]
fn full_reward_flow_credits_snapshotted_amount() {
    let mut ext = WorkflowExt::new();

    ext.submit(1, 0, 50).unwrap();
    assert_eq!(ext.status(1, 0), SubmissionStatus::Pending);

    ext.workflow.approve(1, &student(0)).unwrap();
    assert_eq!(ext.status(1, 0), SubmissionStatus::Approved);

    let event = ext.workflow.redeem(1, &student(0)).unwrap();
    assert_eq!(
        event,
        Event::TokensRedeemed {
            activity_id: 1,
            student_id: student(0),
            amount: 50,
            new_balance: 50,
        }
    );
    assert_eq!(ext.status(1, 0), SubmissionStatus::Redeemed);
}

#[test]
fn redemption_is_a_credit_and_never_blocked_by_balance() {
    let mut ext = WorkflowExt::new();

    // Student holds 30 tokens and has an approved 50-token claim.
    ext.workflow.users_mut().add_tokens(&student(0), 30);
    ext.submit(3, 0, 50).unwrap();
    ext.workflow.approve(3, &student(0)).unwrap();

    assert!(ext.workflow.redeem(3, &student(0)).is_ok());
    assert_eq!(ext.balance(0), 80);
}

#[test]
fn balance_never_goes_negative() {
    let mut ext = WorkflowExt::new();

    ext.workflow.users_mut().add_tokens(&student(0), 40);
    assert!(!ext.workflow.users_mut().spend_tokens(&student(0), 41));
    assert_eq!(ext.balance(0), 40);

    assert!(ext.workflow.users_mut().spend_tokens(&student(0), 40));
    assert_eq!(ext.balance(0), 0);

    assert!(!ext.workflow.users_mut().spend_tokens(&student(0), 1));
    assert_eq!(ext.balance(0), 0);
}

#[test]
fn redemption_credits_saturate_at_the_balance_cap() {
    let mut ext = WorkflowExt::new();

    // Two approved claims whose rewards together exceed what the balance
    // can hold. Both redemptions must succeed without wrapping or
    // panicking, and the claims stay consumed.
    for activity_id in [1, 2] {
        ext.submit(activity_id, 0, u32::MAX).unwrap();
        ext.workflow.approve(activity_id, &student(0)).unwrap();
    }

    assert!(ext.workflow.redeem(1, &student(0)).is_ok());
    assert_eq!(ext.balance(0), u32::MAX);

    let event = ext.workflow.redeem(2, &student(0)).unwrap();
    assert_eq!(
        event,
        Event::TokensRedeemed {
            activity_id: 2,
            student_id: student(0),
            amount: u32::MAX,
            new_balance: u32::MAX,
        }
    );
    assert_eq!(ext.status(2, 0), SubmissionStatus::Redeemed);
    assert_eq!(ext.balance(0), u32::MAX);
}

#[test]
fn summary_counts_match_store_contents() {
    let mut ext = WorkflowExt::new();
    let service_id = ext.add_service(40, true);

    // One claim through the whole lifecycle, one pending, one rejected,
    // and a spend on the catalog.
    ext.submit(1, 0, 50).unwrap();
    ext.workflow.approve(1, &student(0)).unwrap();
    ext.workflow.redeem(1, &student(0)).unwrap();
    ext.submit(2, 1, 30).unwrap();
    ext.submit(3, 0, 20).unwrap();
    ext.workflow.reject(3, &student(0)).unwrap();
    ext.workflow.spend(&student(0), service_id).unwrap();

    assert_eq!(
        ext.workflow.summary(),
        WorkflowSummary {
            total_submissions: 3,
            pending_submissions: 1,
            approved_submissions: 0,
            rejected_submissions: 1,
            redeemed_submissions: 1,
            tokens_issued: 50,
            tokens_spent: 40,
            services: 1,
            enrollments: 1,
            users: 3,
        }
    );
}

#[test]
fn course_completion_bumps_the_counter() {
    let mut ext = WorkflowExt::new();

    assert!(ext.workflow.users_mut().complete_course(&student(0)));
    assert!(ext.workflow.users_mut().complete_course(&student(0)));
    assert!(!ext.workflow.users_mut().complete_course("nobody"));

    let profile = ext.workflow.users().profile(&student(0)).unwrap();
    assert_eq!(profile.courses_completed, 2);
}

#[test]
fn credits_and_debits_ignore_unknown_users() {
    let mut ext = WorkflowExt::new();

    assert!(!ext.workflow.users_mut().add_tokens("nobody", 10));
    assert!(!ext.workflow.users_mut().spend_tokens("nobody", 10));
}

#[test]
fn spend_debits_enrolls_and_records_ledger_entry() {
    let mut ext = WorkflowExt::new();
    let service_id = ext.add_service(40, true);

    ext.workflow.users_mut().add_tokens(&student(0), 100);
    let event = ext.workflow.spend(&student(0), service_id).unwrap();
    assert_eq!(
        event,
        Event::TokensSpent {
            user_id: student(0),
            service_id,
            amount: 40,
            new_balance: 60,
        }
    );

    let service = ext.workflow.admin().service(service_id).unwrap();
    assert_eq!(service.enrollments, 1);

    let ledger = ext.workflow.admin().transactions();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].kind, TransactionKind::Spend);
    assert_eq!(ledger[0].from, student(0));
}

#[test]
fn spend_with_insufficient_balance_changes_nothing() {
    let mut ext = WorkflowExt::new();
    let service_id = ext.add_service(50, true);

    ext.workflow.users_mut().add_tokens(&student(0), 30);
    assert_eq!(
        ext.workflow.spend(&student(0), service_id),
        Err(WorkflowError::InsufficientBalance {
            needed: 50,
            available: 30,
        })
    );
    assert_eq!(ext.balance(0), 30);
    assert_eq!(
        ext.workflow.admin().service(service_id).unwrap().enrollments,
        0
    );
    assert!(ext.workflow.admin().transactions().is_empty());
}

#[test]
fn spend_on_inactive_service_is_refused() {
    let mut ext = WorkflowExt::new();
    let service_id = ext.add_service(10, false);

    ext.workflow.users_mut().add_tokens(&student(0), 100);
    assert!(matches!(
        ext.workflow.spend(&student(0), service_id),
        Err(WorkflowError::Validation(_))
    ));
    assert_eq!(ext.balance(0), 100);
}

#[test]
fn spend_on_unknown_service_is_refused() {
    let mut ext = WorkflowExt::new();

    assert_eq!(
        ext.workflow.spend(&student(0), 404),
        Err(WorkflowError::UnknownService(404))
    );
}

#[test]
fn submit_validates_proof_and_student() {
    let mut ext = WorkflowExt::new();

    let mut draft = ext.draft(1, 0, 50);
    draft.proof_value = "   ".to_owned();
    assert!(matches!(
        ext.workflow.submit(draft),
        Err(WorkflowError::Validation(_))
    ));

    let draft = SubmissionDraft {
        student_id: "ghost".to_owned(),
        ..ext.draft(1, 0, 50)
    };
    assert_eq!(
        ext.workflow.submit(draft),
        Err(WorkflowError::UnknownUser("ghost".to_owned()))
    );

    assert_eq!(ext.status(1, 0), SubmissionStatus::NotSubmitted);
}

#[test]
fn in_flight_guard_refuses_duplicate_triggers() {
    let mut ext = WorkflowExt::new();
    let key = (1, student(0));

    assert!(ext.workflow.begin_action(key.clone()).is_ok());
    assert_eq!(
        ext.workflow.begin_action(key.clone()),
        Err(WorkflowError::InFlight)
    );

    ext.workflow.finish_action(&key);
    assert!(ext.workflow.begin_action(key).is_ok());
}

#[test]
fn service_crud_assigns_unique_ids() {
    let mut ext = WorkflowExt::new();

    let first = ext.add_service(10, true);
    let second = ext.add_service(20, true);
    assert_ne!(first, second);

    assert!(ext.workflow.admin_mut().update_service(
        first,
        ServicePatch {
            token_cost: Some(15),
            ..Default::default()
        },
    ));
    assert_eq!(
        ext.workflow.admin().service(first).unwrap().token_cost,
        15
    );

    assert!(ext.workflow.admin_mut().delete_service(first));
    assert!(!ext.workflow.admin_mut().delete_service(first));
    assert!(ext.workflow.admin().service(first).is_none());

    // Ids are never reused after a delete.
    let third = ext.add_service(30, true);
    assert_ne!(third, first);
    assert_ne!(third, second);
}

#[test]
fn unknown_pair_reads_as_not_submitted() {
    let ext = WorkflowExt::new();
    assert_eq!(ext.status(9, 0), SubmissionStatus::NotSubmitted);
}
