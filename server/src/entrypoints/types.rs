use chrono::{DateTime, Utc};
use learn2earn_store::{WorkflowError, WorkflowSummary};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use shared::{Event, ProofKind, Service, ServiceDraft, Submission, SubmissionDraft, Transaction, UserProfile};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, Default, ToSchema)]
#[aliases(PaginatedTransactionResponse = PaginatedResponse<TransactionResponse>)]
pub struct PaginatedResponse<T: Serialize> {
    pub records: Vec<T>,
    pub page: u64,
    pub total_pages: u64,
    pub limit: u64,
    pub total_records: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(records: Vec<T>, page: u64, limit: u64, total_records: u64) -> Self {
        let extra_page = if total_records % limit == 0 { 0 } else { 1 };
        let total_pages = (total_records / limit) + extra_page;
        Self {
            records,
            page,
            total_pages,
            limit,
            total_records,
        }
    }
}

/// Start index of a requested page, clamped so arbitrary caller-chosen
/// page numbers can never overflow past the collection.
pub fn page_offset(page: u64, limit: u64, total: u64) -> usize {
    page.saturating_mul(limit).min(total) as usize
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = Custom<Json<ErrorResponse>>;

/// Maps a workflow failure to the HTTP surface. Every domain failure is a
/// 4xx with a human-readable body; the caller retries with corrected input
/// or a fresh state read.
pub fn workflow_error(error: WorkflowError) -> ApiError {
    let status = match &error {
        WorkflowError::Validation(_) => Status::BadRequest,
        WorkflowError::IllegalTransition(_) => Status::Conflict,
        WorkflowError::InsufficientBalance { .. } => Status::Conflict,
        WorkflowError::UnknownUser(_) | WorkflowError::UnknownService(_) => Status::NotFound,
        WorkflowError::InFlight => Status::TooManyRequests,
    };
    Custom(
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

pub fn not_found(what: &str) -> ApiError {
    Custom(
        Status::NotFound,
        Json(ErrorResponse {
            error: format!("{what} not found"),
        }),
    )
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitRequest {
    pub activity_id: u64,
    pub activity_title: String,
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    pub proof_kind: String,
    pub proof_value: String,
    pub tokens: u32,
}

impl SubmitRequest {
    pub fn into_draft(self) -> Result<SubmissionDraft, WorkflowError> {
        let proof_kind = self
            .proof_kind
            .parse::<ProofKind>()
            .map_err(|_| WorkflowError::Validation(format!("unknown proof kind '{}'", self.proof_kind)))?;
        Ok(SubmissionDraft {
            activity_id: self.activity_id,
            activity_title: self.activity_title,
            student_id: self.student_id,
            student_name: self.student_name,
            student_email: self.student_email,
            proof_kind,
            proof_value: self.proof_value,
            tokens: self.tokens,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub activity_id: u64,
    pub activity_title: String,
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    pub proof_kind: String,
    pub proof_value: String,
    pub tokens: u32,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Submission> for SubmissionResponse {
    fn from(submission: &Submission) -> Self {
        Self {
            activity_id: submission.activity_id,
            activity_title: submission.activity_title.clone(),
            student_id: submission.student_id.clone(),
            student_name: submission.student_name.clone(),
            student_email: submission.student_email.clone(),
            proof_kind: submission.proof_kind.to_string(),
            proof_value: submission.proof_value.clone(),
            tokens: submission.tokens,
            status: submission.status.to_string(),
            submitted_at: submission.submitted_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub activity_id: u64,
    pub student_id: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub event: String,
    pub user_id: String,
    pub activity_id: Option<u64>,
    pub service_id: Option<u64>,
    pub amount: Option<u32>,
    pub new_balance: Option<u32>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        match event {
            Event::SubmissionReceived {
                activity_id,
                student_id,
                tokens,
            } => Self {
                event: "submission_received".to_owned(),
                user_id: student_id,
                activity_id: Some(activity_id),
                service_id: None,
                amount: Some(tokens),
                new_balance: None,
            },
            Event::SubmissionApproved {
                activity_id,
                student_id,
                tokens,
            } => Self {
                event: "submission_approved".to_owned(),
                user_id: student_id,
                activity_id: Some(activity_id),
                service_id: None,
                amount: Some(tokens),
                new_balance: None,
            },
            Event::SubmissionRejected {
                activity_id,
                student_id,
            } => Self {
                event: "submission_rejected".to_owned(),
                user_id: student_id,
                activity_id: Some(activity_id),
                service_id: None,
                amount: None,
                new_balance: None,
            },
            Event::TokensRedeemed {
                activity_id,
                student_id,
                amount,
                new_balance,
            } => Self {
                event: "tokens_redeemed".to_owned(),
                user_id: student_id,
                activity_id: Some(activity_id),
                service_id: None,
                amount: Some(amount),
                new_balance: Some(new_balance),
            },
            Event::TokensSpent {
                user_id,
                service_id,
                amount,
                new_balance,
            } => Self {
                event: "tokens_spent".to_owned(),
                user_id,
                activity_id: None,
                service_id: Some(service_id),
                amount: Some(amount),
                new_balance: Some(new_balance),
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceRequest {
    pub name: String,
    pub kind: String,
    pub token_cost: u32,
    pub wallet_address: String,
    pub description: String,
    pub active: bool,
}

impl ServiceRequest {
    pub fn into_draft(self) -> Result<ServiceDraft, WorkflowError> {
        let kind = self
            .kind
            .parse()
            .map_err(|_| WorkflowError::Validation(format!("unknown service kind '{}'", self.kind)))?;
        Ok(ServiceDraft {
            name: self.name,
            kind,
            token_cost: self.token_cost,
            wallet_address: self.wallet_address,
            description: self.description,
            active: self.active,
        })
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ServicePatchRequest {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub token_cost: Option<u32>,
    pub wallet_address: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl ServicePatchRequest {
    pub fn into_patch(self) -> Result<shared::ServicePatch, WorkflowError> {
        let kind = match self.kind {
            Some(kind) => Some(kind.parse().map_err(|_| {
                WorkflowError::Validation(format!("unknown service kind '{kind}'"))
            })?),
            None => None,
        };
        Ok(shared::ServicePatch {
            name: self.name,
            kind,
            token_cost: self.token_cost,
            wallet_address: self.wallet_address,
            description: self.description,
            active: self.active,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    pub id: u64,
    pub name: String,
    pub kind: String,
    pub token_cost: u32,
    pub wallet_address: String,
    pub description: String,
    pub active: bool,
    pub enrollments: u32,
}

impl From<&Service> for ServiceResponse {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id,
            name: service.name.clone(),
            kind: service.kind.to_string(),
            token_cost: service.token_cost,
            wallet_address: service.wallet_address.clone(),
            description: service.description.clone(),
            active: service.active,
            enrollments: service.enrollments,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: u64,
    pub kind: String,
    pub from: String,
    pub to: String,
    pub amount: u32,
    pub status: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            kind: tx.kind.to_string(),
            from: tx.from.clone(),
            to: tx.to.clone(),
            amount: tx.amount,
            status: tx.status.to_string(),
            description: tx.description.clone(),
            created_at: tx.created_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub wallet_address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub tokens: u32,
    pub courses_completed: u32,
    pub joined_at: DateTime<Utc>,
    pub wallet_address: String,
}

impl From<&UserProfile> for ProfileResponse {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            tokens: profile.tokens,
            courses_completed: profile.courses_completed,
            joined_at: profile.joined_at,
            wallet_address: profile.wallet_address.clone(),
        }
    }
}

/// Counts for the admin dashboard.
#[derive(Clone, Debug, Serialize, Deserialize, Default, ToSchema)]
pub struct SummaryResponse {
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

impl From<WorkflowSummary> for SummaryResponse {
    fn from(summary: WorkflowSummary) -> Self {
        Self {
            total_submissions: summary.total_submissions,
            pending_submissions: summary.pending_submissions,
            approved_submissions: summary.approved_submissions,
            rejected_submissions: summary.rejected_submissions,
            redeemed_submissions: summary.redeemed_submissions,
            tokens_issued: summary.tokens_issued,
            tokens_spent: summary.tokens_spent,
            services: summary.services,
            enrollments: summary.enrollments,
            users: summary.users,
        }
    }
}

/// One row of the advertised reward table shown on the submit form.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RewardResponse {
    pub task_kind: String,
    pub tokens: u32,
}
