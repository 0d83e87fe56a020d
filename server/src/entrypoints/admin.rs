use learn2earn_server::state::{AdminToken, AppState};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;

use super::types::{
    not_found, page_offset, workflow_error, ApiError, EventResponse, PaginatedResponse,
    ServicePatchRequest, ServiceRequest, ServiceResponse, SubmissionResponse, SummaryResponse,
    TransactionResponse,
};

#[utoipa::path(context_path = "/api/admin", responses(
    (status = 200, description = "All submissions in insertion order", body = [SubmissionResponse])
))]
#[get("/submissions")]
async fn get_submissions(_token: AdminToken, state: &State<AppState>) -> Json<Vec<SubmissionResponse>> {
    let workflow = state.workflow.read().await;
    Json(
        workflow
            .submissions()
            .all_submissions()
            .iter()
            .map(Into::into)
            .collect(),
    )
}

#[utoipa::path(context_path = "/api/admin", responses(
    (status = 200, description = "Submissions awaiting review", body = [SubmissionResponse])
))]
#[get("/submissions/pending")]
async fn get_pending_submissions(
    _token: AdminToken,
    state: &State<AppState>,
) -> Json<Vec<SubmissionResponse>> {
    let workflow = state.workflow.read().await;
    Json(
        workflow
            .submissions()
            .pending_submissions()
            .into_iter()
            .map(Into::into)
            .collect(),
    )
}

#[utoipa::path(context_path = "/api/admin", responses(
    (status = 200, description = "Approve a pending submission", body = EventResponse)
))]
#[post("/submissions/<activity_id>/<student_id>/approve")]
async fn approve_submission(
    _token: AdminToken,
    activity_id: u64,
    student_id: &str,
    state: &State<AppState>,
) -> Result<Json<EventResponse>, ApiError> {
    let key = (activity_id, student_id.to_owned());

    let mut workflow = state.workflow.write().await;
    workflow.begin_action(key.clone()).map_err(workflow_error)?;
    let result = workflow.approve(activity_id, student_id);
    workflow.finish_action(&key);

    match result {
        Ok(event) => {
            rocket::info!("Submission approved: {event:?}");
            Ok(Json(event.into()))
        }
        Err(e) => {
            rocket::info!("Refused approval for {key:?}: {e}");
            Err(workflow_error(e))
        }
    }
}

#[utoipa::path(context_path = "/api/admin", responses(
    (status = 200, description = "Reject a pending submission, making it resubmittable", body = EventResponse)
))]
#[post("/submissions/<activity_id>/<student_id>/reject")]
async fn reject_submission(
    _token: AdminToken,
    activity_id: u64,
    student_id: &str,
    state: &State<AppState>,
) -> Result<Json<EventResponse>, ApiError> {
    let key = (activity_id, student_id.to_owned());

    let mut workflow = state.workflow.write().await;
    workflow.begin_action(key.clone()).map_err(workflow_error)?;
    let result = workflow.reject(activity_id, student_id);
    workflow.finish_action(&key);

    match result {
        Ok(event) => {
            rocket::info!("Submission rejected: {event:?}");
            Ok(Json(event.into()))
        }
        Err(e) => {
            rocket::info!("Refused rejection for {key:?}: {e}");
            Err(workflow_error(e))
        }
    }
}

#[utoipa::path(context_path = "/api/admin", responses(
    (status = 200, description = "The service catalog", body = [ServiceResponse])
))]
#[get("/services")]
async fn get_services(_token: AdminToken, state: &State<AppState>) -> Json<Vec<ServiceResponse>> {
    let workflow = state.workflow.read().await;
    Json(workflow.admin().services().iter().map(Into::into).collect())
}

#[utoipa::path(context_path = "/api/admin", responses(
    (status = 200, description = "Create a catalog service", body = ServiceResponse)
))]
#[post("/services", data = "<request>")]
async fn add_service(
    _token: AdminToken,
    request: Json<ServiceRequest>,
    state: &State<AppState>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let draft = request.into_inner().into_draft().map_err(workflow_error)?;

    let mut workflow = state.workflow.write().await;
    let service = workflow.admin_mut().add_service(draft);
    rocket::info!("Service {} ('{}') created", service.id, service.name);
    Ok(Json(service.into()))
}

#[utoipa::path(context_path = "/api/admin", responses(
    (status = 200, description = "Patch a catalog service", body = ServiceResponse)
))]
#[patch("/services/<id>", data = "<request>")]
async fn update_service(
    _token: AdminToken,
    id: u64,
    request: Json<ServicePatchRequest>,
    state: &State<AppState>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let patch = request.into_inner().into_patch().map_err(workflow_error)?;

    let mut workflow = state.workflow.write().await;
    if !workflow.admin_mut().update_service(id, patch) {
        return Err(not_found("service"));
    }
    match workflow.admin().service(id) {
        Some(service) => Ok(Json(service.into())),
        None => Err(not_found("service")),
    }
}

#[utoipa::path(context_path = "/api/admin", responses(
    (status = 204, description = "Delete a catalog service")
))]
#[delete("/services/<id>")]
async fn delete_service(
    _token: AdminToken,
    id: u64,
    state: &State<AppState>,
) -> Result<Status, ApiError> {
    let mut workflow = state.workflow.write().await;
    if workflow.admin_mut().delete_service(id) {
        rocket::info!("Service {id} deleted");
        Ok(Status::NoContent)
    } else {
        Err(not_found("service"))
    }
}

#[utoipa::path(context_path = "/api/admin", responses(
    (status = 200, description = "Token ledger, oldest first", body = PaginatedTransactionResponse)
))]
#[get("/transactions?<page>&<limit>")]
async fn get_transactions(
    _token: AdminToken,
    page: Option<u64>,
    limit: Option<u64>,
    state: &State<AppState>,
) -> Json<PaginatedResponse<TransactionResponse>> {
    let page = page.unwrap_or(0);
    let limit = limit.unwrap_or(50).max(1);

    let workflow = state.workflow.read().await;
    let ledger = workflow.admin().transactions();
    let records = ledger
        .iter()
        .skip(page_offset(page, limit, ledger.len() as u64))
        .take(limit as usize)
        .map(Into::into)
        .collect();
    Json(PaginatedResponse::new(
        records,
        page + 1,
        limit,
        ledger.len() as u64,
    ))
}

#[utoipa::path(context_path = "/api/admin", responses(
    (status = 200, description = "Dashboard counters", body = SummaryResponse)
))]
#[get("/summary")]
async fn get_summary(_token: AdminToken, state: &State<AppState>) -> Json<SummaryResponse> {
    let workflow = state.workflow.read().await;
    Json(workflow.summary().into())
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket.mount(
            "/api/admin",
            rocket::routes![
                get_submissions,
                get_pending_submissions,
                approve_submission,
                reject_submission,
                get_services,
                add_service,
                update_service,
                delete_service,
                get_transactions,
                get_summary,
            ],
        )
    })
}
