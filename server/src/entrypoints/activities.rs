use learn2earn_server::state::AppState;
use rocket::serde::json::Json;
use rocket::State;
use shared::{IntoEnumIterator, TaskKind};

use super::types::{
    workflow_error, ApiError, EventResponse, RewardResponse, StatusResponse, SubmitRequest,
};

#[utoipa::path(context_path = "/api/activities", responses(
    (status = 200, description = "Record a student's claim of completed work", body = EventResponse)
))]
#[post("/submit", data = "<request>")]
async fn submit_activity(
    request: Json<SubmitRequest>,
    state: &State<AppState>,
) -> Result<Json<EventResponse>, ApiError> {
    let draft = request.into_inner().into_draft().map_err(workflow_error)?;
    let key = (draft.activity_id, draft.student_id.clone());

    let mut workflow = state.workflow.write().await;
    workflow.begin_action(key.clone()).map_err(workflow_error)?;
    let result = workflow.submit(draft);
    workflow.finish_action(&key);

    match result {
        Ok(event) => {
            rocket::info!("Submission received: {event:?}");
            Ok(Json(event.into()))
        }
        Err(e) => {
            rocket::info!("Refused submission for {key:?}: {e}");
            Err(workflow_error(e))
        }
    }
}

#[utoipa::path(context_path = "/api/activities", responses(
    (status = 200, description = "Current status of the pair, not_submitted when absent", body = StatusResponse)
))]
#[get("/<activity_id>/status/<student_id>")]
async fn get_activity_status(
    activity_id: u64,
    student_id: &str,
    state: &State<AppState>,
) -> Json<StatusResponse> {
    let workflow = state.workflow.read().await;
    let status = workflow.submissions().activity_status(activity_id, student_id);
    Json(StatusResponse {
        activity_id,
        student_id: student_id.to_owned(),
        status: status.to_string(),
    })
}

#[utoipa::path(context_path = "/api/activities", responses(
    (status = 200, description = "Claim an approved reward into the student's balance", body = EventResponse)
))]
#[post("/<activity_id>/redeem/<student_id>")]
async fn redeem_activity(
    activity_id: u64,
    student_id: &str,
    state: &State<AppState>,
) -> Result<Json<EventResponse>, ApiError> {
    let key = (activity_id, student_id.to_owned());

    let mut workflow = state.workflow.write().await;
    workflow.begin_action(key.clone()).map_err(workflow_error)?;
    let result = workflow.redeem(activity_id, student_id);
    workflow.finish_action(&key);

    match result {
        Ok(event) => {
            rocket::info!("Tokens redeemed: {event:?}");
            Ok(Json(event.into()))
        }
        Err(e) => {
            rocket::info!("Refused redemption for {key:?}: {e}");
            Err(workflow_error(e))
        }
    }
}

#[utoipa::path(context_path = "/api/activities", responses(
    (status = 200, description = "Advertised reward per task kind", body = [RewardResponse])
))]
#[get("/rewards")]
async fn get_reward_table() -> Json<Vec<RewardResponse>> {
    Json(
        TaskKind::iter()
            .map(|kind| RewardResponse {
                task_kind: kind.to_string(),
                tokens: kind.default_reward(),
            })
            .collect(),
    )
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket.mount(
            "/api/activities",
            rocket::routes![
                submit_activity,
                get_activity_status,
                redeem_activity,
                get_reward_table,
            ],
        )
    })
}
