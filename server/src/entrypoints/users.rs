use learn2earn_server::state::AppState;
use rocket::serde::json::Json;
use rocket::State;
use shared::UserProfile;

use super::types::{
    workflow_error, ApiError, EventResponse, ProfileResponse, RegisterRequest,
};

#[utoipa::path(context_path = "/api/users", responses(
    (status = 200, description = "All user profiles", body = [ProfileResponse])
))]
#[get("/")]
async fn get_users(state: &State<AppState>) -> Json<Vec<ProfileResponse>> {
    let workflow = state.workflow.read().await;
    Json(workflow.users().all_profiles().iter().map(Into::into).collect())
}

#[utoipa::path(context_path = "/api/users", responses(
    (status = 200, description = "A single profile with its token balance", body = ProfileResponse)
))]
#[get("/<user_id>")]
async fn get_user(user_id: &str, state: &State<AppState>) -> Option<Json<ProfileResponse>> {
    let workflow = state.workflow.read().await;
    workflow.users().profile(user_id).map(|p| Json(p.into()))
}

#[utoipa::path(context_path = "/api/users", responses(
    (status = 200, description = "Create or refresh a profile from the identity provider", body = ProfileResponse)
))]
#[post("/", data = "<request>")]
async fn register_user(
    request: Json<RegisterRequest>,
    state: &State<AppState>,
) -> Json<ProfileResponse> {
    let request = request.into_inner();

    let mut workflow = state.workflow.write().await;
    // Re-registering keeps the existing balance; only identity fields move.
    let profile = match workflow.users().profile(&request.id) {
        Some(existing) => UserProfile {
            name: request.name,
            email: request.email,
            wallet_address: request.wallet_address,
            ..existing.clone()
        },
        None => UserProfile::new(
            request.id,
            request.name,
            request.email,
            request.wallet_address,
        ),
    };
    workflow.users_mut().upsert_profile(profile.clone());
    rocket::info!("Profile upserted for {}", profile.id);
    Json((&profile).into())
}

#[utoipa::path(context_path = "/api/users", responses(
    (status = 200, description = "Spend tokens on a catalog service", body = EventResponse)
))]
#[post("/<user_id>/spend/<service_id>")]
async fn spend_tokens(
    user_id: &str,
    service_id: u64,
    state: &State<AppState>,
) -> Result<Json<EventResponse>, ApiError> {
    let mut workflow = state.workflow.write().await;
    match workflow.spend(user_id, service_id) {
        Ok(event) => {
            rocket::info!("Tokens spent: {event:?}");
            Ok(Json(event.into()))
        }
        Err(e) => {
            rocket::info!("Refused spend by '{user_id}' on service {service_id}: {e}");
            Err(workflow_error(e))
        }
    }
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket.mount(
            "/api/users",
            rocket::routes![get_users, get_user, register_user, spend_tokens],
        )
    })
}
