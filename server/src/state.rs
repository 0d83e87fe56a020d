use learn2earn_store::Workflow;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::tokio::sync::RwLock;

/// Process-wide application state: the workflow and its stores behind one
/// lock. Handlers take the write half for mutations and the read half for
/// queries; the stores themselves are plain synchronous state.
pub struct AppState {
    pub workflow: RwLock<Workflow>,
}

impl AppState {
    pub fn new(workflow: Workflow) -> Self {
        Self {
            workflow: RwLock::new(workflow),
        }
    }
}

/// Shared secret the admin routes are gated on.
pub struct AdminSecret(pub String);

/// Request guard proving the caller presented the admin secret in the
/// `x-admin-token` header.
pub struct AdminToken;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminToken {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let secret = req.rocket().state::<AdminSecret>();
        match (secret, req.headers().get_one("x-admin-token")) {
            (Some(secret), Some(token)) if token == secret.0 => Outcome::Success(AdminToken),
            _ => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}
