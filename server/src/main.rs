#[macro_use]
extern crate rocket;

mod entrypoints;

use learn2earn_server::seed;
use learn2earn_server::state::{AdminSecret, AppState};
use learn2earn_store::Workflow;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, serde::Deserialize)]
pub struct Env {
    admin_token: String,
    seed_demo_data: Option<bool>,
}

#[launch]
async fn rocket() -> _ {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().pretty());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let env = envy::from_env::<Env>().expect("Failed to load environment variables");

    let mut workflow = Workflow::default();
    if env.seed_demo_data.unwrap_or(false) {
        if seed::seed_demo_data(&mut workflow) {
            tracing::info!("Seeded starter catalog and demo profiles");
        } else {
            tracing::info!("Stores already populated, skipping seed");
        }
    }

    let cors = rocket_cors::CorsOptions::default()
        .to_cors()
        .expect("Failed to build CORS options");

    rocket::build()
        .manage(AppState::new(workflow))
        .manage(AdminSecret(env.admin_token))
        .attach(cors)
        .attach(entrypoints::stage())
}
