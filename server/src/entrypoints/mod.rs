use rocket::fairing::AdHoc;

pub mod activities;
pub mod admin;
pub mod types;
pub mod users;

pub fn stage() -> AdHoc {
    AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket
            .attach(activities::stage())
            .attach(admin::stage())
            .attach(users::stage())
    })
}
