pub mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod session;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/main", get(handlers::current_user))
        .route("/update-user", put(handlers::update_user))
        .route("/change-password", post(handlers::change_password))
}
