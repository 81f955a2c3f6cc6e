pub mod dto;
pub mod handlers;
pub mod repo;
pub mod service;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save-conversation", post(handlers::save_conversation))
        .route("/conversations", get(handlers::list_conversations))
        .route("/conversation/:id", delete(handlers::delete_conversation))
}
