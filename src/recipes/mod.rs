pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(handlers::list_recipes))
        .route("/recipe/:id", get(handlers::get_recipe))
}
