pub mod dto;
pub mod handlers;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/speech-to-text", post(handlers::speech_to_text))
        .route("/play_voice", post(handlers::play_voice))
        .route("/search-trend", post(handlers::search_trend))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB audio uploads
}
