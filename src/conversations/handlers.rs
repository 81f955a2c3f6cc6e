use axum::{
    extract::{Path, State},
    Json,
};
use time::macros::format_description;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::dto::{ConversationListItem, ConversationListResponse, SaveConversationRequest};
use super::repo::Conversation;
use super::service;
use crate::{
    auth::{dto::MessageResponse, session::SessionUser},
    error::ApiError,
    state::AppState,
};

#[instrument(skip(state, session, payload))]
pub async fn save_conversation(
    State(state): State<AppState>,
    session: SessionUser,
    Json(payload): Json<SaveConversationRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let transcript =
        service::build_transcript(payload.messages.iter().map(|m| m.message.as_str()));
    let summary = service::summarize_transcript(state.summarizer.as_ref(), &transcript).await;

    let row = Conversation::create(&state.db, session.user_id, &transcript, &summary)
        .await
        .map_err(|e| {
            error!(error = %e, "conversation save failed");
            ApiError::Persistence(e)
        })?;

    info!(
        conversation_id = %row.id,
        user_id = %session.user_id,
        username = %session.username,
        transcript_chars = row.original_text.len(),
        "conversation saved"
    );
    Ok(Json(MessageResponse {
        message: "Conversation saved".into(),
    }))
}

#[instrument(skip(state, session))]
pub async fn list_conversations(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<ConversationListResponse>, ApiError> {
    let rows = Conversation::list_by_user(&state.db, session.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, "conversation listing failed");
            ApiError::Persistence(e)
        })?;

    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]");
    let conversations = rows
        .into_iter()
        .map(|c| ConversationListItem {
            id: c.id,
            created_at: c.created_at.format(&fmt).unwrap_or_default(),
            summary_text: c.summary_text,
        })
        .collect();

    Ok(Json(ConversationListResponse { conversations }))
}

#[instrument(skip(state, session))]
pub async fn delete_conversation(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = Conversation::delete_owned(&state.db, id, session.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, %id, "conversation delete failed");
            ApiError::Persistence(e)
        })?;

    if !deleted {
        return Err(ApiError::NotFound("Conversation not found".into()));
    }

    info!(conversation_id = %id, user_id = %session.user_id, "conversation deleted");
    Ok(Json(MessageResponse {
        message: "Conversation deleted".into(),
    }))
}
