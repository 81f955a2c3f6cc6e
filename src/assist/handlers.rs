//! Thin proxies to the vendor APIs: chat recommendation, speech in both
//! directions, and search-trend analytics.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use tracing::{error, instrument, warn};

use super::dto::{ChatRequest, ChatResponse, PlayVoiceRequest, TranscriptResponse};
use crate::{
    error::ApiError,
    state::AppState,
    vendors::TrendQuery,
};

#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if payload.message.trim().is_empty() {
        return Err(ApiError::Validation("Message is required".into()));
    }

    // Empty vendor content is VendorError::Empty, a 500 like any other
    // vendor failure.
    let response = state.chat.complete(&payload.message).await.map_err(|e| {
        error!(error = %e, "chat completion failed");
        ApiError::Upstream(e)
    })?;

    Ok(Json(ChatResponse { response }))
}

#[instrument(skip(state, multipart))]
pub async fn speech_to_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let mut audio: Option<Bytes> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("audio") {
            audio = Some(field.bytes().await.map_err(|e| {
                warn!(error = %e, "audio upload read failed");
                ApiError::Validation("Could not read audio file".into())
            })?);
        }
    }

    let audio = audio.ok_or_else(|| ApiError::Validation("Missing audio file".into()))?;

    // Vendor status and body propagate for diagnosability.
    let transcript = state
        .stt
        .transcribe(audio)
        .await
        .map_err(ApiError::passthrough)?;

    Ok(Json(TranscriptResponse { transcript }))
}

#[instrument(skip(state, payload))]
pub async fn play_voice(
    State(state): State<AppState>,
    Json(payload): Json<PlayVoiceRequest>,
) -> Result<(HeaderMap, Bytes), ApiError> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::Validation("Missing text".into()));
    }

    let audio = state
        .tts
        .synthesize(&payload.text)
        .await
        .map_err(ApiError::passthrough)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
    Ok((headers, audio))
}

#[instrument(skip(state, payload))]
pub async fn search_trend(
    State(state): State<AppState>,
    Json(payload): Json<TrendQuery>,
) -> Result<Json<Value>, ApiError> {
    let results = state.trend.search(&payload).await.map_err(|e| {
        error!(error = %e, "trend lookup failed");
        ApiError::Upstream(e)
    })?;

    Ok(Json(results))
}
