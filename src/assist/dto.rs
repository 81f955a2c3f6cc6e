use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub transcript: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayVoiceRequest {
    #[serde(default)]
    pub text: String,
}
