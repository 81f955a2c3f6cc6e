//! Vendor API adapters.
//!
//! Each third-party capability sits behind a narrow async trait so the
//! handlers depend only on the interface; real clients live next to a
//! fake used by tests and `AppState::fake()`.

mod chat;
pub mod fake;
mod speech;
mod summary;
mod trend;

pub use chat::ClovaChat;
pub use speech::NcpSpeech;
pub use summary::ClovaSummarizer;
pub use trend::NaverTrend;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Error type for vendor calls.
#[derive(Debug, Error)]
pub enum VendorError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("vendor returned {status}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("vendor returned empty content")]
    Empty,
}

/// Conversational recommendation model (one dialogue turn per call).
#[async_trait]
pub trait ChatModel: Send + Sync + fmt::Debug {
    async fn complete(&self, message: &str) -> Result<String, VendorError>;
}

/// Free-text summarization.
#[async_trait]
pub trait Summarizer: Send + Sync + fmt::Debug {
    async fn summarize(&self, text: &str) -> Result<String, VendorError>;
}

/// Speech-to-text over a raw audio payload.
#[async_trait]
pub trait SpeechToText: Send + Sync + fmt::Debug {
    async fn transcribe(&self, audio: Bytes) -> Result<String, VendorError>;
}

/// Text-to-speech returning encoded audio (MP3).
#[async_trait]
pub trait TextToSpeech: Send + Sync + fmt::Debug {
    async fn synthesize(&self, text: &str) -> Result<Bytes, VendorError>;
}

/// Caller-side shape of a trend lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendQuery {
    /// Comma-separated keywords, one group per keyword.
    pub keywords: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub ages: Vec<String>,
}

/// Search-trend analytics; the vendor's JSON is passed through as-is.
#[async_trait]
pub trait TrendClient: Send + Sync + fmt::Debug {
    async fn search(&self, query: &TrendQuery) -> Result<serde_json::Value, VendorError>;
}
