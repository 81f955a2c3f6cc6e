//! Deterministic vendor fakes for tests and `AppState::fake()`.
//!
//! No network, no credentials; the summarizer additionally records how
//! often it was called so tests can assert the short-transcript skip.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};

use super::{ChatModel, SpeechToText, Summarizer, TextToSpeech, TrendClient, TrendQuery, VendorError};

#[derive(Debug, Default)]
pub struct FakeChat {
    pub reply: String,
}

impl FakeChat {
    pub fn with_reply(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl ChatModel for FakeChat {
    async fn complete(&self, _message: &str) -> Result<String, VendorError> {
        if self.reply.is_empty() {
            return Err(VendorError::Empty);
        }
        Ok(self.reply.clone())
    }
}

/// Summarizer fake that counts calls and either answers or fails.
#[derive(Debug)]
pub struct FakeSummarizer {
    pub summary: Option<String>,
    calls: AtomicUsize,
}

impl FakeSummarizer {
    pub fn answering(summary: &str) -> Self {
        Self {
            summary: Some(summary.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            summary: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String, VendorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.summary {
            Some(s) => Ok(s.clone()),
            None => Err(VendorError::Request("summarizer unavailable".into())),
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeSpeech;

#[async_trait]
impl SpeechToText for FakeSpeech {
    async fn transcribe(&self, _audio: Bytes) -> Result<String, VendorError> {
        Ok("fake transcript".into())
    }
}

#[async_trait]
impl TextToSpeech for FakeSpeech {
    async fn synthesize(&self, _text: &str) -> Result<Bytes, VendorError> {
        Ok(Bytes::from_static(b"mp3"))
    }
}

#[derive(Debug, Default)]
pub struct FakeTrend;

#[async_trait]
impl TrendClient for FakeTrend {
    async fn search(&self, query: &TrendQuery) -> Result<Value, VendorError> {
        Ok(json!({
            "results": [{
                "title": query.keywords,
                "data": [{"period": "2025-01-01", "ratio": 42.0}]
            }]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_chat_empty_reply_is_an_error() {
        let chat = FakeChat::default();
        assert!(matches!(chat.complete("hi").await, Err(VendorError::Empty)));
    }

    #[tokio::test]
    async fn fake_summarizer_counts_calls() {
        let summarizer = FakeSummarizer::answering("short");
        assert_eq!(summarizer.calls(), 0);
        summarizer.summarize("anything").await.unwrap();
        summarizer.summarize("anything").await.unwrap();
        assert_eq!(summarizer.calls(), 2);
    }
}
