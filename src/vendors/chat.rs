//! CLOVA Studio chat-completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatModel, VendorError};
use crate::config::ChatConfig;

const SYSTEM_PROMPT: &str = "You are a cooking assistant that recommends recipes. \
Ask the user what kind of dish, cuisine or ingredients they have in mind, then \
suggest concrete dishes with a short reason for each. Answer in the user's language.";

#[derive(Debug)]
pub struct ClovaChat {
    api_key: String,
    url: String,
    client: reqwest::Client,
}

impl ClovaChat {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            url: config.url.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    top_p: f64,
    temperature: f64,
    max_tokens: u32,
    repeat_penalty: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    result: ChatResult,
}

#[derive(Debug, Deserialize)]
struct ChatResult {
    message: ChatResultMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResultMessage {
    content: Option<String>,
}

#[async_trait]
impl ChatModel for ClovaChat {
    async fn complete(&self, message: &str) -> Result<String, VendorError> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: message.into(),
                },
            ],
            top_p: 0.8,
            temperature: 0.5,
            max_tokens: 700,
            repeat_penalty: 5.0,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| VendorError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| VendorError::Request(e.to_string()))?;

        if status != 200 {
            return Err(VendorError::Status { status, body });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| VendorError::Decode(e.to_string()))?;

        match parsed.result.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(VendorError::Empty),
        }
    }
}
