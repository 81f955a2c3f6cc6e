//! CLOVA Summary client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Summarizer, VendorError};
use crate::config::SummaryConfig;

const SUMMARY_URL: &str = "https://naveropenapi.apigw.ntruss.com/text-summary/v1/summarize";

#[derive(Debug)]
pub struct ClovaSummarizer {
    client_id: String,
    client_secret: String,
    client: reqwest::Client,
}

impl ClovaSummarizer {
    pub fn new(config: &SummaryConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    document: Document<'a>,
    option: SummaryOption,
}

#[derive(Debug, Serialize)]
struct Document<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOption {
    language: &'static str,
    model: &'static str,
    tone: u8,
    summary_count: u8,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[async_trait]
impl Summarizer for ClovaSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, VendorError> {
        let request = SummaryRequest {
            document: Document { content: text },
            option: SummaryOption {
                language: "ko",
                model: "general",
                tone: 0,
                summary_count: 3,
            },
        };

        let response = self
            .client
            .post(SUMMARY_URL)
            .header("X-NCP-APIGW-API-KEY-ID", &self.client_id)
            .header("X-NCP-APIGW-API-KEY", &self.client_secret)
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

        let parsed: SummaryResponse =
            serde_json::from_str(&body).map_err(|e| VendorError::Decode(e.to_string()))?;
        Ok(parsed.summary)
    }
}
