//! NCP speech clients: CSR speech-to-text and premium text-to-speech.
//!
//! Unlike the other adapters these propagate the vendor's status and raw
//! error body, so callers can see exactly what the speech API rejected.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use super::{SpeechToText, TextToSpeech, VendorError};
use crate::config::SpeechConfig;

const STT_URL: &str = "https://naveropenapi.apigw.ntruss.com/recog/v1/stt?lang=Kor";
const TTS_URL: &str = "https://naveropenapi.apigw.ntruss.com/tts-premium/v1/tts";

#[derive(Debug)]
pub struct NcpSpeech {
    client_id: String,
    client_secret: String,
    client: reqwest::Client,
}

impl NcpSpeech {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SttResponse {
    text: String,
}

#[async_trait]
impl SpeechToText for NcpSpeech {
    async fn transcribe(&self, audio: Bytes) -> Result<String, VendorError> {
        let response = self
            .client
            .post(STT_URL)
            .header("X-NCP-APIGW-API-KEY-ID", &self.client_id)
            .header("X-NCP-APIGW-API-KEY", &self.client_secret)
            .header("Content-Type", "application/octet-stream")
            .body(audio)
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

        let parsed: SttResponse =
            serde_json::from_str(&body).map_err(|e| VendorError::Decode(e.to_string()))?;
        Ok(parsed.text)
    }
}

#[async_trait]
impl TextToSpeech for NcpSpeech {
    async fn synthesize(&self, text: &str) -> Result<Bytes, VendorError> {
        let form = [
            ("speaker", "nara"),
            ("volume", "0"),
            ("speed", "0"),
            ("pitch", "0"),
            ("format", "mp3"),
            ("text", text),
        ];

        let response = self
            .client
            .post(TTS_URL)
            .header("X-NCP-APIGW-API-KEY-ID", &self.client_id)
            .header("X-NCP-APIGW-API-KEY", &self.client_secret)
            .form(&form)
            .send()
            .await
            .map_err(|e| VendorError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response
                .text()
                .await
                .map_err(|e| VendorError::Request(e.to_string()))?;
            return Err(VendorError::Status { status, body });
        }

        response
            .bytes()
            .await
            .map_err(|e| VendorError::Request(e.to_string()))
    }
}
