use serde::Deserialize;

/// CLOVA Studio chat-completion credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    pub api_key: String,
    pub url: String,
}

/// CLOVA text-summary API credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// NCP speech credentials, shared by the CSR (STT) and premium TTS APIs.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// Naver DataLab search-trend credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub session_ttl_minutes: i64,
    pub chat: ChatConfig,
    pub summary: SummaryConfig,
    pub speech: SpeechConfig,
    pub trend: TrendConfig,
}

const DEFAULT_CHAT_URL: &str =
    "https://clovastudio.stream.ntruss.com/testapp/v1/chat-completions/HCX-003";

impl AppConfig {
    /// Reads the whole configuration once at process start. Vendor
    /// credentials are required so a misconfigured deployment fails here
    /// rather than on the first proxied request.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let chat = ChatConfig {
            api_key: std::env::var("CLOVA_CHAT_API_KEY")?,
            url: std::env::var("CLOVA_CHAT_URL").unwrap_or_else(|_| DEFAULT_CHAT_URL.into()),
        };
        let summary = SummaryConfig {
            client_id: std::env::var("CLOVA_SUMMARY_CLIENT_ID")?,
            client_secret: std::env::var("CLOVA_SUMMARY_CLIENT_SECRET")?,
        };
        let speech = SpeechConfig {
            client_id: std::env::var("NCP_SPEECH_CLIENT_ID")?,
            client_secret: std::env::var("NCP_SPEECH_CLIENT_SECRET")?,
        };
        let trend = TrendConfig {
            client_id: std::env::var("NAVER_CLIENT_ID")?,
            client_secret: std::env::var("NAVER_CLIENT_SECRET")?,
        };
        Ok(Self {
            database_url,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            cors_origin: std::env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
            chat,
            summary,
            speech,
            trend,
        })
    }
}
