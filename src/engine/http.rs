use super::ReplyBackend;
use crate::error::GenerationError;
use crate::model::{GenerationConfig, GenerationPayload};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

/// Largest error body kept for the log.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Posts `{ emailContent, tone }` and reads the reply back as plain text.
pub struct HttpBackend {
    http: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpBackend {
    pub fn new(cfg: &GenerationConfig) -> anyhow::Result<Self> {
        let endpoint = reqwest::Url::parse(&cfg.endpoint)
            .map_err(|e| anyhow::anyhow!("invalid endpoint URL {:?}: {e}", cfg.endpoint))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/plain, */*"));

        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(GenerationError::Client)?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait]
impl ReplyBackend for HttpBackend {
    async fn generate(&self, payload: GenerationPayload<'_>) -> Result<String, GenerationError> {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(GenerationError::Status { status, body });
        }

        resp.text().await.map_err(GenerationError::MalformedBody)
    }
}
