//! Gateway over an OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Gateway, GatewayError, GatewayRequest};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Longest error body kept in [`GatewayError::Status`].
const ERROR_BODY_LIMIT: usize = 200;

const SYSTEM_PROMPT: &str = "You are the terminal of a Linux desktop. The user typed a command that \
the shell does not implement. Reply with exactly what the command would print on this system, \
as plain text. Never use markdown or code fences. Never explain. Base file and directory names \
on the filesystem JSON you are given. If the command could not exist, reply \
`<command>: command not found`.";

/// Settings for [`HttpGateway`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL; `/chat/completions` is appended.
    pub endpoint: String,
    pub model: String,
    /// Sent as a bearer token when present. Never read from or written to
    /// config files.
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Whole-request timeout. None waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions gateway.
pub struct HttpGateway {
    config: GatewayConfig,
    client: Client,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn chat_endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    fn build_body(&self, request: &GatewayRequest) -> Result<serde_json::Value, GatewayError> {
        let snapshot = serde_json::to_string(&request.snapshot)
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let user = format!(
            "Working directory: {}\nFilesystem: {}\nCommand: {}",
            request.cwd, snapshot, request.line
        );
        Ok(json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user},
            ],
            "temperature": 0.2,
        }))
    }
}

/// One line of an error body, so it renders as a single log entry.
fn error_summary(body: &str) -> String {
    body.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(ERROR_BODY_LIMIT)
        .collect()
}

#[async_trait]
impl Gateway for HttpGateway {
    #[tracing::instrument(level = "debug", skip_all, fields(line = %request.line), err)]
    async fn ask(&self, request: &GatewayRequest) -> Result<String, GatewayError> {
        let mut http = self.client.post(self.chat_endpoint()).json(&self.build_body(request)?);
        if let Some(key) = &self.config.api_key {
            http = http.bearer_auth(key);
        }

        let response = http
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: error_summary(&body),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)
    }
}
