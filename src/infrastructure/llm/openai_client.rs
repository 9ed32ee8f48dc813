use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{Category, Classification, Prompt};
use crate::presentation::config::LlmSettings;

/// Chat-completions client for OpenAI-compatible providers.
///
/// Built once at startup. Without an API key it stays uninitialized and every
/// call fails with [`LlmClientError::ClientUninitialized`] before any I/O.
pub struct OpenAiClient {
    connection: Option<Connection>,
    base_url: String,
    model: String,
    temperature: f32,
}

struct Connection {
    client: Client,
    api_key: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<AssistantMessage>,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Exact shape the model is instructed to answer with.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassificationPayload {
    category: Category,
    #[serde(rename = "suggestedResponse")]
    suggested_response: String,
}

impl OpenAiClient {
    pub fn new(settings: &LlmSettings) -> Self {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty());

        let connection = match api_key {
            None => {
                tracing::error!("No provider API key configured, classification is disabled");
                None
            }
            Some(api_key) => match Client::builder()
                .timeout(Duration::from_millis(settings.timeout_ms))
                .build()
            {
                Ok(client) => {
                    tracing::info!(model = %settings.model, "LLM client initialized");
                    Some(Connection {
                        client,
                        api_key: api_key.to_string(),
                    })
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to build HTTP client, classification is disabled");
                    None
                }
            },
        };

        Self {
            connection,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            temperature: settings.temperature,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model))]
    async fn classify(&self, prompt: &Prompt) -> Result<Classification, LlmClientError> {
        let Some(connection) = &self.connection else {
            return Err(LlmClientError::ClientUninitialized);
        };

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system_message,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user_message,
                },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        tracing::debug!("Sending classification request");
        let response = connection
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&connection.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ProviderError(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletion = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmClientError::Unreachable(e.to_string())
            } else {
                LlmClientError::ProviderError(format!("malformed completion: {e}"))
            }
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmClientError::SchemaInvalid("empty completion content".to_string()))?;

        parse_classification(&content)
    }

    fn is_configured(&self) -> bool {
        self.connection.is_some()
    }
}

/// Decodes the model's answer, rejecting missing keys, extra keys and any
/// category outside the two accepted values.
pub fn parse_classification(content: &str) -> Result<Classification, LlmClientError> {
    let payload: ClassificationPayload = serde_json::from_str(content)
        .map_err(|e| LlmClientError::SchemaInvalid(e.to_string()))?;

    Ok(Classification::new(
        payload.category,
        payload.suggested_response,
    ))
}

fn map_transport_error(error: reqwest::Error) -> LlmClientError {
    if error.is_timeout() || error.is_connect() || error.is_request() {
        LlmClientError::Unreachable(error.to_string())
    } else {
        LlmClientError::ProviderError(error.to_string())
    }
}
