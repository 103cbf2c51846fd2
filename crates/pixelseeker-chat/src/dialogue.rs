//! Generative dialogue client.
//!
//! Calls an OpenAI-compatible chat-completions endpoint with the persona
//! directive followed by the whole transcript. One attempt per call.

use async_trait::async_trait;
use pixelseeker_core::config::DialogueConfig;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::DialogueError;
use crate::types::{Role, RoleTaggedMessage};

/// Anything that can produce the assistant's next reply for a transcript.
#[async_trait]
pub trait DialogueSource: Send + Sync {
    async fn complete(&self, history: &[RoleTaggedMessage]) -> Result<String, DialogueError>;
}

/// HTTP client for the dialogue completion service.
#[derive(Clone)]
pub struct OpenAiDialogueClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    persona: String,
}

impl OpenAiDialogueClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            persona: persona.into(),
        }
    }

    pub fn from_config(config: &DialogueConfig) -> Self {
        Self::new(
            &config.endpoint,
            &config.api_key,
            &config.model,
            &config.persona,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request body: the persona directive first, then the transcript in order.
    fn build_request<'a>(&'a self, history: &'a [RoleTaggedMessage]) -> CompletionRequest<'a> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(WireMessage {
            role: Role::System,
            content: &self.persona,
        });
        messages.extend(history.iter().map(|m| WireMessage {
            role: m.role,
            content: &m.content,
        }));
        CompletionRequest {
            model: &self.model,
            messages,
        }
    }

    async fn send_request(&self, body: &CompletionRequest<'_>) -> Result<String, DialogueError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| DialogueError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| DialogueError::Network(e.to_string()))?;
        let parsed: CompletionResponse = serde_json::from_str(&body_text)
            .map_err(|e| DialogueError::Malformed(e.to_string()))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl DialogueSource for OpenAiDialogueClient {
    async fn complete(&self, history: &[RoleTaggedMessage]) -> Result<String, DialogueError> {
        let request = self.build_request(history);
        tracing::debug!(model = %self.model, messages = request.messages.len(), "Requesting completion");

        let result = self.send_request(&request).await;
        if let Err(ref e) = result {
            tracing::warn!(model = %self.model, kind = %e.kind(), error = %e, "Dialogue request failed");
        }
        result
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: CompletionResponse) -> Result<String, DialogueError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| DialogueError::Malformed("no completion content in response".to_string()))
}

fn map_http_error(status: StatusCode, body: String) -> DialogueError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);
    DialogueError::Status {
        status: status.as_u16(),
        message,
    }
}
