use crate::domain::ports::TextCompletion;
use crate::utils::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const MISTRAL_BASE_URL: &str = "https://api.mistral.ai";
pub const DEFAULT_MODEL: &str = "mistral-small-latest";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Chat-completions client for the Mistral API. One blocking call per stage,
/// no retry, no configured timeout beyond the service defaults.
#[derive(Debug, Clone)]
pub struct MistralClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl MistralClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: MISTRAL_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the client at a different endpoint (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TextCompletion for MistralClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "sending completion request");

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response.json().await?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| PipelineError::ResponseExtraction {
                stage: "completion",
                expected: "message content",
                raw: "response contained no choices".to_string(),
            })?;

        tracing::debug!(response_len = content.len(), "completion received");
        Ok(content.trim().to_string())
    }
}
