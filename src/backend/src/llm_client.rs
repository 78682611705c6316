use crate::{
    config::LlmConfig,
    http_client::{handle_http_response, http_client},
};
use anyhow::{Context, Result};
#[cfg(feature = "mock")]
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use trait_variant::make;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// One entry of a chat completion prompt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::Assistant,
            content: content.into(),
        }
    }
}

/// A chat model that answers a prompt with a single JSON object as text.
#[make(Send + Sync)]
#[cfg_attr(feature = "mock", automock)]
pub trait LanguageModel {
    async fn complete(&self, messages: &[PromptMessage]) -> anyhow::Result<String>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: &'a [PromptMessage],
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI compatible `chat/completions` endpoint in JSON mode
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    config: LlmConfig,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = http_client(config.timeout)?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl LanguageModel for OpenAiClient {
    async fn complete(&self, messages: &[PromptMessage]) -> anyhow::Result<String> {
        let request = CompletionRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let res = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("failed to send completion request")?;

        let body = handle_http_response(res, "completion request").await?;

        let completion: CompletionResponse =
            serde_json::from_str(&body).context("failed to parse completion response")?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("failed to get completion: response contained no message")
    }
}
