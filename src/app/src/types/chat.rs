use serde::{Deserialize, Serialize};
use serde_valid::Validate;

use super::context::UiContext;
use crate::schema::RawValue;

pub const GREETING: &str = "Hello! I can answer questions and update your ROI fields.";
pub const FALLBACK_ANSWER: &str = "Oops! I couldn't reach the server.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Bot,
}

/// One entry of the chat transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: u32,
    pub role: ChatRole,
    pub content: String,
    /// Confidence reported with a bot reply
    pub confidence: Option<f64>,
}

/// Request body of the assistant endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct ChatRequest {
    #[validate(min_length = 1)]
    pub message: String,
    pub ui_context: UiContext,
}

/// Response body of the assistant endpoint
///
/// `action` is untrusted: field names are only resolved against the schema
/// when the batch is dispatched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantResponse {
    pub answer: String,
    #[serde(default)]
    pub action: Option<Vec<(String, serde_json::Value)>>,
    #[serde(default)]
    pub confidence: f64,
}

impl AssistantResponse {
    /// Reply substituted when the assistant is unreachable or answers garbage
    pub fn fallback() -> Self {
        Self {
            answer: FALLBACK_ANSWER.to_string(),
            action: None,
            confidence: 0.0,
        }
    }

    /// Split the action into `(field, value)` pairs for the dispatcher.
    pub fn proposed_updates(&mut self) -> Option<Vec<(String, RawValue)>> {
        self.action.take().map(|pairs| {
            pairs
                .into_iter()
                .map(|(field, value)| (field, RawValue::from(value)))
                .collect()
        })
    }
}
