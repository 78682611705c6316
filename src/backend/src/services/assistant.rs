//! Assistant service
//!
//! Turns a chat message plus the dashboard's UI context into an
//! [`AssistantResponse`] by asking a [`LanguageModel`]. The conversation
//! history is shared by all clones of the service and grows for the lifetime
//! of the process.

use crate::llm_client::{LanguageModel, PromptMessage};
use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use roi_dashboard_core::{AssistantResponse, ChatRequest, FIELD_SCHEMA, FieldKind, UiContext};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Build the system prompt, listing every field the assistant may update.
pub fn system_prompt() -> String {
    let fields = FIELD_SCHEMA
        .iter()
        .map(|spec| {
            let kind = match spec.kind {
                FieldKind::Text => "text",
                FieldKind::Integer => "integer",
                FieldKind::Decimal => "number",
            };
            format!("- {} ({kind})", spec.name)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are the assistant of an ROI dashboard. Every user message is \
         preceded by a system message with the current UI context as JSON: \
         textData holds the inputs and computed results, visualData the chart \
         data.\n\n\
         Answer questions about the displayed numbers and charts using only \
         that context.\n\n\
         When the user asks to change values, propose updates for these \
         fields only:\n{fields}\n\n\
         annualRevenue, profitMargin and roiPercentage are computed by the \
         dashboard and must never be updated directly.\n\n\
         Reply with a single JSON object of the form \
         {{\"answer\": string, \"action\": [[field, value], ...] or null, \
         \"confidence\": number between 0 and 1}}. Use null for action when \
         nothing should change."
    )
}

/// Render the UI context as the per-turn system message.
fn context_message(context: &UiContext) -> Result<PromptMessage> {
    let json = serde_json::to_string_pretty(context).context("failed to serialize ui context")?;
    Ok(PromptMessage::system(format!("Current UI Context:\n{json}")))
}

/// Strip a surrounding markdown code fence, if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Parse the model's text into a response.
///
/// Only a missing `answer` is an error. A malformed `action` is dropped,
/// confidence defaults to 0 and is clamped to `[0, 1]`.
pub fn parse_reply(raw: &str) -> Result<AssistantResponse> {
    let reply: Value =
        serde_json::from_str(strip_code_fence(raw)).context("failed to parse model reply as json")?;

    let answer = reply
        .get("answer")
        .and_then(Value::as_str)
        .context("failed to parse model reply: no answer")?
        .to_string();

    let action = match reply.get("action") {
        None | Some(Value::Null) => None,
        Some(action) => match serde_json::from_value::<Vec<(String, Value)>>(action.clone()) {
            Ok(pairs) => Some(pairs),
            Err(e) => {
                warn!("dropping malformed action {action}: {e}");
                None
            }
        },
    };

    let confidence = reply
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);

    Ok(AssistantResponse {
        answer,
        action,
        confidence,
    })
}

/// Conversational assistant backed by a language model
pub struct AssistantService<Model>
where
    Model: LanguageModel,
{
    model: Arc<Model>,
    history: Arc<Mutex<Vec<PromptMessage>>>,
}

impl<Model> Clone for AssistantService<Model>
where
    Model: LanguageModel,
{
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            history: Arc::clone(&self.history),
        }
    }
}

impl<Model> AssistantService<Model>
where
    Model: LanguageModel,
{
    pub fn new(model: Model) -> Self {
        Self {
            model: Arc::new(model),
            history: Arc::new(Mutex::new(vec![PromptMessage::system(system_prompt())])),
        }
    }

    /// Snapshot of the conversation so far
    pub fn history(&self) -> Result<Vec<PromptMessage>> {
        self.history
            .lock()
            .map(|history| history.clone())
            .map_err(|_| anyhow!("failed to lock conversation history"))
    }

    /// Answer one chat turn
    ///
    /// The prompt is the history followed by the current context and the
    /// user message. The turn is appended to the history only after the
    /// model answered and its reply parsed.
    pub async fn respond(&self, request: &ChatRequest) -> Result<AssistantResponse> {
        let context = context_message(&request.ui_context)?;
        let user = PromptMessage::user(request.message.clone());

        let mut prompt = self.history()?;
        prompt.push(context.clone());
        prompt.push(user.clone());

        debug!("asking language model with {} messages", prompt.len());

        let raw = self
            .model
            .complete(&prompt)
            .await
            .context("failed to get reply from language model")?;

        let reply = parse_reply(&raw)?;

        self.history
            .lock()
            .map_err(|_| anyhow!("failed to lock conversation history"))?
            .extend([user, PromptMessage::assistant(reply.answer.clone()), context]);

        Ok(reply)
    }
}
