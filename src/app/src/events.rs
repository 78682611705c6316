use serde::{Deserialize, Serialize};

use crate::types::AssistantResponse;

/// Form events: direct user edits of the primary inputs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum FormEvent {
    /// Raw text as typed into the input named `field`
    SetField { field: String, value: String },
}

/// Chat events: assistant request/response cycle
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum ChatEvent {
    SendMessage {
        message: String,
    },

    // HTTP response (internal event, skipped from serialization)
    #[serde(skip)]
    ReplyReceived(Result<AssistantResponse, String>),
}

/// UI events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ClearDiagnostics,
}

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Event {
    Initialize { current_year: i32 },
    Form(FormEvent),
    Chat(ChatEvent),
    Ui(UiEvent),
}
