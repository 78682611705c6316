//! Domain-based type organization
//!
//! - inputs: Primary inputs the user or the assistant can set
//! - outputs: Derived outputs and chart datasets
//! - context: UI context payload shared with the assistant
//! - chat: Chat transcript and assistant wire types

pub mod chat;
pub mod context;
pub mod inputs;
pub mod outputs;

pub use chat::*;
pub use context::*;
pub use inputs::*;
pub use outputs::*;
