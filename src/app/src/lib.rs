pub mod derivation;
pub mod dispatcher;
pub mod events;
pub mod http_helpers;
pub mod macros;
pub mod model;
pub mod schema;
pub mod types;
pub mod update;

#[cfg(target_arch = "wasm32")]
pub mod wasm;


use crux_core::Command;

// Re-export core types
pub use crate::{
    dispatcher::{dispatch, DispatchReport},
    events::{ChatEvent, Event, FormEvent, UiEvent},
    http_helpers::{build_url, BASE_URL, CHAT_ENDPOINT},
    model::{Model, ViewModel},
    schema::{Field, FieldKind, FieldUpdate, FieldValue, RawValue, UnknownField, FIELD_SCHEMA},
    types::*,
};
pub use crux_http::Result as HttpResult;

#[crux_macros::effect(typegen)]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Http(crux_http::protocol::HttpRequest),
}

pub type HttpCmd = crux_http::command::Http<Effect, Event>;

/// The Core application
#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Effect = Effect;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> Command<Effect, Event> {
        update::update(event, model)
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        model.view()
    }
}
