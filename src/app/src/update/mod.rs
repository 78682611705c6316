mod chat;
mod form;
mod ui;

use crux_core::{render::render, Command};

use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Initialize { current_year } => {
            model.set_current_year(current_year);
            render()
        }
        Event::Form(form_event) => form::handle(form_event, model),
        Event::Chat(chat_event) => chat::handle(chat_event, model),
        Event::Ui(ui_event) => ui::handle(ui_event, model),
    }
}
