use crux_core::{render::render, Command};
use log::warn;

use crate::events::{Event, FormEvent};
use crate::model::Model;
use crate::Effect;

/// Handle direct edits of the primary inputs
pub fn handle(event: FormEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        FormEvent::SetField { field, value } => match model.set_field(&field, value) {
            Ok(_) => render(),
            Err(e) => {
                warn!("ignoring form edit: {e}");
                Command::done()
            }
        },
    }
}
