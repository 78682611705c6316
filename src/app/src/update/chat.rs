use crux_core::{render::render, Command};
use log::{debug, warn};

use crate::dispatcher;
use crate::events::{ChatEvent, Event};
use crate::http_helpers::{build_url, process_json_response, CHAT_ENDPOINT};
use crate::model::Model;
use crate::types::{AssistantResponse, ChatRequest, ChatRole};
use crate::{Effect, HttpCmd};

/// Handle the assistant request/response cycle
pub fn handle(event: ChatEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ChatEvent::SendMessage { message } => send_message(message, model),
        ChatEvent::ReplyReceived(result) => receive_reply(result, model),
    }
}

fn send_message(message: String, model: &mut Model) -> Command<Effect, Event> {
    if message.trim().is_empty() {
        return Command::done();
    }

    model.push_message(ChatRole::User, message.clone(), None);
    model.pending_replies += 1;

    let request = ChatRequest {
        message,
        ui_context: model.snapshot(),
    };

    match HttpCmd::post(build_url(CHAT_ENDPOINT))
        .header("Content-Type", "application/json")
        .body_json(&request)
    {
        Ok(builder) => Command::all([
            render(),
            builder.build().then_send(|result| {
                Event::Chat(ChatEvent::ReplyReceived(process_json_response(
                    "Chat", result,
                )))
            }),
        ]),
        Err(e) => receive_reply(Err(format!("Failed to create Chat request: {e}")), model),
    }
}

/// Apply a reply against the current state, whatever happened since the
/// request was sent.
fn receive_reply(
    result: Result<AssistantResponse, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    model.pending_replies = model.pending_replies.saturating_sub(1);

    let mut reply = result.unwrap_or_else(|e| {
        warn!("assistant unavailable, using fallback reply: {e}");
        AssistantResponse::fallback()
    });

    let report = dispatcher::dispatch(model, reply.proposed_updates());
    debug!(
        "assistant reply applied {} update(s), skipped {}",
        report.applied.len(),
        report.skipped.len()
    );

    model.push_message(ChatRole::Bot, reply.answer, Some(reply.confidence));
    render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FALLBACK_ANSWER;
    use crux_http::protocol::{HttpResponse, HttpResult};
    use serde_json::json;

    fn reply(answer: &str, action: Option<Vec<(&str, serde_json::Value)>>) -> AssistantResponse {
        AssistantResponse {
            answer: answer.to_string(),
            action: action.map(|pairs| {
                pairs
                    .into_iter()
                    .map(|(field, value)| (field.to_string(), value))
                    .collect()
            }),
            confidence: 0.9,
        }
    }

    mod send_message {
        use super::*;

        #[test]
        fn blank_message_is_ignored() {
            let mut model = Model::default();
            let before = model.clone();

            let _ = handle(
                ChatEvent::SendMessage {
                    message: "   ".to_string(),
                },
                &mut model,
            );

            assert_eq!(model, before);
        }

        #[test]
        fn message_is_recorded_and_typing_starts() {
            let mut model = Model::default();

            let _ = handle(
                ChatEvent::SendMessage {
                    message: "What is my ROI?".to_string(),
                },
                &mut model,
            );

            assert!(model.is_typing());
            let last = model.transcript.last().unwrap();
            assert_eq!(last.role, ChatRole::User);
            assert_eq!(last.content, "What is my ROI?");
        }

        /// Send a message, answer its HTTP request with `response` and feed
        /// the resulting event back into the handler.
        fn round_trip(model: &mut Model, message: &str, response: HttpResponse) {
            let mut command = handle(
                ChatEvent::SendMessage {
                    message: message.to_string(),
                },
                model,
            );

            let mut request = command
                .effects()
                .find(Effect::is_http)
                .expect("chat request")
                .expect_http();
            assert_eq!(request.operation.method, "POST");
            assert_eq!(request.operation.url, "https://relative/api/chat");

            let sent: ChatRequest = serde_json::from_slice(&request.operation.body).unwrap();
            assert_eq!(sent.message, message);

            request.resolve(HttpResult::Ok(response)).unwrap();

            let Event::Chat(reply) = command.expect_one_event() else {
                panic!("expected a chat event");
            };
            let _ = handle(reply, model);
        }

        #[test]
        fn server_error_reply_falls_back() {
            let mut model = Model::default();
            let inputs = model.inputs().clone();

            round_trip(
                &mut model,
                "Set employees to 50",
                HttpResponse::status(500).build(),
            );

            assert_eq!(model.inputs(), &inputs);
            assert!(!model.is_typing());
            assert_eq!(model.transcript.last().unwrap().content, FALLBACK_ANSWER);
        }

        #[test]
        fn garbage_reply_falls_back() {
            let mut model = Model::default();
            let inputs = model.inputs().clone();

            round_trip(
                &mut model,
                "Set employees to 50",
                HttpResponse::ok().body(b"garbage".to_vec()).build(),
            );

            assert_eq!(model.inputs(), &inputs);
            assert_eq!(model.transcript.last().unwrap().content, FALLBACK_ANSWER);
        }

        #[test]
        fn valid_reply_is_applied() {
            let mut model = Model::default();

            round_trip(
                &mut model,
                "Set employees to 50",
                HttpResponse::ok()
                    .json(json!({
                        "answer": "Set employees to 50.",
                        "action": [["employees", 50]],
                        "confidence": 0.9,
                    }))
                    .build(),
            );

            assert_eq!(model.inputs().employees, 50);
            assert!(!model.is_typing());
            let last = model.transcript.last().unwrap();
            assert_eq!(last.role, ChatRole::Bot);
            assert_eq!(last.content, "Set employees to 50.");
        }
    }

    mod receive_reply {
        use super::*;

        #[test]
        fn reply_applies_action_and_appends_answer() {
            let mut model = Model::default();
            model.pending_replies = 1;

            let _ = handle(
                ChatEvent::ReplyReceived(Ok(reply(
                    "Set employees to 150",
                    Some(vec![("employees", json!(150))]),
                ))),
                &mut model,
            );

            assert_eq!(model.inputs().employees, 150);
            assert_eq!(model.outputs().annual_revenue, 1_500_000.0);
            assert!(!model.is_typing());

            let last = model.transcript.last().unwrap();
            assert_eq!(last.role, ChatRole::Bot);
            assert_eq!(last.content, "Set employees to 150");
            assert_eq!(last.confidence, Some(0.9));
        }

        #[test]
        fn transport_failure_falls_back_without_touching_inputs() {
            let mut model = Model::default();
            model.pending_replies = 1;
            let inputs = model.inputs().clone();
            let outputs = model.outputs().clone();

            let _ = handle(
                ChatEvent::ReplyReceived(Err("Chat failed: connection refused".to_string())),
                &mut model,
            );

            assert_eq!(model.inputs(), &inputs);
            assert_eq!(model.outputs(), &outputs);
            assert!(!model.is_typing());

            let last = model.transcript.last().unwrap();
            assert_eq!(last.content, FALLBACK_ANSWER);
            assert_eq!(last.confidence, Some(0.0));
        }

        #[test]
        fn reply_without_action_only_answers() {
            let mut model = Model::default();
            let inputs = model.inputs().clone();

            let _ = handle(
                ChatEvent::ReplyReceived(Ok(reply("Your ROI is 9%", None))),
                &mut model,
            );

            assert_eq!(model.inputs(), &inputs);
            assert_eq!(model.transcript.last().unwrap().content, "Your ROI is 9%");
        }

        #[test]
        fn unknown_fields_in_reply_are_reported() {
            let mut model = Model::default();

            let _ = handle(
                ChatEvent::ReplyReceived(Ok(reply(
                    "Done",
                    Some(vec![
                        ("employees", json!(50)),
                        ("bogusField", json!(1)),
                        ("totalInvestment", json!(100000)),
                    ]),
                ))),
                &mut model,
            );

            assert_eq!(model.inputs().employees, 50);
            assert_eq!(model.inputs().total_investment, 100_000);
            assert_eq!(model.diagnostics.len(), 1);
        }

        #[test]
        fn user_edit_during_request_is_overwritten_by_reply() {
            let mut model = Model::default();

            let _ = handle(
                ChatEvent::SendMessage {
                    message: "Set employees to 300".to_string(),
                },
                &mut model,
            );
            model.set_field("employees", "80").unwrap();
            model.set_field("industry", "Retail").unwrap();

            let _ = handle(
                ChatEvent::ReplyReceived(Ok(reply(
                    "Updated",
                    Some(vec![("employees", json!("300"))]),
                ))),
                &mut model,
            );

            assert_eq!(model.inputs().employees, 300);
            assert_eq!(model.inputs().industry, "Retail");
            assert!(!model.is_typing());
        }

        #[test]
        fn stray_reply_does_not_underflow_pending_count() {
            let mut model = Model::default();

            let _ = handle(
                ChatEvent::ReplyReceived(Err("late".to_string())),
                &mut model,
            );

            assert_eq!(model.pending_replies, 0);
        }
    }
}
