//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::error::AppError;
use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "academy_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state), fields(session = tracing::field::Empty))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  let session = Uuid::new_v4().to_string();
  tracing::Span::current().record("session", session.as_str());
  info!(target: "academy_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "academy_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state, &session)
          }
          Err(e) => ServerWsMessage::Error { kind: "invalid_json".into(), message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "kind": "serialization", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "academy_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "academy_backend", "WebSocket disconnected");
}

fn to_error(e: AppError) -> ServerWsMessage {
  ServerWsMessage::Error { kind: e.kind().into(), message: e.to_string() }
}

fn handle_client_ws(msg: ClientWsMessage, state: &AppState, session: &str) -> ServerWsMessage {
  let reply = match msg {
    ClientWsMessage::Ping => Ok(ServerWsMessage::Pong { session: session.to_string() }),
    ClientWsMessage::Question { module, question } =>
      render_question(state, module, question).map(|question| ServerWsMessage::Question { question }),
    ClientWsMessage::Answer { module, question, slot } =>
      grade_answer(state, module, question, slot).map(|result| ServerWsMessage::AnswerResult { result }),
    ClientWsMessage::Score { levels } =>
      score_levels(&levels).map(|score| ServerWsMessage::Score { score }),
    ClientWsMessage::Canonicalize { value } =>
      canonicalize_document(&value).map(|canonical| ServerWsMessage::Canonical { canonical }),
  };
  reply.unwrap_or_else(to_error)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Prompts;
  use crate::seeds::seed_modules;

  fn dispatch(raw: &str) -> serde_json::Value {
    let state = AppState::with_parts(seed_modules(), Prompts::default(), None);
    let msg: ClientWsMessage = serde_json::from_str(raw).unwrap();
    serde_json::to_value(handle_client_ws(msg, &state, "s1")).unwrap()
  }

  #[test]
  fn ping_echoes_session() {
    let out = dispatch(r#"{"type":"ping"}"#);
    assert_eq!(out["type"], "pong");
    assert_eq!(out["session"], "s1");
  }

  #[test]
  fn score_message_flattens() {
    let out = dispatch(r#"{"type":"score","levels":[0,0,0,0,0,0,0,0]}"#);
    assert_eq!(out["type"], "score");
    assert_eq!(out["score"], 0);
    assert_eq!(out["band"], "nascent");
  }

  #[test]
  fn errors_carry_kind() {
    let out = dispatch(r#"{"type":"answer","module":0,"question":0,"slot":0}"#);
    assert_eq!(out["type"], "error");
    assert_eq!(out["kind"], "invalid_input");
  }

  #[test]
  fn canonicalize_message() {
    let out = dispatch(r#"{"type":"canonicalize","value":{"b":2,"a":1}}"#);
    assert_eq!(out["type"], "canonical");
    assert_eq!(serde_json::to_string(&out["canonical"]).unwrap(), r#"{"a":1,"b":2}"#);
  }
}
