//! WebSocket handlers for student and teacher sessions.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use ssmon_models::{StudentEvent, StudentPayload, TelemetryRecord};
use ssmon_vision::SubjectSession;

use crate::state::AppState;

/// Outbound queue depth per connection.
const WS_SEND_BUFFER_SIZE: usize = 32;

/// Whether the connection task should keep reading after one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    Continue,
    Disconnect,
}

/// Student WebSocket endpoint.
pub async fn ws_student(
    Path(student_id): Path<String>,
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_student_socket(socket, state, student_id))
}

/// Handle one student connection for its whole lifetime.
async fn handle_student_socket(socket: WebSocket, state: AppState, student_id: String) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<Message>(WS_SEND_BUFFER_SIZE);

    // Writer task drains the outbound queue into the socket.
    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    state.registry.connect_student(&student_id, tx).await;
    info!("student {student_id} connected");

    // The session dies with the connection; nothing survives a reconnect.
    let mut session = SubjectSession::new(
        state.detector.clone(),
        state.model.clone(),
        state.config.monitor.clone(),
    );

    while let Some(Ok(message)) = receiver.next().await {
        match message {
            Message::Text(text) => {
                let outcome =
                    process_student_message(&state, &mut session, &student_id, &text).await;
                if outcome == MessageOutcome::Disconnect {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    state.registry.disconnect_student(&student_id).await;
    info!("student {student_id} disconnected");
    writer.abort();
}

/// Process one inbound student message.
///
/// Malformed JSON is dropped and the connection stays open. A message
/// without an image is a keep-alive or name update. Only a failed feedback
/// write asks the caller to tear the connection down.
pub async fn process_student_message(
    state: &AppState,
    session: &mut SubjectSession,
    student_id: &str,
    text: &str,
) -> MessageOutcome {
    let payload: StudentPayload = match serde_json::from_str(text) {
        Ok(payload) => payload,
        Err(e) => {
            debug!("malformed message from {student_id} dropped: {e}");
            return MessageOutcome::Continue;
        }
    };

    if let Some(name) = payload.name.as_deref() {
        state.registry.update_student_name(student_id, name).await;
    }

    let Some(image) = payload.image else {
        return MessageOutcome::Continue;
    };

    // Strip the data-URL prefix up to the first comma
    let encoded = image.split_once(',').map(|(_, rest)| rest).unwrap_or(&image);

    let bytes = match BASE64.decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("frame payload from {student_id} is not base64, dropped: {e}");
            return MessageOutcome::Continue;
        }
    };

    state.registry.forward_frame(student_id, encoded).await;

    let now_ms = Utc::now().timestamp_millis();
    let analysis = session.analyze_frame(&bytes, now_ms);

    if let Err(e) = state
        .registry
        .send_feedback(student_id, &StudentEvent::feedback(analysis.clone()))
        .await
    {
        warn!("feedback to {student_id} failed: {e}");
        return MessageOutcome::Disconnect;
    }

    let name = state.registry.student_name(student_id).await;
    let record =
        TelemetryRecord::from_analysis(student_id, name, &analysis, now_ms as f64 / 1000.0);
    state.registry.broadcast_telemetry(record).await;

    MessageOutcome::Continue
}

/// Teacher WebSocket endpoint.
pub async fn ws_teacher(
    Path(class_id): Path<String>,
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_teacher_socket(socket, state, class_id))
}

/// Handle one teacher connection for its whole lifetime.
async fn handle_teacher_socket(socket: WebSocket, state: AppState, class_id: String) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<Message>(WS_SEND_BUFFER_SIZE);

    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let teacher_id = state.registry.connect_teacher(tx).await;
    info!("teacher connected to class {class_id}");

    while let Some(Ok(message)) = receiver.next().await {
        match message {
            Message::Text(text) => {
                // Inbound commands are reserved; parse and ignore, tolerating junk.
                if let Err(e) = serde_json::from_str::<serde_json::Value>(&text) {
                    debug!("unparseable teacher message ignored: {e}");
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    state.registry.disconnect_teacher(teacher_id).await;
    info!("teacher disconnected from class {class_id}");
    writer.abort();
}
