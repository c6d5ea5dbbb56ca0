pub mod handlers;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::IntoResponse,
};
use futures::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::error::RoomError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::{AppState, Room, RoomHandle};
use crate::types::{ParticipantId, RoomCode};

/// Sent before closing a connection that could not join
const JOIN_FAILED: &str = "This game may not exist, or is already started.";

/// How a new connection enters a room
#[derive(Debug, Clone)]
enum Entry {
    Create { nick: String },
    Join { code: String, nick: String },
}

/// `GET /ws/new/{nick}`: create a room and lead it
pub async fn ws_create_handler(
    ws: WebSocketUpgrade,
    Path(nick): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    tracing::info!("WebSocket create request from {:?}", nick);
    ws.on_upgrade(move |socket| handle_socket(socket, Entry::Create { nick }, state))
}

/// `GET /ws/{code}/{nick}`: join an existing room
pub async fn ws_join_handler(
    ws: WebSocketUpgrade,
    Path((code, nick)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    tracing::info!("WebSocket join request for room {} from {:?}", code, nick);
    ws.on_upgrade(move |socket| handle_socket(socket, Entry::Join { code, nick }, state))
}

async fn enter(state: &AppState, entry: Entry) -> Result<(RoomHandle, ParticipantId), RoomError> {
    match entry {
        Entry::Create { nick } => state.create_room(&nick).await,
        Entry::Join { code, nick } => {
            let code: RoomCode = code
                .trim()
                .parse()
                .map_err(|_| RoomError::InvalidRoomCode(code.clone()))?;
            state.join_room(code, &nick).await
        }
    }
}

async fn send_json(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::error!("Failed to serialize server message: {}", e);
            Ok(())
        }
    }
}

/// Handle one participant's connection for its whole lifetime
async fn handle_socket(socket: WebSocket, entry: Entry, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let (room, me) = match enter(&state, entry).await {
        Ok(joined) => joined,
        Err(e) => {
            tracing::info!("Connection refused: {}", e);
            let info = ServerMessage::Info(format!("{} ({})", JOIN_FAILED, e));
            let _ = send_json(&mut sender, &info).await;
            let _ = sender.send(Message::Close(None)).await;
            return;
        }
    };

    room.connect();
    let mut updates = room.subscribe();
    tracing::info!("{} connected to room {}", me, room.code());

    // The join already went out to everyone else; only we still need a view
    let first = ServerMessage::Game(room.project_for(&me).await);
    if send_json(&mut sender, &first).await.is_ok() {
        run_connection(&mut sender, &mut receiver, &mut updates, &me, &room).await;
    }

    tracing::info!("{} disconnected from room {}", me, room.code());
    state.leave_room(&room, &me).await;
}

/// Relay room updates to the participant and their messages to the room
/// until either side goes away
async fn run_connection(
    sender: &mut SplitSink<WebSocket, Message>,
    receiver: &mut SplitStream<WebSocket>,
    updates: &mut broadcast::Receiver<Arc<Room>>,
    me: &str,
    room: &RoomHandle,
) {
    loop {
        tokio::select! {
            update = updates.recv() => {
                match update {
                    Ok(snapshot) => {
                        let view = ServerMessage::Game(snapshot.project(me));
                        if send_json(sender, &view).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // The next snapshot carries the full state anyway
                        tracing::debug!("{} lagged behind by {} updates", me, skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received from {}: {}", me, text);

                        match serde_json::from_str::<ClientMessage>(text.as_str().trim()) {
                            Ok(client_msg) => {
                                if let Some(reply) =
                                    handlers::handle_message(client_msg, me, room).await
                                {
                                    if send_json(sender, &reply).await.is_err() {
                                        tracing::error!("Failed to send reply to {}", me);
                                        break;
                                    }
                                }
                            }
                            Err(e) => {
                                tracing::warn!("Failed to parse message from {}: {}", me, e);
                                let error = ServerMessage::Error {
                                    code: "PARSE_ERROR".to_string(),
                                    msg: format!("Invalid message format: {}", e),
                                };
                                let _ = send_json(sender, &error).await;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => break,
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error for {}: {}", me, e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }
}
