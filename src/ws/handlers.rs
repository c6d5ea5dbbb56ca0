//! WebSocket message dispatch
//!
//! Applies a decoded client message to the participant's room. Successful
//! actions reach every connection through the room's update channel; a
//! rejected action is answered to the sender only.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::RoomHandle;

/// Handle a client message and return an optional direct reply
pub async fn handle_message(
    msg: ClientMessage,
    participant: &str,
    room: &RoomHandle,
) -> Option<ServerMessage> {
    let result = match msg {
        ClientMessage::Card { text, answer } => {
            tracing::info!("Room {}: card from {}", room.code(), participant);
            room.apply(|r| r.submit_prompt(participant, &text, &answer)).await
        }

        ClientMessage::Response { text } => {
            room.apply(|r| r.submit_response(participant, &text)).await
        }

        ClientMessage::Vote { text } => room
            .apply(|r| r.cast_vote(participant, &text))
            .await
            .map(|_| ()),

        ClientMessage::GameUpdate { text: phase } => {
            tracing::info!(
                "Room {}: {} asks to move to {}",
                room.code(),
                participant,
                phase
            );
            room.apply(|r| r.force_advance(participant, phase)).await
        }

        ClientMessage::NextRound => room.apply(|r| r.next_round(participant)).await,
    };

    match result {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(
                "Room {}: rejected action from {}: {} ({})",
                room.code(),
                participant,
                e,
                e.code()
            );
            Some(ServerMessage::Alert(e.to_string()))
        }
    }
}
