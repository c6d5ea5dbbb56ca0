use crate::types::*;
use serde::{Deserialize, Serialize};

/// Inbound frames, `{"type": ..., "content": ...}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Leader writes the round's prompt and true answer
    Card { text: String, answer: String },
    /// A guess for the current card
    Response { text: String },
    /// Vote for the response with this text
    Vote { text: String },
    /// Leader closes the current phase early, naming the phase to move to
    GameUpdate { text: RoomPhase },
    /// Leader starts the next round
    NextRound,
}

/// Outbound frames, `{"type": ..., "content": ...}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The room as seen by the receiving participant
    Game(RoomView),
    /// An action by this participant was rejected
    Alert(String),
    /// Connection-level notice (e.g. the room can't be joined), followed by close
    Info(String),
    /// The frame couldn't be understood
    Error { code: String, msg: String },
}

/// Client-facing projection of a room for one viewer.
///
/// Fields that would reveal the correct answer are left out until the round
/// is over, except for the leader who wrote it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomView {
    pub code: RoomCode,
    pub phase: RoomPhase,
    pub participants: Vec<ParticipantView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardView>,
    /// Empty for non-leaders while responses are still being written
    pub responses: Vec<ResponseView>,
    pub responses_submitted: usize,
    pub total_votes_cast: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantView {
    pub id: ParticipantId,
    pub score: u32,
    pub role: Role,
    pub is_leader: bool,
    pub is_host: bool,
    pub has_voted: bool,
    /// Whether this entry is the viewer
    pub is_you: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardView {
    pub id: CardId,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseView {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<ParticipantId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<Vec<ParticipantId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_canonical_answer: Option<bool>,
}

/// Public room summary for the HTTP lookup endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomStatus {
    pub code: RoomCode,
    pub phase: RoomPhase,
    pub participants: usize,
    pub joinable: bool,
}
