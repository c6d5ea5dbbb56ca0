use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque ID types for type safety
pub type RoomCode = u32;
pub type CardId = u32;
/// Participants are identified by their (room-unique) nickname
pub type ParticipantId = String;

/// Largest room code handed out (codes are `0..=MAX_ROOM_CODE`)
pub const MAX_ROOM_CODE: RoomCode = 999_999;
/// Largest card id handed out
pub const MAX_CARD_ID: CardId = 9_999;

/// Points for a guess that is close enough to the correct answer
pub const CORRECT_GUESS_POINTS: u32 = 3;
/// Points for each participant that found the canonical answer
pub const FOUND_ANSWER_POINTS: u32 = 2;
/// Points for the leader when nobody found the canonical answer
pub const STUMPED_EVERYONE_POINTS: u32 = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoomPhase {
    /// Lobby: participants can still join, leader has not written a card yet
    Creating,
    /// Card is set (or about to be); participants write their responses
    Writing,
    /// Responses are shuffled; participants vote
    Picking,
    /// Round scored; waiting for the leader to start the next round
    Intermission,
}

impl fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomPhase::Creating => "creating",
            RoomPhase::Writing => "writing",
            RoomPhase::Picking => "picking",
            RoomPhase::Intermission => "intermission",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Leader,
    Regular,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub role: Role,
    pub score: u32,
    pub has_voted: bool,
    /// Whether this participant created the room
    pub is_host: bool,
}

impl Participant {
    pub fn new(id: ParticipantId, is_host: bool) -> Self {
        Self {
            id,
            role: if is_host { Role::Leader } else { Role::Regular },
            score: 0,
            has_voted: false,
            is_host,
        }
    }
}

/// The leader's prompt and the true answer for one round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub prompt: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub text: String,
    pub author: ParticipantId,
    /// Voters in the order their votes arrived
    pub votes: Vec<ParticipantId>,
    pub is_canonical_answer: bool,
}

impl Response {
    pub fn new(text: String, author: ParticipantId, is_canonical_answer: bool) -> Self {
        Self {
            text,
            author,
            votes: Vec::new(),
            is_canonical_answer,
        }
    }

    /// Case-insensitive match used for text-based voting
    pub fn matches(&self, text: &str) -> bool {
        self.text.to_lowercase() == text.to_lowercase()
    }
}
