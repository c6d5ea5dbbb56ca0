//! Recoverable, user-visible rejections of room operations.
//!
//! A rejected operation never mutates the room; the caller reports the error
//! to the offending participant only.

use crate::types::{RoomCode, RoomPhase};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("You are not the leader!")]
    NotLeader,

    #[error("Cannot {action} while the room is {phase}")]
    WrongPhase {
        action: &'static str,
        phase: RoomPhase,
    },

    #[error("Cannot move the room from {from} to {to}")]
    InvalidTransition { from: RoomPhase, to: RoomPhase },

    #[error("The name \"{0}\" is already taken in this room")]
    NameTaken(String),

    #[error("Names must not be empty")]
    InvalidName,

    #[error("The room is full ({0} participants)")]
    RoomFull(usize),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Room {0} does not exist")]
    RoomNotFound(RoomCode),

    #[error("\"{0}\" is not a room code")]
    InvalidRoomCode(String),

    #[error("You already submitted a response this round")]
    DuplicateResponse,

    #[error("The leader's answer is already in the pool")]
    LeaderCannotRespond,

    #[error("You already voted this round")]
    AlreadyVoted,

    #[error("No response matches \"{0}\"")]
    NoMatchingResponse(String),

    #[error("Text must not be empty")]
    EmptyText,

    #[error("Text is too long (max {0} characters)")]
    TextTooLong(usize),
}

impl RoomError {
    /// Stable machine-readable code for clients
    pub fn code(&self) -> &'static str {
        match self {
            RoomError::NotLeader => "NOT_LEADER",
            RoomError::WrongPhase { .. } => "WRONG_PHASE",
            RoomError::InvalidTransition { .. } => "INVALID_TRANSITION",
            RoomError::NameTaken(_) => "NAME_TAKEN",
            RoomError::InvalidName => "INVALID_NAME",
            RoomError::RoomFull(_) => "ROOM_FULL",
            RoomError::UnknownParticipant(_) => "UNKNOWN_PARTICIPANT",
            RoomError::RoomNotFound(_) => "ROOM_NOT_FOUND",
            RoomError::InvalidRoomCode(_) => "INVALID_ROOM_CODE",
            RoomError::DuplicateResponse => "DUPLICATE_RESPONSE",
            RoomError::LeaderCannotRespond => "LEADER_CANNOT_RESPOND",
            RoomError::AlreadyVoted => "ALREADY_VOTED",
            RoomError::NoMatchingResponse(_) => "NO_MATCHING_RESPONSE",
            RoomError::EmptyText => "EMPTY_TEXT",
            RoomError::TextTooLong(_) => "TEXT_TOO_LONG",
        }
    }
}
