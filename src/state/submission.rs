use super::room::Room;
use crate::error::RoomError;
use crate::types::*;

impl Room {
    /// Submit a guess for the current card.
    ///
    /// One response per participant per round; the leader's canonical answer
    /// is already in the pool. When the last response arrives the room moves
    /// to `Picking` and the pool is shuffled.
    pub fn submit_response(&mut self, author: &str, text: &str) -> Result<(), RoomError> {
        self.require_participant(author)?;

        if self.phase != RoomPhase::Writing || self.card.is_none() {
            return Err(RoomError::WrongPhase {
                action: "submit a response",
                phase: self.phase,
            });
        }

        if self.is_leader(author) {
            return Err(RoomError::LeaderCannotRespond);
        }

        if self.has_responded(author) {
            return Err(RoomError::DuplicateResponse);
        }

        let text = self.validate_text(text)?;
        tracing::debug!("Room {}: response from {}", self.code, author);
        self.push_response(text, author.to_string(), false);

        Ok(())
    }

    /// Whether `id` already has a response in the current round
    pub fn has_responded(&self, id: &str) -> bool {
        self.responses.iter().any(|r| r.author == id)
    }
}
