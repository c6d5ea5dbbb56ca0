use super::room::Room;
use crate::error::RoomError;
use crate::types::*;

impl Room {
    /// Vote for the response(s) whose text matches `text`, ignoring case.
    ///
    /// Every matching slot receives the vote, so identical texts share it.
    /// Returns how many slots were matched. Once every participant has voted
    /// the round closes and is scored.
    pub fn cast_vote(&mut self, voter: &str, text: &str) -> Result<usize, RoomError> {
        self.require_participant(voter)?;

        if self.phase != RoomPhase::Picking {
            return Err(RoomError::WrongPhase {
                action: "vote",
                phase: self.phase,
            });
        }

        if self.participant(voter).is_some_and(|p| p.has_voted) {
            return Err(RoomError::AlreadyVoted);
        }

        let text = text.trim();
        if !self.responses.iter().any(|r| r.matches(text)) {
            return Err(RoomError::NoMatchingResponse(text.to_string()));
        }

        let matched = self.record_vote(voter, |r| r.matches(text));
        tracing::debug!(
            "Room {}: {} voted for {:?} ({} slot(s))",
            self.code,
            voter,
            text,
            matched
        );

        Ok(matched)
    }

    /// Add `voter` to every response picked by `pick` and mark them as voted.
    ///
    /// Skips the phase checks so the leader's bootstrap vote on the canonical
    /// answer can go through the same path.
    pub(super) fn record_vote(&mut self, voter: &str, pick: impl Fn(&Response) -> bool) -> usize {
        let mut matched = 0;
        for response in self.responses.iter_mut() {
            if pick(&*response) {
                response.votes.push(voter.to_string());
                matched += 1;
            }
        }
        self.total_votes_cast += matched as u32;

        if let Some(participant) = self.participants.iter_mut().find(|p| p.id == voter) {
            participant.has_voted = true;
        }

        if self.phase == RoomPhase::Picking && self.participants.iter().all(|p| p.has_voted) {
            self.close_voting();
        }

        matched
    }
}
