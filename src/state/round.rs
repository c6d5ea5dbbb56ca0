use super::room::Room;
use crate::error::RoomError;
use crate::types::*;
use rand::Rng;

impl Room {
    /// The leader writes this round's card.
    ///
    /// The answer goes straight into the response pool as the canonical
    /// answer and gets the leader's own vote, so it flows through the same
    /// response and vote paths as everyone else's.
    pub fn submit_prompt(
        &mut self,
        submitter: &str,
        prompt: &str,
        answer: &str,
    ) -> Result<(), RoomError> {
        self.require_leader(submitter)?;

        let card_open = match self.phase {
            RoomPhase::Creating => true,
            RoomPhase::Writing => self.card.is_none(),
            _ => false,
        };
        if !card_open {
            return Err(RoomError::WrongPhase {
                action: "write a card",
                phase: self.phase,
            });
        }

        let prompt = self.validate_text(prompt)?;
        let answer = self.validate_text(answer)?;

        let card = Card {
            id: rand::rng().random_range(0..=MAX_CARD_ID),
            prompt,
            answer: answer.clone(),
        };
        tracing::info!(
            "Room {}: {} wrote card {}: {:?}",
            self.code,
            submitter,
            card.id,
            card.prompt
        );
        self.card = Some(card);
        self.phase = RoomPhase::Writing;

        let leader = self.leader.clone();
        self.push_response(answer, leader.clone(), true);
        self.record_vote(&leader, |r| r.is_canonical_answer);

        Ok(())
    }

    /// Start the next round and hand leadership to the next participant in
    /// join order, wrapping around.
    ///
    /// Allowed once the game has started, from any phase, so a leader can
    /// abandon a stalled round. The lobby stays open until the first card.
    pub fn next_round(&mut self, caller: &str) -> Result<(), RoomError> {
        self.require_leader(caller)?;

        if self.phase == RoomPhase::Creating {
            return Err(RoomError::WrongPhase {
                action: "start the next round",
                phase: self.phase,
            });
        }

        let current = self
            .participants
            .iter()
            .position(|p| p.id == self.leader)
            .unwrap_or(0);
        let next = (current + 1) % self.participants.len();

        self.set_leader(next);
        self.reset_round();

        tracing::info!("Room {}: next round, {} leads", self.code, self.leader);
        Ok(())
    }

    /// Leader closes the current phase early.
    ///
    /// Only the immediate next phase is accepted: `Writing -> Picking` once a
    /// card exists, and `Picking -> Intermission` (which scores the round).
    pub fn force_advance(&mut self, caller: &str, to: RoomPhase) -> Result<(), RoomError> {
        self.require_leader(caller)?;

        match (self.phase, to) {
            (RoomPhase::Writing, RoomPhase::Picking) if self.card.is_some() => {
                tracing::info!(
                    "Room {}: {} closed writing with {}/{} responses",
                    self.code,
                    caller,
                    self.responses.len(),
                    self.participants.len()
                );
                self.start_picking();
            }
            (RoomPhase::Picking, RoomPhase::Intermission) => {
                tracing::info!("Room {}: {} closed voting early", self.code, caller);
                self.close_voting();
            }
            (from, to) => return Err(RoomError::InvalidTransition { from, to }),
        }

        Ok(())
    }
}
