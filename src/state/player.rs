use super::room::{validate_name, Room};
use crate::error::RoomError;
use crate::types::*;

impl Room {
    /// Add a participant to the lobby.
    ///
    /// Only allowed while the room is `Creating`. Names are unique per room,
    /// compared case-insensitively.
    pub fn add_participant(&mut self, name: &str) -> Result<ParticipantId, RoomError> {
        if self.phase != RoomPhase::Creating {
            return Err(RoomError::WrongPhase {
                action: "join",
                phase: self.phase,
            });
        }

        let name = validate_name(name, &self.limits)?;

        if self.participants.len() >= self.limits.max_participants {
            return Err(RoomError::RoomFull(self.limits.max_participants));
        }

        let lowered = name.to_lowercase();
        if self
            .participants
            .iter()
            .any(|p| p.id.to_lowercase() == lowered)
        {
            return Err(RoomError::NameTaken(name));
        }

        self.participants.push(Participant::new(name.clone(), false));
        tracing::info!(
            "Room {}: {} joined ({} participants)",
            self.code,
            name,
            self.participants.len()
        );

        Ok(name)
    }

    /// Remove a participant who left.
    ///
    /// A departing leader hands over to the next participant in join order;
    /// if a round was under way it is abandoned, since its card left with
    /// them. Otherwise the departing participant's pending response is
    /// withdrawn and the round advances if everyone still here is done.
    pub fn remove_participant(&mut self, id: &str) -> Result<(), RoomError> {
        let index = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| RoomError::UnknownParticipant(id.to_string()))?;

        self.participants.remove(index);
        tracing::info!(
            "Room {}: {} left ({} participants)",
            self.code,
            id,
            self.participants.len()
        );

        if self.participants.is_empty() {
            return Ok(());
        }

        if self.is_leader(id) {
            self.set_leader(index % self.participants.len());
            if matches!(self.phase, RoomPhase::Writing | RoomPhase::Picking) {
                self.reset_round();
                tracing::info!(
                    "Room {}: round abandoned, {} now leads",
                    self.code,
                    self.leader
                );
            }
            return Ok(());
        }

        match self.phase {
            RoomPhase::Writing => {
                self.responses.retain(|r| r.author != id);
                if self.card.is_some() && self.all_responses_in() {
                    self.start_picking();
                }
            }
            RoomPhase::Picking => {
                if self.participants.iter().all(|p| p.has_voted) {
                    self.close_voting();
                }
            }
            RoomPhase::Creating | RoomPhase::Intermission => {}
        }

        Ok(())
    }
}
