use crate::config::RoomLimits;
use crate::error::RoomError;
use crate::types::*;
use rand::seq::SliceRandom;

/// One room's state machine.
///
/// Not internally synchronized: callers serialize access (see `RoomHandle`).
/// Every operation validates before mutating, so an `Err` leaves the room
/// untouched.
#[derive(Debug, Clone)]
pub struct Room {
    pub(super) code: RoomCode,
    pub(super) phase: RoomPhase,
    /// Join order, which is also the leader rotation order
    pub(super) participants: Vec<Participant>,
    pub(super) leader: ParticipantId,
    pub(super) card: Option<Card>,
    pub(super) responses: Vec<Response>,
    pub(super) total_votes_cast: u32,
    /// Set once the current round has been scored
    pub(super) scored: bool,
    pub(super) limits: RoomLimits,
}

impl Room {
    /// Create a room in `Creating` with `creator` as the pre-assigned leader
    pub fn new(code: RoomCode, creator: &str, limits: RoomLimits) -> Result<Self, RoomError> {
        let creator = validate_name(creator, &limits)?;

        Ok(Self {
            code,
            phase: RoomPhase::Creating,
            participants: vec![Participant::new(creator.clone(), true)],
            leader: creator,
            card: None,
            responses: Vec::new(),
            total_votes_cast: 0,
            scored: false,
            limits,
        })
    }

    pub fn code(&self) -> RoomCode {
        self.code
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn leader(&self) -> &ParticipantId {
        &self.leader
    }

    pub fn is_leader(&self, id: &str) -> bool {
        self.leader == id
    }

    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn total_votes_cast(&self) -> u32 {
        self.total_votes_cast
    }

    /// Whether new participants may still join
    pub fn is_joinable(&self) -> bool {
        self.phase == RoomPhase::Creating
            && self.participants.len() < self.limits.max_participants
    }

    pub(super) fn require_participant(&self, id: &str) -> Result<(), RoomError> {
        if self.participant(id).is_some() {
            Ok(())
        } else {
            Err(RoomError::UnknownParticipant(id.to_string()))
        }
    }

    pub(super) fn require_leader(&self, id: &str) -> Result<(), RoomError> {
        self.require_participant(id)?;
        if self.is_leader(id) {
            Ok(())
        } else {
            Err(RoomError::NotLeader)
        }
    }

    /// Trim and bound free text (prompts, answers, responses, vote picks)
    pub(super) fn validate_text(&self, text: &str) -> Result<String, RoomError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RoomError::EmptyText);
        }
        if text.chars().count() > self.limits.max_text_chars {
            return Err(RoomError::TextTooLong(self.limits.max_text_chars));
        }
        Ok(text.to_string())
    }

    /// Append a response, closing the writing phase once everyone is in
    pub(super) fn push_response(&mut self, text: String, author: ParticipantId, canonical: bool) {
        self.responses.push(Response::new(text, author, canonical));
        if self.all_responses_in() {
            self.start_picking();
        }
    }

    pub(super) fn all_responses_in(&self) -> bool {
        self.responses.len() == self.participants.len()
    }

    /// Writing -> Picking. Shuffles so the canonical answer's slot carries no
    /// information.
    pub(super) fn start_picking(&mut self) {
        self.responses.shuffle(&mut rand::rng());
        self.phase = RoomPhase::Picking;
        tracing::info!(
            "Room {}: all {} responses in, voting opens",
            self.code,
            self.responses.len()
        );
    }

    /// Picking -> Intermission, scoring the round before anyone can observe
    /// the new phase.
    pub(super) fn close_voting(&mut self) {
        self.phase = RoomPhase::Intermission;
        self.award_points();
    }

    /// Make `participants[index]` the only leader
    pub(super) fn set_leader(&mut self, index: usize) {
        for (i, participant) in self.participants.iter_mut().enumerate() {
            participant.role = if i == index {
                Role::Leader
            } else {
                Role::Regular
            };
        }
        self.leader = self.participants[index].id.clone();
    }

    /// Drop the current round and wait in `Writing` for the leader's card
    pub(super) fn reset_round(&mut self) {
        for participant in self.participants.iter_mut() {
            participant.has_voted = false;
        }
        self.card = None;
        self.responses.clear();
        self.total_votes_cast = 0;
        self.scored = false;
        self.phase = RoomPhase::Writing;
    }
}

/// Trim a nickname and check it is non-empty and within bounds
pub(super) fn validate_name(name: &str, limits: &RoomLimits) -> Result<String, RoomError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RoomError::InvalidName);
    }
    if name.chars().count() > limits.max_name_chars {
        return Err(RoomError::TextTooLong(limits.max_name_chars));
    }
    Ok(name.to_string())
}

/// Build a room with `names[0]` as leader and the rest joined in order
#[cfg(test)]
pub(crate) fn room_with(names: &[&str]) -> Room {
    let mut room = Room::new(4242, names[0], RoomLimits::default()).unwrap();
    for name in &names[1..] {
        room.add_participant(name).unwrap();
    }
    room
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_room_has_creator_as_leader() {
        let room = Room::new(7, "Alice", RoomLimits::default()).unwrap();

        assert_eq!(room.code(), 7);
        assert_eq!(room.phase(), RoomPhase::Creating);
        assert_eq!(room.leader(), "Alice");
        let alice = room.participant("Alice").unwrap();
        assert_eq!(alice.role, Role::Leader);
        assert!(alice.is_host);
        assert_eq!(alice.score, 0);
        assert!(room.card().is_none());
        assert!(room.responses().is_empty());
    }

    #[test]
    fn test_new_room_rejects_blank_creator() {
        let result = Room::new(7, "   ", RoomLimits::default());
        assert_eq!(result.unwrap_err(), RoomError::InvalidName);
    }

    #[test]
    fn test_creator_name_is_trimmed() {
        let room = Room::new(7, "  Alice ", RoomLimits::default()).unwrap();
        assert_eq!(room.leader(), "Alice");
    }

    #[test]
    fn test_joinable_only_while_creating() {
        let mut room = room_with(&["Alice", "Bob"]);
        assert!(room.is_joinable());

        room.submit_prompt("Alice", "Capital of France", "Paris").unwrap();
        assert!(!room.is_joinable());
    }

    #[test]
    fn test_validate_text_bounds() {
        let limits = RoomLimits {
            max_text_chars: 5,
            ..RoomLimits::default()
        };
        let room = Room::new(1, "Alice", limits).unwrap();

        assert_eq!(room.validate_text("  abc  ").unwrap(), "abc");
        assert_eq!(room.validate_text("   "), Err(RoomError::EmptyText));
        assert_eq!(room.validate_text("abcdef"), Err(RoomError::TextTooLong(5)));
        // Characters, not bytes
        assert_eq!(room.validate_text("ääääü").unwrap(), "ääääü");
    }
}
