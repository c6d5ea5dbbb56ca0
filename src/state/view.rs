use super::room::Room;
use crate::protocol::{CardView, ParticipantView, ResponseView, RoomStatus, RoomView};
use crate::types::*;

impl Room {
    /// Project the room for `viewer`.
    ///
    /// The leader sees everything. Everyone else sees the answer, authors,
    /// votes and the canonical flag only once the round is in `Intermission`;
    /// before that they get bare response texts while picking and nothing at
    /// all while responses are being written.
    pub fn project(&self, viewer: &str) -> RoomView {
        let revealed = self.phase == RoomPhase::Intermission || self.is_leader(viewer);

        let participants = self
            .participants
            .iter()
            .map(|p| ParticipantView {
                id: p.id.clone(),
                score: p.score,
                role: p.role,
                is_leader: self.is_leader(&p.id),
                is_host: p.is_host,
                has_voted: p.has_voted,
                is_you: p.id == viewer,
            })
            .collect();

        let card = self.card.as_ref().map(|c| CardView {
            id: c.id,
            prompt: c.prompt.clone(),
            answer: revealed.then(|| c.answer.clone()),
        });

        let responses = if revealed {
            self.responses
                .iter()
                .map(|r| ResponseView {
                    text: r.text.clone(),
                    author: Some(r.author.clone()),
                    votes: Some(r.votes.clone()),
                    is_canonical_answer: Some(r.is_canonical_answer),
                })
                .collect()
        } else if self.phase == RoomPhase::Picking {
            self.responses
                .iter()
                .map(|r| ResponseView {
                    text: r.text.clone(),
                    author: None,
                    votes: None,
                    is_canonical_answer: None,
                })
                .collect()
        } else {
            Vec::new()
        };

        RoomView {
            code: self.code,
            phase: self.phase,
            participants,
            card,
            responses,
            responses_submitted: self.responses.len(),
            total_votes_cast: self.total_votes_cast,
        }
    }

    pub fn status(&self) -> RoomStatus {
        RoomStatus {
            code: self.code,
            phase: self.phase,
            participants: self.participants.len(),
            joinable: self.is_joinable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::room::room_with;

    fn writing_room() -> Room {
        let mut room = room_with(&["Alice", "Bob", "Carol"]);
        room.submit_prompt("Alice", "Capital of France", "Paris").unwrap();
        room.submit_response("Bob", "Lyon").unwrap();
        room
    }

    #[test]
    fn test_participants_listed_for_everyone() {
        let room = writing_room();
        let view = room.project("Bob");

        assert_eq!(view.code, room.code());
        assert_eq!(view.phase, RoomPhase::Writing);
        assert_eq!(view.participants.len(), 3);
        let alice = &view.participants[0];
        assert!(alice.is_leader);
        assert_eq!(alice.role, Role::Leader);
        assert!(!alice.is_you);
        assert!(view.participants[1].is_you);
    }

    #[test]
    fn test_non_leader_writing_sees_no_responses() {
        let room = writing_room();
        let view = room.project("Bob");

        let card = view.card.unwrap();
        assert_eq!(card.prompt, "Capital of France");
        assert_eq!(card.answer, None);
        assert!(view.responses.is_empty());
        assert_eq!(view.responses_submitted, 2);
    }

    #[test]
    fn test_leader_sees_everything() {
        let room = writing_room();
        let view = room.project("Alice");

        assert_eq!(view.card.unwrap().answer.as_deref(), Some("Paris"));
        assert_eq!(view.responses.len(), 2);
        assert!(view
            .responses
            .iter()
            .any(|r| r.is_canonical_answer == Some(true)));
    }

    #[test]
    fn test_picking_hides_authors_votes_and_flag() {
        let mut room = writing_room();
        room.submit_response("Carol", "Marseille").unwrap();
        assert_eq!(room.phase(), RoomPhase::Picking);

        let view = room.project("Carol");

        assert_eq!(view.card.unwrap().answer, None);
        assert_eq!(view.responses.len(), 3);
        for response in &view.responses {
            assert!(response.author.is_none());
            assert!(response.votes.is_none());
            assert!(response.is_canonical_answer.is_none());
        }
        let json = serde_json::to_string(&room.project("Carol")).unwrap();
        assert!(!json.contains("is_canonical_answer"));
        assert!(!json.contains("\"answer\""));
    }

    #[test]
    fn test_intermission_reveals_to_all() {
        let mut room = writing_room();
        room.submit_response("Carol", "Marseille").unwrap();
        room.cast_vote("Bob", "Paris").unwrap();
        room.cast_vote("Carol", "Lyon").unwrap();
        assert_eq!(room.phase(), RoomPhase::Intermission);

        let view = room.project("Bob");

        assert_eq!(view.card.unwrap().answer.as_deref(), Some("Paris"));
        let canonical = view
            .responses
            .iter()
            .find(|r| r.is_canonical_answer == Some(true))
            .unwrap();
        assert_eq!(
            canonical.votes.as_deref(),
            Some(&["Alice".to_string(), "Bob".to_string()][..])
        );
        let bob = view.participants.iter().find(|p| p.id == "Bob").unwrap();
        // Found the answer, and Carol fell for "Lyon"
        assert_eq!(bob.score, FOUND_ANSWER_POINTS + 1);
    }

    #[test]
    fn test_status() {
        let room = room_with(&["Alice", "Bob"]);
        let status = room.status();

        assert_eq!(status.participants, 2);
        assert_eq!(status.phase, RoomPhase::Creating);
        assert!(status.joinable);
    }
}
