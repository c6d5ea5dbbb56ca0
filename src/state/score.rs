use super::room::Room;
use crate::similarity::is_correct_guess;
use crate::types::*;
use std::collections::HashMap;

impl Room {
    /// Score the round. Runs once per round, and only in `Intermission`.
    ///
    /// - A guess close enough to the answer earns its author
    ///   `CORRECT_GUESS_POINTS`.
    /// - Every vote on a guess earns its author one point.
    /// - Every voter on the canonical answer except the first (the leader's
    ///   own bootstrap vote) earns `FOUND_ANSWER_POINTS`.
    /// - If only the bootstrap vote landed on the canonical answer, the leader
    ///   earns `STUMPED_EVERYONE_POINTS`.
    ///
    /// Only scores change; phase, responses and votes are left alone.
    /// Returns whether scoring ran.
    pub(super) fn award_points(&mut self) -> bool {
        if self.phase != RoomPhase::Intermission || self.scored {
            return false;
        }
        let Some(card) = &self.card else {
            return false;
        };

        let mut awards: HashMap<&str, u32> = HashMap::new();

        for response in &self.responses {
            if response.author != self.leader {
                if is_correct_guess(&response.text, &card.answer) {
                    *awards.entry(&response.author).or_insert(0) += CORRECT_GUESS_POINTS;
                }
                *awards.entry(&response.author).or_insert(0) += response.votes.len() as u32;
            } else if response.is_canonical_answer {
                match response.votes.len() {
                    0 => {}
                    1 => {
                        *awards.entry(&self.leader).or_insert(0) += STUMPED_EVERYONE_POINTS;
                    }
                    _ => {
                        for voter in &response.votes[1..] {
                            *awards.entry(voter).or_insert(0) += FOUND_ANSWER_POINTS;
                        }
                    }
                }
            }
        }

        let awards: HashMap<String, u32> = awards
            .into_iter()
            .filter(|(_, points)| *points > 0)
            .map(|(id, points)| (id.to_string(), points))
            .collect();

        for participant in self.participants.iter_mut() {
            if let Some(points) = awards.get(&participant.id) {
                participant.score += points;
            }
        }
        self.scored = true;

        tracing::info!("Room {}: round scored, awards: {:?}", self.code, awards);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::room::room_with;

    fn score_of(room: &Room, id: &str) -> u32 {
        room.participant(id).unwrap().score
    }

    #[test]
    fn test_decoy_votes_score_for_author() {
        let mut room = room_with(&["Alice", "Bob", "Carol"]);
        room.submit_prompt("Alice", "Capital of France", "Paris").unwrap();
        room.submit_response("Bob", "Lyon").unwrap();
        room.submit_response("Carol", "Marseille").unwrap();
        room.cast_vote("Bob", "Marseille").unwrap();
        room.cast_vote("Carol", "Lyon").unwrap();

        assert_eq!(room.phase(), RoomPhase::Intermission);
        assert_eq!(score_of(&room, "Bob"), 1);
        assert_eq!(score_of(&room, "Carol"), 1);
        // Nobody found Paris
        assert_eq!(score_of(&room, "Alice"), STUMPED_EVERYONE_POINTS);
    }

    #[test]
    fn test_finding_the_answer_scores_for_voters() {
        let mut room = room_with(&["Alice", "Bob", "Carol"]);
        room.submit_prompt("Alice", "Capital of France", "Paris").unwrap();
        room.submit_response("Bob", "Lyon").unwrap();
        room.submit_response("Carol", "Marseille").unwrap();
        room.cast_vote("Bob", "Paris").unwrap();
        room.cast_vote("Carol", "Paris").unwrap();

        assert_eq!(score_of(&room, "Bob"), FOUND_ANSWER_POINTS);
        assert_eq!(score_of(&room, "Carol"), FOUND_ANSWER_POINTS);
        assert_eq!(score_of(&room, "Alice"), 0);
    }

    #[test]
    fn test_colliding_guess_scenario() {
        // Carol's guess collides with the canonical answer text
        let mut room = room_with(&["Alice", "Bob", "Carol"]);
        room.submit_prompt("Alice", "Capital of France", "Paris").unwrap();
        room.submit_response("Bob", "Lyon").unwrap();
        room.submit_response("Carol", "Paris").unwrap();
        room.cast_vote("Bob", "Paris").unwrap();
        room.cast_vote("Carol", "Paris").unwrap();

        let canonical = room
            .responses()
            .iter()
            .find(|r| r.is_canonical_answer)
            .unwrap();
        assert_eq!(canonical.votes.len(), 3);

        assert_eq!(score_of(&room, "Alice"), 0);
        assert_eq!(score_of(&room, "Bob"), FOUND_ANSWER_POINTS);
        // Correct guess + two votes on her slot + found the answer
        assert_eq!(
            score_of(&room, "Carol"),
            CORRECT_GUESS_POINTS + 2 + FOUND_ANSWER_POINTS
        );
    }

    #[test]
    fn test_close_guess_earns_bonus() {
        let mut room = room_with(&["Alice", "Bob"]);
        room.submit_prompt("Alice", "First US president", "Washington").unwrap();
        room.submit_response("Bob", "washingtom").unwrap();
        room.cast_vote("Bob", "Washington").unwrap();

        assert_eq!(score_of(&room, "Bob"), CORRECT_GUESS_POINTS + FOUND_ANSWER_POINTS);
    }

    #[test]
    fn test_scoring_runs_once() {
        let mut room = room_with(&["Alice", "Bob"]);
        room.submit_prompt("Alice", "Prompt", "Answer").unwrap();
        room.submit_response("Bob", "Guess").unwrap();
        room.cast_vote("Bob", "Guess").unwrap();
        let after_first = score_of(&room, "Bob");

        assert!(!room.award_points());
        assert_eq!(score_of(&room, "Bob"), after_first);
    }

    #[test]
    fn test_scoring_is_noop_outside_intermission() {
        let mut room = room_with(&["Alice", "Bob"]);
        room.submit_prompt("Alice", "Prompt", "Answer").unwrap();

        assert!(!room.award_points());
        assert!(room.participants().iter().all(|p| p.score == 0));
    }

    #[test]
    fn test_scoring_leaves_votes_and_responses_alone() {
        let mut room = room_with(&["Alice", "Bob"]);
        room.submit_prompt("Alice", "Prompt", "Answer").unwrap();
        room.submit_response("Bob", "Guess").unwrap();
        room.cast_vote("Bob", "Answer").unwrap();

        assert_eq!(room.phase(), RoomPhase::Intermission);
        assert_eq!(room.responses().len(), 2);
        assert_eq!(room.total_votes_cast(), 2);
    }

    #[test]
    fn test_canonical_without_votes_awards_nothing() {
        let mut room = room_with(&["Alice", "Bob"]);
        room.submit_prompt("Alice", "Prompt", "Answer").unwrap();
        room.submit_response("Bob", "Guess").unwrap();
        // Strip the bootstrap vote to reach the degenerate case
        for response in room.responses.iter_mut() {
            response.votes.clear();
        }
        room.phase = RoomPhase::Intermission;

        assert!(room.award_points());
        assert_eq!(score_of(&room, "Alice"), 0);
        assert_eq!(score_of(&room, "Bob"), 0);
    }

    #[test]
    fn test_scores_accumulate_across_rounds() {
        let mut room = room_with(&["Alice", "Bob"]);

        room.submit_prompt("Alice", "Prompt 1", "Answer").unwrap();
        room.submit_response("Bob", "Guess").unwrap();
        room.cast_vote("Bob", "Guess").unwrap();
        assert_eq!(score_of(&room, "Bob"), 1);

        room.next_round("Alice").unwrap();
        room.submit_prompt("Bob", "Prompt 2", "Truth").unwrap();
        room.submit_response("Alice", "Lie").unwrap();
        room.cast_vote("Alice", "Truth").unwrap();

        assert_eq!(score_of(&room, "Bob"), 1);
        assert_eq!(score_of(&room, "Alice"), STUMPED_EVERYONE_POINTS + FOUND_ANSWER_POINTS);
    }
}
