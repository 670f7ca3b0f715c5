// Sequence and round bookkeeping for one dance run
use super::types::Arrow;

/// State the driving loop carries between polls.
///
/// Only one sequence is ever being built. Its target length grows by one after
/// each replay and drops back to the initial length when a round ends.
#[derive(Debug, Clone)]
pub struct DanceSession {
    initial_len: usize,
    truncate: usize,
    rounds_target: u32,
    target_len: usize,
    sequence: Vec<Arrow>,
    rounds_played: u32,
    replays: u32,
    needs_navigation: bool,
}

impl DanceSession {
    pub fn new(initial_len: usize, truncate: usize, rounds_target: u32) -> Self {
        Self {
            initial_len,
            truncate,
            rounds_target,
            target_len: initial_len,
            sequence: Vec::with_capacity(initial_len + truncate),
            rounds_played: 0,
            replays: 0,
            needs_navigation: true,
        }
    }

    /// Append a detected arrow; returns true once the sequence is ready to replay
    pub fn record(&mut self, arrow: Arrow) -> bool {
        self.sequence.push(arrow);
        self.sequence.len() == self.target_len
    }

    /// Arrows captured so far for the current prompt
    pub fn pending(&self) -> &[Arrow] {
        &self.sequence
    }

    /// The current prompt has been replayed: grow the target and start over
    pub fn complete_replay(&mut self) {
        self.target_len += 1;
        self.replays += 1;
        self.sequence.clear();
    }

    /// True once `truncate` prompts have been replayed this round
    pub fn round_over(&self) -> bool {
        self.target_len - self.initial_len == self.truncate
    }

    /// Close the round; returns true when every requested round has been played
    pub fn finish_round(&mut self) -> bool {
        self.rounds_played += 1;
        self.target_len = self.initial_len;
        self.sequence.clear();
        self.needs_navigation = true;
        self.rounds_played >= self.rounds_target
    }

    pub fn needs_navigation(&self) -> bool {
        self.needs_navigation
    }

    pub fn mark_navigated(&mut self) {
        self.needs_navigation = false;
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn rounds_target(&self) -> u32 {
        self.rounds_target
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn replays(&self) -> u32 {
        self.replays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_fills_at_target_length() {
        let mut session = DanceSession::new(3, 5, 1);

        assert!(!session.record(Arrow::Up));
        assert!(!session.record(Arrow::Left));
        assert!(session.record(Arrow::Right));
        assert_eq!(session.pending(), [Arrow::Up, Arrow::Left, Arrow::Right]);

        session.complete_replay();
        assert!(session.pending().is_empty());
        assert_eq!(session.target_len(), 4);
    }

    #[test]
    fn test_round_ends_after_truncate_replays() {
        let mut session = DanceSession::new(3, 2, 1);
        let mut cycles = 0;

        while !session.round_over() {
            let target = session.target_len();
            for i in 0..target {
                let full = session.record(Arrow::ALL[i % 4]);
                assert_eq!(full, i + 1 == target);
            }
            session.complete_replay();
            cycles += 1;
        }

        // Target lengths 3 then 4
        assert_eq!(cycles, 2);
        assert_eq!(session.target_len(), 5);
    }

    #[test]
    fn test_finish_round_resets_and_counts() {
        let mut session = DanceSession::new(3, 2, 2);
        session.mark_navigated();
        session.record(Arrow::Down);
        session.complete_replay();

        assert!(!session.finish_round());
        assert_eq!(session.target_len(), 3);
        assert!(session.pending().is_empty());
        assert!(session.needs_navigation());

        assert!(session.finish_round());
        assert_eq!(session.rounds_played(), 2);
    }
}
