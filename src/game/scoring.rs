//! Scoring & Streak Tracking
//!
//! Pure arithmetic over answer outcomes: points scale with the running
//! streak, a miss resets the streak, and the highest streak ever seen
//! only climbs.

use serde::{Deserialize, Serialize};

/// Default base points per correct answer.
pub const BASE_POINTS: u32 = 10;

/// Read-only statistics view handed to achievement evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessStats {
    /// Correct answers counted since the round began
    pub correct: u32,
    /// All answers counted since the round began
    pub total: u32,
    /// Current consecutive-correct run
    pub streak: u32,
    /// Highest streak ever observed
    pub highest_streak: u32,
}

/// Score, streak, and answer counters for one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Cumulative score across sessions
    score: u64,

    /// Consecutive correct answers since the last miss
    streak: u32,

    /// Highest streak ever observed (never decreases)
    highest_streak: u32,

    /// Correct answers this round
    correct: u32,

    /// Total answers this round
    total: u32,
}

impl ScoreBoard {
    /// Create a zeroed board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board from persisted parts.
    ///
    /// Repairs count relationships a foreign writer may have broken:
    /// highest_streak is raised to at least the current streak and
    /// total to at least the correct count.
    pub fn from_parts(score: u64, streak: u32, highest_streak: u32, correct: u32, total: u32) -> Self {
        Self {
            score,
            streak,
            highest_streak: highest_streak.max(streak),
            correct,
            total: total.max(correct),
        }
    }

    /// Cumulative score.
    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Current streak.
    #[inline]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Highest streak ever observed.
    #[inline]
    pub fn highest_streak(&self) -> u32 {
        self.highest_streak
    }

    /// Correct answers this round.
    #[inline]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Total answers this round.
    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Snapshot of the counters for achievement evaluation.
    pub fn stats(&self) -> GuessStats {
        GuessStats {
            correct: self.correct,
            total: self.total,
            streak: self.streak,
            highest_streak: self.highest_streak,
        }
    }

    /// Record a correct answer and return the points awarded.
    ///
    /// The multiplier uses the streak BEFORE this answer: streak 0 pays
    /// 1x base, streak 3 pays 4x. The streak then advances and the
    /// counters update.
    pub fn on_correct(&mut self, base_points: u32) -> u64 {
        let awarded = u64::from(base_points) * (u64::from(self.streak) + 1);
        self.score = self.score.saturating_add(awarded);
        self.streak += 1;
        self.highest_streak = self.highest_streak.max(self.streak);
        self.correct += 1;
        self.total += 1;
        awarded
    }

    /// Record an incorrect answer.
    ///
    /// Resets the streak and counts the attempt. Score and
    /// highest_streak stay untouched.
    pub fn on_incorrect(&mut self) {
        self.streak = 0;
        self.total += 1;
    }

    /// Start a new round: streak and per-round counters to zero.
    ///
    /// Score and highest_streak persist across rounds; the score is
    /// only cleared by an explicit [`ScoreBoard::reset_score`].
    pub fn begin_round(&mut self) {
        self.streak = 0;
        self.correct = 0;
        self.total = 0;
    }

    /// Explicitly wipe the cumulative score.
    pub fn reset_score(&mut self) {
        self.score = 0;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::DeterministicRng;

    #[test]
    fn test_streak_multiplier_sequence() {
        let mut board = ScoreBoard::new();

        assert_eq!(board.on_correct(10), 10);
        assert_eq!(board.on_correct(10), 20);
        assert_eq!(board.on_correct(10), 30);
        assert_eq!(board.on_correct(10), 40);

        assert_eq!(board.score(), 100);
        assert_eq!(board.streak(), 4);
        assert_eq!(board.highest_streak(), 4);
        assert_eq!(board.correct(), 4);
        assert_eq!(board.total(), 4);
    }

    #[test]
    fn test_incorrect_resets_streak_only() {
        let mut board = ScoreBoard::new();
        board.on_correct(10);
        board.on_correct(10);
        board.on_correct(10);
        let score_before = board.score();

        board.on_incorrect();

        assert_eq!(board.streak(), 0);
        assert_eq!(board.highest_streak(), 3);
        assert_eq!(board.score(), score_before);
        assert_eq!(board.correct(), 3);
        assert_eq!(board.total(), 4);
    }

    #[test]
    fn test_incorrect_at_zero_streak_is_harmless() {
        let mut board = ScoreBoard::new();
        board.on_incorrect();
        board.on_incorrect();

        assert_eq!(board.streak(), 0);
        assert_eq!(board.highest_streak(), 0);
        assert_eq!(board.total(), 2);
        assert_eq!(board.correct(), 0);
    }

    #[test]
    fn test_begin_round_preserves_score_and_highest() {
        let mut board = ScoreBoard::new();
        board.on_correct(10);
        board.on_correct(10);
        board.on_incorrect();

        board.begin_round();

        assert_eq!(board.streak(), 0);
        assert_eq!(board.correct(), 0);
        assert_eq!(board.total(), 0);
        assert_eq!(board.score(), 30);
        assert_eq!(board.highest_streak(), 2);
    }

    #[test]
    fn test_reset_score_touches_nothing_else() {
        let mut board = ScoreBoard::new();
        board.on_correct(10);
        board.on_correct(10);

        board.reset_score();

        assert_eq!(board.score(), 0);
        assert_eq!(board.streak(), 2);
        assert_eq!(board.highest_streak(), 2);
    }

    #[test]
    fn test_from_parts_repairs_relationships() {
        let board = ScoreBoard::from_parts(500, 7, 3, 10, 6);
        assert_eq!(board.highest_streak(), 7);
        assert_eq!(board.total(), 10);

        let board = ScoreBoard::from_parts(500, 2, 9, 4, 20);
        assert_eq!(board.highest_streak(), 9);
        assert_eq!(board.total(), 20);
    }

    #[test]
    fn test_counters_stay_consistent_over_random_play() {
        let mut rng = DeterministicRng::new(321);
        let mut board = ScoreBoard::new();
        let mut last_score = 0;

        for i in 1..=500u32 {
            if rng.next_u64() % 2 == 0 {
                board.on_correct(BASE_POINTS);
            } else {
                board.on_incorrect();
            }

            assert!(board.score() >= last_score);
            last_score = board.score();
            assert_eq!(board.total(), i);
            assert!(board.correct() <= board.total());
            assert!(board.highest_streak() >= board.streak());
        }
    }
}
