//! Session Events
//!
//! Events generated while a session runs, buffered for the caller to
//! drain. A presentation layer can render a whole turn from the event
//! stream without re-querying session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::question::GenerationImpossible;
use crate::game::subject::{QuestionCategory, SubjectId};

/// Session event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEventData {
    /// A round began with a queue of subjects
    RoundStarted {
        /// Subjects queued at start
        subjects_queued: u32,
    },

    /// A new question became active
    QuestionReady {
        /// Subject the question is about
        subject_id: SubjectId,
        /// Category asked about
        category: QuestionCategory,
    },

    /// An answer was scored
    AnswerScored {
        /// Whether the submitted choice was correct
        correct: bool,
        /// Points awarded (zero for a miss)
        points: u64,
        /// Streak after scoring
        streak: u32,
        /// Cumulative score after scoring
        score: u64,
    },

    /// A miss ended a running streak
    StreakBroken {
        /// Streak length that was lost
        lost_streak: u32,
    },

    /// A life was consumed
    LifeLost {
        /// Lives remaining after the loss
        remaining: u32,
    },

    /// Lives hit zero and the regeneration timer began
    RegenerationStarted {
        /// Timer start instant
        started_at: DateTime<Utc>,
    },

    /// An external reward granted a life
    LifeGranted {
        /// Lives after the grant
        lives: u32,
    },

    /// The regeneration period elapsed and all lives came back
    LivesRestored {
        /// Lives after restoration (the maximum)
        lives: u32,
    },

    /// An achievement unlocked
    AchievementUnlocked {
        /// Stable achievement id
        id: String,
        /// Display name
        name: String,
    },

    /// A subject could not yield a question and was skipped
    SubjectSkipped {
        /// Subject that was skipped
        subject_id: SubjectId,
        /// Why generation failed
        reason: GenerationImpossible,
    },

    /// The subject queue ran out; the caller should supply more
    SubjectsExhausted,

    /// The session entered its terminal phase
    GameOver {
        /// Score at the end
        final_score: u64,
    },
}

/// A session event stamped with the answer ordinal it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Answers submitted when the event fired (0 before the first)
    pub round: u32,

    /// Event data
    pub data: SessionEventData,
}

impl SessionEvent {
    /// Create a new event.
    pub fn new(round: u32, data: SessionEventData) -> Self {
        Self { round, data }
    }

    /// Create round started event.
    pub fn round_started(round: u32, subjects_queued: u32) -> Self {
        Self::new(round, SessionEventData::RoundStarted { subjects_queued })
    }

    /// Create question ready event.
    pub fn question_ready(round: u32, subject_id: SubjectId, category: QuestionCategory) -> Self {
        Self::new(
            round,
            SessionEventData::QuestionReady {
                subject_id,
                category,
            },
        )
    }

    /// Create answer scored event.
    pub fn answer_scored(round: u32, correct: bool, points: u64, streak: u32, score: u64) -> Self {
        Self::new(
            round,
            SessionEventData::AnswerScored {
                correct,
                points,
                streak,
                score,
            },
        )
    }

    /// Create streak broken event.
    pub fn streak_broken(round: u32, lost_streak: u32) -> Self {
        Self::new(round, SessionEventData::StreakBroken { lost_streak })
    }

    /// Create life lost event.
    pub fn life_lost(round: u32, remaining: u32) -> Self {
        Self::new(round, SessionEventData::LifeLost { remaining })
    }

    /// Create regeneration started event.
    pub fn regeneration_started(round: u32, started_at: DateTime<Utc>) -> Self {
        Self::new(round, SessionEventData::RegenerationStarted { started_at })
    }

    /// Create life granted event.
    pub fn life_granted(round: u32, lives: u32) -> Self {
        Self::new(round, SessionEventData::LifeGranted { lives })
    }

    /// Create lives restored event.
    pub fn lives_restored(round: u32, lives: u32) -> Self {
        Self::new(round, SessionEventData::LivesRestored { lives })
    }

    /// Create achievement unlocked event.
    pub fn achievement_unlocked(round: u32, id: &str, name: &str) -> Self {
        Self::new(
            round,
            SessionEventData::AchievementUnlocked {
                id: id.to_string(),
                name: name.to_string(),
            },
        )
    }

    /// Create subject skipped event.
    pub fn subject_skipped(round: u32, subject_id: SubjectId, reason: GenerationImpossible) -> Self {
        Self::new(
            round,
            SessionEventData::SubjectSkipped { subject_id, reason },
        )
    }

    /// Create subjects exhausted event.
    pub fn subjects_exhausted(round: u32) -> Self {
        Self::new(round, SessionEventData::SubjectsExhausted)
    }

    /// Create game over event.
    pub fn game_over(round: u32, final_score: u64) -> Self {
        Self::new(round, SessionEventData::GameOver { final_score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_round_stamping() {
        let event = SessionEvent::answer_scored(3, true, 40, 4, 100);
        assert_eq!(event.round, 3);
        assert_eq!(
            event.data,
            SessionEventData::AnswerScored {
                correct: true,
                points: 40,
                streak: 4,
                score: 100,
            }
        );
    }

    #[test]
    fn test_skip_reason_is_carried() {
        let subject_id = SubjectId::new([4; 16]);
        let event =
            SessionEvent::subject_skipped(0, subject_id, GenerationImpossible::NoAskableAttributes);

        match event.data {
            SessionEventData::SubjectSkipped { reason, .. } => {
                assert_eq!(reason, GenerationImpossible::NoAskableAttributes);
            }
            other => panic!("unexpected event data: {:?}", other),
        }
    }

    #[test]
    fn test_events_serialize() {
        let event = SessionEvent::game_over(12, 340);
        let json = serde_json::to_string(&event).unwrap();
        let back: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
