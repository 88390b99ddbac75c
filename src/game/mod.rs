//! Game Logic Module
//!
//! All gameplay rules. 100% deterministic given a seed, a subject
//! queue, and injected time.
//!
//! ## Module Structure
//!
//! - `subject`: Subject profiles and question categories
//! - `catalog`: Static distractor pools for categorical attributes
//! - `question`: Multiple-choice question generation
//! - `lives`: Lives ledger and regeneration timer
//! - `scoring`: Score, streak, and answer counters
//! - `achievements`: Achievement catalog and threshold evaluation
//! - `events`: Session events for observers and logs
//! - `session`: The orchestrating state machine

pub mod subject;
pub mod catalog;
pub mod question;
pub mod lives;
pub mod scoring;
pub mod achievements;
pub mod events;
pub mod session;

// Re-export key types
pub use subject::{PlayerId, QuestionCategory, Subject, SubjectId};
pub use question::{GenerationImpossible, Question};
pub use lives::{LivesLedger, LivesPhase};
pub use scoring::{GuessStats, ScoreBoard};
pub use achievements::{AchievementDefinition, AchievementSet};
pub use events::{SessionEvent, SessionEventData};
pub use session::{AnswerOutcome, GameSession, SessionConfig, SessionError, SessionPhase};
