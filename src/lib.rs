//! # Hunch Game Engine
//!
//! Deterministic single-player trivia session engine: guess facts about
//! people from multiple-choice questions, on a budget of lives.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HUNCH ENGINE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Deterministic primitives                │
//! │  ├── rng.rs        - Deterministic Xorshift128+ PRNG         │
//! │  └── clock.rs      - Wall-clock port (system / manual)       │
//! │                                                              │
//! │  game/             - Gameplay rules (deterministic)          │
//! │  ├── subject.rs    - Subject profiles and categories         │
//! │  ├── catalog.rs    - Static distractor pools                 │
//! │  ├── question.rs   - Multiple-choice generation              │
//! │  ├── lives.rs      - Lives ledger and regeneration           │
//! │  ├── scoring.rs    - Score, streak, answer counters          │
//! │  ├── achievements.rs - Threshold evaluation                  │
//! │  ├── events.rs     - Session events                          │
//! │  └── session.rs    - Orchestrating state machine             │
//! │                                                              │
//! │  store.rs          - Snapshot persistence port               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No system time reads outside the injected clock port
//! - No HashMap (uses BTreeMap/BTreeSet for sorted iteration)
//! - All randomness from seeded Xorshift128+
//! - Numeric distractors round once, then use integer arithmetic
//!
//! Given the same player id, session nonce, subject queue, and clock
//! readings, a session produces **identical questions, scores, and
//! snapshots** on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod store;

// Re-export commonly used types
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::rng::DeterministicRng;
pub use crate::game::session::{AnswerOutcome, GameSession, SessionConfig, SessionError, SessionPhase};
pub use crate::game::subject::{PlayerId, QuestionCategory, Subject, SubjectId};
pub use crate::game::question::Question;
pub use crate::store::{MemoryStore, PlayerSnapshot, SnapshotStore, StoreError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum lives a player holds
pub const MAX_LIVES: u32 = crate::game::lives::MAX_LIVES;

/// Seconds after which depleted lives restore (2 hours)
pub const REGEN_PERIOD_SECS: i64 = crate::game::lives::REGEN_PERIOD_SECS;

/// Base points per correct answer, before streak scaling
pub const BASE_POINTS: u32 = crate::game::scoring::BASE_POINTS;

/// Distractor draws allowed per question before generation fails closed
pub const DISTRACTOR_RETRY_BUDGET: u32 = crate::game::question::DISTRACTOR_RETRY_BUDGET;
