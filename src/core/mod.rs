//! Core deterministic primitives.
//!
//! Seeded randomness and injected time form the foundation for
//! replayable sessions: same seed, same clock values, same game.

pub mod clock;
pub mod rng;

// Re-export core types
pub use clock::{Clock, ManualClock, SystemClock};
pub use rng::DeterministicRng;
