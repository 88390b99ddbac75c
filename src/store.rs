//! Snapshot Persistence Port
//!
//! The `SnapshotStore` trait and the persisted player projection.
//! Storage backends live outside the engine; `MemoryStore` ships for
//! tests and demos. The snapshot field names are the storage contract.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::subject::PlayerId;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Persisted projection of one player's progress.
///
/// Everything a session needs to resume: the lives count and timer,
/// the score state, the terminal flag, and the unlocked achievement
/// ids. Serializes with camelCase field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// Remaining lives
    pub lives: u32,

    /// Regeneration timer start, present iff a timer is running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regen_timestamp: Option<DateTime<Utc>>,

    /// Current streak
    pub streak: u32,

    /// Highest streak ever observed
    pub highest_streak: u32,

    /// Cumulative score
    pub score: u64,

    /// Correct answers in the current round
    pub correct_count: u32,

    /// Total answers in the current round
    pub total_count: u32,

    /// Whether the session is in its terminal phase
    pub game_over_flag: bool,

    /// Ids of unlocked achievements, sorted
    pub unlocked_achievement_ids: Vec<String>,
}

// =============================================================================
// STORE PORT
// =============================================================================

/// Failure from a snapshot storage backend.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum StoreError {
    /// The persisted snapshot could not be decoded.
    #[error("corrupt snapshot for player {player}: {reason}")]
    Corrupt {
        /// Player whose snapshot is unreadable
        player: String,
        /// Decoder diagnostic
        reason: String,
    },

    /// The backend failed to read or write.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Abstraction over a snapshot storage backend.
///
/// The engine calls `load` once at session construction and `save`
/// after every state-changing operation. The engine works on the typed
/// value; any serialization (JSON, a database row, ...) is the
/// implementation's concern, with failures mapped into [`StoreError`].
pub trait SnapshotStore {
    /// Fetch the snapshot for `player`. `None` if never saved.
    fn load(&self, player: PlayerId) -> Result<Option<PlayerSnapshot>, StoreError>;

    /// Persist the snapshot for `player`, replacing any existing one.
    fn save(&mut self, player: PlayerId, snapshot: &PlayerSnapshot) -> Result<(), StoreError>;
}

/// In-memory store backed by a BTreeMap.
///
/// Used by tests and the demo binary. Iteration order is deterministic,
/// which keeps dumps of its contents stable.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    snapshots: BTreeMap<PlayerId, PlayerSnapshot>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the store holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, player: PlayerId) -> Result<Option<PlayerSnapshot>, StoreError> {
        Ok(self.snapshots.get(&player).cloned())
    }

    fn save(&mut self, player: PlayerId, snapshot: &PlayerSnapshot) -> Result<(), StoreError> {
        self.snapshots.insert(player, snapshot.clone());
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
