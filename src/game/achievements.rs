//! Achievement Evaluation
//!
//! Static catalog of threshold milestones plus the side-effect-free
//! evaluator that reports which ones newly unlock for a given set of
//! statistics. Unlock sets only ever grow.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::game::scoring::GuessStats;

// =============================================================================
// DEFINITIONS
// =============================================================================

/// Statistic an achievement thresholds on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementCategory {
    /// Correct-answer count reaches the requirement
    CorrectGuesses,
    /// max(current streak, highest streak) reaches the requirement
    Streak,
    /// Total-answer count reaches the requirement
    TotalGuesses,
}

/// Difficulty tier, used for presentation grouping only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Unlocks within the first session
    Easy,
    /// A few sessions of play
    Medium,
    /// Sustained play
    Hard,
    /// Long-term dedication
    Ultimate,
}

/// Static definition of one achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AchievementDefinition {
    /// Stable identifier persisted in unlock sets
    pub id: &'static str,

    /// Display name
    pub name: &'static str,

    /// Display description
    pub description: &'static str,

    /// Icon reference for the presentation layer
    pub icon: &'static str,

    /// Threshold the category statistic must reach
    pub requirement: u32,

    /// Statistic this achievement thresholds on
    pub category: AchievementCategory,

    /// Difficulty tier
    pub tier: Tier,
}

impl AchievementDefinition {
    /// Whether `stats` satisfies this achievement's threshold.
    pub fn is_met(&self, stats: &GuessStats) -> bool {
        match self.category {
            AchievementCategory::CorrectGuesses => stats.correct >= self.requirement,
            AchievementCategory::Streak => {
                stats.streak.max(stats.highest_streak) >= self.requirement
            }
            AchievementCategory::TotalGuesses => stats.total >= self.requirement,
        }
    }
}

/// The full shipped catalog.
pub const CATALOG: [AchievementDefinition; 10] = [
    AchievementDefinition {
        id: "first_hunch",
        name: "First Hunch",
        description: "Guess your first answer correctly",
        icon: "medal_first_hunch",
        requirement: 1,
        category: AchievementCategory::CorrectGuesses,
        tier: Tier::Easy,
    },
    AchievementDefinition {
        id: "sharp_eye",
        name: "Sharp Eye",
        description: "Get 10 correct guesses",
        icon: "medal_sharp_eye",
        requirement: 10,
        category: AchievementCategory::CorrectGuesses,
        tier: Tier::Medium,
    },
    AchievementDefinition {
        id: "mind_reader",
        name: "Mind Reader",
        description: "Get 50 correct guesses",
        icon: "medal_mind_reader",
        requirement: 50,
        category: AchievementCategory::CorrectGuesses,
        tier: Tier::Hard,
    },
    AchievementDefinition {
        id: "oracle",
        name: "Oracle",
        description: "Get 200 correct guesses",
        icon: "medal_oracle",
        requirement: 200,
        category: AchievementCategory::CorrectGuesses,
        tier: Tier::Ultimate,
    },
    AchievementDefinition {
        id: "warmed_up",
        name: "Warmed Up",
        description: "Answer 3 questions in a row",
        icon: "medal_warmed_up",
        requirement: 3,
        category: AchievementCategory::Streak,
        tier: Tier::Easy,
    },
    AchievementDefinition {
        id: "hot_streak",
        name: "Hot Streak",
        description: "Answer 5 questions in a row",
        icon: "medal_hot_streak",
        requirement: 5,
        category: AchievementCategory::Streak,
        tier: Tier::Medium,
    },
    AchievementDefinition {
        id: "blazing",
        name: "Blazing",
        description: "Answer 10 questions in a row",
        icon: "medal_blazing",
        requirement: 10,
        category: AchievementCategory::Streak,
        tier: Tier::Hard,
    },
    AchievementDefinition {
        id: "unstoppable",
        name: "Unstoppable",
        description: "Answer 20 questions in a row",
        icon: "medal_unstoppable",
        requirement: 20,
        category: AchievementCategory::Streak,
        tier: Tier::Ultimate,
    },
    AchievementDefinition {
        id: "curious",
        name: "Curious",
        description: "Answer 25 questions",
        icon: "medal_curious",
        requirement: 25,
        category: AchievementCategory::TotalGuesses,
        tier: Tier::Medium,
    },
    AchievementDefinition {
        id: "devoted",
        name: "Devoted",
        description: "Answer 100 questions",
        icon: "medal_devoted",
        requirement: 100,
        category: AchievementCategory::TotalGuesses,
        tier: Tier::Hard,
    },
];

/// Look up a catalog definition by its stable id.
pub fn find(id: &str) -> Option<&'static AchievementDefinition> {
    CATALOG.iter().find(|def| def.id == id)
}

// =============================================================================
// UNLOCK SET
// =============================================================================

/// Identifiers a player has already unlocked.
///
/// Append-only: entries are never removed, and inserting an existing id
/// is a no-op. Backed by a BTreeSet so iteration order is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementSet {
    unlocked: BTreeSet<String>,
}

impl AchievementSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a set from persisted ids.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            unlocked: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `id` is already unlocked.
    pub fn contains(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    /// Record an unlock.
    pub fn insert(&mut self, id: &str) {
        self.unlocked.insert(id.to_string());
    }

    /// Number of unlocked achievements.
    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    /// Whether nothing is unlocked yet.
    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }

    /// Unlocked ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.unlocked.iter().map(String::as_str)
    }
}

// =============================================================================
// EVALUATION
// =============================================================================

/// Report which catalog entries newly unlock for `stats`.
///
/// Side-effect-free: the caller persists the union of `already_unlocked`
/// with the returned definitions. Evaluation order never changes the
/// result set; results come back in catalog order.
pub fn evaluate(
    stats: &GuessStats,
    already_unlocked: &AchievementSet,
) -> Vec<&'static AchievementDefinition> {
    CATALOG
        .iter()
        .filter(|def| !already_unlocked.contains(def.id) && def.is_met(stats))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(correct: u32, total: u32, streak: u32, highest: u32) -> GuessStats {
        GuessStats {
            correct,
            total,
            streak,
            highest_streak: highest,
        }
    }

    #[test]
    fn test_catalog_ids_are_unique_and_tiers_covered() {
        let ids: BTreeSet<_> = CATALOG.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), CATALOG.len());

        for tier in [Tier::Easy, Tier::Medium, Tier::Hard, Tier::Ultimate] {
            assert!(
                CATALOG.iter().any(|d| d.tier == tier),
                "no achievement in tier {:?}",
                tier
            );
        }
    }

    #[test]
    fn test_first_correct_unlocks_first_hunch_only() {
        let unlocked = AchievementSet::new();
        let newly = evaluate(&stats(1, 1, 1, 1), &unlocked);

        let ids: Vec<_> = newly.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["first_hunch"]);
    }

    #[test]
    fn test_streak_predicate_uses_max_of_current_and_highest() {
        let unlocked = AchievementSet::new();

        // Current streak carries it
        let newly = evaluate(&stats(0, 0, 5, 0), &unlocked);
        let ids: Vec<_> = newly.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["warmed_up", "hot_streak"]);

        // Highest streak alone carries it too
        let newly = evaluate(&stats(0, 0, 0, 5), &unlocked);
        let ids: Vec<_> = newly.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["warmed_up", "hot_streak"]);
    }

    #[test]
    fn test_requirement_boundary() {
        let unlocked = AchievementSet::new();

        assert!(evaluate(&stats(9, 9, 0, 0), &unlocked)
            .iter()
            .all(|d| d.id != "sharp_eye"));
        assert!(evaluate(&stats(10, 10, 0, 0), &unlocked)
            .iter()
            .any(|d| d.id == "sharp_eye"));
    }

    #[test]
    fn test_evaluate_is_idempotent_after_union() {
        let big = stats(60, 120, 0, 12);
        let mut unlocked = AchievementSet::new();

        let first = evaluate(&big, &unlocked);
        assert!(!first.is_empty());
        for def in &first {
            unlocked.insert(def.id);
        }

        let second = evaluate(&big, &unlocked);
        assert!(second.is_empty());
    }

    #[test]
    fn test_everything_can_unlock_in_one_call() {
        let unlocked = AchievementSet::new();
        let newly = evaluate(&stats(200, 250, 0, 20), &unlocked);
        assert_eq!(newly.len(), CATALOG.len());
    }

    #[test]
    fn test_set_is_append_only_and_sorted() {
        let mut set = AchievementSet::new();
        set.insert("oracle");
        set.insert("curious");
        set.insert("oracle");

        assert_eq!(set.len(), 2);
        let ids: Vec<_> = set.ids().collect();
        assert_eq!(ids, vec!["curious", "oracle"]);
    }

    #[test]
    fn test_find_resolves_persisted_ids() {
        assert_eq!(find("blazing").map(|d| d.requirement), Some(10));
        assert!(find("no_such_id").is_none());
    }
}
