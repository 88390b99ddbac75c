//! Lives Ledger
//!
//! Meters the time-regenerating lives resource. Pure state plus
//! injected `now` values: the ledger owns no clock and schedules
//! nothing. When the regeneration period elapses, ALL missing lives
//! come back in one step.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default maximum life count.
pub const MAX_LIVES: u32 = 5;

/// Default regeneration period in seconds (2 hours).
pub const REGEN_PERIOD_SECS: i64 = 7200;

/// Phase of the lives state machine, derived from count + timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivesPhase {
    /// All lives present, no timer running
    Full,
    /// Some lives lost, regeneration not yet triggered
    Depleting,
    /// Lives below max with the regeneration timer running
    Regenerating,
    /// No lives left, regeneration timer running
    Empty,
}

/// Tracks remaining lives and the regeneration timer.
///
/// The timer starts when lives hit zero (or survives hydration from a
/// snapshot) and is cleared whenever the count returns to max. It is
/// never running while lives = max.
#[derive(Clone, Debug, PartialEq)]
pub struct LivesLedger {
    /// Current life count, 0..=max_lives
    lives: u32,

    /// Upper bound for `lives`
    max_lives: u32,

    /// Fixed duration after which all missing lives are restored
    regen_period: Duration,

    /// When regeneration was triggered, if it has been
    regen_started_at: Option<DateTime<Utc>>,
}

impl Default for LivesLedger {
    fn default() -> Self {
        Self::new(MAX_LIVES, Duration::seconds(REGEN_PERIOD_SECS))
    }
}

impl LivesLedger {
    /// Create a full ledger with the given bounds.
    pub fn new(max_lives: u32, regen_period: Duration) -> Self {
        Self {
            lives: max_lives,
            max_lives,
            regen_period,
            regen_started_at: None,
        }
    }

    /// Rebuild a ledger from persisted parts.
    ///
    /// Clamps the count to max and drops a timer that would violate the
    /// never-running-at-max invariant.
    pub fn from_parts(
        lives: u32,
        regen_started_at: Option<DateTime<Utc>>,
        max_lives: u32,
        regen_period: Duration,
    ) -> Self {
        let lives = lives.min(max_lives);
        let regen_started_at = if lives >= max_lives {
            None
        } else {
            regen_started_at
        };
        Self {
            lives,
            max_lives,
            regen_period,
            regen_started_at,
        }
    }

    /// Current life count.
    #[inline]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Maximum life count.
    #[inline]
    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    /// Configured regeneration period.
    #[inline]
    pub fn regen_period(&self) -> Duration {
        self.regen_period
    }

    /// When regeneration was triggered, if a timer is running.
    #[inline]
    pub fn regen_started_at(&self) -> Option<DateTime<Utc>> {
        self.regen_started_at
    }

    /// Whether the regeneration timer is running.
    #[inline]
    pub fn is_regenerating(&self) -> bool {
        self.regen_started_at.is_some()
    }

    /// Derive the current phase.
    pub fn phase(&self) -> LivesPhase {
        if self.lives >= self.max_lives {
            LivesPhase::Full
        } else if self.regen_started_at.is_some() {
            if self.lives == 0 {
                LivesPhase::Empty
            } else {
                LivesPhase::Regenerating
            }
        } else {
            LivesPhase::Depleting
        }
    }

    /// Spend one life.
    ///
    /// Hitting zero triggers the regeneration timer at `now`; a timer
    /// that is already running is left untouched. Returns false without
    /// changing anything when the count is already zero.
    pub fn consume_life(&mut self, now: DateTime<Utc>) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        if self.lives == 0 && self.regen_started_at.is_none() {
            self.regen_started_at = Some(now);
        }
        true
    }

    /// Restore all lives if the regeneration period has elapsed.
    ///
    /// All-or-nothing: either nothing changes or the count jumps to max
    /// and the timer clears. Returns whether a restoration happened.
    pub fn check_regeneration(&mut self, now: DateTime<Utc>) -> bool {
        match self.regen_started_at {
            Some(started) if now - started >= self.regen_period => {
                self.lives = self.max_lives;
                self.regen_started_at = None;
                true
            }
            _ => false,
        }
    }

    /// Grant one life, e.g. from an external reward.
    ///
    /// Ignores the timer; reaching max clears it. Returns whether a
    /// life was added (false at max).
    pub fn add_life(&mut self) -> bool {
        if self.lives >= self.max_lives {
            return false;
        }
        self.lives += 1;
        if self.lives == self.max_lives {
            self.regen_started_at = None;
        }
        true
    }

    /// Remaining time until the next restoration.
    ///
    /// `None` when the count is at max or no timer is running.
    /// Computed as `regen_period - ((now - started) mod regen_period)`,
    /// floored at zero.
    pub fn time_until_next_life(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.lives >= self.max_lives {
            return None;
        }
        let started = self.regen_started_at?;

        let period = self.regen_period.num_seconds().max(1);
        let elapsed = (now - started).num_seconds().max(0);
        let remaining = (period - (elapsed % period)).max(0);
        Some(Duration::seconds(remaining))
    }

    /// Administrative reset: count to max, timer cleared.
    pub fn reset_to_full(&mut self) {
        self.lives = self.max_lives;
        self.regen_started_at = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()
    }

    fn period() -> Duration {
        Duration::seconds(REGEN_PERIOD_SECS)
    }

    #[test]
    fn test_new_ledger_is_full() {
        let ledger = LivesLedger::default();
        assert_eq!(ledger.lives(), MAX_LIVES);
        assert_eq!(ledger.phase(), LivesPhase::Full);
        assert!(!ledger.is_regenerating());
        assert_eq!(ledger.time_until_next_life(t0()), None);
    }

    #[test]
    fn test_depleting_runs_no_timer() {
        let mut ledger = LivesLedger::default();
        assert!(ledger.consume_life(t0()));

        assert_eq!(ledger.lives(), 4);
        assert_eq!(ledger.phase(), LivesPhase::Depleting);
        assert!(!ledger.is_regenerating());
        // No timer running, so no countdown either
        assert_eq!(ledger.time_until_next_life(t0()), None);
    }

    #[test]
    fn test_fifth_consumption_starts_timer_exactly_once() {
        let mut ledger = LivesLedger::default();

        for i in 0..4 {
            assert!(ledger.consume_life(t0() + Duration::seconds(i * 10)));
            assert!(!ledger.is_regenerating());
        }

        // Fifth consumption zeroes the count and stamps the timer
        let zeroed_at = t0() + Duration::seconds(40);
        assert!(ledger.consume_life(zeroed_at));
        assert_eq!(ledger.lives(), 0);
        assert_eq!(ledger.phase(), LivesPhase::Empty);
        assert_eq!(ledger.regen_started_at(), Some(zeroed_at));

        // Consuming at zero is a failed no-op; the timer does not move
        assert!(!ledger.consume_life(zeroed_at + Duration::seconds(10)));
        assert_eq!(ledger.lives(), 0);
        assert_eq!(ledger.regen_started_at(), Some(zeroed_at));
    }

    #[test]
    fn test_restoration_is_all_or_nothing() {
        let mut ledger = LivesLedger::from_parts(2, Some(t0()), MAX_LIVES, period());
        assert_eq!(ledger.phase(), LivesPhase::Regenerating);

        // One second early: nothing moves
        assert!(!ledger.check_regeneration(t0() + period() - Duration::seconds(1)));
        assert_eq!(ledger.lives(), 2);
        assert!(ledger.is_regenerating());

        // Exactly at the boundary: everything comes back at once
        assert!(ledger.check_regeneration(t0() + period()));
        assert_eq!(ledger.lives(), MAX_LIVES);
        assert_eq!(ledger.phase(), LivesPhase::Full);
        assert!(!ledger.is_regenerating());
    }

    #[test]
    fn test_check_without_timer_is_noop() {
        let mut ledger = LivesLedger::default();
        ledger.consume_life(t0());

        assert!(!ledger.check_regeneration(t0() + period() * 3));
        assert_eq!(ledger.lives(), 4);
    }

    #[test]
    fn test_add_life_climbs_back_and_clears_timer_at_max() {
        let mut ledger = LivesLedger::from_parts(0, Some(t0()), MAX_LIVES, period());
        assert_eq!(ledger.phase(), LivesPhase::Empty);

        assert!(ledger.add_life());
        assert_eq!(ledger.lives(), 1);
        // Timer keeps running below max
        assert_eq!(ledger.phase(), LivesPhase::Regenerating);

        for _ in 0..4 {
            ledger.add_life();
        }
        assert_eq!(ledger.lives(), MAX_LIVES);
        assert!(!ledger.is_regenerating());
        assert_eq!(ledger.phase(), LivesPhase::Full);

        // At max grants are rejected
        assert!(!ledger.add_life());
        assert_eq!(ledger.lives(), MAX_LIVES);
    }

    #[test]
    fn test_time_until_next_life_counts_down() {
        let ledger = LivesLedger::from_parts(2, Some(t0()), MAX_LIVES, period());

        assert_eq!(
            ledger.time_until_next_life(t0() + Duration::seconds(1800)),
            Some(Duration::seconds(5400))
        );
        assert_eq!(
            ledger.time_until_next_life(t0() + Duration::seconds(7199)),
            Some(Duration::seconds(1))
        );
        // Modular formula: at the exact boundary a full period is
        // reported; check_regeneration is the restoring call.
        assert_eq!(
            ledger.time_until_next_life(t0() + period()),
            Some(period())
        );
    }

    #[test]
    fn test_time_until_next_life_clamps_clock_skew() {
        let ledger = LivesLedger::from_parts(1, Some(t0()), MAX_LIVES, period());

        // now before the recorded start: treat elapsed as zero
        assert_eq!(
            ledger.time_until_next_life(t0() - Duration::seconds(30)),
            Some(period())
        );
    }

    #[test]
    fn test_reset_to_full() {
        let mut ledger = LivesLedger::from_parts(0, Some(t0()), MAX_LIVES, period());
        ledger.reset_to_full();

        assert_eq!(ledger.lives(), MAX_LIVES);
        assert!(!ledger.is_regenerating());
    }

    #[test]
    fn test_from_parts_normalizes_bad_snapshots() {
        // Count above max clamps
        let ledger = LivesLedger::from_parts(9, None, MAX_LIVES, period());
        assert_eq!(ledger.lives(), MAX_LIVES);

        // Timer at max is dropped
        let ledger = LivesLedger::from_parts(MAX_LIVES, Some(t0()), MAX_LIVES, period());
        assert!(!ledger.is_regenerating());
        assert_eq!(ledger.phase(), LivesPhase::Full);
    }

    proptest! {
        #[test]
        fn prop_lives_bounds_and_timer_invariant(
            ops in prop::collection::vec((0u8..=2, 0i64..20_000), 0..64),
        ) {
            let mut ledger = LivesLedger::default();
            let mut now = t0();

            for (op, dt) in ops {
                now += Duration::seconds(dt);
                match op {
                    0 => {
                        ledger.consume_life(now);
                    }
                    1 => {
                        ledger.add_life();
                    }
                    _ => {
                        ledger.check_regeneration(now);
                    }
                }

                prop_assert!(ledger.lives() <= ledger.max_lives());
                if ledger.lives() == ledger.max_lives() {
                    prop_assert!(!ledger.is_regenerating());
                }
            }
        }
    }
}
