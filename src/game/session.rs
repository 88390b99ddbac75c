//! Game Session Orchestration
//!
//! Drives one player's quiz loop: the subject queue and cursor, the
//! lives ledger, the score board, question generation, and achievement
//! evaluation. The session owns an injected clock and snapshot store
//! and persists a snapshot after every state change.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::clock::Clock;
use crate::core::rng::DeterministicRng;
use crate::game::achievements::{self, AchievementDefinition, AchievementSet};
use crate::game::events::SessionEvent;
use crate::game::lives::{LivesLedger, MAX_LIVES, REGEN_PERIOD_SECS};
use crate::game::question::{self, Question};
use crate::game::scoring::{ScoreBoard, BASE_POINTS};
use crate::game::subject::{PlayerId, Subject};
use crate::store::{PlayerSnapshot, SnapshotStore, StoreError};

/// Phase of the session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No active question; waiting for a start or for more subjects.
    AwaitingQuestion,
    /// A question is active and awaiting an answer.
    QuestionActive,
    /// Terminal: lives ran out, or no queued subject was askable.
    GameOver,
}

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base points per correct answer, scaled by the running streak.
    pub base_points: u32,
    /// Maximum lives.
    pub max_lives: u32,
    /// Duration after which depleted lives fully restore.
    pub regen_period: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_points: BASE_POINTS,
            max_lives: MAX_LIVES,
            regen_period: Duration::seconds(REGEN_PERIOD_SECS),
        }
    }
}

/// What one answer submission did.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerOutcome {
    /// Whether the submitted choice was correct.
    pub correct: bool,
    /// Points awarded (zero for a miss).
    pub points_awarded: u64,
    /// Streak after scoring.
    pub streak: u32,
    /// Lives remaining after the answer.
    pub lives_remaining: u32,
    /// Achievements newly unlocked by this answer, in catalog order.
    pub newly_unlocked: Vec<&'static AchievementDefinition>,
    /// Whether this answer ended the session.
    pub game_over: bool,
    /// Whether the subject queue ran out before the next question.
    pub needs_subjects: bool,
}

/// Session errors.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SessionError {
    /// No question is active.
    #[error("no active question")]
    NoActiveQuestion,

    /// The submitted choice is not one of the offered strings.
    #[error("choice {choice:?} is not offered by the active question")]
    ChoiceNotOffered {
        /// The rejected choice.
        choice: String,
    },

    /// The operation requires at least one life.
    #[error("no lives remaining")]
    NoLivesRemaining,

    /// Snapshot persistence failed; the in-memory state already moved.
    #[error("snapshot store: {0}")]
    Store(#[from] StoreError),
}

/// Result of a generation sweep over the remaining queue.
enum Advance {
    /// A question is active.
    QuestionReady,
    /// Every remaining subject was consumed or skipped.
    Exhausted,
}

// =============================================================================
// GAME SESSION
// =============================================================================

/// One player's live quiz session.
///
/// All operations are synchronous and single-threaded; the only
/// temporal input is the injected clock, read when an operation needs
/// `now`. Callers drive periodic [`GameSession::check_regeneration`]
/// on their own cadence.
pub struct GameSession<C, S> {
    /// Player this session belongs to.
    player_id: PlayerId,
    /// Gameplay configuration.
    config: SessionConfig,
    /// Injected wall-clock source.
    clock: C,
    /// Injected snapshot store.
    store: S,
    /// Question stream randomness.
    rng: DeterministicRng,
    /// Subject queue; never reordered.
    subjects: Vec<Subject>,
    /// Index of the subject the active question is about (or where the
    /// next generation sweep starts).
    cursor: usize,
    /// Active question, present iff the phase is `QuestionActive`.
    question: Option<Question>,
    /// Lives ledger.
    lives: LivesLedger,
    /// Score, streak, and answer counters.
    scoring: ScoreBoard,
    /// Unlocked achievement ids, append-only.
    achievements: AchievementSet,
    /// Current phase.
    phase: SessionPhase,
    /// Events buffered since the last drain.
    pending_events: Vec<SessionEvent>,
}

impl<C: Clock, S: SnapshotStore> GameSession<C, S> {
    /// Create a session for `player_id`, hydrating any saved snapshot.
    ///
    /// The RNG seed derives from the player id and `session_nonce`, so
    /// the same pair replays the same question stream. A malformed
    /// snapshot is normalized rather than rejected (counts clamp, a
    /// timer running at max lives is dropped).
    pub fn new(
        player_id: PlayerId,
        session_nonce: u64,
        config: SessionConfig,
        clock: C,
        store: S,
    ) -> Result<Self, SessionError> {
        let rng = DeterministicRng::from_session_params(player_id.as_bytes(), session_nonce);

        let (lives, scoring, achievements, phase) = match store.load(player_id)? {
            Some(snap) => (
                LivesLedger::from_parts(
                    snap.lives,
                    snap.regen_timestamp,
                    config.max_lives,
                    config.regen_period,
                ),
                ScoreBoard::from_parts(
                    snap.score,
                    snap.streak,
                    snap.highest_streak,
                    snap.correct_count,
                    snap.total_count,
                ),
                AchievementSet::from_ids(snap.unlocked_achievement_ids),
                if snap.game_over_flag {
                    SessionPhase::GameOver
                } else {
                    SessionPhase::AwaitingQuestion
                },
            ),
            None => (
                LivesLedger::new(config.max_lives, config.regen_period),
                ScoreBoard::new(),
                AchievementSet::new(),
                SessionPhase::AwaitingQuestion,
            ),
        };

        Ok(Self {
            player_id,
            config,
            clock,
            store,
            rng,
            subjects: Vec::new(),
            cursor: 0,
            question: None,
            lives,
            scoring,
            achievements,
            phase,
            pending_events: Vec::new(),
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Begin a round over `subjects`, replacing any previous queue.
    ///
    /// Runs an opening regeneration check, then requires at least one
    /// life. Streak and per-round counters reset; the cumulative score
    /// persists and is only cleared by [`GameSession::reset_score`].
    /// Generation skips subjects without askable attributes; a queue
    /// with no askable subject at all ends the round immediately.
    pub fn start(&mut self, subjects: Vec<Subject>) -> Result<(), SessionError> {
        let now = self.clock.now();
        if self.lives.check_regeneration(now) {
            self.push_event(SessionEvent::lives_restored(self.round(), self.lives.lives()));
        }
        if self.lives.lives() == 0 {
            return Err(SessionError::NoLivesRemaining);
        }

        self.subjects = subjects;
        self.cursor = 0;
        self.question = None;
        self.scoring.begin_round();
        self.phase = SessionPhase::AwaitingQuestion;

        debug!("round started with {} subjects", self.subjects.len());
        self.push_event(SessionEvent::round_started(
            self.round(),
            self.subjects.len() as u32,
        ));

        if let Advance::Exhausted = self.advance_to_next_question() {
            self.end_round();
        }
        self.save_snapshot()
    }

    /// Score the submitted choice against the active question.
    ///
    /// A correct answer awards streak-scaled points and evaluates
    /// achievements against the updated statistics. A miss resets the
    /// streak and consumes a life; hitting zero lives ends the session
    /// with the regeneration timer running. The session then advances
    /// to the next askable subject. An exhausted queue is reported in
    /// the outcome, not treated as a failure.
    ///
    /// A choice that is not one of the offered strings is rejected with
    /// the session state unchanged.
    pub fn submit_answer(&mut self, choice: &str) -> Result<AnswerOutcome, SessionError> {
        let correct = match &self.question {
            Some(q) if q.offers(choice) => q.is_correct(choice),
            Some(_) => {
                return Err(SessionError::ChoiceNotOffered {
                    choice: choice.to_string(),
                })
            }
            None => return Err(SessionError::NoActiveQuestion),
        };
        self.question = None;

        let mut points_awarded = 0;
        let mut newly_unlocked: Vec<&'static AchievementDefinition> = Vec::new();

        if correct {
            points_awarded = self.scoring.on_correct(self.config.base_points);
            self.push_event(SessionEvent::answer_scored(
                self.round(),
                true,
                points_awarded,
                self.scoring.streak(),
                self.scoring.score(),
            ));

            newly_unlocked = achievements::evaluate(&self.scoring.stats(), &self.achievements);
            for def in &newly_unlocked {
                self.achievements.insert(def.id);
                info!("achievement unlocked: {} ({})", def.name, def.id);
                self.push_event(SessionEvent::achievement_unlocked(
                    self.round(),
                    def.id,
                    def.name,
                ));
            }
        } else {
            let lost_streak = self.scoring.streak();
            self.scoring.on_incorrect();
            self.push_event(SessionEvent::answer_scored(
                self.round(),
                false,
                0,
                0,
                self.scoring.score(),
            ));
            if lost_streak > 0 {
                self.push_event(SessionEvent::streak_broken(self.round(), lost_streak));
            }

            let was_regenerating = self.lives.is_regenerating();
            let now = self.clock.now();
            if self.lives.consume_life(now) {
                self.push_event(SessionEvent::life_lost(self.round(), self.lives.lives()));
            }
            if self.lives.lives() == 0 {
                if !was_regenerating {
                    if let Some(started_at) = self.lives.regen_started_at() {
                        self.push_event(SessionEvent::regeneration_started(
                            self.round(),
                            started_at,
                        ));
                    }
                }
                self.end_round();
            }
        }

        // The answered subject is consumed even when the round just ended,
        // so a revived session never re-asks it.
        self.cursor += 1;

        let mut needs_subjects = false;
        if self.phase != SessionPhase::GameOver {
            if let Advance::Exhausted = self.advance_to_next_question() {
                needs_subjects = true;
            }
        }

        let outcome = AnswerOutcome {
            correct,
            points_awarded,
            streak: self.scoring.streak(),
            lives_remaining: self.lives.lives(),
            newly_unlocked,
            game_over: self.is_game_over(),
            needs_subjects,
        };
        self.save_snapshot()?;
        Ok(outcome)
    }

    /// Play the same queue again from the top.
    ///
    /// Lives and the whole score state carry over; restarting is not a
    /// life or score reset. Requires at least one life after an opening
    /// regeneration check.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        let now = self.clock.now();
        if self.lives.check_regeneration(now) {
            self.push_event(SessionEvent::lives_restored(self.round(), self.lives.lives()));
        }
        if self.lives.lives() == 0 {
            return Err(SessionError::NoLivesRemaining);
        }

        self.cursor = 0;
        self.question = None;
        self.phase = SessionPhase::AwaitingQuestion;

        debug!("round restarted over {} subjects", self.subjects.len());
        self.push_event(SessionEvent::round_started(
            self.round(),
            self.subjects.len() as u32,
        ));

        if let Advance::Exhausted = self.advance_to_next_question() {
            self.end_round();
        }
        self.save_snapshot()
    }

    /// Append a fresh batch to the subject queue.
    ///
    /// A session waiting in [`SessionPhase::AwaitingQuestion`] resumes
    /// generation immediately; an active question or a terminal session
    /// just keeps the batch queued. Returns whether a question is
    /// active afterwards.
    pub fn supply_subjects(&mut self, batch: Vec<Subject>) -> bool {
        self.subjects.extend(batch);
        if self.phase == SessionPhase::AwaitingQuestion
            && self.lives.lives() > 0
            && self.cursor < self.subjects.len()
        {
            self.advance_to_next_question();
        }
        self.question.is_some()
    }

    // =========================================================================
    // Lives
    // =========================================================================

    /// Forward the clock to the lives ledger.
    ///
    /// On restoration all lives return at once, a terminal session
    /// reopens to `AwaitingQuestion`, and the snapshot is saved. The
    /// caller drives this on its own cadence (e.g. a 60-second tick);
    /// the engine schedules nothing. Returns whether lives restored.
    pub fn check_regeneration(&mut self) -> Result<bool, SessionError> {
        let now = self.clock.now();
        if !self.lives.check_regeneration(now) {
            return Ok(false);
        }

        info!("lives restored to {}", self.lives.lives());
        self.push_event(SessionEvent::lives_restored(self.round(), self.lives.lives()));
        if self.phase == SessionPhase::GameOver {
            self.phase = SessionPhase::AwaitingQuestion;
        }
        self.save_snapshot()?;
        Ok(true)
    }

    /// Grant one life from an external reward flow.
    ///
    /// Ignores the regeneration timer; reaching max clears it. A
    /// terminal session reopens once it has a life again. Returns
    /// whether a life was granted (false at max).
    pub fn grant_life(&mut self) -> Result<bool, SessionError> {
        if !self.lives.add_life() {
            return Ok(false);
        }

        debug!("life granted, {} remaining", self.lives.lives());
        self.push_event(SessionEvent::life_granted(self.round(), self.lives.lives()));
        if self.phase == SessionPhase::GameOver {
            self.phase = SessionPhase::AwaitingQuestion;
        }
        self.save_snapshot()?;
        Ok(true)
    }

    /// Remaining time until depleted lives restore.
    ///
    /// `None` when lives are at max or no timer is running.
    pub fn time_until_next_life(&self) -> Option<Duration> {
        self.lives.time_until_next_life(self.clock.now())
    }

    // =========================================================================
    // Score
    // =========================================================================

    /// Explicitly wipe the cumulative score.
    ///
    /// `start` never clears the score; callers opt in across sessions.
    pub fn reset_score(&mut self) -> Result<(), SessionError> {
        self.scoring.reset_score();
        self.save_snapshot()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The active question, if one is awaiting an answer.
    pub fn active_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Lives ledger state.
    pub fn lives(&self) -> &LivesLedger {
        &self.lives
    }

    /// Score, streak, and answer counters.
    pub fn score(&self) -> &ScoreBoard {
        &self.scoring
    }

    /// Unlocked achievement ids.
    pub fn achievements(&self) -> &AchievementSet {
        &self.achievements
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether the session is terminal.
    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Player this session belongs to.
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Queued subjects not yet consumed (the active question's subject
    /// included).
    pub fn subjects_remaining(&self) -> usize {
        self.subjects.len().saturating_sub(self.cursor)
    }

    /// The injected snapshot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drain the buffered events.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Build the persisted projection of the current state.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            lives: self.lives.lives(),
            regen_timestamp: self.lives.regen_started_at(),
            streak: self.scoring.streak(),
            highest_streak: self.scoring.highest_streak(),
            score: self.scoring.score(),
            correct_count: self.scoring.correct(),
            total_count: self.scoring.total(),
            game_over_flag: self.is_game_over(),
            unlocked_achievement_ids: self.achievements.ids().map(str::to_string).collect(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Sweep the queue from the cursor until a question generates.
    ///
    /// Unusable subjects are skipped with an event each; the cursor is
    /// left on the subject the active question is about.
    fn advance_to_next_question(&mut self) -> Advance {
        while self.cursor < self.subjects.len() {
            match question::generate(&self.subjects[self.cursor], &mut self.rng) {
                Ok(q) => {
                    debug!(
                        "question ready for subject {}: {:?}",
                        hex::encode(&q.subject_id.0[..4]),
                        q.category
                    );
                    self.push_event(SessionEvent::question_ready(
                        self.round(),
                        q.subject_id,
                        q.category,
                    ));
                    self.question = Some(q);
                    self.phase = SessionPhase::QuestionActive;
                    return Advance::QuestionReady;
                }
                Err(reason) => {
                    let subject_id = self.subjects[self.cursor].id;
                    debug!(
                        "skipping subject {}: {}",
                        hex::encode(&subject_id.0[..4]),
                        reason
                    );
                    self.push_event(SessionEvent::subject_skipped(
                        self.round(),
                        subject_id,
                        reason,
                    ));
                    self.cursor += 1;
                }
            }
        }

        self.question = None;
        self.phase = SessionPhase::AwaitingQuestion;
        self.push_event(SessionEvent::subjects_exhausted(self.round()));
        Advance::Exhausted
    }

    /// Enter the terminal phase and report the final score.
    fn end_round(&mut self) {
        self.phase = SessionPhase::GameOver;
        self.question = None;
        info!("game over, final score {}", self.scoring.score());
        self.push_event(SessionEvent::game_over(self.round(), self.scoring.score()));
    }

    /// Answer ordinal events are stamped with.
    fn round(&self) -> u32 {
        self.scoring.total()
    }

    /// Buffer an event for the next drain.
    fn push_event(&mut self, event: SessionEvent) {
        self.pending_events.push(event);
    }

    /// Persist the current snapshot through the store port.
    fn save_snapshot(&mut self) -> Result<(), SessionError> {
        let snapshot = self.snapshot();
        self.store.save(self.player_id, &snapshot)?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
