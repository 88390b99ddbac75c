//! Hunch Engine Demo
//!
//! Scripted self-play against the session engine: a full round with
//! mixed answers, a lives-regeneration cycle, and an identical replay
//! to verify determinism.

use anyhow::{bail, Context};
use chrono::{Duration, TimeZone, Utc};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use hunch::{
    game::events::SessionEventData,
    GameSession, ManualClock, MemoryStore, PlayerId, PlayerSnapshot, SessionConfig, Subject,
    SubjectId, BASE_POINTS, MAX_LIVES, REGEN_PERIOD_SECS, VERSION,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Hunch Engine v{}", VERSION);
    info!(
        "Max lives: {}, regeneration period: {}s, base points: {}",
        MAX_LIVES, REGEN_PERIOD_SECS, BASE_POINTS
    );

    let first = demo_session()?;

    info!("=== Verifying Determinism ===");
    let second = demo_session()?;

    info!("Final snapshot:\n{}", serde_json::to_string_pretty(&first)?);

    if first == second {
        info!("DETERMINISM VERIFIED: replay produced an identical snapshot");
    } else {
        bail!("determinism failure: replay diverged from the first run");
    }
    Ok(())
}

/// Play one scripted session end to end and return its final snapshot.
fn demo_session() -> anyhow::Result<PlayerSnapshot> {
    info!("=== Starting Demo Session ===");

    let player = PlayerId::from_uuid_str("7e9cc2a4-31f5-4f2e-9f59-1bd6f7a21c7b")
        .context("demo player uuid is malformed")?;
    let session_nonce = 7u64;

    info!("Player: {}", hex::encode(&player.0[..4]));
    info!("Session nonce: {}", session_nonce);

    let clock = ManualClock::new(
        Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0)
            .single()
            .context("demo start timestamp is invalid")?,
    );
    let mut session = GameSession::new(
        player,
        session_nonce,
        SessionConfig::default(),
        clock.clone(),
        MemoryStore::new(),
    )?;

    // Round one: mostly correct answers over the opening roster. The
    // roster deliberately contains one profile with no attributes to
    // show the skip path.
    session.start(demo_roster())?;
    log_events(&mut session);

    for correctly in [true, true, false, true, false] {
        answer(&mut session, correctly)?;
        log_events(&mut session);
    }

    // The opening roster is used up; feed a fresh batch and miss on
    // purpose until the last lives run out.
    info!("Supplying a fresh subject batch");
    session.supply_subjects(fresh_batch());
    log_events(&mut session);

    while !session.is_game_over() && session.active_question().is_some() {
        answer(&mut session, false)?;
        log_events(&mut session);
    }
    if !session.is_game_over() {
        bail!("demo script should have ended in game over");
    }

    info!("=== Session Results ===");
    info!("Score: {}", session.score().score());
    info!("Highest streak: {}", session.score().highest_streak());
    info!(
        "Correct: {}/{}",
        session.score().correct(),
        session.score().total()
    );
    for id in session.achievements().ids() {
        info!("Achievement: {}", id);
    }

    // Lives regeneration: jump past the period and poll once.
    let waiting = session
        .time_until_next_life()
        .context("regeneration timer should be running")?;
    info!("Time until lives restore: {}s", waiting.num_seconds());

    clock.advance(Duration::seconds(REGEN_PERIOD_SECS));
    if !session.check_regeneration()? {
        bail!("regeneration period elapsed but lives were not restored");
    }
    log_events(&mut session);
    info!(
        "Lives after regeneration: {}/{}",
        session.lives().lives(),
        MAX_LIVES
    );

    Ok(session.snapshot())
}

/// Submit the correct choice or the first wrong one.
fn answer(
    session: &mut GameSession<ManualClock, MemoryStore>,
    correctly: bool,
) -> anyhow::Result<()> {
    let question = session
        .active_question()
        .context("no active question to answer")?;
    let choice = if correctly {
        question.correct.clone()
    } else {
        question
            .choices
            .iter()
            .find(|c| **c != question.correct)
            .context("question offers no wrong choice")?
            .clone()
    };
    info!("Q: {} -> {}", question.text, choice);

    let outcome = session.submit_answer(&choice)?;
    info!(
        "   {} | +{} points | streak {} | lives {}",
        if outcome.correct { "correct" } else { "wrong" },
        outcome.points_awarded,
        outcome.streak,
        outcome.lives_remaining
    );
    Ok(())
}

/// Drain the session's event buffer into the log.
fn log_events(session: &mut GameSession<ManualClock, MemoryStore>) {
    for event in session.take_events() {
        match event.data {
            SessionEventData::SubjectSkipped { subject_id, reason } => {
                info!(
                    "Skipped subject {}: {}",
                    hex::encode(&subject_id.0[..4]),
                    reason
                );
            }
            SessionEventData::AchievementUnlocked { name, .. } => {
                info!("ACHIEVEMENT UNLOCKED: {}", name);
            }
            SessionEventData::StreakBroken { lost_streak } => {
                info!("Streak of {} broken", lost_streak);
            }
            SessionEventData::SubjectsExhausted => {
                info!("Subject queue exhausted, more needed");
            }
            SessionEventData::RegenerationStarted { started_at } => {
                info!("Regeneration timer started at {}", started_at);
            }
            SessionEventData::LivesRestored { lives } => {
                info!("Lives restored to {}", lives);
            }
            SessionEventData::GameOver { final_score } => {
                info!("GAME OVER, final score {}", final_score);
            }
            _ => {}
        }
    }
}

/// Opening roster for the demo, including one unaskable profile.
fn demo_roster() -> Vec<Subject> {
    let mut alex = Subject::new(SubjectId::new([1; 16]));
    alex.image = Some("portraits/alex.png".to_string());
    alex.age = Some(29);
    alex.occupation = Some("Photographer".to_string());
    alex.favorite_movie = Some("Inception".to_string());

    let mut billie = Subject::new(SubjectId::new([2; 16]));
    billie.age = Some(41);
    billie.height_cm = Some(182.0);
    billie.smoker = Some(false);

    // No attributes at all: the session skips this one
    let ghost = Subject::new(SubjectId::new([3; 16]));

    let mut casey = Subject::new(SubjectId::new([4; 16]));
    casey.favorite_sport = Some("Climbing".to_string());
    casey.favorite_food = Some("Ramen".to_string());
    casey.weight_kg = Some(68.0);

    let mut dana = Subject::new(SubjectId::new([5; 16]));
    dana.education = Some("Master's degree".to_string());
    dana.favorite_color = Some("Turquoise".to_string());
    dana.age = Some(35);

    let mut emery = Subject::new(SubjectId::new([6; 16]));
    emery.favorite_hobby = Some("Woodworking".to_string());
    emery.favorite_flower = Some("Peony".to_string());

    vec![alex, billie, ghost, casey, dana, emery]
}

/// Replacement batch supplied after the opening roster runs out.
fn fresh_batch() -> Vec<Subject> {
    (7..=10u8)
        .map(|i| {
            let mut subject = Subject::new(SubjectId::new([i; 16]));
            subject.age = Some(22 + u32::from(i) * 4);
            subject
        })
        .collect()
}
