//! Criterion benches for question generation and full session rounds.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::Rng;

use hunch::core::rng::DeterministicRng;
use hunch::game::question::generate;
use hunch::{
    GameSession, ManualClock, MemoryStore, PlayerId, SessionConfig, Subject, SubjectId,
};

/// Profile with every attribute present.
fn full_subject(tag: u8) -> Subject {
    let mut s = Subject::new(SubjectId::new([tag; 16]));
    s.image = Some("portraits/bench.png".to_string());
    s.age = Some(34);
    s.occupation = Some("Engineer".to_string());
    s.education = Some("Master's degree".to_string());
    s.height_cm = Some(176.0);
    s.weight_kg = Some(71.0);
    s.smoker = Some(false);
    s.favorite_color = Some("Green".to_string());
    s.favorite_movie = Some("Inception".to_string());
    s.favorite_food = Some("Sushi".to_string());
    s.favorite_flower = Some("Tulip".to_string());
    s.favorite_sport = Some("Tennis".to_string());
    s.favorite_hobby = Some("Chess".to_string());
    s
}

/// Random roster in the shape a subject service would deliver.
fn random_roster(len: usize) -> Vec<Subject> {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let mut s = Subject::new(SubjectId::new(*uuid::Uuid::new_v4().as_bytes()));
            s.age = Some(rng.gen_range(18..80));
            s.height_cm = Some(rng.gen_range(150.0..200.0));
            s.favorite_color = Some("Green".to_string());
            s
        })
        .collect()
}

fn bench_generate(c: &mut Criterion) {
    let full = full_subject(1);
    let mut sparse = Subject::new(SubjectId::new([2; 16]));
    sparse.age = Some(33);

    let mut rng = DeterministicRng::new(0xBEEF);

    c.bench_function("generate_full_profile", |b| {
        b.iter(|| generate(black_box(&full), &mut rng).unwrap());
    });

    c.bench_function("generate_single_attribute", |b| {
        b.iter(|| generate(black_box(&sparse), &mut rng).unwrap());
    });
}

fn bench_session_round(c: &mut Criterion) {
    let start = Utc
        .with_ymd_and_hms(2024, 9, 1, 12, 0, 0)
        .single()
        .expect("valid bench timestamp");

    c.bench_function("session_round_50_answers", |b| {
        b.iter_batched(
            || random_roster(50),
            |roster| {
                let mut session = GameSession::new(
                    PlayerId::new([9; 16]),
                    1,
                    SessionConfig::default(),
                    ManualClock::new(start),
                    MemoryStore::new(),
                )
                .expect("session construction");
                session.start(roster).expect("start");

                loop {
                    let choice = match session.active_question() {
                        Some(q) => q.correct.clone(),
                        None => break,
                    };
                    session.submit_answer(&choice).expect("answer");
                }
                black_box(session.score().score())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_generate, bench_session_round);
criterion_main!(benches);
