//! Question Generation
//!
//! Builds one multiple-choice question from a subject profile: pick an
//! askable category, format the correct answer, fill the choice set
//! with plausible distractors, shuffle. All randomness flows through
//! the injected RNG so a seed fixes the full question stream.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::rng::DeterministicRng;
use crate::game::catalog;
use crate::game::subject::{QuestionCategory, Subject, SubjectId};

/// Total distractor draws allowed before generation fails closed.
pub const DISTRACTOR_RETRY_BUDGET: u32 = 50;

/// Offset bound for synthesized age distractors (years).
const AGE_OFFSET: i32 = 10;
/// Lowest believable age distractor.
const AGE_FLOOR: i64 = 18;
/// Offset bound for synthesized height distractors (cm).
const HEIGHT_OFFSET: i32 = 15;
/// Offset bound for synthesized weight distractors (kg).
const WEIGHT_OFFSET: i32 = 15;
/// Lowest believable weight distractor.
const WEIGHT_FLOOR: i64 = 45;

// =============================================================================
// QUESTION
// =============================================================================

/// One generated multiple-choice question.
///
/// Created fresh per round and discarded once answered. The correct
/// answer is always one of `choices`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Subject this question is about
    pub subject_id: SubjectId,

    /// Attribute category asked about
    pub category: QuestionCategory,

    /// Question text
    pub text: String,

    /// Choices in display order (4 entries; 2 for the boolean category)
    pub choices: Vec<String>,

    /// The correct choice string
    pub correct: String,

    /// Display image reference copied from the subject
    pub image: Option<String>,
}

impl Question {
    /// Whether `choice` is one of the offered strings.
    pub fn offers(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c == choice)
    }

    /// Whether `choice` matches the correct answer.
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct == choice
    }
}

/// Why a subject could not yield a question.
///
/// Both causes are recoverable: the session skips the subject and moves
/// on to the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GenerationImpossible {
    /// The subject has no present attribute to ask about.
    #[error("subject has no askable attributes")]
    NoAskableAttributes,

    /// Not enough unique choices were found within the retry budget.
    #[error("distractor retry budget exhausted for category {category:?}")]
    RetryBudgetExhausted {
        /// Category whose choice set could not be filled.
        category: QuestionCategory,
    },
}

// =============================================================================
// GENERATION
// =============================================================================

/// Generate a question about `subject`.
///
/// Uniformly picks one category the subject has a value for, then
/// fills the choice set: numeric categories synthesize neighbors of the
/// actual value, categorical ones draw from the static catalog, the
/// boolean one is a fixed yes/no pair. The fill loop is bounded by
/// [`DISTRACTOR_RETRY_BUDGET`] total draws so degenerate inputs fail
/// closed instead of spinning.
pub fn generate(
    subject: &Subject,
    rng: &mut DeterministicRng,
) -> Result<Question, GenerationImpossible> {
    // Step 1: Collect the askable categories in canonical order
    let askable = subject.askable_categories();
    if askable.is_empty() {
        return Err(GenerationImpossible::NoAskableAttributes);
    }

    // Step 2: Draw one category uniformly
    let category = match rng.choose(&askable) {
        Some(c) => *c,
        None => return Err(GenerationImpossible::NoAskableAttributes),
    };

    // Step 3: Format the correct answer
    let correct = match correct_answer(subject, category) {
        Some(answer) => answer,
        None => return Err(GenerationImpossible::NoAskableAttributes),
    };

    // Step 4: Fill the choice set
    let target = choice_count(category);
    let mut choices: Vec<String> = Vec::with_capacity(target);
    choices.push(correct.clone());

    if category.is_boolean() {
        // Fixed yes/no pair; the other entry is whichever correct is not
        let other = if correct == "Yes" { "No" } else { "Yes" };
        choices.push(other.to_string());
    } else {
        let mut budget = DISTRACTOR_RETRY_BUDGET;
        while choices.len() < target {
            if budget == 0 {
                return Err(GenerationImpossible::RetryBudgetExhausted { category });
            }
            budget -= 1;

            let candidate = match draw_distractor(subject, category, rng) {
                Some(c) => c,
                None => return Err(GenerationImpossible::RetryBudgetExhausted { category }),
            };
            if !choices.contains(&candidate) {
                choices.push(candidate);
            }
        }
    }

    // Step 5: Shuffle display order
    rng.shuffle(&mut choices);

    Ok(Question {
        subject_id: subject.id,
        category,
        text: category.prompt().to_string(),
        choices,
        correct,
        image: subject.image.clone(),
    })
}

/// Number of choices offered for a category.
fn choice_count(category: QuestionCategory) -> usize {
    if category.is_boolean() {
        2
    } else {
        4
    }
}

/// Format the subject's attribute value as the correct choice string.
///
/// Integers as-is, heights/weights rounded to whole units with a unit
/// suffix, booleans as yes/no, everything else the raw string.
fn correct_answer(subject: &Subject, category: QuestionCategory) -> Option<String> {
    match category {
        QuestionCategory::Age => subject.age.map(|a| a.to_string()),
        QuestionCategory::Occupation => subject.occupation.clone(),
        QuestionCategory::Education => subject.education.clone(),
        QuestionCategory::Height => subject.height_cm.map(|h| format!("{} cm", h.round() as i64)),
        QuestionCategory::Weight => subject.weight_kg.map(|w| format!("{} kg", w.round() as i64)),
        QuestionCategory::Smoker => subject.smoker.map(|s| if s { "Yes" } else { "No" }.to_string()),
        QuestionCategory::FavoriteColor => subject.favorite_color.clone(),
        QuestionCategory::FavoriteMovie => subject.favorite_movie.clone(),
        QuestionCategory::FavoriteFood => subject.favorite_food.clone(),
        QuestionCategory::FavoriteFlower => subject.favorite_flower.clone(),
        QuestionCategory::FavoriteSport => subject.favorite_sport.clone(),
        QuestionCategory::FavoriteHobby => subject.favorite_hobby.clone(),
    }
}

/// Draw one distractor candidate for a category.
///
/// Numeric categories synthesize `value +/- offset` within the fixed
/// bound, clamped to the category floor. Categorical ones draw from the
/// catalog pool. Returns `None` when the category has nothing to draw
/// from (boolean, or a missing attribute).
fn draw_distractor(
    subject: &Subject,
    category: QuestionCategory,
    rng: &mut DeterministicRng,
) -> Option<String> {
    match category {
        QuestionCategory::Age => subject.age.map(|age| {
            let offset = rng.next_int_range(-AGE_OFFSET, AGE_OFFSET);
            let value = (age as i64 + offset as i64).max(AGE_FLOOR);
            value.to_string()
        }),
        QuestionCategory::Height => subject.height_cm.map(|height| {
            let offset = rng.next_int_range(-HEIGHT_OFFSET, HEIGHT_OFFSET);
            format!("{} cm", height.round() as i64 + offset as i64)
        }),
        QuestionCategory::Weight => subject.weight_kg.map(|weight| {
            let offset = rng.next_int_range(-WEIGHT_OFFSET, WEIGHT_OFFSET);
            let value = (weight.round() as i64 + offset as i64).max(WEIGHT_FLOOR);
            format!("{} kg", value)
        }),
        QuestionCategory::Smoker => None,
        _ => rng
            .choose(catalog::distractors_for(category))
            .map(|s| s.to_string()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
