//! Subject Profiles and Question Categories
//!
//! Identity newtypes plus the sparse profile data questions are drawn
//! from. Attributes are optional; an absent attribute cannot be asked
//! about. Profiles are owned by the caller and read-only to the engine.

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique player identifier (UUID as bytes).
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub struct PlayerId(pub [u8; 16]);

impl PlayerId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Create from UUID string.
    pub fn from_uuid_str(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s).ok().map(|u| Self(*u.as_bytes()))
    }

    /// Convert to UUID string.
    pub fn to_uuid_string(&self) -> String {
        uuid::Uuid::from_bytes(self.0).to_string()
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

/// Unique subject identifier (UUID as bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub struct SubjectId(pub [u8; 16]);

impl SubjectId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Create from UUID string.
    pub fn from_uuid_str(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s).ok().map(|u| Self(*u.as_bytes()))
    }

    /// Convert to UUID string.
    pub fn to_uuid_string(&self) -> String {
        uuid::Uuid::from_bytes(self.0).to_string()
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

// =============================================================================
// QUESTION CATEGORY
// =============================================================================

/// Attribute kind a question can ask about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum QuestionCategory {
    /// Age in years (numeric)
    Age = 0,
    /// Profession (categorical)
    Occupation = 1,
    /// Education level (categorical)
    Education = 2,
    /// Height in centimeters (numeric)
    Height = 3,
    /// Weight in kilograms (numeric)
    Weight = 4,
    /// Smoker yes/no (boolean)
    Smoker = 5,
    /// Favorite color (categorical)
    FavoriteColor = 6,
    /// Favorite movie (categorical)
    FavoriteMovie = 7,
    /// Favorite food (categorical)
    FavoriteFood = 8,
    /// Favorite flower (categorical)
    FavoriteFlower = 9,
    /// Favorite sport (categorical)
    FavoriteSport = 10,
    /// Favorite hobby (categorical)
    FavoriteHobby = 11,
}

impl QuestionCategory {
    /// All categories in canonical order.
    ///
    /// Generation collects askable categories in this order before the
    /// random draw, so the draw is reproducible for a given seed.
    pub const ALL: [QuestionCategory; 12] = [
        QuestionCategory::Age,
        QuestionCategory::Occupation,
        QuestionCategory::Education,
        QuestionCategory::Height,
        QuestionCategory::Weight,
        QuestionCategory::Smoker,
        QuestionCategory::FavoriteColor,
        QuestionCategory::FavoriteMovie,
        QuestionCategory::FavoriteFood,
        QuestionCategory::FavoriteFlower,
        QuestionCategory::FavoriteSport,
        QuestionCategory::FavoriteHobby,
    ];

    /// Question text shown for this category.
    pub fn prompt(self) -> &'static str {
        match self {
            QuestionCategory::Age => "How old is this person?",
            QuestionCategory::Occupation => "What does this person do for a living?",
            QuestionCategory::Education => "What is this person's education level?",
            QuestionCategory::Height => "How tall is this person?",
            QuestionCategory::Weight => "How much does this person weigh?",
            QuestionCategory::Smoker => "Does this person smoke?",
            QuestionCategory::FavoriteColor => "What is this person's favorite color?",
            QuestionCategory::FavoriteMovie => "What is this person's favorite movie?",
            QuestionCategory::FavoriteFood => "What is this person's favorite food?",
            QuestionCategory::FavoriteFlower => "What is this person's favorite flower?",
            QuestionCategory::FavoriteSport => "What is this person's favorite sport?",
            QuestionCategory::FavoriteHobby => "What is this person's favorite hobby?",
        }
    }

    /// Numeric categories synthesize distractors from the actual value.
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            QuestionCategory::Age | QuestionCategory::Height | QuestionCategory::Weight
        )
    }

    /// The boolean category has a fixed yes/no choice set.
    #[inline]
    pub fn is_boolean(self) -> bool {
        matches!(self, QuestionCategory::Smoker)
    }

    /// Categorical categories draw distractors from the static catalog.
    #[inline]
    pub fn is_categorical(self) -> bool {
        !self.is_numeric() && !self.is_boolean()
    }
}

// =============================================================================
// SUBJECT
// =============================================================================

/// Profile data for one person questions are generated about.
///
/// Every attribute is optional. The engine never mutates a subject; it
/// only reads attribute values while generating questions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject ID
    pub id: SubjectId,

    /// Display image reference, copied onto generated questions
    pub image: Option<String>,

    /// Age in years
    pub age: Option<u32>,

    /// Profession
    pub occupation: Option<String>,

    /// Education level
    pub education: Option<String>,

    /// Height in centimeters
    pub height_cm: Option<f64>,

    /// Weight in kilograms
    pub weight_kg: Option<f64>,

    /// Smoker flag
    pub smoker: Option<bool>,

    /// Favorite color
    pub favorite_color: Option<String>,

    /// Favorite movie
    pub favorite_movie: Option<String>,

    /// Favorite food
    pub favorite_food: Option<String>,

    /// Favorite flower
    pub favorite_flower: Option<String>,

    /// Favorite sport
    pub favorite_sport: Option<String>,

    /// Favorite hobby
    pub favorite_hobby: Option<String>,
}

impl Subject {
    /// Create an empty profile with the given ID.
    pub fn new(id: SubjectId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Whether the attribute for `category` is present.
    pub fn has_attribute(&self, category: QuestionCategory) -> bool {
        match category {
            QuestionCategory::Age => self.age.is_some(),
            QuestionCategory::Occupation => self.occupation.is_some(),
            QuestionCategory::Education => self.education.is_some(),
            QuestionCategory::Height => self.height_cm.is_some(),
            QuestionCategory::Weight => self.weight_kg.is_some(),
            QuestionCategory::Smoker => self.smoker.is_some(),
            QuestionCategory::FavoriteColor => self.favorite_color.is_some(),
            QuestionCategory::FavoriteMovie => self.favorite_movie.is_some(),
            QuestionCategory::FavoriteFood => self.favorite_food.is_some(),
            QuestionCategory::FavoriteFlower => self.favorite_flower.is_some(),
            QuestionCategory::FavoriteSport => self.favorite_sport.is_some(),
            QuestionCategory::FavoriteHobby => self.favorite_hobby.is_some(),
        }
    }

    /// Categories with a present attribute value, in canonical order.
    pub fn askable_categories(&self) -> Vec<QuestionCategory> {
        QuestionCategory::ALL
            .iter()
            .copied()
            .filter(|c| self.has_attribute(*c))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_id_ordering() {
        let id1 = SubjectId::new([0; 16]);
        let id2 = SubjectId::new([1; 16]);
        let id3 = SubjectId::new([0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        assert!(id1 < id2);
        assert!(id1 < id3);
        assert!(id3 < id2);
    }

    #[test]
    fn test_player_id_uuid_round_trip() {
        let id = PlayerId::new([7; 16]);
        let s = id.to_uuid_string();
        assert_eq!(PlayerId::from_uuid_str(&s), Some(id));

        assert_eq!(PlayerId::from_uuid_str("not-a-uuid"), None);
    }

    #[test]
    fn test_empty_subject_has_no_askable_categories() {
        let subject = Subject::new(SubjectId::new([1; 16]));
        assert!(subject.askable_categories().is_empty());
    }

    #[test]
    fn test_askable_categories_follow_canonical_order() {
        let mut subject = Subject::new(SubjectId::new([1; 16]));
        subject.favorite_sport = Some("Tennis".to_string());
        subject.age = Some(30);
        subject.smoker = Some(false);

        // Canonical order, not insertion order
        assert_eq!(
            subject.askable_categories(),
            vec![
                QuestionCategory::Age,
                QuestionCategory::Smoker,
                QuestionCategory::FavoriteSport,
            ]
        );
    }

    #[test]
    fn test_category_kind_partition() {
        let mut numeric = 0;
        let mut boolean = 0;
        let mut categorical = 0;
        for category in QuestionCategory::ALL {
            // Exactly one kind per category
            let kinds = [
                category.is_numeric(),
                category.is_boolean(),
                category.is_categorical(),
            ];
            assert_eq!(kinds.iter().filter(|k| **k).count(), 1);
            match kinds {
                [true, _, _] => numeric += 1,
                [_, true, _] => boolean += 1,
                _ => categorical += 1,
            }
        }
        assert_eq!(numeric, 3);
        assert_eq!(boolean, 1);
        assert_eq!(categorical, 8);
    }
}
