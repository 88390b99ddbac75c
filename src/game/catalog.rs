//! Distractor Catalog
//!
//! Static pools of plausible wrong answers per categorical question
//! category. Tables are fixed at compile time and duplicate-free, so
//! distractor draws are reproducible for a given RNG seed.

use crate::game::subject::QuestionCategory;

// =============================================================================
// CATALOG TABLES
// =============================================================================

/// Plausible professions.
pub const OCCUPATIONS: &[&str] = &[
    "Teacher",
    "Software Engineer",
    "Nurse",
    "Chef",
    "Photographer",
    "Lawyer",
    "Accountant",
    "Architect",
    "Graphic Designer",
    "Electrician",
    "Journalist",
    "Pharmacist",
    "Pilot",
    "Carpenter",
];

/// Education levels.
pub const EDUCATION_LEVELS: &[&str] = &[
    "High school",
    "Vocational training",
    "Some college",
    "Associate degree",
    "Bachelor's degree",
    "Master's degree",
    "Doctorate",
    "Trade school",
    "Professional degree",
    "No formal education",
];

/// Common favorite colors.
pub const COLORS: &[&str] = &[
    "Red",
    "Blue",
    "Green",
    "Yellow",
    "Purple",
    "Orange",
    "Pink",
    "Black",
    "White",
    "Turquoise",
    "Brown",
    "Grey",
];

/// Widely known movies.
pub const MOVIES: &[&str] = &[
    "The Godfather",
    "Pulp Fiction",
    "Inception",
    "The Dark Knight",
    "Forrest Gump",
    "Titanic",
    "The Matrix",
    "Interstellar",
    "Gladiator",
    "Jurassic Park",
    "The Shawshank Redemption",
    "Back to the Future",
    "Casablanca",
    "Avatar",
];

/// Popular foods.
pub const FOODS: &[&str] = &[
    "Pizza",
    "Sushi",
    "Tacos",
    "Pasta",
    "Burgers",
    "Ramen",
    "Curry",
    "Steak",
    "Salad",
    "Pancakes",
    "Dumplings",
    "Paella",
    "Falafel",
    "Lasagna",
];

/// Common flowers.
pub const FLOWERS: &[&str] = &[
    "Rose",
    "Tulip",
    "Sunflower",
    "Orchid",
    "Lily",
    "Daisy",
    "Peony",
    "Lavender",
    "Daffodil",
    "Carnation",
    "Hydrangea",
    "Jasmine",
];

/// Popular sports.
pub const SPORTS: &[&str] = &[
    "Soccer",
    "Basketball",
    "Tennis",
    "Swimming",
    "Running",
    "Cycling",
    "Volleyball",
    "Baseball",
    "Golf",
    "Boxing",
    "Climbing",
    "Skiing",
    "Surfing",
    "Rowing",
];

/// Common hobbies.
pub const HOBBIES: &[&str] = &[
    "Reading",
    "Cooking",
    "Painting",
    "Gardening",
    "Photography",
    "Hiking",
    "Gaming",
    "Knitting",
    "Traveling",
    "Fishing",
    "Dancing",
    "Woodworking",
    "Chess",
    "Baking",
];

// =============================================================================
// LOOKUP
// =============================================================================

/// Distractor pool for a category.
///
/// Numeric and boolean categories have no pool (distractors are
/// synthesized from the actual value, or fixed to yes/no) and return an
/// empty slice.
pub fn distractors_for(category: QuestionCategory) -> &'static [&'static str] {
    match category {
        QuestionCategory::Occupation => OCCUPATIONS,
        QuestionCategory::Education => EDUCATION_LEVELS,
        QuestionCategory::FavoriteColor => COLORS,
        QuestionCategory::FavoriteMovie => MOVIES,
        QuestionCategory::FavoriteFood => FOODS,
        QuestionCategory::FavoriteFlower => FLOWERS,
        QuestionCategory::FavoriteSport => SPORTS,
        QuestionCategory::FavoriteHobby => HOBBIES,
        QuestionCategory::Age
        | QuestionCategory::Height
        | QuestionCategory::Weight
        | QuestionCategory::Smoker => &[],
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_no_duplicates_within_category() {
        for category in QuestionCategory::ALL {
            let pool = distractors_for(category);
            let unique: BTreeSet<_> = pool.iter().collect();
            assert_eq!(
                unique.len(),
                pool.len(),
                "duplicate entry in pool for {:?}",
                category
            );
        }
    }

    #[test]
    fn test_categorical_pools_are_deep_enough() {
        // Three distractors plus the correct answer must always be
        // reachable, even when the correct answer is itself in the pool.
        for category in QuestionCategory::ALL {
            if category.is_categorical() {
                let pool = distractors_for(category);
                assert!(
                    pool.len() >= 4,
                    "pool for {:?} too small: {}",
                    category,
                    pool.len()
                );
            }
        }
    }

    #[test]
    fn test_non_categorical_pools_are_empty() {
        assert!(distractors_for(QuestionCategory::Age).is_empty());
        assert!(distractors_for(QuestionCategory::Height).is_empty());
        assert!(distractors_for(QuestionCategory::Weight).is_empty());
        assert!(distractors_for(QuestionCategory::Smoker).is_empty());
    }

    #[test]
    fn test_lookup_is_stable() {
        let first = distractors_for(QuestionCategory::FavoriteMovie);
        let second = distractors_for(QuestionCategory::FavoriteMovie);
        assert_eq!(first, second);
    }
}
