//! Completion-response parsing.
//!
//! Turns the raw completion text into recipe records. Accepts either the
//! requested `{"recipes": [...]}` envelope or a single bare recipe object,
//! then stamps each record with a fresh id, the creation timestamp, and
//! the generator tag. Parsing never touches cache or store state.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::error::GenerateError;
use crate::types::{Difficulty, Nutrition, Recipe, RecipeId, GENERATOR_TAG};

#[derive(Debug, Deserialize)]
struct RecipeBatch {
    recipes: Vec<RecipeDraft>,
}

/// Recipe fields as the completion service emits them, before identity is
/// stamped on. Absent optional fields fall back rather than failing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeDraft {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cooking_time: u32,
    #[serde(default)]
    servings: u32,
    #[serde(default)]
    difficulty: Difficulty,
    #[serde(default)]
    cuisine: String,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    instructions: Vec<String>,
    #[serde(default)]
    nutrition: Option<Nutrition>,
}

/// Parses a completion payload into stamped recipes.
///
/// A recipe with no ingredients or no instructions cannot render, so the
/// whole payload is rejected as malformed rather than passed along.
pub fn parse_recipes(payload: &str) -> Result<Vec<Recipe>, GenerateError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;

    let drafts = if value.get("recipes").map(Value::is_array).unwrap_or(false) {
        let batch: RecipeBatch = serde_json::from_value(value)
            .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;
        batch.recipes
    } else {
        let single: RecipeDraft = serde_json::from_value(value)
            .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;
        vec![single]
    };

    drafts.into_iter().map(stamp).collect()
}

fn stamp(draft: RecipeDraft) -> Result<Recipe, GenerateError> {
    if draft.ingredients.is_empty() {
        return Err(GenerateError::MalformedResponse(
            "recipe has no ingredients".to_string(),
        ));
    }
    if draft.instructions.is_empty() {
        return Err(GenerateError::MalformedResponse(
            "recipe has no instructions".to_string(),
        ));
    }
    Ok(Recipe {
        id: RecipeId::generate(),
        title: draft.title,
        description: draft.description,
        cooking_time: draft.cooking_time,
        servings: draft.servings,
        difficulty: draft.difficulty,
        cuisine: draft.cuisine,
        ingredients: draft.ingredients,
        instructions: draft.instructions,
        nutrition: draft.nutrition,
        image_url: None,
        created_at: Utc::now(),
        generated_by: GENERATOR_TAG.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = r#"{
        "recipes": [
            {
                "title": "Lemon Pasta",
                "description": "Bright and quick.",
                "cookingTime": 20,
                "servings": 2,
                "difficulty": "easy",
                "cuisine": "Italian",
                "ingredients": ["pasta", "lemon"],
                "instructions": ["Boil pasta.", "Toss with lemon."],
                "nutrition": {"calories": 420, "protein": "12g", "carbs": "70g", "fat": "9g"}
            },
            {
                "title": "Garlic Rice",
                "description": "A side that steals the show.",
                "cookingTime": 25,
                "servings": 4,
                "difficulty": "easy",
                "cuisine": "International",
                "ingredients": ["rice", "garlic"],
                "instructions": ["Saute garlic.", "Cook rice."]
            }
        ]
    }"#;

    #[test]
    fn batch_envelope_yields_every_recipe() {
        let recipes = parse_recipes(BATCH).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].title, "Lemon Pasta");
        assert_eq!(recipes[1].title, "Garlic Rice");
        assert_eq!(recipes[0].nutrition.as_ref().unwrap().calories, 420);
        assert!(recipes[1].nutrition.is_none());
    }

    #[test]
    fn bare_object_yields_one_recipe() {
        let payload = r#"{
            "title": "Solo Soup",
            "ingredients": ["water", "salt"],
            "instructions": ["Boil."]
        }"#;
        let recipes = parse_recipes(payload).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Solo Soup");
    }

    #[test]
    fn every_recipe_is_stamped() {
        let start = Utc::now();
        let recipes = parse_recipes(BATCH).unwrap();
        for recipe in &recipes {
            assert!(recipe.id.as_str().starts_with("recipe_"));
            assert!(recipe.created_at >= start);
            assert_eq!(recipe.generated_by, GENERATOR_TAG);
            assert!(recipe.image_url.is_none());
        }
        assert_ne!(recipes[0].id, recipes[1].id);
    }

    #[test]
    fn non_json_is_malformed() {
        let result = parse_recipes("Sure! Here are four recipes you might enjoy...");
        assert!(matches!(result, Err(GenerateError::MalformedResponse(_))));
    }

    #[test]
    fn recipe_without_ingredients_is_malformed() {
        let payload = r#"{"title": "Empty", "ingredients": [], "instructions": ["Do nothing."]}"#;
        let result = parse_recipes(payload);
        assert!(matches!(result, Err(GenerateError::MalformedResponse(_))));
    }

    #[test]
    fn recipe_without_instructions_is_malformed() {
        let payload = r#"{"title": "Stuck", "ingredients": ["flour"], "instructions": []}"#;
        let result = parse_recipes(payload);
        assert!(matches!(result, Err(GenerateError::MalformedResponse(_))));
    }

    #[test]
    fn missing_optional_fields_fall_back() {
        let payload = r#"{"ingredients": ["egg"], "instructions": ["Fry."]}"#;
        let recipes = parse_recipes(payload).unwrap();
        assert_eq!(recipes[0].title, "");
        assert_eq!(recipes[0].cooking_time, 0);
        assert_eq!(recipes[0].difficulty, Difficulty::Medium);
    }
}
