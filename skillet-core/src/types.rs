//! Core data model for generated and saved recipes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Tag stamped on every recipe produced by the completion service.
pub const GENERATOR_TAG: &str = "openai";

/// Cuisine sentinel meaning "no preference". Contributes nothing to the
/// prompt, unlike every other cuisine value.
pub const ANY_CUISINE: &str = "Any";

/// Cuisines offered by input layers. The leading entry is the
/// no-preference sentinel.
pub const CUISINE_TYPES: &[&str] = &[
    ANY_CUISINE,
    "Italian",
    "Mexican",
    "Chinese",
    "Indian",
    "Mediterranean",
    "French",
    "Japanese",
    "Thai",
    "American",
    "Korean",
    "Vietnamese",
    "Middle Eastern",
    "Spanish",
    "Greek",
    "Brazilian",
    "German",
];

/// Dietary restrictions offered by input layers.
pub const DIETARY_RESTRICTIONS: &[&str] = &[
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Dairy-Free",
    "Keto",
    "Low-Carb",
    "High-Protein",
    "Nut-Free",
    "Soy-Free",
    "Paleo",
    "Low-Sodium",
    "Sugar-Free",
];

/// Identifier minted locally for a generated recipe.
///
/// Collision-resistant rather than globally unique: creation timestamp in
/// milliseconds plus a short random suffix. Immutable once assigned, and
/// distinct from [`SavedRecipeId`], which the saved-recipe store assigns
/// to a saved copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh id of the form `recipe_{unix_millis}_{9 random alphanumerics}`.
    pub fn generate() -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(9)
            .map(char::from)
            .collect();
        Self(format!(
            "recipe_{}_{}",
            Utc::now().timestamp_millis(),
            suffix.to_lowercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier the saved-recipe store assigns to a saved row. Never stored
/// inside the recipe payload itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedRecipeId(String);

impl SavedRecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SavedRecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner of saved recipes in the external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recipe difficulty level. Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{other}', expected easy, medium, or hard"
            )),
        }
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Completion services do not reliably match case, so parse leniently.
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Nutrition estimate attached by the completion service. All fields are
/// best-effort; missing values fall back to zero or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub protein: String,
    #[serde(default)]
    pub carbs: String,
    #[serde(default)]
    pub fat: String,
}

/// A generated recipe, as rendered to users and persisted in the recency
/// cache and the saved-recipe store.
///
/// `ingredients` and `instructions` are ordered and non-empty for any
/// recipe that came through the parser. `image_url` is `None` when photo
/// enrichment found nothing; renderers substitute a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Total cooking time in minutes; zero means the service left it out.
    #[serde(default)]
    pub cooking_time: u32,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub cuisine: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub generated_by: String,
}

/// Parameters for one generation batch.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub ingredients: Vec<String>,
    /// Free-text cuisine; `None` or [`ANY_CUISINE`] means no preference.
    pub cuisine: Option<String>,
    pub dietary_restrictions: Vec<String>,
    /// Target total cooking time in minutes.
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Difficulty,
}

impl GenerationRequest {
    /// Copy of the request with ingredient entries trimmed and blank
    /// entries dropped.
    pub fn cleaned(&self) -> Self {
        let mut cleaned = self.clone();
        cleaned.ingredients = self
            .ingredients
            .iter()
            .map(|entry| entry.trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect();
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_has_expected_shape() {
        let id = RecipeId::generate();
        let parts: Vec<&str> = id.as_str().splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "recipe");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = RecipeId::generate();
        let b = RecipeId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn cuisine_catalog_leads_with_the_no_preference_sentinel() {
        assert_eq!(CUISINE_TYPES[0], ANY_CUISINE);
        assert!(DIETARY_RESTRICTIONS.contains(&"Vegan"));
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("MEDIUM".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let back: Difficulty = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(back, Difficulty::Hard);
    }

    #[test]
    fn cleaned_request_drops_blank_ingredients() {
        let request = GenerationRequest {
            ingredients: vec![
                "  chicken ".to_string(),
                "".to_string(),
                "   ".to_string(),
                "rice".to_string(),
            ],
            ..Default::default()
        };
        let cleaned = request.cleaned();
        assert_eq!(cleaned.ingredients, vec!["chicken", "rice"]);
    }

    #[test]
    fn recipe_round_trips_with_camel_case_keys() {
        let recipe = Recipe {
            id: RecipeId::new("recipe_1700000000000_abc123def"),
            title: "Tomato Soup".to_string(),
            description: "A cozy classic.".to_string(),
            cooking_time: 30,
            servings: 4,
            difficulty: Difficulty::Easy,
            cuisine: "International".to_string(),
            ingredients: vec!["tomatoes".to_string()],
            instructions: vec!["Simmer.".to_string()],
            nutrition: None,
            image_url: None,
            created_at: Utc::now(),
            generated_by: GENERATOR_TAG.to_string(),
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert!(json.get("cookingTime").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("generatedBy").is_some());
        assert!(json.get("imageUrl").is_none());
        let back: Recipe = serde_json::from_value(json).unwrap();
        assert_eq!(back, recipe);
    }
}
