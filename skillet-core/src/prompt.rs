//! Recipe-generation prompt construction.
//!
//! Pure string assembly. The prompt asks for a fixed-size batch and embeds
//! a JSON schema example so the completion comes back machine-parseable.

use crate::types::{GenerationRequest, ANY_CUISINE};

/// Number of recipes requested per generation.
pub const RECIPES_PER_BATCH: usize = 4;

/// System prompt sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are a professional chef AI assistant. \
Create detailed, practical recipes with accurate ingredients and step-by-step \
instructions. Always format your response as a valid JSON object with the \
specified structure.";

/// Builds the user prompt for a cleaned generation request.
///
/// Optional preferences only contribute a clause when present; the
/// no-preference cuisine sentinel contributes nothing at all.
pub fn build_recipe_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "Create {RECIPES_PER_BATCH} different {} recipes using the following ingredients: {}.",
        request.difficulty,
        request.ingredients.join(", ")
    );

    if let Some(cuisine) = requested_cuisine(request) {
        prompt.push_str(&format!(" The recipes should be {cuisine} cuisine."));
    }
    if !request.dietary_restrictions.is_empty() {
        prompt.push_str(&format!(
            " All recipes must be {}.",
            request.dietary_restrictions.join(", ")
        ));
    }
    if let Some(minutes) = request.cooking_time {
        prompt.push_str(&format!(
            " The total cooking time for each recipe should be around {minutes} minutes."
        ));
    }
    if let Some(servings) = request.servings {
        prompt.push_str(&format!(" Each recipe should serve {servings} people."));
    }
    prompt.push_str(&format!(
        " Please create {RECIPES_PER_BATCH} diverse recipes with different cooking \
         methods, flavors, and presentations. Make each recipe unique and interesting.\n\n"
    ));
    prompt.push_str(&schema_block(request));
    prompt
}

fn requested_cuisine(request: &GenerationRequest) -> Option<&str> {
    request
        .cuisine
        .as_deref()
        .filter(|cuisine| !cuisine.is_empty() && *cuisine != ANY_CUISINE)
}

fn schema_block(request: &GenerationRequest) -> String {
    let cooking_time = request.cooking_time.unwrap_or(30);
    let servings = request.servings.unwrap_or(4);
    let cuisine = requested_cuisine(request).unwrap_or("International");
    let entries: Vec<String> = (1..=RECIPES_PER_BATCH)
        .map(|n| {
            format!(
                r#"    {{
      "title": "Recipe Name {n}",
      "description": "Brief description",
      "cookingTime": {cooking_time},
      "servings": {servings},
      "difficulty": "{difficulty}",
      "cuisine": "{cuisine}",
      "ingredients": ["ingredient 1", "ingredient 2"],
      "instructions": ["step 1", "step 2"],
      "nutrition": {{
        "calories": 350,
        "protein": "25g",
        "carbs": "30g",
        "fat": "15g"
      }}
    }}"#,
                difficulty = request.difficulty
            )
        })
        .collect();
    format!(
        "Format the response as a JSON object with this exact structure:\n{{\n  \"recipes\": [\n{}\n  ]\n}}",
        entries.join(",\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn request_with_ingredients() -> GenerationRequest {
        GenerationRequest {
            ingredients: vec!["chicken".to_string(), "rice".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn asks_for_a_fixed_batch_with_all_ingredients() {
        let prompt = build_recipe_prompt(&request_with_ingredients());
        assert!(prompt.contains(
            "Create 4 different medium recipes using the following ingredients: chicken, rice."
        ));
        assert!(prompt.contains("\"title\": \"Recipe Name 1\""));
        assert!(prompt.contains("\"title\": \"Recipe Name 4\""));
        assert!(!prompt.contains("\"title\": \"Recipe Name 5\""));
    }

    #[test]
    fn difficulty_is_rendered_lowercase() {
        let mut request = request_with_ingredients();
        request.difficulty = Difficulty::Hard;
        let prompt = build_recipe_prompt(&request);
        assert!(prompt.contains("Create 4 different hard recipes"));
        assert!(prompt.contains("\"difficulty\": \"hard\""));
    }

    #[test]
    fn named_cuisine_appears_as_clause_and_in_schema() {
        let mut request = request_with_ingredients();
        request.cuisine = Some("Thai".to_string());
        let prompt = build_recipe_prompt(&request);
        assert!(prompt.contains("The recipes should be Thai cuisine."));
        assert!(prompt.contains("\"cuisine\": \"Thai\""));
    }

    #[test]
    fn any_cuisine_contributes_nothing() {
        let mut request = request_with_ingredients();
        request.cuisine = Some(ANY_CUISINE.to_string());
        let prompt = build_recipe_prompt(&request);
        assert!(!prompt.contains("Any"));
        assert!(!prompt.contains("The recipes should be"));
        assert!(prompt.contains("\"cuisine\": \"International\""));
    }

    #[test]
    fn dietary_restrictions_join_into_one_clause() {
        let mut request = request_with_ingredients();
        request.dietary_restrictions = vec!["Vegan".to_string(), "Gluten-Free".to_string()];
        let prompt = build_recipe_prompt(&request);
        assert!(prompt.contains("All recipes must be Vegan, Gluten-Free."));
    }

    #[test]
    fn time_and_servings_appear_only_when_requested() {
        let bare = build_recipe_prompt(&request_with_ingredients());
        assert!(!bare.contains("total cooking time"));
        assert!(!bare.contains("should serve"));
        assert!(bare.contains("\"cookingTime\": 30"));
        assert!(bare.contains("\"servings\": 4"));

        let mut request = request_with_ingredients();
        request.cooking_time = Some(45);
        request.servings = Some(2);
        let prompt = build_recipe_prompt(&request);
        assert!(prompt
            .contains("The total cooking time for each recipe should be around 45 minutes."));
        assert!(prompt.contains("Each recipe should serve 2 people."));
        assert!(prompt.contains("\"cookingTime\": 45"));
        assert!(prompt.contains("\"servings\": 2"));
    }

    #[test]
    fn system_prompt_is_stable() {
        assert!(SYSTEM_PROMPT.contains("professional chef"));
        assert!(SYSTEM_PROMPT.contains("valid JSON object"));
    }
}
