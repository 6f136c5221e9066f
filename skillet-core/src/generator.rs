//! Recipe-generation pipeline.
//!
//! One generation is one pass: clean the request, build the prompt, make
//! a single completion call, parse the batch, enrich each recipe with a
//! photo concurrently, then record the batch in the recency cache.

use futures::future::join_all;

use crate::completion::CompletionClient;
use crate::error::GenerateError;
use crate::image::{find_recipe_image, PhotoSearcher};
use crate::parse::parse_recipes;
use crate::prompt::{build_recipe_prompt, SYSTEM_PROMPT};
use crate::recents::RecentRecipes;
use crate::types::{GenerationRequest, Recipe};

pub struct RecipeGenerator {
    completion: Box<dyn CompletionClient>,
    photos: Box<dyn PhotoSearcher>,
    recents: RecentRecipes,
}

impl RecipeGenerator {
    pub fn new(
        completion: Box<dyn CompletionClient>,
        photos: Box<dyn PhotoSearcher>,
        recents: RecentRecipes,
    ) -> Self {
        Self {
            completion,
            photos,
            recents,
        }
    }

    pub fn recents(&self) -> &RecentRecipes {
        &self.recents
    }

    /// Generates a batch of recipes for the request.
    ///
    /// Completion and parse failures abort the pass before any cache
    /// write. Photo enrichment cannot fail a pass; a recipe whose lookup
    /// failed simply has no image.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<Recipe>, GenerateError> {
        let request = request.cleaned();
        if request.ingredients.is_empty() {
            return Err(GenerateError::EmptyIngredients);
        }

        tracing::debug!(
            provider = self.completion.provider_name(),
            model = self.completion.model_name(),
            ingredients = request.ingredients.len(),
            "requesting recipe batch"
        );

        let prompt = build_recipe_prompt(&request);
        let payload = self.completion.complete(SYSTEM_PROMPT, &prompt).await?;
        let mut recipes = parse_recipes(&payload)?;

        let lookups = recipes
            .iter()
            .map(|recipe| find_recipe_image(self.photos.as_ref(), recipe));
        let images = join_all(lookups).await;
        for (recipe, image_url) in recipes.iter_mut().zip(images) {
            recipe.image_url = image_url;
        }

        for recipe in &recipes {
            self.recents.add(recipe);
        }

        tracing::debug!(count = recipes.len(), "generated recipe batch");
        Ok(recipes)
    }
}
