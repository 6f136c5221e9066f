//! Photo enrichment for generated recipes.
//!
//! Looks up a representative photo for each recipe through the
//! [`PhotoSearcher`] seam. Enrichment is strictly best-effort: a recipe
//! without a photo is still a recipe, so every failure here degrades to
//! "no image" instead of surfacing.

mod pexels;

pub use pexels::PexelsClient;

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Recipe, RecipeId};

/// Query used when nothing recipe-specific can be derived, and as the
/// one-shot retry when a derived query finds nothing.
pub const GENERIC_QUERY: &str = "food";

/// Stock photos renderers substitute when enrichment found nothing.
pub const FALLBACK_IMAGE_URLS: &[&str] = &[
    "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/1279330/pexels-photo-1279330.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/1565982/pexels-photo-1565982.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/2097090/pexels-photo-2097090.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/1410235/pexels-photo-1410235.jpeg?auto=compress&cs=tinysrgb&w=800",
];

// Measure and size words that make poor search terms when they lead an
// ingredient line.
const UNIT_WORDS: &[&str] = &[
    "cup", "cups", "tablespoon", "tablespoons", "tbsp", "teaspoon", "teaspoons", "tsp", "ounce",
    "ounces", "pound", "pounds", "lbs", "gram", "grams", "kilogram", "kilograms", "liter",
    "liters", "pinch", "dash", "clove", "cloves", "slice", "slices", "can", "cans", "small",
    "medium", "large", "fresh", "chopped", "diced", "minced",
];

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("photo search request failed: {0}")]
    Request(String),
    #[error("photo search returned status {0}")]
    Status(u16),
    #[error("photo search credential is not configured")]
    NotConfigured,
}

/// One search result, reduced to the image URL callers embed.
#[derive(Debug, Clone)]
pub struct PhotoHit {
    pub url: String,
}

/// A photo-search backend returning landscape results, most relevant
/// first.
#[async_trait]
pub trait PhotoSearcher: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<PhotoHit>, PhotoError>;
}

#[async_trait]
impl<S: PhotoSearcher + ?Sized> PhotoSearcher for std::sync::Arc<S> {
    async fn search(&self, query: &str) -> Result<Vec<PhotoHit>, PhotoError> {
        (**self).search(query).await
    }
}

/// Derives the search query for a recipe.
///
/// Prefers the title, lowercased with punctuation stripped. With no
/// usable title, falls back to the head words of the first two
/// ingredients plus the generic term.
pub fn derive_image_query(recipe: &Recipe) -> String {
    let from_title = normalize_query(&recipe.title);
    if !from_title.is_empty() {
        return from_title;
    }
    let mut terms: Vec<String> = recipe
        .ingredients
        .iter()
        .take(2)
        .filter_map(|raw| ingredient_head_word(raw))
        .collect();
    terms.push(GENERIC_QUERY.to_string());
    terms.join(" ")
}

fn normalize_query(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn ingredient_head_word(raw: &str) -> Option<String> {
    let letters_only: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect();
    letters_only
        .split_whitespace()
        .find(|word| word.len() > 2 && !UNIT_WORDS.contains(word))
        .map(str::to_string)
}

/// Finds a photo URL for the recipe, or `None`.
///
/// When the derived query yields an empty result set, retries once with
/// the generic query. Any error short-circuits to `None`; enrichment
/// never fails a generation.
pub async fn find_recipe_image(searcher: &dyn PhotoSearcher, recipe: &Recipe) -> Option<String> {
    let query = derive_image_query(recipe);
    let hits = match searcher.search(&query).await {
        Ok(hits) => hits,
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "photo search failed, leaving recipe without image");
            return None;
        }
    };
    if let Some(hit) = hits.first() {
        return Some(hit.url.clone());
    }
    if query != GENERIC_QUERY {
        match searcher.search(GENERIC_QUERY).await {
            Ok(hits) => return hits.first().map(|hit| hit.url.clone()),
            Err(e) => {
                tracing::warn!(query = GENERIC_QUERY, error = %e, "fallback photo search failed");
                return None;
            }
        }
    }
    None
}

/// Stable placeholder choice for a recipe without a fetched photo. The
/// same id always maps to the same stock image.
pub fn fallback_image_url(id: &RecipeId) -> &'static str {
    let hash = id
        .as_str()
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    FALLBACK_IMAGE_URLS[hash % FALLBACK_IMAGE_URLS.len()]
}

/// Photo searcher answering from canned results, for tests. Results are
/// keyed by exact query; unknown queries return empty. Recorded queries
/// let tests assert what was actually searched.
#[derive(Debug, Default)]
pub struct FakePhotoSearcher {
    results: RwLock<HashMap<String, Vec<String>>>,
    failures: RwLock<HashSet<String>>,
    queries: Mutex<Vec<String>>,
}

impl FakePhotoSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(query: &str, urls: &[&str]) -> Self {
        let searcher = Self::new();
        searcher.add_result(query, urls);
        searcher
    }

    pub fn add_result(&self, query: &str, urls: &[&str]) {
        self.results.write().unwrap().insert(
            query.to_string(),
            urls.iter().map(|url| url.to_string()).collect(),
        );
    }

    /// Make any query containing `substring` fail with a server error.
    pub fn fail_matching(&self, substring: &str) {
        self.failures.write().unwrap().insert(substring.to_string());
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotoSearcher for FakePhotoSearcher {
    async fn search(&self, query: &str) -> Result<Vec<PhotoHit>, PhotoError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self
            .failures
            .read()
            .unwrap()
            .iter()
            .any(|substring| query.contains(substring.as_str()))
        {
            return Err(PhotoError::Status(500));
        }
        Ok(self
            .results
            .read()
            .unwrap()
            .get(query)
            .map(|urls| {
                urls.iter()
                    .map(|url| PhotoHit { url: url.clone() })
                    .collect()
            })
            .unwrap_or_default())
    }
}
