//! Saved-recipe store adapter.
//!
//! Thin CRUD layer over the external saved-recipes table. A row pairs a
//! store-assigned id with the owning user, a client-stamped save time,
//! and the full recipe payload. "Already saved" is decided by the
//! generated recipe id inside the payload, never by row id.

mod memory;
mod rest;

pub use memory::MemoryRecipeStore;
pub use rest::RestRecipeStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::{Recipe, RecipeId, SavedRecipeId, UserId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recipe store request failed: {0}")]
    Request(String),
    #[error("recipe store returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("recipe store returned an unexpected payload: {0}")]
    InvalidResponse(String),
}

/// One saved-recipe row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: SavedRecipeId,
    pub user_id: UserId,
    #[serde(rename = "recipe_data")]
    pub recipe: Recipe,
    #[serde(rename = "created_at")]
    pub saved_at: DateTime<Utc>,
}

// Store-assigned fields that must never ride along inside the recipe
// payload.
const STORE_ONLY_KEYS: &[&str] = &["savedRecipeId", "savedAt"];

/// Serializes a recipe for insertion, scrubbing any store bookkeeping
/// that leaked into the source object.
pub(crate) fn recipe_payload(recipe: &Recipe) -> Result<Value, StoreError> {
    let mut value =
        serde_json::to_value(recipe).map_err(|e| StoreError::Request(e.to_string()))?;
    strip_store_fields(&mut value);
    Ok(value)
}

pub(crate) fn strip_store_fields(value: &mut Value) {
    if let Some(object) = value.as_object_mut() {
        for key in STORE_ONLY_KEYS {
            object.remove(*key);
        }
    }
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Recipes the user saved, newest save first.
    async fn list_by_user(&self, user: &UserId) -> Result<Vec<SavedRecipe>, StoreError>;

    /// Persists a copy of the recipe for the user and returns the stored
    /// row. Saving the same recipe twice makes two rows.
    async fn save(&self, user: &UserId, recipe: &Recipe) -> Result<SavedRecipe, StoreError>;

    /// Deletes one saved row. An id that no longer exists is not an
    /// error.
    async fn delete_one(&self, id: &SavedRecipeId) -> Result<(), StoreError>;

    /// Deletes every row the user saved.
    async fn delete_all_by_user(&self, user: &UserId) -> Result<(), StoreError>;

    /// Whether the user holds a saved copy of the generated recipe.
    async fn is_saved(&self, user: &UserId, recipe_id: &RecipeId) -> Result<bool, StoreError> {
        let saved = self.list_by_user(user).await?;
        Ok(saved.iter().any(|row| row.recipe.id == *recipe_id))
    }
}
