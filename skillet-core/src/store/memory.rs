//! In-memory saved-recipe store for tests and offline runs.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{recipe_payload, RecipeStore, SavedRecipe, StoreError};
use crate::types::{Recipe, SavedRecipeId, UserId};

/// Keeps rows in insertion order and the exact payload each insert would
/// have put on the wire, so tests can assert both ordering and shape.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    rows: Mutex<Vec<(SavedRecipe, Value)>>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserted payloads, oldest first.
    pub fn inserted_payloads(&self) -> Vec<Value> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn list_by_user(&self, user: &UserId) -> Result<Vec<SavedRecipe>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|(row, _)| row.user_id == *user)
            .map(|(row, _)| row.clone())
            .collect())
    }

    async fn save(&self, user: &UserId, recipe: &Recipe) -> Result<SavedRecipe, StoreError> {
        let payload = recipe_payload(recipe)?;
        let row = SavedRecipe {
            id: SavedRecipeId::new(Uuid::new_v4().to_string()),
            user_id: user.clone(),
            recipe: recipe.clone(),
            saved_at: Utc::now(),
        };
        self.rows.lock().unwrap().push((row.clone(), payload));
        Ok(row)
    }

    async fn delete_one(&self, id: &SavedRecipeId) -> Result<(), StoreError> {
        self.rows.lock().unwrap().retain(|(row, _)| row.id != *id);
        Ok(())
    }

    async fn delete_all_by_user(&self, user: &UserId) -> Result<(), StoreError> {
        self.rows
            .lock()
            .unwrap()
            .retain(|(row, _)| row.user_id != *user);
        Ok(())
    }
}
