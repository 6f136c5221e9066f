//! Bounded recency cache for generated recipes.
//!
//! Most-recent-first, deduplicated by id, capped at a fixed size. The
//! cache is convenience state: every operation absorbs storage faults,
//! logging and degrading instead of failing a generation or a render.

use crate::storage::StateStore;
use crate::types::{Recipe, RecipeId};

/// Cache capacity. The ninth recipe in pushes the oldest out.
pub const MAX_RECENT_RECIPES: usize = 8;

/// Storage key holding the recency list.
pub const RECENT_RECIPES_KEY: &str = "skillet_recent_recipes";

const RECIPE_KEY_PREFIX: &str = "skillet_recipe_";

pub struct RecentRecipes {
    store: Box<dyn StateStore>,
}

impl RecentRecipes {
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Inserts at the front, dropping any earlier copy of the same id and
    /// anything past the cap.
    pub fn add(&self, recipe: &Recipe) {
        let mut recipes = self.get_all();
        recipes.retain(|existing| existing.id != recipe.id);
        recipes.insert(0, recipe.clone());
        recipes.truncate(MAX_RECENT_RECIPES);
        self.persist(&recipes);
    }

    /// Current contents, most recent first.
    ///
    /// Missing or corrupt state reads as empty. A list that somehow grew
    /// past the cap is cut back and re-persisted on the way out.
    pub fn get_all(&self) -> Vec<Recipe> {
        let raw = match self.store.get(RECENT_RECIPES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read recent recipes");
                return Vec::new();
            }
        };
        let mut recipes: Vec<Recipe> = match serde_json::from_str(&raw) {
            Ok(recipes) => recipes,
            Err(e) => {
                tracing::warn!(error = %e, "recent recipes entry is corrupt, treating as empty");
                return Vec::new();
            }
        };
        if recipes.len() > MAX_RECENT_RECIPES {
            recipes.truncate(MAX_RECENT_RECIPES);
            self.persist(&recipes);
        }
        recipes
    }

    pub fn remove(&self, id: &RecipeId) {
        let mut recipes = self.get_all();
        recipes.retain(|existing| existing.id != *id);
        self.persist(&recipes);
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(RECENT_RECIPES_KEY) {
            tracing::warn!(error = %e, "failed to clear recent recipes");
        }
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.get_all().iter().any(|existing| existing.id == *id)
    }

    /// Parks one recipe under its own key for another surface to pick up.
    pub fn stash(&self, recipe: &Recipe) {
        match serde_json::to_string(recipe) {
            Ok(json) => {
                if let Err(e) = self.store.set(&recipe_key(&recipe.id), &json) {
                    tracing::warn!(error = %e, id = %recipe.id, "failed to stash recipe");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, id = %recipe.id, "failed to serialize recipe for stash");
            }
        }
    }

    /// Retrieves a stashed recipe and deletes the entry.
    pub fn take(&self, id: &RecipeId) -> Option<Recipe> {
        let key = recipe_key(id);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, id = %id, "failed to read stashed recipe");
                return None;
            }
        };
        if let Err(e) = self.store.remove(&key) {
            tracing::warn!(error = %e, id = %id, "failed to delete stashed recipe");
        }
        match serde_json::from_str(&raw) {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                tracing::warn!(error = %e, id = %id, "stashed recipe is corrupt");
                None
            }
        }
    }

    fn persist(&self, recipes: &[Recipe]) {
        match serde_json::to_string(recipes) {
            Ok(json) => {
                if let Err(e) = self.store.set(RECENT_RECIPES_KEY, &json) {
                    tracing::warn!(error = %e, "failed to persist recent recipes");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize recent recipes"),
        }
    }
}

fn recipe_key(id: &RecipeId) -> String {
    format!("{RECIPE_KEY_PREFIX}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStateStore, StorageError};
    use crate::types::{Difficulty, GENERATOR_TAG};
    use chrono::Utc;
    use std::sync::Arc;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: RecipeId::new(id),
            title: format!("Recipe {id}"),
            description: String::new(),
            cooking_time: 30,
            servings: 4,
            difficulty: Difficulty::Medium,
            cuisine: "International".to_string(),
            ingredients: vec!["salt".to_string()],
            instructions: vec!["Season.".to_string()],
            nutrition: None,
            image_url: None,
            created_at: Utc::now(),
            generated_by: GENERATOR_TAG.to_string(),
        }
    }

    fn memory_recents() -> RecentRecipes {
        RecentRecipes::new(Box::new(MemoryStateStore::new()))
    }

    #[test]
    fn newest_first_and_capped() {
        let recents = memory_recents();
        for n in 1..=MAX_RECENT_RECIPES + 1 {
            recents.add(&recipe(&format!("r{n}")));
        }
        let all = recents.get_all();
        assert_eq!(all.len(), MAX_RECENT_RECIPES);
        assert_eq!(
            all[0].id,
            RecipeId::new(format!("r{}", MAX_RECENT_RECIPES + 1))
        );
        assert!(!recents.contains(&RecipeId::new("r1")));
        assert!(recents.contains(&RecipeId::new("r2")));
    }

    #[test]
    fn re_adding_moves_to_front_without_duplicating() {
        let recents = memory_recents();
        let first = recipe("a");
        let second = recipe("b");
        recents.add(&first);
        recents.add(&second);
        recents.add(&first);
        let all = recents.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[test]
    fn remove_is_a_noop_for_unknown_ids() {
        let recents = memory_recents();
        recents.add(&recipe("a"));
        recents.remove(&RecipeId::new("missing"));
        assert_eq!(recents.get_all().len(), 1);
        recents.remove(&RecipeId::new("a"));
        assert!(recents.get_all().is_empty());
    }

    #[test]
    fn clear_empties_the_cache() {
        let recents = memory_recents();
        recents.add(&recipe("a"));
        recents.add(&recipe("b"));
        recents.clear();
        assert!(recents.get_all().is_empty());
    }

    #[test]
    fn overgrown_state_is_cut_back_and_repersisted() {
        let store = Arc::new(MemoryStateStore::new());
        let oversized: Vec<Recipe> = (1..=12).map(|n| recipe(&format!("r{n}"))).collect();
        store
            .set(
                RECENT_RECIPES_KEY,
                &serde_json::to_string(&oversized).unwrap(),
            )
            .unwrap();

        let recents = RecentRecipes::new(Box::new(store.clone()));
        assert_eq!(recents.get_all().len(), MAX_RECENT_RECIPES);

        let repersisted: Vec<Recipe> =
            serde_json::from_str(&store.get(RECENT_RECIPES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(repersisted.len(), MAX_RECENT_RECIPES);
        assert_eq!(repersisted[0].id, RecipeId::new("r1"));
    }

    #[test]
    fn corrupt_state_reads_as_empty() {
        let store = MemoryStateStore::new();
        store.set(RECENT_RECIPES_KEY, "definitely not json").unwrap();
        let recents = RecentRecipes::new(Box::new(store));
        assert!(recents.get_all().is_empty());
        recents.add(&recipe("fresh"));
        assert_eq!(recents.get_all().len(), 1);
    }

    struct FailingStore;

    impl StateStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn clear(&self) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    #[test]
    fn storage_failures_degrade_instead_of_panicking() {
        let recents = RecentRecipes::new(Box::new(FailingStore));
        recents.add(&recipe("a"));
        assert!(recents.get_all().is_empty());
        recents.remove(&RecipeId::new("a"));
        recents.clear();
        assert!(!recents.contains(&RecipeId::new("a")));
        recents.stash(&recipe("b"));
        assert!(recents.take(&RecipeId::new("b")).is_none());
    }

    #[test]
    fn stash_and_take_round_trip() {
        let recents = memory_recents();
        let stashed = recipe("handoff");
        recents.stash(&stashed);
        assert_eq!(recents.take(&stashed.id), Some(stashed.clone()));
        assert_eq!(recents.take(&stashed.id), None);
    }

    #[test]
    fn stash_does_not_touch_the_recency_list() {
        let recents = memory_recents();
        recents.stash(&recipe("handoff"));
        assert!(recents.get_all().is_empty());
    }
}
