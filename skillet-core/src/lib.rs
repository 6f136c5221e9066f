//! Recipe generation from a list of ingredients.
//!
//! The pipeline turns a generation request into a batch of recipes: build
//! a prompt, ask a chat-completion service, parse the JSON it returns,
//! attach stock photos, and remember the batch in a small recency cache.
//! A separate adapter persists recipes a user chose to keep.

pub mod completion;
pub mod config;
pub mod error;
pub mod generator;
pub mod image;
pub mod parse;
pub mod prompt;
pub mod recents;
pub mod storage;
pub mod store;
pub mod types;

pub use config::{Config, ConfigError};
pub use error::GenerateError;
pub use generator::RecipeGenerator;
pub use recents::{RecentRecipes, MAX_RECENT_RECIPES};
pub use storage::{FileStateStore, MemoryStateStore, StateStore, StorageError};
pub use types::{
    Difficulty, GenerationRequest, Nutrition, Recipe, RecipeId, SavedRecipeId, UserId,
};
