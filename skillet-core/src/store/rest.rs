//! REST implementation of the saved-recipe store.
//!
//! Speaks the PostgREST-style surface the managed datastore exposes:
//! `eq.` filters and ordering via query parameters, apikey plus bearer
//! headers on every call, inserted representation returned on save.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{recipe_payload, RecipeStore, SavedRecipe, StoreError};
use crate::config::Config;
use crate::types::{Recipe, SavedRecipeId, UserId};

const TABLE: &str = "saved_recipes";

#[derive(Debug)]
pub struct RestRecipeStore {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
}

impl RestRecipeStore {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
            client,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

async fn checked(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|parsed| parsed.message)
        .unwrap_or(body);
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

// Save time is stamped client-side so ordering matches what the user saw.
fn insert_body(user: &UserId, recipe: &Recipe) -> Result<Value, StoreError> {
    Ok(json!({
        "user_id": user,
        "recipe_data": recipe_payload(recipe)?,
        "created_at": Utc::now(),
    }))
}

#[async_trait]
impl RecipeStore for RestRecipeStore {
    async fn list_by_user(&self, user: &UserId) -> Result<Vec<SavedRecipe>, StoreError> {
        tracing::debug!(user = %user, "listing saved recipes");
        let filter = eq_filter(user.as_str());
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[
                ("select", "*"),
                ("user_id", filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let response = checked(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }

    async fn save(&self, user: &UserId, recipe: &Recipe) -> Result<SavedRecipe, StoreError> {
        tracing::debug!(user = %user, recipe = %recipe.id, "saving recipe");
        let body = insert_body(user, recipe)?;
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let response = checked(response).await?;
        let mut rows: Vec<SavedRecipe> = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        if rows.is_empty() {
            return Err(StoreError::InvalidResponse(
                "insert returned no rows".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }

    async fn delete_one(&self, id: &SavedRecipeId) -> Result<(), StoreError> {
        tracing::debug!(saved_id = %id, "deleting saved recipe");
        let filter = eq_filter(id.as_str());
        let response = self
            .authed(self.client.delete(self.table_url()))
            .query(&[("id", filter.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        checked(response).await?;
        Ok(())
    }

    async fn delete_all_by_user(&self, user: &UserId) -> Result<(), StoreError> {
        tracing::debug!(user = %user, "deleting all saved recipes");
        let filter = eq_filter(user.as_str());
        let response = self
            .authed(self.client.delete(self.table_url()))
            .query(&[("user_id", filter.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        checked(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Difficulty, RecipeId, GENERATOR_TAG};

    fn recipe() -> Recipe {
        Recipe {
            id: RecipeId::new("recipe_1700000000000_abc123def"),
            title: "Garlic Noodles".to_string(),
            description: String::new(),
            cooking_time: 15,
            servings: 2,
            difficulty: Difficulty::Easy,
            cuisine: "International".to_string(),
            ingredients: vec!["noodles".to_string(), "garlic".to_string()],
            instructions: vec!["Boil.".to_string(), "Toss.".to_string()],
            nutrition: None,
            image_url: None,
            created_at: Utc::now(),
            generated_by: GENERATOR_TAG.to_string(),
        }
    }

    #[test]
    fn table_url_is_rooted_under_rest_v1() {
        let store = RestRecipeStore::new("https://project.supabase.co/", "anon-key");
        assert_eq!(
            store.table_url(),
            "https://project.supabase.co/rest/v1/saved_recipes"
        );
    }

    #[test]
    fn filters_use_postgrest_eq_syntax() {
        assert_eq!(eq_filter("user-1"), "eq.user-1");
    }

    #[test]
    fn insert_body_carries_user_payload_and_save_time() {
        let body = insert_body(&UserId::new("user-1"), &recipe()).unwrap();
        assert_eq!(body["user_id"], "user-1");
        assert_eq!(body["recipe_data"]["cookingTime"], 15);
        assert_eq!(
            body["recipe_data"]["id"],
            "recipe_1700000000000_abc123def"
        );
        assert!(body["recipe_data"].get("savedRecipeId").is_none());
        assert!(body.get("created_at").is_some());
    }
}
