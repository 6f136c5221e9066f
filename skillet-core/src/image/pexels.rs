//! Pexels photo-search client.

use async_trait::async_trait;
use serde::Deserialize;

use super::{PhotoError, PhotoHit, PhotoSearcher};
use crate::config::{Config, DEFAULT_PHOTO_BASE_URL};

const PER_PAGE: u32 = 15;
const ORIENTATION: &str = "landscape";

#[derive(Debug)]
pub struct PexelsClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl PexelsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_PHOTO_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            api_key: config.pexels_api_key.clone(),
            base_url: config.photo_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    large: String,
}

#[async_trait]
impl PhotoSearcher for PexelsClient {
    async fn search(&self, query: &str) -> Result<Vec<PhotoHit>, PhotoError> {
        if self.api_key.is_empty() {
            return Err(PhotoError::NotConfigured);
        }

        tracing::debug!(query = %query, "searching for recipe photo");

        let per_page = PER_PAGE.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("orientation", ORIENTATION),
            ])
            .send()
            .await
            .map_err(|e| PhotoError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PhotoError::Status(response.status().as_u16()));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| PhotoError::Request(e.to_string()))?;

        Ok(parsed
            .photos
            .into_iter()
            .map(|photo| PhotoHit {
                url: photo.src.large,
            })
            .collect())
    }
}
