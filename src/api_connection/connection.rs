use async_trait::async_trait;
use dotenv::dotenv;
use reqwest::Client;
use std::env;
use thiserror::Error;

use super::endpoints::{
    recipe_information_path, search_params, ComplexSearchResponse, RecipeInformation,
    COMPLEX_SEARCH_PATH,
};
use crate::config::PlannerConfig;
use crate::recipe::Recipe;
use crate::recipe_source::{RecipeQuery, RecipeSource};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

/// HTTP client for a Spoonacular-compatible recipe API.
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    client: Client,
    base_url: String,
    api_key_env_var: String,
}

impl SpoonacularClient {
    pub fn new(base_url: impl Into<String>, api_key_env_var: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key_env_var: api_key_env_var.into(),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.base_url.clone(), config.api_key_env_var.clone())
    }

    // The key is looked up per request so a missing key degrades into the
    // fallback path instead of failing at startup.
    fn api_key(&self) -> Result<String, ApiConnectionError> {
        dotenv().ok();
        env::var(&self.api_key_env_var)
            .map_err(|_| ApiConnectionError::MissingApiKey(self.api_key_env_var.clone()))
    }

    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, ApiConnectionError>
    where
        T: serde::de::DeserializeOwned,
    {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str::<T>(&body)?)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(ApiConnectionError::ApiError { status, error_body })
        }
    }
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    async fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, ApiConnectionError> {
        let params = search_params(query);
        let found: ComplexSearchResponse = self.get_json(COMPLEX_SEARCH_PATH, &params).await?;
        tracing::debug!(
            meal = %query.slot,
            results = found.results.len(),
            "complex search returned"
        );

        // Search hits carry no nutrition; each one needs a detail lookup.
        let mut recipes = Vec::with_capacity(found.results.len());
        for hit in &found.results {
            recipes.push(self.details(hit.id).await?);
        }
        Ok(recipes)
    }

    async fn details(&self, recipe_id: u64) -> Result<Recipe, ApiConnectionError> {
        let params = [("includeNutrition", "true".to_string())];
        let info: RecipeInformation = self
            .get_json(&recipe_information_path(recipe_id), &params)
            .await?;
        Ok(Recipe::from(info))
    }
}
