//! The recipe provider seam.
//!
//! Anything that can answer "recipes for this meal within this calorie window"
//! implements [`RecipeSource`]. The planner never calls a source directly; it
//! goes through [`search_with_fallback`] and [`recipe_details`], which absorb
//! provider failures by substituting the built-in table.

pub mod fallback;

use async_trait::async_trait;
use serde::Serialize;

use crate::api_connection::connection::ApiConnectionError;
use crate::config::DEFAULT_RESULTS_PER_QUERY;
use crate::preferences::Preferences;
use crate::recipe::{MealSlot, Recipe};

pub use fallback::{fallback_recipes, find_fallback_recipe, FALLBACK_RECIPES};

/// Query hints for one meal slot. Sources may treat every filter as advisory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeQuery {
    pub slot: MealSlot,
    pub number: u32,
    pub target_calories: u32,
    pub min_calories: u32,
    pub max_calories: u32,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub diet: Option<&'static str>,
    pub intolerances: Vec<String>,
}

impl RecipeQuery {
    pub fn new(slot: MealSlot, preferences: &Preferences, target_calories: u32) -> Self {
        Self {
            slot,
            number: DEFAULT_RESULTS_PER_QUERY,
            target_calories,
            min_calories: (target_calories as f64 * 0.9) as u32,
            max_calories: (target_calories as f64 * 1.1) as u32,
            vegetarian: preferences.vegetarian,
            vegan: preferences.vegan,
            gluten_free: preferences.gluten_free,
            dairy_free: preferences.dairy_free,
            diet: preferences.diet_type.query_hint(),
            intolerances: preferences.allergens.clone(),
        }
    }

    pub fn with_result_cap(mut self, number: u32) -> Self {
        self.number = number;
        self
    }

    pub fn meal_type(&self) -> &'static str {
        self.slot.query_type()
    }
}

#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Candidate recipes for a meal, with nutrition facts filled in.
    async fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, ApiConnectionError>;

    /// Full recipe including ingredients and instructions.
    async fn details(&self, recipe_id: u64) -> Result<Recipe, ApiConnectionError>;
}

/// Searches the source, substituting the slot's fallback recipes on failure.
/// An empty but successful result is passed through untouched.
pub async fn search_with_fallback<S>(source: &S, query: &RecipeQuery) -> Vec<Recipe>
where
    S: RecipeSource + ?Sized,
{
    match source.search(query).await {
        Ok(recipes) => {
            tracing::debug!(meal = %query.slot, candidates = recipes.len(), "recipe search succeeded");
            recipes
        }
        Err(e) => {
            tracing::warn!(meal = %query.slot, error = %e, "recipe search failed, using fallback recipes");
            fallback_recipes(query.slot)
        }
    }
}

/// Fetches one recipe. Provider failures fall back to the built-in table,
/// then to a zero-nutrition "Recipe Not Found" placeholder.
pub async fn recipe_details<S>(source: &S, recipe_id: u64) -> Recipe
where
    S: RecipeSource + ?Sized,
{
    match source.details(recipe_id).await {
        Ok(recipe) => recipe,
        Err(e) => {
            tracing::warn!(recipe_id, error = %e, "recipe details failed, checking fallback table");
            find_fallback_recipe(recipe_id).unwrap_or_else(|| Recipe::not_found(recipe_id))
        }
    }
}
