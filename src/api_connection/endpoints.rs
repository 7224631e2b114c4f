use serde::{Deserialize, Serialize};

use crate::recipe::{Ingredient, NutritionFacts, Recipe};
use crate::recipe_source::RecipeQuery;

pub const COMPLEX_SEARCH_PATH: &str = "/recipes/complexSearch";

pub fn recipe_information_path(recipe_id: u64) -> String {
    format!("/recipes/{}/information", recipe_id)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ComplexSearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResultItem>,
    #[serde(rename = "totalResults", skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchResultItem {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NutritionBlock {
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtendedIngredient {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InstructionStep {
    #[serde(default)]
    pub step: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalyzedInstruction {
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub nutrition: Option<NutritionBlock>,
    #[serde(default)]
    pub extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default)]
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
}

/// Picks the five tracked nutrients out of the provider's list by exact name.
/// Anything not reported stays at zero.
pub fn nutrition_from_nutrients(nutrients: &[Nutrient]) -> NutritionFacts {
    let mut facts = NutritionFacts::ZERO;
    for nutrient in nutrients {
        match nutrient.name.as_str() {
            "Calories" => facts.calories = nutrient.amount,
            "Protein" => facts.protein = nutrient.amount,
            "Carbohydrates" => facts.carbs = nutrient.amount,
            "Fat" => facts.fat = nutrient.amount,
            "Fiber" => facts.fiber = nutrient.amount,
            _ => {}
        }
    }
    facts
}

impl From<RecipeInformation> for Recipe {
    fn from(info: RecipeInformation) -> Self {
        let nutrition = info
            .nutrition
            .as_ref()
            .map(|block| nutrition_from_nutrients(&block.nutrients))
            .unwrap_or_default();

        let ingredients = info
            .extended_ingredients
            .into_iter()
            .map(|ing| Ingredient {
                name: ing.name,
                amount: ing.amount,
                unit: ing.unit,
            })
            .collect();

        // Only the first instruction block is used; later blocks are sub-recipes.
        let instructions = info
            .analyzed_instructions
            .into_iter()
            .next()
            .map(|block| block.steps.into_iter().map(|s| s.step).collect())
            .unwrap_or_default();

        Recipe {
            id: info.id,
            title: info.title.unwrap_or_default(),
            image: info.image.unwrap_or_default(),
            ready_in_minutes: info.ready_in_minutes.unwrap_or(0),
            servings: info.servings.unwrap_or(0),
            source_url: info.source_url.unwrap_or_default(),
            nutrition,
            ingredients,
            instructions,
        }
    }
}

/// Query-string parameters for a complex search, excluding the API key.
pub fn search_params(query: &RecipeQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("number", query.number.to_string()),
        ("type", query.meal_type().to_string()),
        ("maxCalories", query.max_calories.to_string()),
        ("minCalories", query.min_calories.to_string()),
    ];
    let flags = [
        ("vegetarian", query.vegetarian),
        ("vegan", query.vegan),
        ("glutenFree", query.gluten_free),
        ("dairyFree", query.dairy_free),
    ];
    for (name, enabled) in flags {
        if enabled {
            params.push((name, "true".to_string()));
        }
    }
    if let Some(diet) = query.diet {
        params.push(("diet", diet.to_string()));
    }
    if !query.intolerances.is_empty() {
        params.push(("intolerances", query.intolerances.join(",")));
    }
    params
}
