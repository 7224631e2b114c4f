use crate::recipe::{MealSlot, NutritionFacts, Recipe};

/// Built-in recipe used whenever the provider cannot be reached.
#[derive(Clone, Copy, Debug)]
pub struct FallbackRecipe {
    pub id: u64,
    pub slot: MealSlot,
    pub title: &'static str,
    pub image: &'static str,
    pub ready_in_minutes: u32,
    pub nutrition: NutritionFacts,
}

impl FallbackRecipe {
    pub fn to_recipe(&self) -> Recipe {
        Recipe {
            id: self.id,
            title: self.title.to_string(),
            image: self.image.to_string(),
            ready_in_minutes: self.ready_in_minutes,
            servings: 1,
            source_url: "#".to_string(),
            nutrition: self.nutrition,
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }
}

// Two per slot.
pub const FALLBACK_RECIPES: &[FallbackRecipe] = &[
    FallbackRecipe {
        id: 1,
        slot: MealSlot::Breakfast,
        title: "Oatmeal with Fruit",
        image: "https://spoonacular.com/recipeImages/636025-312x231.jpg",
        ready_in_minutes: 10,
        nutrition: NutritionFacts::new(250.0, 8.0, 45.0, 5.0, 7.0),
    },
    FallbackRecipe {
        id: 2,
        slot: MealSlot::Breakfast,
        title: "Greek Yogurt Parfait",
        image: "https://spoonacular.com/recipeImages/648506-312x231.jpg",
        ready_in_minutes: 5,
        nutrition: NutritionFacts::new(220.0, 15.0, 30.0, 5.0, 4.0),
    },
    FallbackRecipe {
        id: 3,
        slot: MealSlot::Lunch,
        title: "Grilled Chicken Salad",
        image: "https://spoonacular.com/recipeImages/649503-312x231.jpg",
        ready_in_minutes: 20,
        nutrition: NutritionFacts::new(350.0, 30.0, 20.0, 15.0, 5.0),
    },
    FallbackRecipe {
        id: 4,
        slot: MealSlot::Lunch,
        title: "Quinoa Bowl with Vegetables",
        image: "https://spoonacular.com/recipeImages/641975-312x231.jpg",
        ready_in_minutes: 30,
        nutrition: NutritionFacts::new(380.0, 12.0, 60.0, 10.0, 8.0),
    },
    FallbackRecipe {
        id: 5,
        slot: MealSlot::Dinner,
        title: "Baked Salmon with Roasted Vegetables",
        image: "https://spoonacular.com/recipeImages/640117-312x231.jpg",
        ready_in_minutes: 40,
        nutrition: NutritionFacts::new(450.0, 35.0, 25.0, 20.0, 6.0),
    },
    FallbackRecipe {
        id: 6,
        slot: MealSlot::Dinner,
        title: "Vegetable Stir Fry with Tofu",
        image: "https://spoonacular.com/recipeImages/661925-312x231.jpg",
        ready_in_minutes: 25,
        nutrition: NutritionFacts::new(320.0, 18.0, 35.0, 12.0, 8.0),
    },
    FallbackRecipe {
        id: 7,
        slot: MealSlot::Snacks,
        title: "Apple with Almond Butter",
        image: "https://spoonacular.com/recipeImages/641411-312x231.jpg",
        ready_in_minutes: 2,
        nutrition: NutritionFacts::new(180.0, 5.0, 25.0, 8.0, 5.0),
    },
    FallbackRecipe {
        id: 8,
        slot: MealSlot::Snacks,
        title: "Carrot Sticks with Hummus",
        image: "https://spoonacular.com/recipeImages/641411-312x231.jpg",
        ready_in_minutes: 5,
        nutrition: NutritionFacts::new(120.0, 4.0, 15.0, 6.0, 4.0),
    },
];

pub fn fallback_recipes(slot: MealSlot) -> Vec<Recipe> {
    FALLBACK_RECIPES
        .iter()
        .filter(|r| r.slot == slot)
        .map(FallbackRecipe::to_recipe)
        .collect()
}

pub fn find_fallback_recipe(recipe_id: u64) -> Option<Recipe> {
    FALLBACK_RECIPES
        .iter()
        .find(|r| r.id == recipe_id)
        .map(FallbackRecipe::to_recipe)
}
