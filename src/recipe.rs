use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Energy and macronutrient totals. Calories in kcal, everything else in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl NutritionFacts {
    pub const ZERO: NutritionFacts = NutritionFacts {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        fiber: 0.0,
    };

    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64, fiber: f64) -> Self {
        Self { calories, protein, carbs, fat, fiber }
    }

    /// Every field finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat, self.fiber]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }

    pub fn divided_by(&self, divisor: f64) -> NutritionFacts {
        NutritionFacts {
            calories: self.calories / divisor,
            protein: self.protein / divisor,
            carbs: self.carbs / divisor,
            fat: self.fat / divisor,
            fiber: self.fiber / divisor,
        }
    }
}

impl Add for NutritionFacts {
    type Output = NutritionFacts;

    fn add(mut self, rhs: NutritionFacts) -> NutritionFacts {
        self += rhs;
        self
    }
}

impl AddAssign for NutritionFacts {
    fn add_assign(&mut self, rhs: NutritionFacts) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fat += rhs.fat;
        self.fiber += rhs.fiber;
    }
}

impl std::iter::Sum for NutritionFacts {
    fn sum<I: Iterator<Item = NutritionFacts>>(iter: I) -> Self {
        iter.fold(NutritionFacts::ZERO, |acc, n| acc + n)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub source_url: String,
    pub nutrition: NutritionFacts,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Placeholder handed out when a recipe cannot be found anywhere.
    pub fn not_found(id: u64) -> Self {
        Recipe {
            id,
            title: "Recipe Not Found".to_string(),
            image: String::new(),
            ready_in_minutes: 0,
            servings: 0,
            source_url: "#".to_string(),
            nutrition: NutritionFacts::ZERO,
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    /// Share of the daily calorie target assigned to this slot.
    pub fn allocation_fraction(self) -> f64 {
        match self {
            MealSlot::Breakfast => 0.25,
            MealSlot::Lunch => 0.30,
            MealSlot::Dinner => 0.35,
            MealSlot::Snacks => 0.10,
        }
    }

    /// Meal type understood by the recipe provider.
    pub fn query_type(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snacks",
        };
        f.write_str(name)
    }
}
