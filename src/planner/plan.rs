use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recipe::{MealSlot, NutritionFacts, Recipe};
use crate::recipe_aggregator::total_nutrition;

pub const DEFAULT_PLAN_NAME: &str = "Weekly Meal Plan";

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Weekday label for a plan day index, cycling after Sunday.
pub fn weekday_label(day_index: usize) -> &'static str {
    WEEKDAYS[day_index % WEEKDAYS.len()]
}

/// One day of a plan. `nutrition` is always the sum of the filled slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub breakfast: Option<Recipe>,
    pub lunch: Option<Recipe>,
    pub dinner: Option<Recipe>,
    pub snacks: Option<Recipe>,
    pub nutrition: NutritionFacts,
}

impl Day {
    pub fn from_slots(
        breakfast: Option<Recipe>,
        lunch: Option<Recipe>,
        dinner: Option<Recipe>,
        snacks: Option<Recipe>,
    ) -> Self {
        let mut day = Day {
            breakfast,
            lunch,
            dinner,
            snacks,
            nutrition: NutritionFacts::ZERO,
        };
        let nutrition = total_nutrition(MealSlot::ALL.map(|slot| day.slot(slot)));
        day.nutrition = nutrition;
        day
    }

    pub fn slot(&self, slot: MealSlot) -> Option<&Recipe> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_ref(),
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
            MealSlot::Snacks => self.snacks.as_ref(),
        }
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        MealSlot::ALL.into_iter().filter_map(move |slot| self.slot(slot))
    }

    pub fn is_empty(&self) -> bool {
        self.recipes().next().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub days: Vec<Day>,
}

impl MealPlan {
    pub fn new(days: Vec<Day>) -> Self {
        Self {
            name: DEFAULT_PLAN_NAME.to_string(),
            created_at: Utc::now(),
            days,
        }
    }
}
