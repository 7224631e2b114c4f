use serde::{Deserialize, Serialize};

use crate::guidelines::{
    fiber_target, MacroRange, CARBS_RANGE, FAT_RANGE, KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT,
    KCAL_PER_GRAM_PROTEIN, PROTEIN_RANGE,
};
use crate::nutrition::round_half_even;
use crate::recipe::MealSlot;

/// Gram target for one macronutrient, with the guideline band it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTarget {
    pub grams: u32,
    pub range: [u32; 2],
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiberTarget {
    pub grams: u32,
}

/// Daily targets derived from a calorie level. This is the JSON document
/// served as "guidelines" to any view that charts a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub calories: u32,
    pub protein: MacroTarget,
    pub carbs: MacroTarget,
    pub fat: MacroTarget,
    pub fiber: FiberTarget,
}

// Percent becomes a fraction before the multiply; the other order rounds
// differently at some levels (1400 kcal carbs: 193 here, 192 otherwise).
fn grams_for(calorie_target: u32, percent: f64, kcal_per_gram: f64) -> u32 {
    round_half_even(calorie_target as f64 * (percent / 100.0) / kcal_per_gram)
}

fn macro_target(calorie_target: u32, band: MacroRange, kcal_per_gram: f64) -> MacroTarget {
    let percent = band.midpoint();
    MacroTarget {
        grams: grams_for(calorie_target, percent, kcal_per_gram),
        range: [
            grams_for(calorie_target, band.low, kcal_per_gram),
            grams_for(calorie_target, band.high, kcal_per_gram),
        ],
        percent,
    }
}

/// Calculates macronutrient gram targets for a daily calorie level.
///
/// Grams come from the AMDR midpoint; the range uses the AMDR extremes.
/// Protein and carbohydrates use 4 kcal/g, fat uses 9 kcal/g. All values are
/// rounded half-to-even.
pub fn macro_targets(calorie_target: u32) -> MacroTargets {
    MacroTargets {
        calories: calorie_target,
        protein: macro_target(calorie_target, PROTEIN_RANGE, KCAL_PER_GRAM_PROTEIN),
        carbs: macro_target(calorie_target, CARBS_RANGE, KCAL_PER_GRAM_CARBS),
        fat: macro_target(calorie_target, FAT_RANGE, KCAL_PER_GRAM_FAT),
        fiber: FiberTarget {
            grams: fiber_target(calorie_target),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealCalorieAllocation {
    pub breakfast: u32,
    pub lunch: u32,
    pub dinner: u32,
    pub snacks: u32,
}

impl MealCalorieAllocation {
    pub fn for_slot(&self, slot: MealSlot) -> u32 {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
            MealSlot::Snacks => self.snacks,
        }
    }

    pub fn total(&self) -> u32 {
        self.breakfast + self.lunch + self.dinner + self.snacks
    }
}

/// Splits a daily calorie target 25/30/35/10 across the meal slots.
/// Each share is truncated, so the total can fall a few kcal short.
pub fn meal_calorie_allocation(calorie_target: u32) -> MealCalorieAllocation {
    let share = |slot: MealSlot| (calorie_target as f64 * slot.allocation_fraction()) as u32;
    MealCalorieAllocation {
        breakfast: share(MealSlot::Breakfast),
        lunch: share(MealSlot::Lunch),
        dinner: share(MealSlot::Dinner),
        snacks: share(MealSlot::Snacks),
    }
}
