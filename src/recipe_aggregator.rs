use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::guidelines::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};
use crate::nutrition::round_half_even;
use crate::planner::Day;
use crate::recipe::{NutritionFacts, Recipe};

/// Sums nutrition over a set of meal slots; empty slots contribute nothing.
pub fn total_nutrition<'a, I>(slots: I) -> NutritionFacts
where
    I: IntoIterator<Item = Option<&'a Recipe>>,
{
    slots
        .into_iter()
        .flatten()
        .map(|recipe| recipe.nutrition)
        .sum()
}

/// Mean daily nutrition across a plan.
///
/// # Errors
/// `DivisionInvalid` when the plan has no days.
pub fn average_daily_nutrition(days: &[Day]) -> Result<NutritionFacts, PlannerError> {
    if days.is_empty() {
        return Err(PlannerError::DivisionInvalid(
            "cannot average nutrition over a plan with zero days".to_string(),
        ));
    }
    let total: NutritionFacts = days.iter().map(|day| day.nutrition).sum();
    Ok(total.divided_by(days.len() as f64))
}

/// Share of macronutrient energy coming from each macro, in whole percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroEnergySplit {
    pub protein_percent: u32,
    pub carbs_percent: u32,
    pub fat_percent: u32,
}

pub fn macro_energy_split(nutrition: &NutritionFacts) -> MacroEnergySplit {
    let protein_kcal = nutrition.protein * KCAL_PER_GRAM_PROTEIN;
    let carbs_kcal = nutrition.carbs * KCAL_PER_GRAM_CARBS;
    let fat_kcal = nutrition.fat * KCAL_PER_GRAM_FAT;
    let total = protein_kcal + carbs_kcal + fat_kcal;

    if total <= 0.0 || !total.is_finite() {
        return MacroEnergySplit::default();
    }

    MacroEnergySplit {
        protein_percent: round_half_even(protein_kcal / total * 100.0),
        carbs_percent: round_half_even(carbs_kcal / total * 100.0),
        fat_percent: round_half_even(fat_kcal / total * 100.0),
    }
}
