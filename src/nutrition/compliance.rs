use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::nutrition::round_half_even;
use crate::nutrition::targets::{macro_targets, MacroTargets};
use crate::planner::Day;
use crate::recipe_aggregator::{average_daily_nutrition, macro_energy_split, MacroEnergySplit};

const LOWER_BOUND_PERCENT: f64 = 90.0;
const UPPER_BOUND_PERCENT: f64 = 110.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientCompliance {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub compliance: NutrientCompliance,
    pub recommendations: Vec<String>,
}

/// One nutrient's evaluation row: how to name it when it is out of bounds.
struct NutrientCheck {
    name: &'static str,
    percent: f64,
    when_low: &'static str,
    when_high: Option<&'static str>,
}

fn percent_of(actual: f64, target: f64, name: &str) -> Result<f64, PlannerError> {
    if target <= 0.0 {
        return Err(PlannerError::DivisionInvalid(format!(
            "{} target is zero for this calorie level",
            name
        )));
    }
    Ok(actual / target * 100.0)
}

/// Compares a plan's average daily intake with the guideline targets for `calorie_target`.
///
/// Thresholds are applied to the unrounded percentages; the reported
/// percentages are rounded half-to-even. Fiber is only checked on the low side.
///
/// # Errors
/// `DivisionInvalid` for an empty plan or a calorie level whose targets round to zero.
pub fn evaluate_compliance(days: &[Day], calorie_target: u32) -> Result<ComplianceReport, PlannerError> {
    let average = average_daily_nutrition(days)?;
    let targets = macro_targets(calorie_target);

    let checks = [
        NutrientCheck {
            name: "calories",
            percent: percent_of(average.calories, calorie_target as f64, "calories")?,
            when_low: "Increase overall calorie intake",
            when_high: Some("Reduce overall calorie intake"),
        },
        NutrientCheck {
            name: "protein",
            percent: percent_of(average.protein, targets.protein.grams as f64, "protein")?,
            when_low: "Increase protein intake",
            when_high: Some("Consider reducing protein slightly"),
        },
        NutrientCheck {
            name: "carbs",
            percent: percent_of(average.carbs, targets.carbs.grams as f64, "carbs")?,
            when_low: "Increase carbohydrate intake",
            when_high: Some("Reduce carbohydrate intake"),
        },
        NutrientCheck {
            name: "fat",
            percent: percent_of(average.fat, targets.fat.grams as f64, "fat")?,
            when_low: "Increase healthy fat intake",
            when_high: Some("Reduce fat intake"),
        },
        NutrientCheck {
            name: "fiber",
            percent: percent_of(average.fiber, targets.fiber.grams as f64, "fiber")?,
            when_low: "Increase fiber intake by adding more fruits, vegetables, and whole grains",
            when_high: None,
        },
    ];

    let mut recommendations = Vec::new();
    for check in &checks {
        if check.percent < LOWER_BOUND_PERCENT {
            recommendations.push(check.when_low.to_string());
        } else if check.percent > UPPER_BOUND_PERCENT {
            if let Some(message) = check.when_high {
                recommendations.push(message.to_string());
            }
        }
        tracing::debug!(nutrient = check.name, percent = check.percent, "compliance checked");
    }

    let [calories, protein, carbs, fat, fiber] = checks.map(|c| round_half_even(c.percent));
    Ok(ComplianceReport {
        compliance: NutrientCompliance { calories, protein, carbs, fat, fiber },
        recommendations,
    })
}

/// Percent of each gram target a single day reaches. Zero targets report 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
}

pub fn daily_progress(day: &Day, targets: &MacroTargets) -> DailyProgress {
    let pct = |actual: f64, target: u32| {
        if target == 0 {
            0
        } else {
            round_half_even(actual / target as f64 * 100.0)
        }
    };
    DailyProgress {
        protein: pct(day.nutrition.protein, targets.protein.grams),
        carbs: pct(day.nutrition.carbs, targets.carbs.grams),
        fat: pct(day.nutrition.fat, targets.fat.grams),
        fiber: pct(day.nutrition.fiber, targets.fiber.grams),
    }
}

/// The compliance report plus per-day progress and macro energy split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEvaluation {
    pub compliance: ComplianceReport,
    pub daily_progress: Vec<DailyProgress>,
    pub daily_energy_split: Vec<MacroEnergySplit>,
    pub average_energy_split: MacroEnergySplit,
}

pub fn evaluate_plan(days: &[Day], calorie_target: u32) -> Result<PlanEvaluation, PlannerError> {
    let compliance = evaluate_compliance(days, calorie_target)?;
    let targets = macro_targets(calorie_target);
    Ok(PlanEvaluation {
        compliance,
        daily_progress: days.iter().map(|day| daily_progress(day, &targets)).collect(),
        daily_energy_split: days.iter().map(|day| macro_energy_split(&day.nutrition)).collect(),
        average_energy_split: macro_energy_split(&average_daily_nutrition(days)?),
    })
}
