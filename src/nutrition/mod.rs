pub mod compliance;
pub mod targets;

pub use compliance::{
    daily_progress, evaluate_compliance, evaluate_plan, ComplianceReport, DailyProgress, NutrientCompliance,
    PlanEvaluation,
};
pub use targets::{macro_targets, meal_calorie_allocation, MacroTarget, MacroTargets, MealCalorieAllocation};

/// Banker's rounding, used for every gram target and compliance percentage.
/// Negative inputs clamp to zero.
pub(crate) fn round_half_even(value: f64) -> u32 {
    value.round_ties_even().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::round_half_even;

    #[test]
    fn test_ties_go_to_even() {
        assert_eq!(round_half_even(112.5), 112);
        assert_eq!(round_half_even(113.5), 114);
        assert_eq!(round_half_even(61.11), 61);
        assert_eq!(round_half_even(77.78), 78);
        assert_eq!(round_half_even(-3.0), 0);
    }
}
