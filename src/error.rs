use thiserror::Error;

/// Errors surfaced by the planning core.
///
/// Provider failures are not represented here: they are absorbed by the
/// fallback wrappers in `recipe_source` and only ever logged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlannerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("cannot compute compliance: {0}")]
    DivisionInvalid(String),

    #[error("day {day} has no meals in any slot")]
    DegenerateDay { day: usize },

    #[error("recipe {recipe_id} carries negative or non-finite nutrition facts")]
    InvalidNutrition { recipe_id: u64 },
}

impl PlannerError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        PlannerError::InvalidInput(message.into())
    }
}
