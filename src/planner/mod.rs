pub mod generator;
pub mod plan;

pub use generator::{fallback_plan, PlanGenerator, MAX_PLAN_DAYS};
pub use plan::{weekday_label, Day, MealPlan, DEFAULT_PLAN_NAME};
