use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::DEFAULT_RESULTS_PER_QUERY;
use crate::error::PlannerError;
use crate::nutrition::targets::{meal_calorie_allocation, MealCalorieAllocation};
use crate::planner::plan::{Day, MealPlan};
use crate::preferences::Preferences;
use crate::recipe::{MealSlot, Recipe};
use crate::recipe_source::{fallback_recipes, search_with_fallback, RecipeQuery, RecipeSource};

/// Longest plan `generate` accepts: one year.
pub const MAX_PLAN_DAYS: usize = 366;

/// Builds multi-day meal plans from a recipe source.
///
/// Randomness is always supplied by the caller so a seeded generator
/// reproduces the same plan.
pub struct PlanGenerator<S> {
    source: S,
    results_per_query: u32,
}

impl<S: RecipeSource> PlanGenerator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            results_per_query: DEFAULT_RESULTS_PER_QUERY,
        }
    }

    pub fn with_results_per_query(mut self, results_per_query: u32) -> Self {
        self.results_per_query = results_per_query;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generates `days` independent days of meals.
    ///
    /// Provider failures are absorbed per search. Any other failure during the
    /// run (a day with no meals at all, or a recipe with unusable nutrition facts)
    /// discards the partial plan and returns one built from the fallback table.
    ///
    /// # Errors
    /// `InvalidInput` when `days` is zero or above [`MAX_PLAN_DAYS`], or the
    /// calorie target is zero.
    pub async fn generate<R>(
        &self,
        preferences: &Preferences,
        days: usize,
        rng: &mut R,
    ) -> Result<Vec<Day>, PlannerError>
    where
        R: Rng + ?Sized,
    {
        if days == 0 || days > MAX_PLAN_DAYS {
            return Err(PlannerError::invalid_input(format!(
                "a meal plan needs between 1 and {} days, got {}",
                MAX_PLAN_DAYS, days
            )));
        }
        preferences.validate()?;

        tracing::info!(
            days,
            calorie_target = preferences.calorie_target,
            diet = %preferences.diet_type,
            "generating meal plan"
        );

        let outcome = self.try_generate(preferences, days, rng).await;
        match outcome {
            Ok(plan) => Ok(plan),
            Err(e) => {
                tracing::error!(error = %e, days, "meal plan generation failed, using fallback plan");
                Ok(fallback_plan(days, rng))
            }
        }
    }

    async fn try_generate<R>(
        &self,
        preferences: &Preferences,
        days: usize,
        rng: &mut R,
    ) -> Result<Vec<Day>, PlannerError>
    where
        R: Rng + ?Sized,
    {
        let allocation = meal_calorie_allocation(preferences.calorie_target);
        let mut plan = Vec::new();
        for day_index in 0..days {
            let day = self.generate_day(day_index, preferences, &allocation, rng).await?;
            plan.push(day);
        }
        Ok(plan)
    }

    async fn generate_day<R>(
        &self,
        day_index: usize,
        preferences: &Preferences,
        allocation: &MealCalorieAllocation,
        rng: &mut R,
    ) -> Result<Day, PlannerError>
    where
        R: Rng + ?Sized,
    {
        let mut picks: [Option<Recipe>; 4] = Default::default();
        for (pick, slot) in picks.iter_mut().zip(MealSlot::ALL) {
            let query = RecipeQuery::new(slot, preferences, allocation.for_slot(slot))
                .with_result_cap(self.results_per_query);
            let candidates = search_with_fallback(&self.source, &query).await;

            if let Some(recipe) = candidates.choose(&mut *rng) {
                if !recipe.nutrition.is_valid() {
                    return Err(PlannerError::InvalidNutrition { recipe_id: recipe.id });
                }
                *pick = Some(recipe.clone());
            } else {
                tracing::debug!(day = day_index, meal = %slot, "no candidates, leaving slot empty");
            }
        }

        let [breakfast, lunch, dinner, snacks] = picks;
        let day = Day::from_slots(breakfast, lunch, dinner, snacks);
        if day.is_empty() {
            return Err(PlannerError::DegenerateDay { day: day_index });
        }
        Ok(day)
    }

    /// Same as [`generate`](Self::generate) but wrapped in a named, timestamped plan.
    pub async fn generate_plan<R>(
        &self,
        preferences: &Preferences,
        days: usize,
        rng: &mut R,
    ) -> Result<MealPlan, PlannerError>
    where
        R: Rng + ?Sized,
    {
        let days = self.generate(preferences, days, rng).await?;
        Ok(MealPlan::new(days))
    }

    /// Replaces a single day with a freshly generated one. Other days are not touched.
    /// If the new day cannot be built from the source, it is built from the fallback table.
    pub async fn regenerate_day<R>(
        &self,
        plan: &mut MealPlan,
        day_index: usize,
        preferences: &Preferences,
        rng: &mut R,
    ) -> Result<(), PlannerError>
    where
        R: Rng + ?Sized,
    {
        if day_index >= plan.days.len() {
            return Err(PlannerError::invalid_input(format!(
                "day index {} is out of range for a {}-day plan",
                day_index,
                plan.days.len()
            )));
        }

        preferences.validate()?;

        let allocation = meal_calorie_allocation(preferences.calorie_target);
        let fresh = match self.generate_day(day_index, preferences, &allocation, rng).await {
            Ok(day) => day,
            Err(e) => {
                tracing::error!(error = %e, day = day_index, "day regeneration failed, using fallback recipes");
                fallback_day(rng)
            }
        };

        tracing::info!(day = day_index, calories = fresh.nutrition.calories, "day regenerated");
        plan.days[day_index] = fresh;
        Ok(())
    }
}

fn fallback_day<R>(rng: &mut R) -> Day
where
    R: Rng + ?Sized,
{
    let mut pick = |slot: MealSlot| fallback_recipes(slot).choose(&mut *rng).cloned();
    let breakfast = pick(MealSlot::Breakfast);
    let lunch = pick(MealSlot::Lunch);
    let dinner = pick(MealSlot::Dinner);
    let snacks = pick(MealSlot::Snacks);
    Day::from_slots(breakfast, lunch, dinner, snacks)
}

/// A plan built purely from the built-in recipes, one random pick per slot.
pub fn fallback_plan<R>(days: usize, rng: &mut R) -> Vec<Day>
where
    R: Rng + ?Sized,
{
    let mut plan = Vec::new();
    for _ in 0..days {
        plan.push(fallback_day(rng));
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fallback_plan_fills_every_slot() {
        let mut rng = StdRng::seed_from_u64(7);
        let plan = fallback_plan(7, &mut rng);
        assert_eq!(plan.len(), 7);
        for day in &plan {
            assert_eq!(day.recipes().count(), 4);
            assert!(day.nutrition.is_valid());
            assert!(day.nutrition.calories >= 220.0 + 350.0 + 320.0 + 120.0);
        }
    }

    #[test]
    fn test_fallback_plan_is_reproducible_with_seed() {
        let first = fallback_plan(5, &mut StdRng::seed_from_u64(99));
        let second = fallback_plan(5, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }
}
