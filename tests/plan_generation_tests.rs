use async_trait::async_trait;
use meal_planner::api_connection::ApiConnectionError;
use meal_planner::error::PlannerError;
use meal_planner::nutrition::evaluate_compliance;
use meal_planner::planner::{MealPlan, PlanGenerator, DEFAULT_PLAN_NAME, MAX_PLAN_DAYS};
use meal_planner::preferences::Preferences;
use meal_planner::recipe::{MealSlot, NutritionFacts, Recipe};
use meal_planner::recipe_source::{recipe_details, RecipeQuery, RecipeSource};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

fn recipe(id: u64, title: &str, nutrition: NutritionFacts) -> Recipe {
    Recipe {
        id,
        title: title.to_string(),
        image: String::new(),
        ready_in_minutes: 15,
        servings: 2,
        source_url: format!("https://recipes.test/{}", id),
        nutrition,
        ingredients: Vec::new(),
        instructions: Vec::new(),
    }
}

fn is_fallback_id(id: u64) -> bool {
    (1..=8).contains(&id)
}

/// Never reachable, like a provider with no key or no network.
#[derive(Default)]
struct FailingSource {
    searches: AtomicUsize,
}

#[async_trait]
impl RecipeSource for FailingSource {
    async fn search(&self, _query: &RecipeQuery) -> Result<Vec<Recipe>, ApiConnectionError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Err(ApiConnectionError::MissingApiKey("TEST_KEY".to_string()))
    }

    async fn details(&self, _recipe_id: u64) -> Result<Recipe, ApiConnectionError> {
        Err(ApiConnectionError::MissingApiKey("TEST_KEY".to_string()))
    }
}

/// Answers every search successfully with nothing.
struct EmptySource;

#[async_trait]
impl RecipeSource for EmptySource {
    async fn search(&self, _query: &RecipeQuery) -> Result<Vec<Recipe>, ApiConnectionError> {
        Ok(Vec::new())
    }

    async fn details(&self, recipe_id: u64) -> Result<Recipe, ApiConnectionError> {
        Err(ApiConnectionError::ApiError {
            status: reqwest::StatusCode::NOT_FOUND,
            error_body: format!("no recipe {}", recipe_id),
        })
    }
}

/// One candidate per slot, recording every query it receives.
#[derive(Default)]
struct SingleCandidateSource {
    queries: Mutex<Vec<RecipeQuery>>,
    empty_slot: Option<MealSlot>,
    calories: Option<f64>,
}

impl SingleCandidateSource {
    fn candidate_id(slot: MealSlot) -> u64 {
        match slot {
            MealSlot::Breakfast => 101,
            MealSlot::Lunch => 102,
            MealSlot::Dinner => 103,
            MealSlot::Snacks => 104,
        }
    }
}

#[async_trait]
impl RecipeSource for SingleCandidateSource {
    async fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, ApiConnectionError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.empty_slot == Some(query.slot) {
            return Ok(Vec::new());
        }
        let calories = self.calories.unwrap_or(query.target_calories as f64);
        let nutrition = NutritionFacts::new(calories, 20.0, 40.0, 10.0, 5.0);
        Ok(vec![recipe(
            Self::candidate_id(query.slot),
            &format!("Test {}", query.slot),
            nutrition,
        )])
    }

    async fn details(&self, recipe_id: u64) -> Result<Recipe, ApiConnectionError> {
        Ok(recipe(recipe_id, "Detailed", NutritionFacts::ZERO))
    }
}

/// Three candidates per slot, ids 10 * slot_number + 1..=3.
struct MultiCandidateSource;

impl MultiCandidateSource {
    fn candidates(slot: MealSlot) -> Vec<Recipe> {
        let base = match slot {
            MealSlot::Breakfast => 10,
            MealSlot::Lunch => 20,
            MealSlot::Dinner => 30,
            MealSlot::Snacks => 40,
        };
        (1..=3)
            .map(|n| {
                recipe(
                    base + n,
                    &format!("{} option {}", slot, n),
                    NutritionFacts::new(100.0 * n as f64, 10.0, 20.0, 5.0, 3.0),
                )
            })
            .collect()
    }
}

#[async_trait]
impl RecipeSource for MultiCandidateSource {
    async fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, ApiConnectionError> {
        Ok(Self::candidates(query.slot))
    }

    async fn details(&self, recipe_id: u64) -> Result<Recipe, ApiConnectionError> {
        Ok(recipe(recipe_id, "Detailed", NutritionFacts::ZERO))
    }
}

#[tokio::test]
async fn test_unreachable_provider_still_yields_full_plan() {
    let generator = PlanGenerator::new(FailingSource::default());
    let prefs = Preferences::new(2000);
    let mut rng = StdRng::seed_from_u64(1);

    let days = generator.generate(&prefs, 7, &mut rng).await.unwrap();

    assert_eq!(days.len(), 7);
    assert_eq!(generator.source().searches.load(Ordering::SeqCst), 28);
    for day in &days {
        assert_eq!(day.recipes().count(), 4);
        assert!(day.recipes().all(|r| is_fallback_id(r.id)));
        assert!(day.nutrition.is_valid());
        assert!(day.nutrition.calories > 0.0);
    }
}

#[tokio::test]
async fn test_degenerate_day_switches_whole_run_to_fallback() {
    let generator = PlanGenerator::new(EmptySource);
    let prefs = Preferences::new(1800);
    let mut rng = StdRng::seed_from_u64(3);

    let days = generator.generate(&prefs, 3, &mut rng).await.unwrap();

    assert_eq!(days.len(), 3);
    for day in &days {
        assert_eq!(day.recipes().count(), 4);
        assert!(day.recipes().all(|r| is_fallback_id(r.id)));
    }
}

#[tokio::test]
async fn test_single_candidates_are_selected_with_slot_windows() {
    let generator = PlanGenerator::new(SingleCandidateSource::default());
    let prefs = Preferences::new(2000);
    let mut rng = StdRng::seed_from_u64(11);

    let days = generator.generate(&prefs, 2, &mut rng).await.unwrap();

    for day in &days {
        assert_eq!(day.breakfast.as_ref().map(|r| r.id), Some(101));
        assert_eq!(day.lunch.as_ref().map(|r| r.id), Some(102));
        assert_eq!(day.dinner.as_ref().map(|r| r.id), Some(103));
        assert_eq!(day.snacks.as_ref().map(|r| r.id), Some(104));
        assert_eq!(day.nutrition.calories, 2000.0);
        assert_eq!(day.nutrition.protein, 80.0);
        assert_eq!(day.nutrition.fiber, 20.0);
    }

    let queries = generator.source().queries.lock().unwrap();
    assert_eq!(queries.len(), 8);
    let windows: Vec<(MealSlot, u32, u32, u32)> = queries[..4]
        .iter()
        .map(|q| (q.slot, q.target_calories, q.min_calories, q.max_calories))
        .collect();
    assert_eq!(
        windows,
        vec![
            (MealSlot::Breakfast, 500, 450, 550),
            (MealSlot::Lunch, 600, 540, 660),
            (MealSlot::Dinner, 700, 630, 770),
            (MealSlot::Snacks, 200, 180, 220),
        ]
    );
    assert_eq!(queries[3].meal_type(), "snack");
}

#[tokio::test]
async fn test_one_empty_slot_is_left_empty() {
    let source = SingleCandidateSource {
        empty_slot: Some(MealSlot::Snacks),
        ..Default::default()
    };
    let generator = PlanGenerator::new(source);
    let prefs = Preferences::new(2000);
    let mut rng = StdRng::seed_from_u64(5);

    let days = generator.generate(&prefs, 1, &mut rng).await.unwrap();

    assert!(days[0].snacks.is_none());
    assert_eq!(days[0].recipes().count(), 3);
    assert_eq!(days[0].nutrition.calories, 1800.0);
}

#[tokio::test]
async fn test_invalid_nutrition_switches_to_fallback() {
    let source = SingleCandidateSource {
        calories: Some(-50.0),
        ..Default::default()
    };
    let generator = PlanGenerator::new(source);
    let prefs = Preferences::new(2000);
    let mut rng = StdRng::seed_from_u64(8);

    let days = generator.generate(&prefs, 2, &mut rng).await.unwrap();

    assert_eq!(days.len(), 2);
    for day in &days {
        assert!(day.recipes().all(|r| is_fallback_id(r.id)));
        assert!(day.nutrition.is_valid());
    }
}

#[tokio::test]
async fn test_invalid_arguments_are_rejected() {
    let generator = PlanGenerator::new(FailingSource::default());
    let mut rng = StdRng::seed_from_u64(0);

    let no_days = generator.generate(&Preferences::new(2000), 0, &mut rng).await;
    assert!(matches!(no_days, Err(PlannerError::InvalidInput(_))));

    let no_calories = generator.generate(&Preferences::new(0), 3, &mut rng).await;
    assert!(matches!(no_calories, Err(PlannerError::InvalidInput(_))));

    assert_eq!(generator.source().searches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_same_seed_same_plan() {
    let generator = PlanGenerator::new(FailingSource::default());
    let prefs = Preferences::new(2200);

    let first = generator
        .generate(&prefs, 7, &mut StdRng::seed_from_u64(42))
        .await
        .unwrap();
    let second = generator
        .generate(&prefs, 7, &mut StdRng::seed_from_u64(42))
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_regenerate_day_replaces_only_that_day() {
    let prefs = Preferences::new(2000);
    let mut rng = StdRng::seed_from_u64(21);

    let original = PlanGenerator::new(SingleCandidateSource::default())
        .generate_plan(&prefs, 3, &mut rng)
        .await
        .unwrap();
    assert_eq!(original.name, DEFAULT_PLAN_NAME);

    let mut plan = original.clone();
    PlanGenerator::new(FailingSource::default())
        .regenerate_day(&mut plan, 1, &prefs, &mut rng)
        .await
        .unwrap();

    assert_eq!(plan.days.len(), 3);
    assert_eq!(plan.days[0], original.days[0]);
    assert_eq!(plan.days[2], original.days[2]);
    assert_ne!(plan.days[1], original.days[1]);
    assert!(plan.days[1].recipes().all(|r| is_fallback_id(r.id)));
}

#[tokio::test]
async fn test_regenerate_day_out_of_range() {
    let generator = PlanGenerator::new(FailingSource::default());
    let prefs = Preferences::new(2000);
    let mut rng = StdRng::seed_from_u64(2);
    let mut plan: MealPlan = generator.generate_plan(&prefs, 2, &mut rng).await.unwrap();
    let before = plan.clone();

    let result = generator.regenerate_day(&mut plan, 2, &prefs, &mut rng).await;

    assert!(matches!(result, Err(PlannerError::InvalidInput(_))));
    assert_eq!(plan, before);
}

#[tokio::test]
async fn test_recipe_details_fallback_chain() {
    let source = FailingSource::default();

    let salmon = recipe_details(&source, 5).await;
    assert_eq!(salmon.title, "Baked Salmon with Roasted Vegetables");
    assert_eq!(salmon.nutrition.calories, 450.0);

    let missing = recipe_details(&source, 987_654).await;
    assert_eq!(missing.id, 987_654);
    assert_eq!(missing.title, "Recipe Not Found");
    assert_eq!(missing.nutrition, NutritionFacts::ZERO);
}

#[tokio::test]
async fn test_generated_plan_can_be_evaluated() {
    let generator = PlanGenerator::new(SingleCandidateSource::default());
    let prefs = Preferences::new(2000);
    let mut rng = StdRng::seed_from_u64(9);

    let days = generator.generate(&prefs, 7, &mut rng).await.unwrap();
    let report = evaluate_compliance(&days, prefs.calorie_target).unwrap();

    assert_eq!(report.compliance.calories, 100);
    // 80 of 112 g protein, 160 of 275 g carbs, 40 of 61 g fat, 20 of 28 g fiber.
    assert_eq!(report.compliance.protein, 71);
    assert_eq!(report.compliance.carbs, 58);
    assert_eq!(report.compliance.fat, 66);
    assert_eq!(report.compliance.fiber, 71);
    assert!(!report.recommendations.is_empty());
}

#[tokio::test]
async fn test_each_slot_is_picked_at_random_from_its_candidates() {
    let generator = PlanGenerator::new(MultiCandidateSource);
    let prefs = Preferences::new(2000);

    let days = generator
        .generate(&prefs, 14, &mut StdRng::seed_from_u64(2024))
        .await
        .unwrap();

    // Replaying the seed slot by slot yields the same sequence of picks.
    let mut replay = StdRng::seed_from_u64(2024);
    let mut expected = Vec::new();
    for _ in 0..14 {
        let ids: Vec<u64> = MealSlot::ALL
            .iter()
            .map(|slot| MultiCandidateSource::candidates(*slot).choose(&mut replay).unwrap().id)
            .collect();
        expected.push(ids);
    }
    let picked: Vec<Vec<u64>> = days
        .iter()
        .map(|day| day.recipes().map(|r| r.id).collect())
        .collect();
    assert_eq!(picked, expected);

    for slot in MealSlot::ALL {
        let candidate_ids: HashSet<u64> =
            MultiCandidateSource::candidates(slot).iter().map(|r| r.id).collect();
        let seen: HashSet<u64> = days.iter().filter_map(|d| d.slot(slot)).map(|r| r.id).collect();
        assert!(seen.is_subset(&candidate_ids), "{} picked outside its candidates", slot);
        assert!(seen.len() > 1, "{} always picked the same recipe: {:?}", slot, seen);
    }
}

#[tokio::test]
async fn test_plan_length_is_bounded() {
    let generator = PlanGenerator::new(FailingSource::default());
    let prefs = Preferences::new(2000);
    let mut rng = StdRng::seed_from_u64(6);

    let too_long = generator.generate(&prefs, MAX_PLAN_DAYS + 1, &mut rng).await;
    assert!(matches!(too_long, Err(PlannerError::InvalidInput(_))));

    let absurd = generator.generate(&prefs, usize::MAX, &mut rng).await;
    assert!(matches!(absurd, Err(PlannerError::InvalidInput(_))));

    assert_eq!(generator.source().searches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_regenerate_day_with_empty_source_uses_fallback_day() {
    let prefs = Preferences::new(2000);
    let mut rng = StdRng::seed_from_u64(13);

    let original = PlanGenerator::new(MultiCandidateSource)
        .generate_plan(&prefs, 2, &mut rng)
        .await
        .unwrap();

    let mut plan = original.clone();
    PlanGenerator::new(EmptySource)
        .regenerate_day(&mut plan, 0, &prefs, &mut rng)
        .await
        .unwrap();

    assert_eq!(plan.days[1], original.days[1]);
    assert_eq!(plan.days[0].recipes().count(), 4);
    assert!(plan.days[0].recipes().all(|r| is_fallback_id(r.id)));

    let zero_calories = PlanGenerator::new(EmptySource)
        .regenerate_day(&mut plan, 0, &Preferences::new(0), &mut rng)
        .await;
    assert!(matches!(zero_calories, Err(PlannerError::InvalidInput(_))));
}
