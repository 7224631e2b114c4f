use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

use meal_planner::api_connection::SpoonacularClient;
use meal_planner::cli::{parse_args, Command};
use meal_planner::config::PlannerConfig;
use meal_planner::export::write_plan_csv_file;
use meal_planner::guidelines::calorie_target_from_strs;
use meal_planner::logging::init_logging;
use meal_planner::nutrition::{evaluate_plan, macro_targets, MacroTargets, PlanEvaluation};
use meal_planner::planner::{MealPlan, PlanGenerator};
use meal_planner::recipe_source::recipe_details;

#[derive(Serialize)]
struct CalorieTargetOutput {
    calorie_target: u32,
    targets: MacroTargets,
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    plan: &'a MealPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation: Option<PlanEvaluation>,
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write '{}'", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = PlannerConfig::from_env();
    let cli = parse_args();

    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_logging(&log_level)?;

    let generator = PlanGenerator::new(SpoonacularClient::from_config(&config))
        .with_results_per_query(config.results_per_query);

    match cli.command {
        Command::Guidelines { calories } => {
            print_json(&macro_targets(calories))?;
        }
        Command::CalorieTarget { age, gender, activity } => {
            let calorie_target = calorie_target_from_strs(age, &gender, &activity)?;
            print_json(&CalorieTargetOutput {
                calorie_target,
                targets: macro_targets(calorie_target),
            })?;
        }
        Command::Plan { preferences, days, seed, evaluate, csv, output } => {
            let preferences = preferences.to_preferences()?;
            let mut rng = rng_from(seed);
            let plan = generator.generate_plan(&preferences, days, &mut rng).await?;

            let evaluation = if evaluate {
                Some(evaluate_plan(&plan.days, preferences.calorie_target)?)
            } else {
                None
            };

            if let Some(csv_path) = csv {
                write_plan_csv_file(&plan.days, &csv_path)?;
                tracing::info!(path = %csv_path.display(), "plan totals exported");
            }

            let result = PlanOutput { plan: &plan, evaluation };
            match output {
                Some(path) => write_json(&result, &path).await?,
                None => print_json(&result)?,
            }
        }
        Command::Regenerate { plan: plan_path, day, preferences, seed } => {
            let preferences = preferences.to_preferences()?;
            let raw = fs::read_to_string(&plan_path)
                .await
                .with_context(|| format!("Failed to read plan file '{}'", plan_path.display()))?;

            // Accept both a bare plan and the `plan` command's wrapped output.
            let value: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("Plan file '{}' is not valid JSON", plan_path.display()))?;
            let plan_value = value.get("plan").cloned().unwrap_or(value);
            let mut plan: MealPlan = serde_json::from_value(plan_value)
                .context("Plan file does not contain a meal plan")?;

            let mut rng = rng_from(seed);
            generator
                .regenerate_day(&mut plan, day, &preferences, &mut rng)
                .await?;
            write_json(&plan, &plan_path).await?;
            println!("Day {} has been regenerated.", day + 1);
        }
        Command::Recipe { id } => {
            let recipe = recipe_details(generator.source(), id).await;
            print_json(&recipe)?;
        }
    }

    Ok(())
}
