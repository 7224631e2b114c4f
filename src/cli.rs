use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::error::PlannerError;
use crate::preferences::{DietType, Preferences, DEFAULT_CALORIE_TARGET};

#[derive(Parser, Debug)]
#[command(author, version, about = "Guideline-driven meal planning", long_about = None)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (overrides LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print macronutrient and fiber targets for a calorie level as JSON
    Guidelines {
        #[arg(long, default_value_t = DEFAULT_CALORIE_TARGET)]
        calories: u32,
    },
    /// Look up the daily calorie level for an age, gender and activity level
    CalorieTarget {
        #[arg(long)]
        age: u32,
        /// male or female
        #[arg(long)]
        gender: String,
        /// sedentary, moderate or active
        #[arg(long)]
        activity: String,
    },
    /// Generate a meal plan
    Plan {
        #[command(flatten)]
        preferences: PreferenceArgs,
        #[arg(long, default_value_t = 7)]
        days: usize,
        /// Seed for reproducible recipe selection
        #[arg(long)]
        seed: Option<u64>,
        /// Also print a guideline compliance report
        #[arg(long)]
        evaluate: bool,
        /// Write the daily totals to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the plan JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace one day of a saved plan
    Regenerate {
        /// Plan JSON file, rewritten in place
        #[arg(long)]
        plan: PathBuf,
        /// Zero-based day index
        #[arg(long)]
        day: usize,
        #[command(flatten)]
        preferences: PreferenceArgs,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show a recipe with ingredients and instructions
    Recipe {
        #[arg(long)]
        id: u64,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PreferenceArgs {
    #[arg(long, default_value_t = DEFAULT_CALORIE_TARGET)]
    pub calories: u32,
    /// balanced, low-carb, high-protein or low-fat
    #[arg(long, default_value = "balanced")]
    pub diet: String,
    #[arg(long)]
    pub vegetarian: bool,
    #[arg(long)]
    pub vegan: bool,
    #[arg(long)]
    pub gluten_free: bool,
    #[arg(long)]
    pub dairy_free: bool,
    /// Comma-separated allergens, e.g. "peanut, shellfish"
    #[arg(long, default_value = "")]
    pub allergens: String,
}

impl PreferenceArgs {
    pub fn to_preferences(&self) -> Result<Preferences, PlannerError> {
        let diet_type: DietType = self.diet.parse()?;
        let mut preferences = Preferences::new(self.calories)
            .with_diet_type(diet_type)
            .with_allergens(&self.allergens);
        preferences.vegetarian = self.vegetarian;
        preferences.vegan = self.vegan;
        preferences.gluten_free = self.gluten_free;
        preferences.dairy_free = self.dairy_free;
        preferences.validate()?;
        Ok(preferences)
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
