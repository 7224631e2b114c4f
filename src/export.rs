use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::planner::{weekday_label, Day};
use crate::recipe::Recipe;

/// Flat record of the fields a day hands to storage: slot titles plus the five totals.
#[derive(Debug, Serialize)]
struct DayRow<'a> {
    day: usize,
    weekday: &'static str,
    breakfast: &'a str,
    lunch: &'a str,
    dinner: &'a str,
    snacks: &'a str,
    total_calories: f64,
    total_protein: f64,
    total_carbs: f64,
    total_fat: f64,
    total_fiber: f64,
}

fn title(slot: &Option<Recipe>) -> &str {
    slot.as_ref().map(|r| r.title.as_str()).unwrap_or("")
}

/// Writes one CSV row per day, with a header, to any writer.
pub fn write_plan_csv<W: Write>(days: &[Day], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, day) in days.iter().enumerate() {
        csv_writer
            .serialize(DayRow {
                day: index + 1,
                weekday: weekday_label(index),
                breakfast: title(&day.breakfast),
                lunch: title(&day.lunch),
                dinner: title(&day.dinner),
                snacks: title(&day.snacks),
                total_calories: day.nutrition.calories,
                total_protein: day.nutrition.protein,
                total_carbs: day.nutrition.carbs,
                total_fat: day.nutrition.fat,
                total_fiber: day.nutrition.fiber,
            })
            .with_context(|| format!("Failed to serialize day {}", index + 1))?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn write_plan_csv_file(days: &[Day], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file at {:?}", path))?;
    write_plan_csv(days, file)
}
