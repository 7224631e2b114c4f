use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlannerError;

pub const DEFAULT_CALORIE_TARGET: u32 = 2000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    #[default]
    Balanced,
    LowCarb,
    HighProtein,
    LowFat,
}

impl DietType {
    /// Provider diet hint; balanced plans send none.
    pub fn query_hint(self) -> Option<&'static str> {
        match self {
            DietType::Balanced => None,
            DietType::LowCarb => Some("low-carb"),
            DietType::HighProtein => Some("high-protein"),
            DietType::LowFat => Some("low-fat"),
        }
    }
}

impl FromStr for DietType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(DietType::Balanced),
            "low-carb" => Ok(DietType::LowCarb),
            "high-protein" => Ok(DietType::HighProtein),
            "low-fat" => Ok(DietType::LowFat),
            other => Err(PlannerError::invalid_input(format!("unknown diet type '{}'", other))),
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_hint().unwrap_or("balanced"))
    }
}

/// Dietary preferences for one generation run. Passed explicitly on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub calorie_target: u32,
    #[serde(default)]
    pub diet_type: DietType,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub dairy_free: bool,
    #[serde(default)]
    pub allergens: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new(DEFAULT_CALORIE_TARGET)
    }
}

impl Preferences {
    pub fn new(calorie_target: u32) -> Self {
        Self {
            calorie_target,
            diet_type: DietType::Balanced,
            vegetarian: false,
            vegan: false,
            gluten_free: false,
            dairy_free: false,
            allergens: Vec::new(),
        }
    }

    pub fn with_diet_type(mut self, diet_type: DietType) -> Self {
        self.diet_type = diet_type;
        self
    }

    /// Replaces the allergen list from a comma-delimited string such as `"peanut, shellfish"`.
    pub fn with_allergens(mut self, delimited: &str) -> Self {
        self.allergens = parse_allergens(delimited);
        self
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.calorie_target == 0 {
            return Err(PlannerError::invalid_input("calorie target must be positive"));
        }
        Ok(())
    }
}

pub fn parse_allergens(delimited: &str) -> Vec<String> {
    delimited
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}
