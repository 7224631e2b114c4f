//! USDA-style reference tables: calorie levels by age, gender and activity,
//! macronutrient distribution ranges (AMDR) and fiber recommendations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(PlannerError::invalid_input(format!(
                "unknown gender '{}', expected 'male' or 'female'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    ModeratelyActive,
    Active,
}

impl FromStr for ActivityLevel {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "moderate" | "moderately_active" | "moderately-active" => Ok(ActivityLevel::ModeratelyActive),
            "active" => Ok(ActivityLevel::Active),
            other => Err(PlannerError::invalid_input(format!(
                "unknown activity level '{}', expected 'sedentary', 'moderate' or 'active'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGroup {
    Toddler,     // 2-3
    Child,       // 4-8
    Preteen,     // 9-13
    Teen,        // 14-18
    YoungAdult,  // 19-30
    Adult,       // 31-50
    Senior,      // 51+
}

impl AgeGroup {
    pub fn from_age(age: u32) -> Result<Self, PlannerError> {
        match age {
            0..=1 => Err(PlannerError::invalid_input(format!(
                "age {} is below the youngest guideline bucket (2-3)",
                age
            ))),
            2..=3 => Ok(AgeGroup::Toddler),
            4..=8 => Ok(AgeGroup::Child),
            9..=13 => Ok(AgeGroup::Preteen),
            14..=18 => Ok(AgeGroup::Teen),
            19..=30 => Ok(AgeGroup::YoungAdult),
            31..=50 => Ok(AgeGroup::Adult),
            _ => Ok(AgeGroup::Senior),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AgeGroup::Toddler => "2-3",
            AgeGroup::Child => "4-8",
            AgeGroup::Preteen => "9-13",
            AgeGroup::Teen => "14-18",
            AgeGroup::YoungAdult => "19-30",
            AgeGroup::Adult => "31-50",
            AgeGroup::Senior => "51+",
        };
        f.write_str(label)
    }
}

// Indexed by age group, in AgeGroup declaration order.
type CalorieRow = [u32; 7];

struct CalorieLevels {
    male: CalorieRow,
    female: CalorieRow,
}

const SEDENTARY: CalorieLevels = CalorieLevels {
    male: [1000, 1200, 1600, 2000, 2400, 2200, 2000],
    female: [1000, 1200, 1400, 1800, 1800, 1800, 1600],
};

const MODERATELY_ACTIVE: CalorieLevels = CalorieLevels {
    male: [1000, 1400, 1800, 2400, 2600, 2400, 2200],
    female: [1000, 1400, 1600, 2000, 2000, 2000, 1800],
};

const ACTIVE: CalorieLevels = CalorieLevels {
    male: [1000, 1600, 2000, 2800, 3000, 2800, 2400],
    female: [1000, 1400, 1800, 2400, 2400, 2200, 2000],
};

/// Percentage-of-calories band for one macronutrient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRange {
    pub low: f64,
    pub high: f64,
}

impl MacroRange {
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

pub const PROTEIN_RANGE: MacroRange = MacroRange { low: 10.0, high: 35.0 };
pub const CARBS_RANGE: MacroRange = MacroRange { low: 45.0, high: 65.0 };
pub const FAT_RANGE: MacroRange = MacroRange { low: 20.0, high: 35.0 };

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// (calorie bucket, fiber grams), ascending by bucket.
pub const FIBER_RECOMMENDATIONS: [(u32, u32); 11] = [
    (1000, 19),
    (1200, 21),
    (1400, 23),
    (1600, 25),
    (1800, 25),
    (2000, 28),
    (2200, 30),
    (2400, 31),
    (2600, 33),
    (2800, 34),
    (3000, 35),
];

/// Daily calorie level for the given profile.
pub fn calorie_target(age: u32, gender: Gender, activity_level: ActivityLevel) -> Result<u32, PlannerError> {
    let group = AgeGroup::from_age(age)?;
    let levels = match activity_level {
        ActivityLevel::Sedentary => &SEDENTARY,
        ActivityLevel::ModeratelyActive => &MODERATELY_ACTIVE,
        ActivityLevel::Active => &ACTIVE,
    };
    let row = match gender {
        Gender::Male => &levels.male,
        Gender::Female => &levels.female,
    };
    Ok(row[group.index()])
}

/// String front door for callers holding raw form values.
pub fn calorie_target_from_strs(age: u32, gender: &str, activity_level: &str) -> Result<u32, PlannerError> {
    calorie_target(age, gender.parse()?, activity_level.parse()?)
}

/// Nearest calorie bucket wins; on an exact tie the lower bucket is kept
/// because `min_by_key` returns the first minimum in ascending order.
pub fn fiber_target(calorie_target: u32) -> u32 {
    FIBER_RECOMMENDATIONS
        .iter()
        .min_by_key(|(calories, _)| calories.abs_diff(calorie_target))
        .map(|(_, grams)| *grams)
        .unwrap_or(0)
}
