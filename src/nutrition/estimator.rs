use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Date;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NutritionError {
    #[error("invalid biometric input: {0}")]
    InvalidBiometricInput(String),
}

/// Sex category used by the Mifflin-St Jeor estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            _ => Err(NutritionError::InvalidBiometricInput(format!(
                "unknown sex category: {s}"
            ))),
        }
    }
}

/// Daily calorie goal from the Mifflin-St Jeor equation, rounded to the
/// nearest integer. For `Sex::Other` the male and female estimates are
/// averaged before rounding.
pub fn estimate_calorie_goal(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
) -> Result<i32, NutritionError> {
    if !(weight_kg > 0.0) || !weight_kg.is_finite() {
        return Err(NutritionError::InvalidBiometricInput(format!(
            "weight must be positive, got {weight_kg}"
        )));
    }
    if !(height_cm > 0.0) || !height_cm.is_finite() {
        return Err(NutritionError::InvalidBiometricInput(format!(
            "height must be positive, got {height_cm}"
        )));
    }

    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    let goal = match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
        Sex::Other => ((base + 5.0) + (base - 161.0)) / 2.0,
    };
    let goal = goal.round() as i32;
    // Extreme but individually-valid inputs can drive the equation to or
    // below zero; a goal must stay a non-negative calorie count.
    if goal <= 0 {
        return Err(NutritionError::InvalidBiometricInput(format!(
            "inputs produce a non-positive calorie goal ({goal})"
        )));
    }
    Ok(goal)
}

/// Whole years between `birth` and `reference`, decremented when the
/// birthday has not yet occurred in the reference year.
pub fn age_on(birth: Date, reference: Date) -> Result<u32, NutritionError> {
    if birth > reference {
        return Err(NutritionError::InvalidBiometricInput(format!(
            "birth date {birth} is in the future"
        )));
    }
    let mut age = reference.year() - birth.year();
    if (reference.month() as u8, reference.day()) < (birth.month() as u8, birth.day()) {
        age -= 1;
    }
    Ok(age as u32)
}
