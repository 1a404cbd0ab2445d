//! Session entities
//!
//! Plain data types held by [`SessionStore`](crate::session::SessionStore) and
//! serialized back to the model. Field order in each struct is the key order of the
//! JSON the query tools emit, so reordering fields changes tool output.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a free-text value does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} '{value}'. Expected one of: {expected}")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

/// Lowercase, trim, and fold `-` and spaces into `_` so that "Very High",
/// "very-high" and "very_high" all parse the same.
fn normalize_token(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

fn parse_variant<T: Copy>(
    field: &'static str,
    raw: &str,
    variants: &[T],
    name_of: fn(T) -> &'static str,
) -> Result<T, ParseEnumError> {
    let token = normalize_token(raw);
    variants
        .iter()
        .copied()
        .find(|v| name_of(*v) == token)
        .ok_or_else(|| ParseEnumError {
            field,
            value: raw.to_string(),
            expected: variants
                .iter()
                .map(|v| name_of(*v))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// The user's primary goal; drives the macro split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    MuscleGain,
    WeightLoss,
    Maintenance,
    Endurance,
}

impl FitnessGoal {
    /// Every goal, in the order error messages list them.
    pub const ALL: [FitnessGoal; 4] = [
        FitnessGoal::MuscleGain,
        FitnessGoal::WeightLoss,
        FitnessGoal::Maintenance,
        FitnessGoal::Endurance,
    ];

    /// The snake_case name used in JSON and tool arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            FitnessGoal::MuscleGain => "muscle_gain",
            FitnessGoal::WeightLoss => "weight_loss",
            FitnessGoal::Maintenance => "maintenance",
            FitnessGoal::Endurance => "endurance",
        }
    }
}

impl FromStr for FitnessGoal {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("fitness goal", s, &Self::ALL, Self::as_str)
    }
}

/// Typical weekly activity; drives the hydration allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// The snake_case name used in JSON and tool arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("activity level", s, &Self::ALL, Self::as_str)
    }
}

/// How hard a workout was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Intensity {
    pub const ALL: [Intensity; 4] = [
        Intensity::Low,
        Intensity::Moderate,
        Intensity::High,
        Intensity::VeryHigh,
    ];

    /// The snake_case name used in JSON and tool arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Moderate => "moderate",
            Intensity::High => "high",
            Intensity::VeryHigh => "very_high",
        }
    }
}

impl FromStr for Intensity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("intensity", s, &Self::ALL, Self::as_str)
    }
}

/// When in the day a meal was eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    PreWorkout,
    PostWorkout,
}

impl MealType {
    pub const ALL: [MealType; 6] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
        MealType::PreWorkout,
        MealType::PostWorkout,
    ];

    /// The snake_case name used in JSON and tool arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::PreWorkout => "pre_workout",
            MealType::PostWorkout => "post_workout",
        }
    }
}

impl FromStr for MealType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("meal type", s, &Self::ALL, Self::as_str)
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(FitnessGoal, ActivityLevel, Intensity, MealType);

/// The user's profile. Saving a new one replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub fitness_goal: FitnessGoal,
    pub activity_level: ActivityLevel,
    pub dietary_restrictions: Vec<String>,
    pub allergies: Vec<String>,
    /// `None` when the user gave no target.
    pub daily_calories: Option<u32>,
}

/// A workout as described by the caller, before the store stamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(rename = "type")]
    pub workout_type: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub intensity: Intensity,
    pub exercises: Vec<String>,
    pub notes: String,
}

/// A workout as stored, with the instant it was logged. Serializes flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLogEntry {
    pub timestamp: NaiveDateTime,
    #[serde(flatten)]
    pub workout: Workout,
}

/// Macronutrients in grams; each is `None` when not reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

/// A meal as described by the caller, before the store stamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub foods: Vec<String>,
    pub calories: Option<u32>,
    pub macros: Macros,
    pub notes: String,
}

/// A meal as stored, with the instant it was logged. Serializes flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealLogEntry {
    pub timestamp: NaiveDateTime,
    #[serde(flatten)]
    pub meal: Meal,
}

/// One drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrationLogEntry {
    pub timestamp: NaiveDateTime,
    pub amount_ml: u32,
}

/// A stored weekly meal plan. The payload is opaque to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub created_at: NaiveDateTime,
    pub plan: serde_json::Map<String, serde_json::Value>,
}

/// Today's slice of the logs. Derived on every call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub workouts: usize,
    pub meals: usize,
    pub hydration_ml: u64,
    pub workout_details: Vec<WorkoutLogEntry>,
    pub meal_details: Vec<MealLogEntry>,
}

/// Profile plus whole-session totals, regardless of date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Serialized as `null` before any profile is saved.
    pub profile: Option<UserProfile>,
    pub total_workouts: usize,
    pub total_meals_logged: usize,
    pub total_hydration_entries: usize,
    pub has_meal_plan: bool,
}
