//! The coaching tool functions.
//!
//! Each function takes the session's [`SessionStore`] explicitly plus the caller's
//! loosely-typed arguments, and always answers with a single `String`: a confirmation,
//! a pretty-printed JSON document, or a reply starting with [`ERROR_PREFIX`]. None of
//! them panic, so a bad argument from the model never aborts the agent's turn.

use crate::healthcoach::models::{
    ActivityLevel, FitnessGoal, Intensity, Macros, Meal, MealType, ParseEnumError, UserProfile,
    Workout,
};
use crate::healthcoach::session::SessionStore;
use crate::healthcoach::targets::DailyTargets;
use crate::healthcoach::tools::parsing::{
    optional_whole_i64, positive_f64, positive_u32, split_list, whole_u32,
};
use serde::{Deserialize, Serialize};

/// Every error reply starts with this.
pub const ERROR_PREFIX: &str = "Error:";

/// Reply for meal-plan payloads that are not JSON at all.
pub const INVALID_MEAL_PLAN_REPLY: &str =
    "Error: Invalid meal plan format. Please provide valid JSON.";

/// Whether a tool reply reports rejected input.
pub fn is_error_reply(reply: &str) -> bool {
    reply.starts_with(ERROR_PREFIX)
}

/// Arguments of `save_user_profile`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    #[serde(deserialize_with = "whole_u32")]
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    /// One of: muscle_gain, weight_loss, maintenance, endurance.
    pub fitness_goal: String,
    /// One of: sedentary, light, moderate, active, very_active.
    pub activity_level: String,
    /// Comma-separated, e.g. "vegetarian, gluten-free".
    #[serde(default)]
    pub dietary_restrictions: String,
    /// Comma-separated.
    #[serde(default)]
    pub allergies: String,
    /// `0` or absent means "no target given".
    #[serde(default, deserialize_with = "optional_whole_i64")]
    pub daily_calories: Option<i64>,
}

/// Arguments of `log_workout`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkoutInput {
    pub workout_type: String,
    #[serde(deserialize_with = "whole_u32")]
    pub duration_minutes: u32,
    /// One of: low, moderate, high, very_high.
    pub intensity: String,
    #[serde(default)]
    pub exercises: String,
    #[serde(default)]
    pub notes: String,
}

/// Arguments of `log_meal`. Numeric fields use zero-as-absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MealInput {
    pub meal_name: String,
    /// One of: breakfast, lunch, dinner, snack, pre_workout, post_workout.
    pub meal_type: String,
    pub foods: String,
    #[serde(default, deserialize_with = "optional_whole_i64")]
    pub estimated_calories: Option<i64>,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    #[serde(default)]
    pub fats_g: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

/// Reply document of `get_daily_targets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetsReport {
    pub has_profile: bool,
    pub targets: Option<DailyTargets>,
    pub hydration_today_ml: u64,
    /// What is left to drink today; absent without a profile.
    pub hydration_remaining_ml: Option<u64>,
}

/// Parse and store the profile, replacing any previous one.
pub fn save_user_profile(store: &mut SessionStore, input: ProfileInput) -> String {
    let profile = match build_profile(input) {
        Ok(profile) => profile,
        Err(err) => return rejected("save_user_profile", err),
    };
    store.set_profile(profile)
}

/// Parse and append a workout. Exercises are comma-separated.
pub fn log_workout(store: &mut SessionStore, input: WorkoutInput) -> String {
    let intensity = match input.intensity.parse::<Intensity>() {
        Ok(intensity) => intensity,
        Err(err) => return rejected("log_workout", err),
    };
    store.append_workout(Workout {
        workout_type: input.workout_type.trim().to_string(),
        duration_minutes: input.duration_minutes,
        intensity,
        exercises: split_list(&input.exercises),
        notes: input.notes,
    })
}

/// Parse and append a meal. Zero calories or macros mean "not reported".
pub fn log_meal(store: &mut SessionStore, input: MealInput) -> String {
    let meal_type = match input.meal_type.parse::<MealType>() {
        Ok(meal_type) => meal_type,
        Err(err) => return rejected("log_meal", err),
    };
    store.append_meal(Meal {
        name: input.meal_name.trim().to_string(),
        meal_type,
        foods: split_list(&input.foods),
        calories: positive_u32(input.estimated_calories),
        macros: Macros {
            protein: positive_f64(input.protein_g),
            carbs: positive_f64(input.carbs_g),
            fats: positive_f64(input.fats_g),
        },
        notes: input.notes,
    })
}

/// Append water and report today's running total.
pub fn log_water_intake(store: &mut SessionStore, amount_ml: u32) -> String {
    store.append_hydration(amount_ml)
}

/// Today's activity as pretty JSON.
pub fn get_daily_summary(store: &SessionStore) -> String {
    to_pretty_json(&store.daily_summary())
}

/// Parse and store a weekly meal plan.
///
/// The payload must be a JSON object. Anything else is rejected with an error reply
/// and the previously stored plan, if any, is kept.
pub fn save_meal_plan_to_memory(store: &mut SessionStore, meal_plan_json: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(meal_plan_json) {
        Ok(serde_json::Value::Object(plan)) => store.save_meal_plan(plan),
        Ok(other) => {
            log::warn!(
                "session {}: meal plan rejected, expected a JSON object but got {}",
                store.session_id(),
                json_kind(&other)
            );
            format!(
                "{} Invalid meal plan format. The meal plan must be a JSON object, not {}.",
                ERROR_PREFIX,
                json_kind(&other)
            )
        }
        Err(err) => {
            log::warn!(
                "session {}: meal plan rejected, not valid JSON: {}",
                store.session_id(),
                err
            );
            INVALID_MEAL_PLAN_REPLY.to_string()
        }
    }
}

/// Profile and running totals as pretty JSON. The profile is `null` until saved.
pub fn get_user_stats(store: &SessionStore) -> String {
    to_pretty_json(&store.user_stats())
}

/// Calorie, macro and hydration targets for the saved profile as pretty JSON.
pub fn get_daily_targets(store: &SessionStore) -> String {
    let targets = store.profile().map(DailyTargets::for_profile);
    let hydration_today_ml = store.hydration_total_on(store.today());
    let report = TargetsReport {
        has_profile: targets.is_some(),
        hydration_remaining_ml: targets
            .as_ref()
            .map(|t| u64::from(t.hydration_ml).saturating_sub(hydration_today_ml)),
        targets,
        hydration_today_ml,
    };
    to_pretty_json(&report)
}

fn build_profile(input: ProfileInput) -> Result<UserProfile, ParseEnumError> {
    Ok(UserProfile {
        fitness_goal: input.fitness_goal.parse::<FitnessGoal>()?,
        activity_level: input.activity_level.parse::<ActivityLevel>()?,
        name: input.name.trim().to_string(),
        age: input.age,
        weight_kg: input.weight_kg,
        height_cm: input.height_cm,
        dietary_restrictions: split_list(&input.dietary_restrictions),
        allergies: split_list(&input.allergies),
        daily_calories: positive_u32(input.daily_calories),
    })
}

fn rejected(tool: &str, err: ParseEnumError) -> String {
    log::warn!("{}: {}", tool, err);
    format!("{} {}", ERROR_PREFIX, err)
}

fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|err| format!("{} could not serialize result: {}", ERROR_PREFIX, err))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_input() -> ProfileInput {
        ProfileInput {
            name: "Ava".to_string(),
            age: 28,
            weight_kg: 75.0,
            height_cm: 175.0,
            fitness_goal: "muscle_gain".to_string(),
            activity_level: "active".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_goal_is_rejected_without_touching_store() {
        let mut store = SessionStore::new();
        let reply = save_user_profile(
            &mut store,
            ProfileInput {
                fitness_goal: "get huge".to_string(),
                ..profile_input()
            },
        );
        assert!(is_error_reply(&reply));
        assert!(reply.contains("muscle_gain, weight_loss, maintenance, endurance"));
        assert!(store.profile().is_none());
    }

    #[test]
    fn test_unknown_intensity_and_meal_type_are_rejected() {
        let mut store = SessionStore::new();
        let reply = log_workout(
            &mut store,
            WorkoutInput {
                workout_type: "cardio".to_string(),
                duration_minutes: 20,
                intensity: "insane".to_string(),
                ..Default::default()
            },
        );
        assert!(is_error_reply(&reply));

        let reply = log_meal(
            &mut store,
            MealInput {
                meal_name: "Brunch".to_string(),
                meal_type: "brunch".to_string(),
                foods: "eggs".to_string(),
                ..Default::default()
            },
        );
        assert!(is_error_reply(&reply));
        assert!(store.workouts().is_empty());
        assert!(store.meals().is_empty());
    }

    #[test]
    fn test_meal_plan_must_be_an_object() {
        let mut store = SessionStore::new();
        let reply = save_meal_plan_to_memory(&mut store, "[1, 2, 3]");
        assert_eq!(
            reply,
            "Error: Invalid meal plan format. The meal plan must be a JSON object, not an array."
        );
        assert!(store.meal_plan().is_none());
    }

    #[test]
    fn test_targets_report_without_profile() {
        let store = SessionStore::new();
        let report: serde_json::Value =
            serde_json::from_str(&get_daily_targets(&store)).unwrap();
        assert_eq!(report["has_profile"], false);
        assert!(report["targets"].is_null());
        assert!(report["hydration_remaining_ml"].is_null());
    }

    #[test]
    fn test_targets_report_tracks_remaining_water() {
        let mut store = SessionStore::new();
        save_user_profile(&mut store, profile_input());
        log_water_intake(&mut store, 1000);

        let report: serde_json::Value =
            serde_json::from_str(&get_daily_targets(&store)).unwrap();
        assert_eq!(report["has_profile"], true);
        assert_eq!(report["targets"]["hydration_ml"], 3380);
        assert_eq!(report["hydration_today_ml"], 1000);
        assert_eq!(report["hydration_remaining_ml"], 2380);
    }
}
