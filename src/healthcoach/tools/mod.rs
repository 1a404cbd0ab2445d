//! Coaching Tool Functions
//!
//! The functions an agent runtime calls to read and mutate a coaching session. They
//! are the boundary between the model's loosely-typed arguments and the typed
//! [`SessionStore`](crate::SessionStore):
//!
//! - comma-separated strings become ordered lists (`"a, b"` → `["a", "b"]`, `""` → `[]`)
//! - `0` in an optional numeric field means "not provided" and becomes `None`
//! - whole-number fields accept integral floats (`45.0` reads as `45`)
//! - enum-like strings are parsed leniently and rejected with an `Error:` reply if unknown
//! - query tools answer with pretty-printed JSON in a stable key order
//!
//! # Available Tools
//!
//! | name | purpose |
//! |------|---------|
//! | `save_user_profile` | store (replace) the user's profile |
//! | `log_workout` | append a workout |
//! | `log_meal` | append a meal |
//! | `log_water_intake` | append water and report today's total |
//! | `get_daily_summary` | today's workouts, meals and water |
//! | `save_meal_plan_to_memory` | store (replace) the weekly meal plan |
//! | `get_user_stats` | profile and running totals |
//! | `get_daily_targets` | calorie, macro and water targets |
//!
//! # Example
//!
//! ```rust
//! use healthcoach::tools::{self, ProfileInput};
//! use healthcoach::SessionStore;
//!
//! let mut store = SessionStore::new();
//! let reply = tools::save_user_profile(
//!     &mut store,
//!     ProfileInput {
//!         name: "Ava".to_string(),
//!         age: 28,
//!         weight_kg: 75.0,
//!         height_cm: 175.0,
//!         fitness_goal: "muscle_gain".to_string(),
//!         activity_level: "active".to_string(),
//!         dietary_restrictions: "vegetarian, gluten-free".to_string(),
//!         ..Default::default()
//!     },
//! );
//! assert_eq!(reply, "User profile saved: Ava");
//! assert_eq!(
//!     store.profile().unwrap().dietary_restrictions,
//!     vec!["vegetarian", "gluten-free"]
//! );
//! ```
//!
//! To expose these to an agent runtime over JSON, wrap a store in
//! [`SessionToolProtocol`](crate::tool_protocols::SessionToolProtocol).

pub mod parsing;
pub mod session_tools;

pub use parsing::{optional_whole_i64, positive_f64, positive_u32, split_list, whole_u32};
pub use session_tools::{
    get_daily_summary, get_daily_targets, get_user_stats, is_error_reply, log_meal,
    log_water_intake, log_workout, save_meal_plan_to_memory, save_user_profile, MealInput,
    ProfileInput, TargetsReport, WorkoutInput, ERROR_PREFIX, INVALID_MEAL_PLAN_REPLY,
};

/// Tool names, as advertised to the runtime.
pub const SAVE_USER_PROFILE: &str = "save_user_profile";
pub const LOG_WORKOUT: &str = "log_workout";
pub const LOG_MEAL: &str = "log_meal";
pub const LOG_WATER_INTAKE: &str = "log_water_intake";
pub const GET_DAILY_SUMMARY: &str = "get_daily_summary";
pub const SAVE_MEAL_PLAN: &str = "save_meal_plan_to_memory";
pub const GET_USER_STATS: &str = "get_user_stats";
pub const GET_DAILY_TARGETS: &str = "get_daily_targets";

/// Every session tool, in the order they are advertised.
pub const SESSION_TOOL_NAMES: [&str; 8] = [
    SAVE_USER_PROFILE,
    LOG_WORKOUT,
    LOG_MEAL,
    LOG_WATER_INTAKE,
    GET_DAILY_SUMMARY,
    SAVE_MEAL_PLAN,
    GET_USER_STATS,
    GET_DAILY_TARGETS,
];
