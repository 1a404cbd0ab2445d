//! Tool Protocol Implementations
//!
//! [`SessionToolProtocol`] exposes the coaching tool functions of
//! [`crate::tools`] through the [`ToolProtocol`] trait, so that an agent runtime
//! can discover them, render their function declarations, and call them with the
//! model's JSON arguments.
//!
//! # Usage
//!
//! ```rust
//! use healthcoach::tool_protocol::{ToolProtocol, ToolRegistry};
//! use healthcoach::tool_protocols::SessionToolProtocol;
//! use healthcoach::SessionStore;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let protocol = Arc::new(SessionToolProtocol::new(SessionStore::new()));
//! let registry = ToolRegistry::from_protocol(protocol.clone()).await?;
//!
//! let result = registry
//!     .execute_tool("log_water_intake", serde_json::json!({"amount_ml": 300}))
//!     .await?;
//! assert!(result.success);
//! assert!(result.reply_text().ends_with("Today's total: 300ml"));
//! # Ok(())
//! # }
//! ```
//!
//! # Argument handling
//!
//! Arguments are deserialized into the typed inputs of [`crate::tools`]. Arguments
//! that do not fit (missing required fields, wrong JSON types, negative amounts)
//! produce a failed [`ToolResult`] whose error text explains the problem; so do tool
//! replies that start with `Error:`. Only an unknown tool name is reported as an
//! `Err`, since that is a wiring mistake in the runtime rather than a bad model
//! call.

use crate::healthcoach::models::{ActivityLevel, FitnessGoal, Intensity, MealType};
use crate::healthcoach::session::SessionStore;
use crate::healthcoach::tool_protocol::{
    ToolError, ToolMetadata, ToolParameter, ToolParameterType, ToolProtocol, ToolResult,
};
use crate::healthcoach::tools::{
    self, is_error_reply, MealInput, ProfileInput, WorkoutInput, ERROR_PREFIX,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Deserialize)]
struct WaterArgs {
    #[serde(deserialize_with = "tools::whole_u32")]
    amount_ml: u32,
}

#[derive(Debug, Deserialize)]
struct MealPlanArgs {
    /// Usually a JSON string; an inline object is accepted too.
    meal_plan_json: JsonValue,
}

/// Session-backed tool adapter
///
/// Holds one [`SessionStore`] behind a `tokio` lock. Mutating tools take the write
/// lock and query tools the read lock, so each call sees and leaves a consistent
/// store. Create one protocol per conversation to keep sessions isolated.
#[derive(Clone)]
pub struct SessionToolProtocol {
    store: Arc<RwLock<SessionStore>>,
}

impl SessionToolProtocol {
    /// Take ownership of a store and share it behind a lock.
    pub fn new(store: SessionStore) -> Self {
        Self::from_shared(Arc::new(RwLock::new(store)))
    }

    /// Wrap a store that other code also holds a handle to.
    pub fn from_shared(store: Arc<RwLock<SessionStore>>) -> Self {
        Self { store }
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> Arc<RwLock<SessionStore>> {
        Arc::clone(&self.store)
    }

    /// Metadata for every session tool, in advertised order.
    pub fn catalogue() -> Vec<ToolMetadata> {
        vec![
            save_user_profile_metadata(),
            log_workout_metadata(),
            log_meal_metadata(),
            ToolMetadata::new(
                tools::LOG_WATER_INTAKE,
                "Log water intake. Replies with the amount logged and today's running total.",
            )
            .with_parameter(
                ToolParameter::new("amount_ml", ToolParameterType::Integer)
                    .with_description("Amount of water in milliliters")
                    .required(),
            ),
            ToolMetadata::new(
                tools::GET_DAILY_SUMMARY,
                "Get a JSON summary of today's logged workouts, meals, and hydration.",
            ),
            ToolMetadata::new(
                tools::SAVE_MEAL_PLAN,
                "Save a weekly meal plan, replacing any previous plan.",
            )
            .with_parameter(
                ToolParameter::new("meal_plan_json", ToolParameterType::String)
                    .with_description("JSON object containing the weekly meal plan")
                    .required(),
            ),
            ToolMetadata::new(
                tools::GET_USER_STATS,
                "Get the user's profile (null if not saved yet) and overall logging totals as JSON.",
            ),
            ToolMetadata::new(
                tools::GET_DAILY_TARGETS,
                "Get the user's daily calorie, macro, and hydration targets and today's water progress as JSON.",
            ),
        ]
    }

    fn reply(&self, session_id: uuid::Uuid, text: String) -> ToolResult {
        let result = if is_error_reply(&text) {
            ToolResult::failure(text)
        } else {
            ToolResult::success(JsonValue::String(text))
        };
        result.with_metadata("session_id", JsonValue::String(session_id.to_string()))
    }
}

#[async_trait]
impl ToolProtocol for SessionToolProtocol {
    async fn execute(
        &self,
        tool_name: &str,
        parameters: JsonValue,
    ) -> Result<ToolResult, Box<dyn Error + Send + Sync>> {
        log::debug!("session tool call: {} {}", tool_name, parameters);

        let result = match tool_name {
            tools::SAVE_USER_PROFILE => match parse_args::<ProfileInput>(tool_name, parameters) {
                Ok(input) => {
                    let mut store = self.store.write().await;
                    let text = tools::save_user_profile(&mut store, input);
                    self.reply(store.session_id(), text)
                }
                Err(failure) => failure,
            },
            tools::LOG_WORKOUT => match parse_args::<WorkoutInput>(tool_name, parameters) {
                Ok(input) => {
                    let mut store = self.store.write().await;
                    let text = tools::log_workout(&mut store, input);
                    self.reply(store.session_id(), text)
                }
                Err(failure) => failure,
            },
            tools::LOG_MEAL => match parse_args::<MealInput>(tool_name, parameters) {
                Ok(input) => {
                    let mut store = self.store.write().await;
                    let text = tools::log_meal(&mut store, input);
                    self.reply(store.session_id(), text)
                }
                Err(failure) => failure,
            },
            tools::LOG_WATER_INTAKE => match parse_args::<WaterArgs>(tool_name, parameters) {
                Ok(args) => {
                    let mut store = self.store.write().await;
                    let text = tools::log_water_intake(&mut store, args.amount_ml);
                    self.reply(store.session_id(), text)
                }
                Err(failure) => failure,
            },
            tools::SAVE_MEAL_PLAN => match parse_args::<MealPlanArgs>(tool_name, parameters) {
                Ok(args) => {
                    let payload = match args.meal_plan_json {
                        JsonValue::String(text) => text,
                        inline => inline.to_string(),
                    };
                    let mut store = self.store.write().await;
                    let text = tools::save_meal_plan_to_memory(&mut store, &payload);
                    self.reply(store.session_id(), text)
                }
                Err(failure) => failure,
            },
            tools::GET_DAILY_SUMMARY => {
                let store = self.store.read().await;
                self.reply(store.session_id(), tools::get_daily_summary(&store))
            }
            tools::GET_USER_STATS => {
                let store = self.store.read().await;
                self.reply(store.session_id(), tools::get_user_stats(&store))
            }
            tools::GET_DAILY_TARGETS => {
                let store = self.store.read().await;
                self.reply(store.session_id(), tools::get_daily_targets(&store))
            }
            _ => return Err(Box::new(ToolError::NotFound(tool_name.to_string()))),
        };

        Ok(result)
    }

    async fn list_tools(&self) -> Result<Vec<ToolMetadata>, Box<dyn Error + Send + Sync>> {
        Ok(Self::catalogue())
    }

    async fn get_tool_metadata(
        &self,
        tool_name: &str,
    ) -> Result<ToolMetadata, Box<dyn Error + Send + Sync>> {
        Self::catalogue()
            .into_iter()
            .find(|metadata| metadata.name == tool_name)
            .ok_or_else(|| {
                Box::new(ToolError::NotFound(tool_name.to_string())) as Box<dyn Error + Send + Sync>
            })
    }

    fn protocol_name(&self) -> &str {
        "session"
    }
}

/// Deserialize tool arguments, or produce the failed result to send back instead.
fn parse_args<T: DeserializeOwned>(tool_name: &str, parameters: JsonValue) -> Result<T, ToolResult> {
    serde_json::from_value(parameters).map_err(|err| {
        log::warn!("{}: rejected arguments: {}", tool_name, err);
        ToolResult::failure(format!(
            "{} {}",
            ERROR_PREFIX,
            ToolError::InvalidParameters(format!("{}: {}", tool_name, err))
        ))
    })
}

fn save_user_profile_metadata() -> ToolMetadata {
    ToolMetadata::new(
        tools::SAVE_USER_PROFILE,
        "Save the user's profile, replacing any previously saved profile.",
    )
    .with_parameter(
        ToolParameter::new("name", ToolParameterType::String)
            .with_description("User's name")
            .required(),
    )
    .with_parameter(
        ToolParameter::new("age", ToolParameterType::Integer)
            .with_description("Age in years")
            .required(),
    )
    .with_parameter(
        ToolParameter::new("weight_kg", ToolParameterType::Number)
            .with_description("Weight in kilograms")
            .required(),
    )
    .with_parameter(
        ToolParameter::new("height_cm", ToolParameterType::Number)
            .with_description("Height in centimeters")
            .required(),
    )
    .with_parameter(
        ToolParameter::new("fitness_goal", ToolParameterType::String)
            .with_description("Primary fitness goal")
            .with_allowed_values(FitnessGoal::ALL.iter().map(|g| g.as_str()))
            .required(),
    )
    .with_parameter(
        ToolParameter::new("activity_level", ToolParameterType::String)
            .with_description("Typical activity level")
            .with_allowed_values(ActivityLevel::ALL.iter().map(|a| a.as_str()))
            .required(),
    )
    .with_parameter(
        ToolParameter::new("dietary_restrictions", ToolParameterType::String)
            .with_description("Comma-separated list, e.g. \"vegetarian, gluten-free\"")
            .with_default(serde_json::json!("")),
    )
    .with_parameter(
        ToolParameter::new("allergies", ToolParameterType::String)
            .with_description("Comma-separated list of allergies")
            .with_default(serde_json::json!("")),
    )
    .with_parameter(
        ToolParameter::new("daily_calories", ToolParameterType::Integer)
            .with_description("Target daily calorie intake; 0 if the user has none")
            .with_default(serde_json::json!(0)),
    )
}

fn log_workout_metadata() -> ToolMetadata {
    ToolMetadata::new(tools::LOG_WORKOUT, "Log a completed workout session.")
        .with_parameter(
            ToolParameter::new("workout_type", ToolParameterType::String)
                .with_description("Type of workout, e.g. strength, cardio, flexibility, sports")
                .required(),
        )
        .with_parameter(
            ToolParameter::new("duration_minutes", ToolParameterType::Integer)
                .with_description("Duration in minutes")
                .required(),
        )
        .with_parameter(
            ToolParameter::new("intensity", ToolParameterType::String)
                .with_allowed_values(Intensity::ALL.iter().map(|i| i.as_str()))
                .required(),
        )
        .with_parameter(
            ToolParameter::new("exercises", ToolParameterType::String)
                .with_description("Comma-separated list of exercises performed")
                .with_default(serde_json::json!("")),
        )
        .with_parameter(
            ToolParameter::new("notes", ToolParameterType::String)
                .with_default(serde_json::json!("")),
        )
}

fn log_meal_metadata() -> ToolMetadata {
    ToolMetadata::new(tools::LOG_MEAL, "Log a meal with optional calorie and macro estimates.")
        .with_parameter(
            ToolParameter::new("meal_name", ToolParameterType::String)
                .with_description("Name or description of the meal")
                .required(),
        )
        .with_parameter(
            ToolParameter::new("meal_type", ToolParameterType::String)
                .with_allowed_values(MealType::ALL.iter().map(|m| m.as_str()))
                .required(),
        )
        .with_parameter(
            ToolParameter::new("foods", ToolParameterType::String)
                .with_description("Comma-separated list of foods consumed")
                .required(),
        )
        .with_parameter(
            ToolParameter::new("estimated_calories", ToolParameterType::Integer)
                .with_description("Estimated total calories; 0 if unknown")
                .with_default(serde_json::json!(0)),
        )
        .with_parameter(
            ToolParameter::new("protein_g", ToolParameterType::Number)
                .with_description("Protein in grams; 0 if unknown")
                .with_default(serde_json::json!(0)),
        )
        .with_parameter(
            ToolParameter::new("carbs_g", ToolParameterType::Number)
                .with_description("Carbohydrates in grams; 0 if unknown")
                .with_default(serde_json::json!(0)),
        )
        .with_parameter(
            ToolParameter::new("fats_g", ToolParameterType::Number)
                .with_description("Fats in grams; 0 if unknown")
                .with_default(serde_json::json!(0)),
        )
        .with_parameter(
            ToolParameter::new("notes", ToolParameterType::String)
                .with_default(serde_json::json!("")),
        )
}
