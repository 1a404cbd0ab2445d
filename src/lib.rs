//! # healthcoach
//!
//! healthcoach is the session-state and tool layer of a conversational health and
//! nutrition coach. A team of LLM agents, run by an external orchestration runtime,
//! talks to the user; this crate holds what the agents learn during a session and
//! exposes the tools they call to record and read it back.
//!
//! The crate provides:
//!
//! * **Session Store**: [`SessionStore`] keeps one user's profile, workout, meal and
//!   water logs, and weekly meal plan, and answers "today" questions against an
//!   injected [`clock::Clock`]
//! * **Tool Functions**: [`tools`] turns the loosely-typed arguments a model produces
//!   into typed store mutations and returns human-readable replies or JSON reports
//! * **Tool Protocol**: [`tool_protocols::SessionToolProtocol`] exposes the tool
//!   functions to any runtime through [`tool_protocol::ToolRegistry`], with JSON
//!   function schemas for every tool
//! * **Agent Definitions**: [`agents::coach_team`] describes the coach and its four
//!   specialists as data, including which tools each may call
//! * **Targets**: [`targets`] derives calorie, macro and hydration targets from a profile
//! * **Evaluation**: [`evaluation`] scores agent replies against keyword expectations
//!
//! ## Quick Start
//!
//! ```rust
//! use healthcoach::tool_protocol::ToolRegistry;
//! use healthcoach::tool_protocols::SessionToolProtocol;
//! use healthcoach::SessionStore;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     healthcoach::init_logger();
//!
//!     let protocol = Arc::new(SessionToolProtocol::new(SessionStore::new()));
//!     let registry = ToolRegistry::from_protocol(protocol).await?;
//!
//!     registry
//!         .execute_tool("log_water_intake", json!({ "amount_ml": 300 }))
//!         .await?;
//!     let reply = registry
//!         .execute_tool("log_water_intake", json!({ "amount_ml": 250 }))
//!         .await?;
//!
//!     assert_eq!(reply.reply_text(), "Logged 250ml of water. Today's total: 550ml");
//!     Ok(())
//! }
//! ```
//!
//! ## Calling Tools Directly
//!
//! Without a runtime in between, the tool functions take the store explicitly:
//!
//! ```rust
//! use healthcoach::tools::{self, WorkoutInput};
//! use healthcoach::SessionStore;
//!
//! let mut store = SessionStore::new();
//! let reply = tools::log_workout(
//!     &mut store,
//!     WorkoutInput {
//!         workout_type: "strength".to_string(),
//!         duration_minutes: 45,
//!         intensity: "high".to_string(),
//!         exercises: "squat, bench press, row".to_string(),
//!         ..Default::default()
//!     },
//! );
//! assert_eq!(reply, "Workout logged: strength - 45 minutes");
//!
//! let summary: serde_json::Value =
//!     serde_json::from_str(&tools::get_daily_summary(&store)).unwrap();
//! assert_eq!(summary["workouts"], 1);
//! ```
//!
//! ## Configuration
//!
//! [`CoachConfig::from_env`] reads `GOOGLE_API_KEY` and `GOOGLE_GENAI_USE_VERTEXAI`
//! for the model runtime, loading a `.env` file first if there is one. Variables set
//! in the environment take precedence. The session layer itself needs no
//! configuration.

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// Store mutations log at `debug`; set `RUST_LOG=healthcoach=debug` to see them.
///
/// ```rust
/// healthcoach::init_logger();
/// log::info!("Logger is ready");
/// ```
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::init();
    });
}

// Import the top-level `healthcoach` module.
pub mod healthcoach;

// Re-exporting key items for easier external access.
pub use healthcoach::agents;
pub use healthcoach::agents::{coach_team, AgentDefinition};
pub use healthcoach::clock;
pub use healthcoach::config;
pub use healthcoach::config::CoachConfig;
pub use healthcoach::evaluation;
pub use healthcoach::models;
pub use healthcoach::session;
pub use healthcoach::session::SessionStore;
pub use healthcoach::targets;
pub use healthcoach::targets::DailyTargets;

// Re-export tool functions and the protocol layer
pub use healthcoach::tool_protocol;
pub use healthcoach::tool_protocols;
pub use healthcoach::tools;
