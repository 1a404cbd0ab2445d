//! A scripted coaching day driven through the tool registry, the way an agent
//! runtime would call the session tools.
//!
//! Run with `RUST_LOG=healthcoach=debug cargo run --example daily_log` to see the
//! store's own logging alongside the replies.

use healthcoach::agents::coach_team;
use healthcoach::tool_protocol::ToolRegistry;
use healthcoach::tool_protocols::SessionToolProtocol;
use healthcoach::{CoachConfig, SessionStore};
use serde_json::json;
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    healthcoach::init_logger();

    let config = CoachConfig::from_env()?;
    let team = coach_team(&config);
    println!("Coach: {} ({})", team.name, team.model);
    for agent in &team.sub_agents {
        println!("  delegates to {}: {}", agent.name, agent.description);
    }

    let protocol = Arc::new(SessionToolProtocol::new(SessionStore::new()));
    let registry = ToolRegistry::from_protocol(protocol).await?;

    let calls = vec![
        (
            "save_user_profile",
            json!({
                "name": "Ava",
                "age": 28,
                "weight_kg": 75,
                "height_cm": 175,
                "fitness_goal": "muscle_gain",
                "activity_level": "active",
                "dietary_restrictions": "vegetarian, gluten-free",
                "allergies": "nuts",
                "daily_calories": 2800
            }),
        ),
        (
            "log_meal",
            json!({
                "meal_name": "Greek yogurt bowl",
                "meal_type": "breakfast",
                "foods": "greek yogurt, berries, oats",
                "estimated_calories": 450,
                "protein_g": 30
            }),
        ),
        ("log_water_intake", json!({ "amount_ml": 300 })),
        (
            "log_workout",
            json!({
                "workout_type": "strength",
                "duration_minutes": 60,
                "intensity": "high",
                "exercises": "squat, bench press, barbell row"
            }),
        ),
        ("log_water_intake", json!({ "amount_ml": 250 })),
        (
            "save_meal_plan_to_memory",
            json!({
                "meal_plan_json": "{\"monday\": {\"breakfast\": \"tofu scramble\", \"dinner\": \"lentil curry\"}}"
            }),
        ),
        ("save_meal_plan_to_memory", json!({ "meal_plan_json": "monday: oats" })),
        ("get_daily_summary", json!({})),
        ("get_daily_targets", json!({})),
        ("get_user_stats", json!({})),
    ];

    for (tool, args) in calls {
        let result = registry.execute_tool(tool, args).await?;
        let status = if result.success { "ok" } else { "rejected" };
        println!("\n> {} [{}]\n{}", tool, status, result.reply_text());
    }

    Ok(())
}
