use healthcoach::agents::{
    coach_team, AgentDefinition, NUTRITION_PLANNER, PROGRESS_TRACKER, RECOVERY_SPECIALIST,
    ROOT_AGENT, WORKOUT_ADVISOR,
};
use healthcoach::config::ModelConfig;
use healthcoach::tools::SESSION_TOOL_NAMES;
use healthcoach::CoachConfig;

#[test]
fn test_root_delegates_to_four_specialists() {
    let root = coach_team(&CoachConfig::default());

    assert_eq!(root.name, ROOT_AGENT);
    assert_eq!(
        root.delegates(),
        vec![
            NUTRITION_PLANNER,
            WORKOUT_ADVISOR,
            PROGRESS_TRACKER,
            RECOVERY_SPECIALIST
        ]
    );
    assert!(root.flatten().iter().all(|agent| agent.web_search));
}

#[test]
fn test_tool_wiring() {
    let root = coach_team(&CoachConfig::default());

    assert_eq!(
        root.tools,
        vec![
            "save_user_profile",
            "save_meal_plan_to_memory",
            "get_user_stats",
            "get_daily_targets"
        ]
    );
    assert_eq!(
        root.find(PROGRESS_TRACKER).unwrap().tools,
        vec![
            "log_workout",
            "log_meal",
            "log_water_intake",
            "get_daily_summary",
            "get_user_stats"
        ]
    );
    for name in [NUTRITION_PLANNER, WORKOUT_ADVISOR, RECOVERY_SPECIALIST] {
        assert!(root.find(name).unwrap().tools.is_empty(), "{} has tools", name);
    }
}

#[test]
fn test_every_referenced_tool_exists_in_catalogue() {
    let root = coach_team(&CoachConfig::default());
    assert!(root.missing_tools(&SESSION_TOOL_NAMES).is_empty());

    let catalogue_without_meal_log: Vec<&str> = SESSION_TOOL_NAMES
        .iter()
        .copied()
        .filter(|name| *name != "log_meal")
        .collect();
    assert_eq!(
        root.missing_tools(&catalogue_without_meal_log),
        vec![(PROGRESS_TRACKER, "log_meal")]
    );
}

#[test]
fn test_models_follow_config() {
    let config = CoachConfig {
        models: ModelConfig {
            tracker: "tracker-model".to_string(),
            ..ModelConfig::default()
        },
        ..CoachConfig::default()
    };
    let root = coach_team(&config);

    assert_eq!(root.model, "gemini-2.0-flash");
    assert_eq!(root.find(PROGRESS_TRACKER).unwrap().model, "tracker-model");
    assert_eq!(root.find(WORKOUT_ADVISOR).unwrap().model, "gemini-2.0-flash");
}

#[test]
fn test_instructions_mention_their_tools() {
    let root = coach_team(&CoachConfig::default());
    for agent in root.flatten() {
        assert!(!agent.instruction.is_empty(), "{} has no instruction", agent.name);
        assert!(!agent.description.is_empty());
        for tool in &agent.tools {
            assert!(
                agent.instruction.contains(tool.as_str()),
                "{} instruction does not mention {}",
                agent.name,
                tool
            );
        }
    }
}

#[test]
fn test_builder() {
    let agent = AgentDefinition::new("helper", "Helps", "model-x")
        .with_instruction("Be brief.")
        .with_tool("get_user_stats")
        .with_web_search();

    assert_eq!(agent.instruction, "Be brief.");
    assert_eq!(agent.tools, vec!["get_user_stats"]);
    assert!(agent.web_search);
    assert!(agent.sub_agents.is_empty());
    assert_eq!(agent.find("helper"), Some(&agent));
}
