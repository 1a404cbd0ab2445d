//! Agent Definitions
//!
//! The coaching team as data: each [`AgentDefinition`] carries the identity, model,
//! instruction text and tool wiring that an external orchestration runtime needs to
//! instantiate an agent. Nothing here calls a model; the runtime consumes these
//! definitions and routes tool calls back to
//! [`SessionToolProtocol`](crate::tool_protocols::SessionToolProtocol).
//!
//! # Team
//!
//! ```text
//! health_nutrition_coach          save_user_profile, save_meal_plan_to_memory,
//! │                               get_user_stats, get_daily_targets, web search
//! ├── nutrition_planner           web search
//! ├── workout_advisor             web search
//! ├── progress_tracker            log_workout, log_meal, log_water_intake,
//! │                               get_daily_summary, get_user_stats, web search
//! └── recovery_specialist         web search
//! ```
//!
//! # Example
//!
//! ```rust
//! use healthcoach::agents::coach_team;
//! use healthcoach::CoachConfig;
//!
//! let root = coach_team(&CoachConfig::default());
//! assert_eq!(root.name, "health_nutrition_coach");
//! assert!(root.find("progress_tracker").unwrap().tools.contains(&"log_meal".to_string()));
//! ```

use crate::healthcoach::config::CoachConfig;
use crate::healthcoach::targets::{
    HYDRATION_ACTIVE_ML_PER_KG, HYDRATION_BASE_ML_PER_KG, HYDRATION_INTENSE_ML_PER_KG,
};
use crate::healthcoach::tools;

/// Name of the orchestrating coach; the other constants name its specialists.
pub const ROOT_AGENT: &str = "health_nutrition_coach";
pub const NUTRITION_PLANNER: &str = "nutrition_planner";
pub const WORKOUT_ADVISOR: &str = "workout_advisor";
pub const PROGRESS_TRACKER: &str = "progress_tracker";
pub const RECOVERY_SPECIALIST: &str = "recovery_specialist";

/// Declarative description of one agent and the agents it may delegate to.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDefinition {
    /// Stable identifier the runtime and other agents refer to.
    pub name: String,
    /// One-line summary the parent agent sees when choosing whom to delegate to.
    pub description: String,
    pub model: String,
    pub instruction: String,
    /// Names of session tools this agent may call.
    pub tools: Vec<String>,
    /// Whether the runtime's web search capability is attached.
    pub web_search: bool,
    pub sub_agents: Vec<AgentDefinition>,
}

impl AgentDefinition {
    /// Create an agent with no instruction, tools or sub-agents yet.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            model: model.into(),
            instruction: String::new(),
            tools: Vec::new(),
            web_search: false,
            sub_agents: Vec::new(),
        }
    }

    /// Set the system instruction the runtime gives this agent.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Allow the agent to call one more session tool.
    pub fn with_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tools.push(tool_name.into());
        self
    }

    /// Allow the agent to call each of the given session tools, in order.
    pub fn with_tools<I, S>(mut self, tool_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools.extend(tool_names.into_iter().map(Into::into));
        self
    }

    /// Attach the runtime's web search capability.
    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    /// Add a specialist this agent can delegate to.
    pub fn with_sub_agent(mut self, agent: AgentDefinition) -> Self {
        self.sub_agents.push(agent);
        self
    }

    /// This agent or any descendant with the given name.
    pub fn find(&self, name: &str) -> Option<&AgentDefinition> {
        if self.name == name {
            return Some(self);
        }
        self.sub_agents.iter().find_map(|agent| agent.find(name))
    }

    /// Names of the direct sub-agents.
    pub fn delegates(&self) -> Vec<&str> {
        self.sub_agents.iter().map(|a| a.name.as_str()).collect()
    }

    /// This agent followed by all descendants, depth first.
    pub fn flatten(&self) -> Vec<&AgentDefinition> {
        let mut agents = vec![self];
        for sub in &self.sub_agents {
            agents.extend(sub.flatten());
        }
        agents
    }

    /// Every `(agent, tool)` pair whose tool is not in `available`.
    ///
    /// An empty result means the whole tree can be wired against that catalogue.
    pub fn missing_tools<'a>(&'a self, available: &[&str]) -> Vec<(&'a str, &'a str)> {
        self.flatten()
            .into_iter()
            .flat_map(move |agent| {
                agent
                    .tools
                    .iter()
                    .filter(move |tool| !available.contains(&tool.as_str()))
                    .map(move |tool| (agent.name.as_str(), tool.as_str()))
            })
            .collect()
    }
}

/// The full coaching team, rooted at the orchestrating coach.
pub fn coach_team(config: &CoachConfig) -> AgentDefinition {
    AgentDefinition::new(
        ROOT_AGENT,
        "Comprehensive health and nutrition coaching system that integrates meal planning, \
         workout guidance, progress tracking, and recovery optimization.",
        config.models.main.clone(),
    )
    .with_instruction(root_instruction())
    .with_tools([
        tools::SAVE_USER_PROFILE,
        tools::SAVE_MEAL_PLAN,
        tools::GET_USER_STATS,
        tools::GET_DAILY_TARGETS,
    ])
    .with_web_search()
    .with_sub_agent(nutrition_planner(config))
    .with_sub_agent(workout_advisor(config))
    .with_sub_agent(progress_tracker(config))
    .with_sub_agent(recovery_specialist(config))
}

/// Specialist that writes weekly meal plans. Web search only.
pub fn nutrition_planner(config: &CoachConfig) -> AgentDefinition {
    AgentDefinition::new(
        NUTRITION_PLANNER,
        "Expert nutritionist that creates weekly meal plans tailored to the user's goals.",
        config.models.planner.clone(),
    )
    .with_instruction(
        "You are a nutritionist who writes weekly meal plans.

Plan around the user's profile: fitness goal, activity level, calorie target, dietary
restrictions, and allergies. Restrictions and allergens are hard constraints; offer
substitutes instead of exceptions.

Each plan covers Monday through Sunday with breakfast, lunch, dinner and two or three
snacks a day. Put a carbohydrate and protein meal two to three hours before training
and protein with fast carbohydrates within two hours after it. On rest days keep
protein steady and trim carbohydrates slightly.

For every meal give portions in grams or household measures and estimated protein,
carbohydrates, fats and calories. Close with daily totals, a shopping list grouped by
category, and meal-prep steps for the week. Prefer whole foods, realistic prep times
and budget-friendly options.

Return the plan as a JSON object keyed by weekday so the coach can store it. Use web
search for current food composition data when unsure.",
    )
    .with_web_search()
}

/// Specialist that designs training programs. Web search only.
pub fn workout_advisor(config: &CoachConfig) -> AgentDefinition {
    AgentDefinition::new(
        WORKOUT_ADVISOR,
        "Personal trainer that designs workout programs and gives exercise guidance.",
        config.models.workout.clone(),
    )
    .with_instruction(
        "You are a personal trainer and exercise physiologist.

Design weekly programs that match the user's goal, experience and equipment:
- muscle gain: hypertrophy work, 8-12 reps, progressive overload
- weight loss: strength training plus conditioning
- endurance: aerobic base, intervals, supporting strength work
- maintenance: balanced strength, cardio and mobility

Specify every exercise with sets, reps, load guidance and rest periods. Include a
warm-up and cool-down, explain form cues and common mistakes, and give regressions
and progressions. Schedule rest days and deload weeks.

Be motivating but honest about timelines. Use web search for exercise technique or
current research when needed.",
    )
    .with_web_search()
}

/// Specialist that logs activity and reviews progress through the session tools.
pub fn progress_tracker(config: &CoachConfig) -> AgentDefinition {
    AgentDefinition::new(
        PROGRESS_TRACKER,
        "Analytics expert that logs activity, tracks progress, and turns the data into insights.",
        config.models.tracker.clone(),
    )
    .with_instruction(format!(
        "You keep the user's records and read them back as insight.

Logging: record workouts with log_workout, meals with log_meal (estimate calories and
macros when the user does not), and water with log_water_intake. Lists such as
exercises or foods are comma-separated.

Review: call get_daily_summary for today's activity and get_user_stats for the profile
and overall totals. Compare intake against targets, spot patterns in training
frequency, intensity and hydration, and flag risks such as consistently low protein,
dehydration or signs of overtraining.

Hydration targets are {base} ml per kg of body weight for sedentary users, {active} ml
per kg for active users and {intense} ml per kg during intense training; add more on
long or hot sessions.

Finish with a short recap: what went well, what to adjust, and one concrete next step.
Favour sustainable habits over perfection.",
        base = HYDRATION_BASE_ML_PER_KG,
        active = HYDRATION_ACTIVE_ML_PER_KG,
        intense = HYDRATION_INTENSE_ML_PER_KG,
    ))
    .with_tools([
        tools::LOG_WORKOUT,
        tools::LOG_MEAL,
        tools::LOG_WATER_INTAKE,
        tools::GET_DAILY_SUMMARY,
        tools::GET_USER_STATS,
    ])
    .with_web_search()
}

/// Specialist for rest days, sleep and recovery nutrition. Web search only.
pub fn recovery_specialist(config: &CoachConfig) -> AgentDefinition {
    AgentDefinition::new(
        RECOVERY_SPECIALIST,
        "Recovery expert for rest days, sleep, and recovery nutrition.",
        config.models.recovery.clone(),
    )
    .with_instruction(
        "You are a recovery and sports medicine specialist.

Rest days: suggest active recovery (walking, yoga, mobility), keep protein at
1.6-2.2 g per kg of body weight, reduce carbohydrates by 10-20% on complete rest days,
and keep the user well hydrated. Explain that adaptation happens during rest.

Sleep: aim for 7-9 hours and give practical sleep hygiene advice.

Load management: recognise overtraining and stress, recommend deloads, warm-ups,
cool-downs, stretching and foam rolling, and advise seeing a professional when pain
or injury signs appear.

Ground advice in current evidence; use web search when needed.",
    )
    .with_web_search()
}

fn root_instruction() -> String {
    format!(
        "You are a health and nutrition coach leading a team of specialists.

TEAM
- {planner}: weekly meal plans and macro breakdowns
- {workout}: training programs and exercise technique
- {tracker}: logging workouts, meals and water, and progress reviews
- {recovery}: rest days, sleep and recovery nutrition

ONBOARDING
On the first interaction collect name, age, weight (kg), height (cm), fitness goal
(muscle_gain, weight_loss, maintenance, endurance), activity level (sedentary, light,
moderate, active, very_active), dietary restrictions, allergies and an optional daily
calorie target, then save them immediately with {save_profile}. Use
{targets} to explain the user's calorie, macro and hydration targets.

DELEGATION
- Meal plans go to {planner}; store the finished plan with {save_plan}.
- Training programs go to {workout}.
- Anything to log or review goes to {tracker}.
- Rest days and recovery go to {recovery}.
Use {stats} to check what is already known before asking again.

HYDRATION
Targets are {base} ml/kg (sedentary), {active} ml/kg (active) and {intense} ml/kg
(intense training). Remind the user to drink and celebrate goals met.

STYLE
Be warm, specific and accountable. Favour sustainable habits over perfection, and
search the web when you need current information.",
        planner = NUTRITION_PLANNER,
        workout = WORKOUT_ADVISOR,
        tracker = PROGRESS_TRACKER,
        recovery = RECOVERY_SPECIALIST,
        save_profile = tools::SAVE_USER_PROFILE,
        save_plan = tools::SAVE_MEAL_PLAN,
        stats = tools::GET_USER_STATS,
        targets = tools::GET_DAILY_TARGETS,
        base = HYDRATION_BASE_ML_PER_KG,
        active = HYDRATION_ACTIVE_ML_PER_KG,
        intense = HYDRATION_INTENSE_ML_PER_KG,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_and_flatten() {
        let root = coach_team(&CoachConfig::default());
        let names: Vec<&str> = root.flatten().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                ROOT_AGENT,
                NUTRITION_PLANNER,
                WORKOUT_ADVISOR,
                PROGRESS_TRACKER,
                RECOVERY_SPECIALIST
            ]
        );
        assert!(root.find("nope").is_none());
        assert!(root.find(RECOVERY_SPECIALIST).unwrap().sub_agents.is_empty());
    }

    #[test]
    fn test_missing_tools_reports_agent_and_tool() {
        let agent = AgentDefinition::new("a", "test", "m")
            .with_tool("known")
            .with_sub_agent(AgentDefinition::new("b", "test", "m").with_tool("unknown"));
        assert_eq!(agent.missing_tools(&["known"]), vec![("b", "unknown")]);
    }

    #[test]
    fn test_instructions_quote_hydration_constants() {
        let root = coach_team(&CoachConfig::default());
        assert!(root.instruction.contains("35 ml/kg"));
        assert!(root.instruction.contains("55 ml/kg"));
        let tracker = root.find(PROGRESS_TRACKER).unwrap();
        assert!(tracker.instruction.contains("45 ml"));
    }
}
