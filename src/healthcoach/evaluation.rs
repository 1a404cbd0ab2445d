//! Evaluation Harness
//!
//! Keyword-presence scoring of agent replies. The agent itself lives in an external
//! runtime; this module only needs something that turns a prompt into reply text,
//! expressed as the [`AgentRunner`] trait.
//!
//! A case passes when every expected element appears in the reply, compared
//! case-insensitively as a substring. A runner error fails the case and records the
//! error text.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use healthcoach::evaluation::{AgentRunner, EvalCase, Evaluator};
//! use std::error::Error;
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl AgentRunner for Canned {
//!     async fn run(&self, _prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
//!         Ok("Drink 2600 ml of Water a day; I'll help you track hydration.".to_string())
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut evaluator = Evaluator::new(Canned);
//! let case = EvalCase::new("Hydration", "How much water?", ["water", "hydration", "ml", "track"]);
//! let outcome = evaluator.run_case(&case).await;
//! assert!(outcome.success);
//! assert_eq!(evaluator.summary().passed, 1);
//! # }
//! ```

use async_trait::async_trait;
use serde::Serialize;
use std::error::Error;

/// Anything that can answer a prompt with reply text.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    async fn run(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// A prompt and the elements its reply must mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalCase {
    pub name: String,
    pub prompt: String,
    pub expected: Vec<String>,
}

impl EvalCase {
    /// Build a case from its name, prompt and expected elements.
    pub fn new<I, S>(name: impl Into<String>, prompt: impl Into<String>, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            expected: expected.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of running one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalOutcome {
    pub test_name: String,
    pub prompt: String,
    pub success: bool,
    /// Reply length in characters; zero when the runner failed.
    pub response_length: usize,
    pub elements_found: Vec<String>,
    pub elements_missing: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Totals over every outcome an [`Evaluator`] has recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvalSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage in `0.0..=100.0`; `0.0` when nothing ran.
    pub success_rate: f64,
}

/// Split `expected` into the elements present in `response` and those missing.
pub fn score_response(response: &str, expected: &[String]) -> (Vec<String>, Vec<String>) {
    let haystack = response.to_lowercase();
    expected
        .iter()
        .cloned()
        .partition(|element| haystack.contains(&element.to_lowercase()))
}

/// Runs cases against an [`AgentRunner`] and keeps every outcome.
pub struct Evaluator<R: AgentRunner> {
    runner: R,
    results: Vec<EvalOutcome>,
}

impl<R: AgentRunner> Evaluator<R> {
    /// Wrap a runner with an empty result history.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            results: Vec::new(),
        }
    }

    /// Run one case, score the reply and record the outcome.
    pub async fn run_case(&mut self, case: &EvalCase) -> EvalOutcome {
        log::info!("running eval case '{}'", case.name);

        let outcome = match self.runner.run(&case.prompt).await {
            Ok(response) => {
                let (found, missing) = score_response(&response, &case.expected);
                if missing.is_empty() {
                    log::info!("'{}' passed: all {} elements found", case.name, found.len());
                } else {
                    log::info!(
                        "'{}' partial: {}/{} elements found, missing {}",
                        case.name,
                        found.len(),
                        case.expected.len(),
                        missing.join(", ")
                    );
                }
                EvalOutcome {
                    test_name: case.name.clone(),
                    prompt: case.prompt.clone(),
                    success: missing.is_empty(),
                    response_length: response.chars().count(),
                    elements_found: found,
                    elements_missing: missing,
                    error: None,
                }
            }
            Err(e) => {
                log::warn!("'{}' failed: {}", case.name, e);
                EvalOutcome {
                    test_name: case.name.clone(),
                    prompt: case.prompt.clone(),
                    success: false,
                    response_length: 0,
                    elements_found: Vec::new(),
                    elements_missing: case.expected.clone(),
                    error: Some(e.to_string()),
                }
            }
        };

        self.results.push(outcome.clone());
        outcome
    }

    /// Run the cases in order, returning this batch's outcomes.
    pub async fn run_all(&mut self, cases: &[EvalCase]) -> Vec<EvalOutcome> {
        let mut outcomes = Vec::with_capacity(cases.len());
        for case in cases {
            outcomes.push(self.run_case(case).await);
        }
        let summary = self.summary();
        log::info!(
            "eval summary: {}/{} passed ({:.1}%)",
            summary.passed,
            summary.total,
            summary.success_rate
        );
        outcomes
    }

    /// Every outcome recorded so far.
    pub fn results(&self) -> &[EvalOutcome] {
        &self.results
    }

    /// Pass/fail totals over all recorded outcomes.
    pub fn summary(&self) -> EvalSummary {
        let total = self.results.len();
        let passed = self.results.iter().filter(|r| r.success).count();
        let success_rate = if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64 * 100.0
        };
        EvalSummary {
            total,
            passed,
            failed: total - passed,
            success_rate,
        }
    }
}

/// The standard coaching scenarios.
pub fn default_cases() -> Vec<EvalCase> {
    vec![
        EvalCase::new(
            "Initial Onboarding",
            "Hi! I'm new here and want to start my fitness journey. I'm 28 years old, \
             weigh 75kg, height 175cm, and want to gain muscle.",
            ["profile", "calorie", "protein", "goal", "muscle"],
        ),
        EvalCase::new(
            "Meal Plan Creation",
            "Can you create a weekly meal plan for me? I'm vegetarian and allergic to nuts.",
            ["meal plan", "vegetarian", "protein", "breakfast", "lunch", "dinner"],
        ),
        EvalCase::new(
            "Workout Program Design",
            "I need a workout program for muscle gain. I have access to a full gym.",
            ["workout", "muscle", "exercises", "sets", "reps"],
        ),
        EvalCase::new(
            "Hydration Guidance",
            "How much water should I drink daily? And can you help me track it?",
            ["water", "hydration", "ml", "track"],
        ),
        EvalCase::new(
            "Recovery Guidance",
            "Tomorrow is my rest day. What should I do differently with my nutrition and activities?",
            ["rest day", "recovery", "nutrition", "protein"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_response_is_case_insensitive() {
        let expected = vec!["Meal Plan".to_string(), "dinner".to_string(), "snack".to_string()];
        let (found, missing) = score_response("Your MEAL PLAN: breakfast, Dinner", &expected);
        assert_eq!(found, vec!["Meal Plan", "dinner"]);
        assert_eq!(missing, vec!["snack"]);
    }

    #[test]
    fn test_default_cases() {
        let cases = default_cases();
        assert_eq!(cases.len(), 5);
        assert_eq!(cases[3].expected, vec!["water", "hydration", "ml", "track"]);
        assert!(cases.iter().all(|c| !c.expected.is_empty()));
    }

    #[test]
    fn test_outcome_serialization_omits_absent_error() {
        let outcome = EvalOutcome {
            test_name: "t".to_string(),
            prompt: "p".to_string(),
            success: true,
            response_length: 3,
            elements_found: vec!["a".to_string()],
            elements_missing: Vec::new(),
            error: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["response_length"], 3);
    }
}
