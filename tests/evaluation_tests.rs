use async_trait::async_trait;
use healthcoach::evaluation::{default_cases, AgentRunner, EvalCase, Evaluator};
use std::collections::HashMap;
use std::error::Error;

/// Answers each prompt from a fixed table; unknown prompts fail.
struct ScriptedRunner {
    replies: HashMap<String, String>,
}

impl ScriptedRunner {
    fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            replies: pairs
                .iter()
                .map(|(prompt, reply)| (prompt.to_string(), reply.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl AgentRunner for ScriptedRunner {
    async fn run(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        self.replies
            .get(prompt)
            .cloned()
            .ok_or_else(|| format!("no scripted reply for '{}'", prompt).into())
    }
}

#[tokio::test]
async fn test_passing_partial_and_failing_cases() {
    let cases = vec![
        EvalCase::new("water", "How much water?", ["water", "ml"]),
        EvalCase::new("rest", "Rest day?", ["rest day", "protein"]),
        EvalCase::new("silent", "Anyone there?", ["hello"]),
    ];
    let runner = ScriptedRunner::new(&[
        ("How much water?", "Aim for 2600 ML of Water each day."),
        ("Rest day?", "On a Rest Day keep moving gently."),
    ]);

    let mut evaluator = Evaluator::new(runner);
    let outcomes = evaluator.run_all(&cases).await;

    assert!(outcomes[0].success);
    assert_eq!(outcomes[0].elements_found, vec!["water", "ml"]);
    assert_eq!(outcomes[0].response_length, 34);

    assert!(!outcomes[1].success);
    assert_eq!(outcomes[1].elements_found, vec!["rest day"]);
    assert_eq!(outcomes[1].elements_missing, vec!["protein"]);
    assert!(outcomes[1].error.is_none());

    assert!(!outcomes[2].success);
    assert_eq!(
        outcomes[2].error.as_deref(),
        Some("no scripted reply for 'Anyone there?'")
    );
    assert_eq!(outcomes[2].response_length, 0);

    let summary = evaluator.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 2);
    assert!((summary.success_rate - 100.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_results_accumulate_across_batches() {
    let runner = ScriptedRunner::new(&[("a", "alpha"), ("b", "beta")]);
    let mut evaluator = Evaluator::new(runner);

    evaluator
        .run_all(&[EvalCase::new("first", "a", ["alpha"])])
        .await;
    let second = evaluator
        .run_all(&[EvalCase::new("second", "b", ["beta"])])
        .await;

    assert_eq!(second.len(), 1);
    assert_eq!(evaluator.results().len(), 2);
    assert_eq!(evaluator.summary().success_rate, 100.0);
}

#[tokio::test]
async fn test_default_cases_pass_against_a_thorough_reply() {
    let reply = "I saved your profile. Your goal is muscle gain: about 2800 calories with \
                 high protein. Here is a vegetarian meal plan with breakfast, lunch and dinner. \
                 Your workout has exercises with sets and reps. Drink 3400 ml of water for \
                 hydration and I'll track it. On your rest day focus on recovery and nutrition.";
    let cases = default_cases();
    let pairs: Vec<(&str, &str)> = cases.iter().map(|c| (c.prompt.as_str(), reply)).collect();

    let mut evaluator = Evaluator::new(ScriptedRunner::new(&pairs));
    evaluator.run_all(&cases).await;

    let summary = evaluator.summary();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.passed, 5);
}

#[test]
fn test_empty_summary() {
    let evaluator = Evaluator::new(ScriptedRunner::new(&[]));
    let summary = evaluator.summary();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.success_rate, 0.0);
}
