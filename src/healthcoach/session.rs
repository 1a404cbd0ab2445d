//! Session Store
//!
//! The authoritative holder of one user's coaching state for the lifetime of a
//! session: a single [`UserProfile`], three append-only logs (workouts, meals,
//! hydration) and an optional [`MealPlan`].
//!
//! # Time
//!
//! Every entry is stamped from the store's [`Clock`] when it is appended, and every
//! "today" query asks the same clock for the current date at query time. Nothing is
//! cached: the daily summary and the hydration running total are recomputed from the
//! logs on each call. A consequence is that an entry logged at 23:59 drops out of
//! the summary at 00:00.
//!
//! # Ownership
//!
//! The store is a plain owned value mutated through `&mut self`. Give each
//! conversation its own store; share one across tasks by wrapping it in a lock, as
//! [`SessionToolProtocol`](crate::tool_protocols::SessionToolProtocol) does.
//!
//! # Example
//!
//! ```rust
//! use healthcoach::models::{Intensity, Workout};
//! use healthcoach::SessionStore;
//!
//! let mut store = SessionStore::new();
//! let reply = store.append_workout(Workout {
//!     workout_type: "strength".to_string(),
//!     duration_minutes: 60,
//!     intensity: Intensity::High,
//!     exercises: vec!["squat".to_string(), "bench press".to_string()],
//!     notes: String::new(),
//! });
//! assert_eq!(reply, "Workout logged: strength - 60 minutes");
//! assert_eq!(store.daily_summary().workouts, 1);
//! ```

use crate::healthcoach::clock::{Clock, SystemClock};
use crate::healthcoach::models::{
    DailySummary, HydrationLogEntry, Meal, MealLogEntry, MealPlan, UserProfile, UserStats,
    Workout, WorkoutLogEntry,
};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

/// Placeholder used in confirmations when a profile has a blank name.
const DEFAULT_PROFILE_NAME: &str = "User";

/// In-memory state for one coaching session.
#[derive(Debug)]
pub struct SessionStore {
    id: Uuid,
    clock: Arc<dyn Clock>,
    profile: Option<UserProfile>,
    workouts: Vec<WorkoutLogEntry>,
    meals: Vec<MealLogEntry>,
    hydration: Vec<HydrationLogEntry>,
    meal_plan: Option<MealPlan>,
}

impl SessionStore {
    /// Create an empty store driven by the local wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store driven by the supplied clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let id = Uuid::new_v4();
        log::debug!("session {}: created", id);
        Self {
            id,
            clock,
            profile: None,
            workouts: Vec::new(),
            meals: Vec::new(),
            hydration: Vec::new(),
            meal_plan: None,
        }
    }

    /// Identifier used to tell sessions apart in logs.
    pub fn session_id(&self) -> Uuid {
        self.id
    }

    /// The date the store currently considers "today".
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Replace the stored profile. No merging with the previous one.
    pub fn set_profile(&mut self, profile: UserProfile) -> String {
        let name = if profile.name.trim().is_empty() {
            DEFAULT_PROFILE_NAME.to_string()
        } else {
            profile.name.clone()
        };
        if self.profile.is_some() {
            log::info!("session {}: replacing user profile", self.id);
        } else {
            log::info!("session {}: saving user profile", self.id);
        }
        self.profile = Some(profile);
        format!("User profile saved: {}", name)
    }

    /// Stamp and append a workout, replying with a confirmation line.
    pub fn append_workout(&mut self, workout: Workout) -> String {
        let reply = format!(
            "Workout logged: {} - {} minutes",
            or_placeholder(&workout.workout_type, "Unknown"),
            workout.duration_minutes
        );
        let entry = WorkoutLogEntry {
            timestamp: self.clock.now(),
            workout,
        };
        log::debug!(
            "session {}: workout #{} at {}",
            self.id,
            self.workouts.len() + 1,
            entry.timestamp
        );
        self.workouts.push(entry);
        reply
    }

    /// Stamp and append a meal, replying with a confirmation line.
    pub fn append_meal(&mut self, meal: Meal) -> String {
        let reply = format!(
            "Meal logged: {}",
            or_placeholder(&meal.name, "Unknown meal")
        );
        let entry = MealLogEntry {
            timestamp: self.clock.now(),
            meal,
        };
        log::debug!(
            "session {}: meal #{} at {}",
            self.id,
            self.meals.len() + 1,
            entry.timestamp
        );
        self.meals.push(entry);
        reply
    }

    /// Append a hydration entry and report the re-summed total for today.
    ///
    /// The total is recomputed from every entry dated today rather than carried in a
    /// counter, so it always agrees with [`daily_summary`](Self::daily_summary).
    pub fn append_hydration(&mut self, amount_ml: u32) -> String {
        let entry = HydrationLogEntry {
            timestamp: self.clock.now(),
            amount_ml,
        };
        self.hydration.push(entry);

        let today = self.clock.today();
        let total = self.hydration_total_on(today);
        log::debug!(
            "session {}: +{}ml water, {}ml on {}",
            self.id,
            amount_ml,
            total,
            today
        );
        format!(
            "Logged {}ml of water. Today's total: {}ml",
            amount_ml, total
        )
    }

    /// Sum of hydration amounts whose timestamp falls on `date`.
    pub fn hydration_total_on(&self, date: NaiveDate) -> u64 {
        self.hydration
            .iter()
            .filter(|entry| entry.timestamp.date() == date)
            .map(|entry| u64::from(entry.amount_ml))
            .sum()
    }

    /// Today's workouts, meals and water, evaluated against the clock right now.
    pub fn daily_summary(&self) -> DailySummary {
        let today = self.clock.today();

        let workout_details: Vec<WorkoutLogEntry> = self
            .workouts
            .iter()
            .filter(|entry| entry.timestamp.date() == today)
            .cloned()
            .collect();
        let meal_details: Vec<MealLogEntry> = self
            .meals
            .iter()
            .filter(|entry| entry.timestamp.date() == today)
            .cloned()
            .collect();

        DailySummary {
            date: today,
            workouts: workout_details.len(),
            meals: meal_details.len(),
            hydration_ml: self.hydration_total_on(today),
            workout_details,
            meal_details,
        }
    }

    /// Store a meal plan, replacing any previous one.
    pub fn save_meal_plan(&mut self, plan: serde_json::Map<String, serde_json::Value>) -> String {
        let created_at = self.clock.now();
        if self.meal_plan.is_some() {
            log::info!("session {}: replacing meal plan", self.id);
        } else {
            log::info!("session {}: saving meal plan", self.id);
        }
        self.meal_plan = Some(MealPlan { created_at, plan });
        "Weekly meal plan saved successfully".to_string()
    }

    /// The profile and whole-session log counts.
    pub fn user_stats(&self) -> UserStats {
        UserStats {
            profile: self.profile.clone(),
            total_workouts: self.workouts.len(),
            total_meals_logged: self.meals.len(),
            total_hydration_entries: self.hydration.len(),
            has_meal_plan: self.meal_plan.is_some(),
        }
    }

    /// The saved profile, if any.
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Every logged workout, oldest first.
    pub fn workouts(&self) -> &[WorkoutLogEntry] {
        &self.workouts
    }

    /// Every logged meal, oldest first.
    pub fn meals(&self) -> &[MealLogEntry] {
        &self.meals
    }

    /// Every hydration entry, oldest first.
    pub fn hydration(&self) -> &[HydrationLogEntry] {
        &self.hydration
    }

    /// The current meal plan, if one was saved.
    pub fn meal_plan(&self) -> Option<&MealPlan> {
        self.meal_plan.as_ref()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}
