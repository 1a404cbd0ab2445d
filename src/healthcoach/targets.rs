//! Daily nutrition targets
//!
//! Default macro distributions per fitness goal and hydration allowances per activity
//! level. These are the same numbers the coaching instructions quote to the model, so
//! the prompts and the `get_daily_targets` tool never disagree.

use crate::healthcoach::models::{ActivityLevel, FitnessGoal, UserProfile};
use serde::{Deserialize, Serialize};

/// Baseline water allowance for sedentary and lightly active users (ml per kg).
pub const HYDRATION_BASE_ML_PER_KG: u32 = 35;
/// Allowance for moderately active and active users (ml per kg).
pub const HYDRATION_ACTIVE_ML_PER_KG: u32 = 45;
/// Allowance for users in intense training (ml per kg).
pub const HYDRATION_INTENSE_ML_PER_KG: u32 = 55;

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Share of daily calories from each macronutrient. The three fractions sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Daily macronutrient amounts in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

impl FitnessGoal {
    /// Default share of calories from protein, carbohydrates and fat.
    pub fn macro_split(self) -> MacroSplit {
        match self {
            FitnessGoal::MuscleGain => MacroSplit {
                protein: 0.35,
                carbs: 0.45,
                fats: 0.20,
            },
            FitnessGoal::WeightLoss => MacroSplit {
                protein: 0.40,
                carbs: 0.30,
                fats: 0.30,
            },
            FitnessGoal::Maintenance => MacroSplit {
                protein: 0.30,
                carbs: 0.40,
                fats: 0.30,
            },
            FitnessGoal::Endurance => MacroSplit {
                protein: 0.25,
                carbs: 0.55,
                fats: 0.20,
            },
        }
    }
}

impl ActivityLevel {
    /// Daily water allowance per kilogram of body weight.
    pub fn hydration_ml_per_kg(self) -> u32 {
        match self {
            ActivityLevel::Sedentary | ActivityLevel::Light => HYDRATION_BASE_ML_PER_KG,
            ActivityLevel::Moderate | ActivityLevel::Active => HYDRATION_ACTIVE_ML_PER_KG,
            ActivityLevel::VeryActive => HYDRATION_INTENSE_ML_PER_KG,
        }
    }
}

impl MacroSplit {
    /// Convert the split into grams for a given calorie budget, rounded to 0.1 g.
    pub fn grams_for(&self, calories: u32) -> MacroGrams {
        let kcal = f64::from(calories);
        MacroGrams {
            protein_g: round_tenth(kcal * self.protein / KCAL_PER_GRAM_PROTEIN),
            carbs_g: round_tenth(kcal * self.carbs / KCAL_PER_GRAM_CARBS),
            fats_g: round_tenth(kcal * self.fats / KCAL_PER_GRAM_FAT),
        }
    }
}

/// Daily water target in millilitres, rounded to the nearest 10 ml.
///
/// Non-positive or non-finite weights yield 0.
pub fn hydration_target_ml(weight_kg: f64, activity: ActivityLevel) -> u32 {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return 0;
    }
    let raw = weight_kg * f64::from(activity.hydration_ml_per_kg());
    ((raw / 10.0).round() * 10.0).min(f64::from(u32::MAX)) as u32
}

/// Targets derived from a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
    /// The profile's own calorie target, if it has one.
    pub calories: Option<u32>,
    pub macro_split: MacroSplit,
    /// Present only when `calories` is.
    pub macro_grams: Option<MacroGrams>,
    pub hydration_ml: u32,
}

impl DailyTargets {
    /// Derive the targets for a saved profile.
    pub fn for_profile(profile: &UserProfile) -> Self {
        let macro_split = profile.fitness_goal.macro_split();
        Self {
            calories: profile.daily_calories,
            macro_split,
            macro_grams: profile.daily_calories.map(|kcal| macro_split.grams_for(kcal)),
            hydration_ml: hydration_target_ml(profile.weight_kg, profile.activity_level),
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(goal: FitnessGoal, activity: ActivityLevel, calories: Option<u32>) -> UserProfile {
        UserProfile {
            name: "Sam".to_string(),
            age: 28,
            weight_kg: 75.0,
            height_cm: 175.0,
            fitness_goal: goal,
            activity_level: activity,
            dietary_restrictions: Vec::new(),
            allergies: Vec::new(),
            daily_calories: calories,
        }
    }

    #[test]
    fn test_every_macro_split_sums_to_one() {
        for goal in FitnessGoal::ALL {
            let split = goal.macro_split();
            let total = split.protein + split.carbs + split.fats;
            assert!((total - 1.0).abs() < 1e-9, "{} sums to {}", goal, total);
        }
    }

    #[test]
    fn test_hydration_scales_with_activity() {
        assert_eq!(hydration_target_ml(75.0, ActivityLevel::Sedentary), 2630);
        assert_eq!(hydration_target_ml(75.0, ActivityLevel::Active), 3380);
        assert_eq!(hydration_target_ml(75.0, ActivityLevel::VeryActive), 4130);
        assert_eq!(hydration_target_ml(0.0, ActivityLevel::Active), 0);
        assert_eq!(hydration_target_ml(f64::NAN, ActivityLevel::Active), 0);
    }

    #[test]
    fn test_macro_grams_from_calories() {
        let grams = FitnessGoal::MuscleGain.macro_split().grams_for(2800);
        assert_eq!(grams.protein_g, 245.0);
        assert_eq!(grams.carbs_g, 315.0);
        assert_eq!(grams.fats_g, 62.2);
    }

    #[test]
    fn test_targets_without_calorie_goal_omit_grams() {
        let targets = DailyTargets::for_profile(&profile(
            FitnessGoal::Endurance,
            ActivityLevel::Light,
            None,
        ));
        assert_eq!(targets.calories, None);
        assert!(targets.macro_grams.is_none());
        assert_eq!(targets.macro_split.carbs, 0.55);

        let targets = DailyTargets::for_profile(&profile(
            FitnessGoal::WeightLoss,
            ActivityLevel::Moderate,
            Some(2000),
        ));
        assert_eq!(targets.macro_grams.unwrap().protein_g, 200.0);
    }
}
