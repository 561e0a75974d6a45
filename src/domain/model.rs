use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Validated request body of `POST /generate-workout`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Minutes available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    #[serde(default)]
    pub equipment: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    #[serde(default)]
    pub adhd_mode: bool,
}

impl PreferenceInput {
    /// Names of equipment marked as available, in name order.
    pub fn available_equipment(&self) -> Vec<&str> {
        self.equipment
            .iter()
            .filter(|(_, available)| **available)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub exercise: String,
    pub reps_or_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDay {
    pub day: String,
    pub focus: String,
    pub exercises: Vec<ExerciseEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MainWorkout {
    Days(Vec<WorkoutDay>),
    Exercises(Vec<ExerciseEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub title: String,
    pub description: String,
    pub warmup: Vec<ExerciseEntry>,
    pub main_workout: MainWorkout,
    pub cooldown: Vec<ExerciseEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Shape of `main_workout` that prompts ask for and plans are validated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// `main_workout` is a list of day blocks, each with its own exercises.
    #[default]
    Days,
    /// `main_workout` is a plain list of exercises.
    Flat,
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVariant::Days => write!(f, "days"),
            SchemaVariant::Flat => write!(f, "flat"),
        }
    }
}

impl FromStr for SchemaVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "days" => Ok(SchemaVariant::Days),
            "flat" => Ok(SchemaVariant::Flat),
            other => Err(format!(
                "unknown schema variant '{}', expected 'days' or 'flat'",
                other
            )),
        }
    }
}
