//! Prompt construction for the workout generator.
//!
//! The prompt states the trainer role, lists only the preferences the user
//! actually supplied, describes the exact JSON shape of the active
//! [`SchemaVariant`], and closes with the formatting rules and the
//! serialized preferences.

use crate::domain::model::{PreferenceInput, SchemaVariant};
use serde::Serialize;
use std::fmt::Display;

pub const NO_EQUIPMENT: &str = "no specific equipment (bodyweight only)";

/// Fluent helper that accumulates prompt text line by line.
#[derive(Debug, Default)]
pub struct PromptBuilder {
    buffer: String,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(mut self, line: impl Display) -> Self {
        self.buffer.push_str(&line.to_string());
        self.buffer.push('\n');
        self
    }

    /// `- Key: value`
    pub fn add_bullet(self, key: impl Display, value: impl Display) -> Self {
        self.add_line(format!("- {}: {}", key, value))
    }

    pub fn add_blank_line(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    pub fn add_text_json(self, content: impl Display) -> Self {
        self.add_line("```json").add_line(content).add_line("```")
    }

    /// Apply `f` only when `value` is present.
    pub fn add_optional<T>(self, value: Option<T>, f: impl FnOnce(Self, T) -> Self) -> Self {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }

    pub fn finalize(self) -> String {
        self.buffer.trim_end().to_string()
    }
}

/// Preferences as echoed back to the model: unset fields are dropped and
/// equipment is reduced to the available names.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptPreferences<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<u32>,
    equipment: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    goal: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workout_type: Option<&'a str>,
    adhd_mode: bool,
}

impl<'a> From<&'a PreferenceInput> for PromptPreferences<'a> {
    fn from(prefs: &'a PreferenceInput) -> Self {
        Self {
            age: prefs.age,
            time: prefs.time,
            equipment: prefs.available_equipment(),
            goal: prefs.goal.as_deref(),
            workout_type: prefs.workout_type.as_deref(),
            adhd_mode: prefs.adhd_mode,
        }
    }
}

pub fn equipment_phrase(prefs: &PreferenceInput) -> String {
    let available = prefs.available_equipment();
    if available.is_empty() {
        NO_EQUIPMENT.to_string()
    } else {
        available.join(", ")
    }
}

const EXERCISE_SHAPE: &str = r#"{"exercise": string, "reps_or_time": string, "sets": positive integer (optional)}"#;

fn schema_description(variant: SchemaVariant) -> String {
    let main_workout = match variant {
        SchemaVariant::Days => format!(
            "list of day blocks, each {{\"day\": string (e.g. \"Day 1\"), \"focus\": string, \"exercises\": list of {}}}",
            EXERCISE_SHAPE
        ),
        SchemaVariant::Flat => format!("list of {}", EXERCISE_SHAPE),
    };

    PromptBuilder::new()
        .add_bullet("\"title\"", "string, a short name for the workout")
        .add_bullet("\"description\"", "string, one or two sentences")
        .add_bullet("\"warmup\"", format!("list of {}", EXERCISE_SHAPE))
        .add_bullet("\"main_workout\"", main_workout)
        .add_bullet("\"cooldown\"", format!("list of {}", EXERCISE_SHAPE))
        .add_bullet("\"notes\"", "string (optional), tips or safety notes")
        .add_line("\"reps_or_time\" must describe either a repetition count (\"10 reps\") or a duration (\"30 seconds\").")
        .finalize()
}

/// Build the full instruction prompt for `prefs`.
pub fn build_workout_prompt(prefs: &PreferenceInput, variant: SchemaVariant) -> String {
    let serialized = serde_json::to_string(&PromptPreferences::from(prefs))
        .unwrap_or_else(|_| "{}".to_string());

    PromptBuilder::new()
        .add_line("You are a certified personal trainer who designs safe, effective workout plans.")
        .add_blank_line()
        .add_line("Create a workout plan for a user with these preferences:")
        .add_optional(prefs.age, |b, age| b.add_bullet("Age", age))
        .add_optional(prefs.time, |b, time| {
            b.add_bullet("Time available", format!("{} minutes", time))
        })
        .add_bullet("Equipment", equipment_phrase(prefs))
        .add_optional(prefs.goal.as_deref(), |b, goal| b.add_bullet("Goal", goal))
        .add_optional(prefs.workout_type.as_deref(), |b, kind| {
            b.add_bullet("Workout type", kind)
        })
        .add_bullet("ADHD mode", if prefs.adhd_mode { "on" } else { "off" })
        .add_optional(prefs.adhd_mode.then_some(()), |b, _| {
            b.add_line("Keep every block short and varied, with clear time cues and minimal downtime between exercises.")
        })
        .add_blank_line()
        .add_line("Respond with a single JSON object with exactly these fields:")
        .add_line(schema_description(variant))
        .add_blank_line()
        .add_line("Formatting rules:")
        .add_line("- The output must be valid JSON.")
        .add_line("- Wrap the JSON in a markdown code block that starts with ```json and ends with ```.")
        .add_line("- Do not add any fields that are not listed above and do not wrap the object in another key.")
        .add_blank_line()
        .add_line(format!("User preferences: {}", serialized))
        .finalize()
}
