//! Field-by-field validation of untyped JSON into the typed request and plan
//! models. Every violation is collected, so a single response can report all
//! of them.

use crate::domain::model::{
    ExerciseEntry, MainWorkout, PreferenceInput, SchemaVariant, WorkoutDay, WorkoutPlan,
};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{FieldReader, Violation};
use serde_json::Value;

pub fn validate_preferences(value: &Value) -> Result<PreferenceInput> {
    let mut violations = Vec::new();
    let prefs = read_preferences(value, &mut violations);

    match prefs {
        Some(prefs) if violations.is_empty() => Ok(prefs),
        _ => Err(PlannerError::InputValidation { violations }),
    }
}

fn read_preferences(value: &Value, violations: &mut Vec<Violation>) -> Option<PreferenceInput> {
    let mut reader = FieldReader::open(value, "", violations)?;

    let age = reader.optional_positive_int("age");
    let time = reader.optional_positive_int("time");
    let equipment = reader.optional_bool_map("equipment");
    let goal = reader.optional_string("goal");
    let workout_type = reader.optional_string("workoutType");
    let adhd_mode = reader.optional_bool("adhdMode");

    Some(PreferenceInput {
        age,
        time,
        equipment: equipment.unwrap_or_default().into_iter().collect(),
        goal,
        workout_type,
        adhd_mode: adhd_mode.unwrap_or(false),
    })
}

/// Check `value` against the plan schema for `variant`.
pub fn validate_plan(value: &Value, variant: SchemaVariant) -> Result<WorkoutPlan> {
    let mut violations = Vec::new();
    let plan = read_plan(value, variant, &mut violations);

    match plan {
        Some(plan) if violations.is_empty() => Ok(plan),
        _ => Err(PlannerError::SchemaViolation { violations }),
    }
}

fn read_plan(
    value: &Value,
    variant: SchemaVariant,
    violations: &mut Vec<Violation>,
) -> Option<WorkoutPlan> {
    let mut reader = FieldReader::open(value, "", violations)?;

    let title = reader.required_string("title");
    let description = reader.required_string("description");
    let warmup = reader.required_array("warmup", read_exercise);
    let main_workout = match variant {
        SchemaVariant::Days => reader
            .required_array("main_workout", read_day)
            .map(MainWorkout::Days),
        SchemaVariant::Flat => reader
            .required_array("main_workout", read_exercise)
            .map(MainWorkout::Exercises),
    };
    let cooldown = reader.required_array("cooldown", read_exercise);
    let notes = reader.optional_string("notes");

    Some(WorkoutPlan {
        title: title?,
        description: description?,
        warmup: warmup?,
        main_workout: main_workout?,
        cooldown: cooldown?,
        notes,
    })
}

fn read_exercise(
    value: &Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<ExerciseEntry> {
    let mut reader = FieldReader::open(value, path, violations)?;

    let exercise = reader.required_string("exercise");
    let reps_or_time = reader.required_string("reps_or_time");
    let sets = reader.optional_positive_int("sets");

    Some(ExerciseEntry {
        exercise: exercise?,
        reps_or_time: reps_or_time?,
        sets,
    })
}

fn read_day(value: &Value, path: &str, violations: &mut Vec<Violation>) -> Option<WorkoutDay> {
    let mut reader = FieldReader::open(value, path, violations)?;

    let day = reader.required_string("day");
    let focus = reader.required_string("focus");
    let exercises = reader.required_array("exercises", read_exercise);

    Some(WorkoutDay {
        day: day?,
        focus: focus?,
        exercises: exercises?,
    })
}
