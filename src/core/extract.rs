use crate::core::schema::validate_plan;
use crate::domain::model::{SchemaVariant, WorkoutPlan};
use crate::utils::error::{PlannerError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Upper bound on the completion excerpt kept in a `MalformedJson` error.
pub const MAX_EXCERPT_CHARS: usize = 500;

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json(.*?)```").expect("fence pattern is valid")
});

/// Where the candidate JSON text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonSpan<'a> {
    Fenced(&'a str),
    Braces(&'a str),
}

impl<'a> JsonSpan<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            JsonSpan::Fenced(text) | JsonSpan::Braces(text) => text,
        }
    }
}

/// Find the JSON candidate in a completion: the first ```json fence, or
/// failing that the span from the first `{` to the last `}`.
pub fn locate_json(completion: &str) -> Option<JsonSpan<'_>> {
    if let Some(captures) = JSON_FENCE.captures(completion) {
        let inner = captures.get(1).map_or("", |m| m.as_str()).trim();
        return Some(JsonSpan::Fenced(inner));
    }

    let start = completion.find('{')?;
    let end = completion.rfind('}')?;
    if end > start {
        Some(JsonSpan::Braces(completion[start..=end].trim()))
    } else {
        None
    }
}

pub fn excerpt(text: &str) -> String {
    text.chars().take(MAX_EXCERPT_CHARS).collect()
}

/// Recover a validated [`WorkoutPlan`] from raw model output.
pub fn parse_workout_plan(completion: &str, variant: SchemaVariant) -> Result<WorkoutPlan> {
    let span = match locate_json(completion) {
        Some(span @ JsonSpan::Fenced(_)) => {
            tracing::debug!("Found fenced JSON block in completion");
            span
        }
        Some(span @ JsonSpan::Braces(_)) => {
            tracing::debug!("No JSON fence found, using brace span fallback");
            span
        }
        None => {
            tracing::debug!("No JSON found in completion");
            return Err(PlannerError::NoJsonFound);
        }
    };

    let candidate = span.text();
    let parsed: Value =
        serde_json::from_str(candidate).map_err(|source| PlannerError::MalformedJson {
            source,
            excerpt: excerpt(candidate),
        })?;

    let payload = match parsed {
        Value::Object(mut object) if object.contains_key("workout") => {
            tracing::debug!("Unwrapping plan nested under 'workout'");
            object.remove("workout").unwrap_or(Value::Null)
        }
        other => other,
    };

    validate_plan(&payload, variant)
}
