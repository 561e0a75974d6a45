use crate::utils::validation::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid workout preferences: {}", Violation::summarize(.violations))]
    InputValidation { violations: Vec<Violation> },

    #[error("No JSON object found in model completion")]
    NoJsonFound,

    #[error("Model completion contained malformed JSON: {source}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
        excerpt: String,
    },

    #[error("Workout plan does not match schema: {}", Violation::summarize(.violations))]
    SchemaViolation { violations: Vec<Violation> },

    #[error("Completion request failed: {0}")]
    Completion(#[from] reqwest::Error),

    #[error("Completion service returned HTTP {status}: {excerpt}")]
    CompletionStatus { status: u16, excerpt: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl PlannerError {
    /// Stable name of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PlannerError::InputValidation { .. } => "InputValidationError",
            PlannerError::NoJsonFound => "NoJsonFound",
            PlannerError::MalformedJson { .. } => "MalformedJson",
            PlannerError::SchemaViolation { .. } => "SchemaViolation",
            PlannerError::Completion(_)
            | PlannerError::CompletionStatus { .. }
            | PlannerError::Serialization(_) => "UnexpectedError",
            PlannerError::Io(_)
            | PlannerError::Config { .. }
            | PlannerError::InvalidConfigValue { .. } => "ConfigurationError",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            PlannerError::InputValidation { .. } => 422,
            _ => 500,
        }
    }

    /// Short description that is safe to hand back to an HTTP client.
    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::InputValidation { .. } => "Invalid workout preferences".to_string(),
            PlannerError::NoJsonFound => {
                "Failed to generate workout: the AI response did not contain a workout plan"
                    .to_string()
            }
            PlannerError::MalformedJson { .. } => {
                "Failed to generate workout: the AI response contained malformed JSON".to_string()
            }
            PlannerError::SchemaViolation { violations } => format!(
                "Failed to generate workout: the AI response did not match the workout schema ({} problem(s))",
                violations.len()
            ),
            PlannerError::Completion(_)
            | PlannerError::CompletionStatus { .. }
            | PlannerError::Serialization(_) => {
                "An unexpected error occurred while generating the workout".to_string()
            }
            PlannerError::Io(_)
            | PlannerError::Config { .. }
            | PlannerError::InvalidConfigValue { .. } => {
                "The service is not configured correctly".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlannerError::InputValidation { .. } => {
                "Check the request body field types (age and time must be positive integers)"
                    .to_string()
            }
            PlannerError::NoJsonFound
            | PlannerError::MalformedJson { .. }
            | PlannerError::SchemaViolation { .. } => {
                "Retry the request or try a model that follows JSON formatting instructions"
                    .to_string()
            }
            PlannerError::Completion(_) => {
                "Make sure the completion service is running and reachable at the configured endpoint"
                    .to_string()
            }
            PlannerError::CompletionStatus { .. } => {
                "Check that the configured model is available on the completion service".to_string()
            }
            PlannerError::Serialization(_) => {
                "Check the service logs for the failing payload".to_string()
            }
            PlannerError::Io(_) => "Check that the file exists and is readable".to_string(),
            PlannerError::Config { .. } | PlannerError::InvalidConfigValue { .. } => {
                "Fix the configuration value via CLI flag, environment variable or config file"
                    .to_string()
            }
        }
    }

    /// Field violations carried by input or schema failures.
    pub fn violations(&self) -> &[Violation] {
        match self {
            PlannerError::InputValidation { violations }
            | PlannerError::SchemaViolation { violations } => violations,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let input = PlannerError::InputValidation {
            violations: vec![Violation::new("age", "must be a positive integer")],
        };
        assert_eq!(input.status_code(), 422);
        assert_eq!(PlannerError::NoJsonFound.status_code(), 500);
        assert_eq!(
            PlannerError::SchemaViolation { violations: vec![] }.status_code(),
            500
        );
        assert_eq!(
            PlannerError::CompletionStatus {
                status: 404,
                excerpt: "model not found".to_string()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_user_message_does_not_leak_excerpt() {
        let source = serde_json::from_str::<serde_json::Value>("{oops}").unwrap_err();
        let err = PlannerError::MalformedJson {
            source,
            excerpt: "{oops}".to_string(),
        };

        assert_eq!(err.kind(), "MalformedJson");
        assert!(!err.user_friendly_message().contains("oops"));
    }

    #[test]
    fn test_display_lists_violations() {
        let err = PlannerError::SchemaViolation {
            violations: vec![
                Violation::new("title", "is required"),
                Violation::new("warmup[0].exercise", "must be a string"),
            ],
        };

        let message = err.to_string();
        assert!(message.contains("title: is required"));
        assert!(message.contains("warmup[0].exercise: must be a string"));
        assert_eq!(err.violations().len(), 2);
    }
}
