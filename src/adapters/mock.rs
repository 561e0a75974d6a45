use crate::domain::model::SchemaVariant;
use crate::domain::ports::CompletionProvider;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Canned completion for running the service without a model. The reply goes
/// through the same extraction path as a real one.
#[derive(Debug, Clone, Copy)]
pub struct MockCompletion {
    variant: SchemaVariant,
}

impl MockCompletion {
    pub fn new(variant: SchemaVariant) -> Self {
        Self { variant }
    }

    pub fn sample_plan(variant: SchemaVariant) -> Value {
        let main_workout = json!([
            {"exercise": "Air Squats", "reps_or_time": "10 reps", "sets": 3},
            {"exercise": "Push-ups (or Knee Push-ups)", "reps_or_time": "8 reps", "sets": 3},
            {"exercise": "Plank", "reps_or_time": "30-60 seconds hold", "sets": 3},
            {"exercise": "Dumbbell Rows (if dumbbells available)", "reps_or_time": "10 reps", "sets": 3}
        ]);
        let main_workout = match variant {
            SchemaVariant::Flat => main_workout,
            SchemaVariant::Days => json!([
                {"day": "Day 1", "focus": "Full body", "exercises": main_workout}
            ]),
        };

        json!({
            "title": "Quick & Effective Full Body Blast",
            "description": "A customized workout designed for your goals and available time/equipment.",
            "warmup": [
                {"exercise": "Arm Circles", "reps_or_time": "10 forward, 10 backward"},
                {"exercise": "Leg Swings", "reps_or_time": "10 each leg"},
                {"exercise": "Dynamic Stretches", "reps_or_time": "5 minutes"}
            ],
            "main_workout": main_workout,
            "cooldown": [
                {"exercise": "Static Stretches", "reps_or_time": "5 minutes"}
            ],
            "notes": "Sample plan served without a language model."
        })
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(&self, model: &str, _prompt: &str) -> Result<String> {
        tracing::debug!("Serving sample completion in place of model {}", model);
        let plan = serde_json::to_string_pretty(&Self::sample_plan(self.variant))?;
        Ok(format!("Here is your workout plan:\n\n```json\n{}\n```", plan))
    }
}
