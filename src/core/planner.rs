use crate::core::extract::{excerpt, parse_workout_plan};
use crate::core::prompt::build_workout_prompt;
use crate::domain::model::{PreferenceInput, SchemaVariant, WorkoutPlan};
use crate::domain::ports::{CompletionProvider, ConfigProvider};
use crate::utils::error::{PlannerError, Result};

/// Prompt, one completion call, extraction. Holds no per-request state.
pub struct WorkoutPlanner<P: CompletionProvider> {
    provider: P,
    model: String,
    variant: SchemaVariant,
}

impl<P: CompletionProvider> WorkoutPlanner<P> {
    pub fn new(provider: P, model: impl Into<String>, variant: SchemaVariant) -> Self {
        Self {
            provider,
            model: model.into(),
            variant,
        }
    }

    pub fn from_config<C: ConfigProvider>(provider: P, config: &C) -> Self {
        Self::new(provider, config.model(), config.schema_variant())
    }

    pub fn schema_variant(&self) -> SchemaVariant {
        self.variant
    }

    pub async fn generate(&self, prefs: &PreferenceInput) -> Result<WorkoutPlan> {
        let prompt = build_workout_prompt(prefs, self.variant);
        tracing::debug!("Built prompt ({} chars) for model {}", prompt.len(), self.model);

        let completion = self.provider.complete(&self.model, &prompt).await?;
        tracing::debug!("Received completion ({} chars)", completion.len());

        match parse_workout_plan(&completion, self.variant) {
            Ok(plan) => {
                tracing::info!("Generated workout plan: {}", plan.title);
                Ok(plan)
            }
            Err(e) => {
                match &e {
                    PlannerError::MalformedJson { excerpt, .. } => {
                        tracing::warn!("Malformed JSON in completion: {} | excerpt: {}", e, excerpt);
                    }
                    PlannerError::SchemaViolation { violations } => {
                        tracing::warn!(
                            "Completion failed schema validation with {} violation(s): {:?}",
                            violations.len(),
                            violations
                        );
                    }
                    _ => {
                        tracing::warn!("{} | completion excerpt: {}", e, excerpt(&completion));
                    }
                }
                Err(e)
            }
        }
    }
}
