//! HTTP surface: liveness at `/` and plan generation at `/generate-workout`.

use crate::core::planner::WorkoutPlanner;
use crate::core::schema::validate_preferences;
use crate::domain::model::WorkoutPlan;
use crate::domain::ports::CompletionProvider;
use crate::utils::error::PlannerError;
use crate::utils::validation::Violation;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub status: &'static str,
    pub workout: WorkoutPlan,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<Violation>,
}

impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                "❌ Workout generation failed: {} (Kind: {})",
                self,
                self.kind()
            );
            tracing::error!("💡 Suggestion: {}", self.recovery_suggestion());
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        let detail = self.user_friendly_message();
        // Schema violations describe the model output, not the caller's request.
        let errors = match self {
            PlannerError::InputValidation { violations } => violations,
            _ => Vec::new(),
        };

        let body = ErrorBody { detail, errors };
        (status, Json(body)).into_response()
    }
}

pub fn router<P: CompletionProvider + 'static>(planner: WorkoutPlanner<P>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/generate-workout", post(generate_workout::<P>))
        .with_state(Arc::new(planner))
}

pub async fn health() -> Json<Value> {
    Json(json!({"message": "Fitness Backend API is running!"}))
}

async fn generate_workout<P: CompletionProvider + 'static>(
    State(planner): State<Arc<WorkoutPlanner<P>>>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, PlannerError> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| PlannerError::InputValidation {
        violations: vec![Violation::new("body", format!("must be a valid JSON object: {}", e))],
    })?;
    let prefs = validate_preferences(&value)?;

    tracing::info!(
        "Received preferences: {}",
        serde_json::to_string(&prefs).unwrap_or_default()
    );

    let workout = planner.generate(&prefs).await?;

    Ok(Json(GenerateResponse {
        status: "success",
        workout,
    }))
}
