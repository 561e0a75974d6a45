pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{MockCompletion, OllamaClient};
pub use config::{ProviderKind, ServiceConfig};
pub use self::core::{extract::parse_workout_plan, planner::WorkoutPlanner, prompt::build_workout_prompt};
pub use domain::model::{
    ExerciseEntry, MainWorkout, PreferenceInput, SchemaVariant, WorkoutDay, WorkoutPlan,
};
pub use utils::error::{PlannerError, Result};
