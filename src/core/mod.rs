pub mod extract;
pub mod planner;
pub mod prompt;
pub mod schema;

pub use crate::domain::model::{PreferenceInput, SchemaVariant, WorkoutPlan};
pub use crate::domain::ports::{CompletionProvider, ConfigProvider};
pub use crate::utils::error::Result;
