//! Query Handlers

mod mood_handlers;
mod project_handlers;

pub use mood_handlers::{GetMoodHistoryHandler, GetMoodStreakHandler, MoodStreakResponse};
pub use project_handlers::{CheckAiProviderHandler, ListProjectsHandler};
