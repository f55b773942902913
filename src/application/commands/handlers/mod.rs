//! Command Handlers

mod mood_handlers;
mod project_handlers;

pub use mood_handlers::{SaveMoodHandler, SaveMoodResponse};
pub use project_handlers::DeleteProjectHandler;
