//! Mood Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoodError {
    #[error("Mood is required")]
    MissingMood,

    #[error("Unknown mood: {0}")]
    UnknownMood(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
