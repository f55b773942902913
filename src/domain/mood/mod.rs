//! Mood Context - 写作心情上下文
//!
//! 职责:
//! - 心情标签与心情记录
//! - 连续打卡天数（streak）计算

mod entities;
mod errors;
mod streak;
mod value_objects;

pub use entities::MoodEntry;
pub use errors::MoodError;
pub use streak::{calculate_streak, MoodStreak, StreakTier};
pub use value_objects::{Mood, MoodScope};
