//! Mood Commands

use crate::domain::mood::MoodScope;

/// 保存今天的心情
///
/// `mood` 为用户输入的原始标签，由 handler 在提交前校验。
#[derive(Debug, Clone)]
pub struct SaveMood {
    pub scope: MoodScope,
    pub mood: String,
    pub note: String,
}
