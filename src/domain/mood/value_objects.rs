//! Mood Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

use super::MoodError;

/// 写作心情标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Excited,
    Focused,
    Creative,
    Motivated,
    Tired,
    Blocked,
    Stressed,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Excited,
        Mood::Focused,
        Mood::Creative,
        Mood::Motivated,
        Mood::Tired,
        Mood::Blocked,
        Mood::Stressed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Excited => "excited",
            Mood::Focused => "focused",
            Mood::Creative => "creative",
            Mood::Motivated => "motivated",
            Mood::Tired => "tired",
            Mood::Blocked => "blocked",
            Mood::Stressed => "stressed",
        }
    }

    /// 解析心情标签（忽略大小写与首尾空白）
    pub fn parse(label: &str) -> Result<Self, MoodError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(MoodError::MissingMood);
        }
        let lowered = label.to_ascii_lowercase();
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.as_str() == lowered)
            .ok_or_else(|| MoodError::UnknownMood(label.to_string()))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// 心情记录的归属范围：用户全局或某个项目
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MoodScope {
    User,
    Project(String),
}

impl MoodScope {
    pub fn project(id: impl Into<String>) -> Self {
        Self::Project(id.into())
    }

    pub fn project_id(&self) -> Option<&str> {
        match self {
            MoodScope::User => None,
            MoodScope::Project(id) => Some(id),
        }
    }
}

impl fmt::Display for MoodScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoodScope::User => f.write_str("user"),
            MoodScope::Project(id) => write!(f, "project:{}", id),
        }
    }
}
