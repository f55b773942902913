//! Mood Queries

use chrono::NaiveDate;

use crate::domain::mood::MoodScope;

/// 获取心情历史
#[derive(Debug, Clone)]
pub struct GetMoodHistory {
    pub scope: MoodScope,
}

/// 计算连续打卡天数
///
/// `today` 由调用方注入，便于测试。
#[derive(Debug, Clone)]
pub struct GetMoodStreak {
    pub scope: MoodScope,
    pub today: NaiveDate,
}
