//! Mood Streak - 连续打卡天数计算
//!
//! 规则:
//! 1. 日期按集合处理，同一天多条记录只算一天
//! 2. 今天有记录则从今天开始往前数，否则允许从昨天开始（仅限开头的一天宽限）
//! 3. 遇到第一个空缺即停止

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::MoodEntry;

/// 达到该天数进入 High 档
const HIGH_TIER_DAYS: u32 = 7;
/// 达到该天数进入 Medium 档
const MEDIUM_TIER_DAYS: u32 = 3;

/// streak 档位，仅用于展示样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    Low,
    Medium,
    High,
}

impl StreakTier {
    pub fn for_days(days: u32) -> Self {
        if days >= HIGH_TIER_DAYS {
            StreakTier::High
        } else if days >= MEDIUM_TIER_DAYS {
            StreakTier::Medium
        } else {
            StreakTier::Low
        }
    }
}

/// streak 计算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodStreak {
    pub days: u32,
    pub tier: StreakTier,
}

impl MoodStreak {
    pub fn from_entries(entries: &[MoodEntry], today: NaiveDate) -> Self {
        let days = calculate_streak(entries.iter().map(MoodEntry::date), today);
        Self {
            days,
            tier: StreakTier::for_days(days),
        }
    }
}

/// 计算以今天（或昨天）结尾的连续天数
///
/// `today` 由调用方传入，函数内部不读取系统时钟。
pub fn calculate_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let recorded: BTreeSet<NaiveDate> = dates.into_iter().filter(|d| *d <= today).collect();

    let mut cursor = if recorded.contains(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut streak = 0;
    while let Some(day) = cursor {
        if !recorded.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mood::Mood;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn entry(days_ago: i64) -> MoodEntry {
        MoodEntry::new(today() - Duration::days(days_ago), Mood::Focused, None)
    }

    #[test]
    fn test_streak_ending_today() {
        let entries = vec![entry(0), entry(1), entry(2), entry(4)];
        assert_eq!(MoodStreak::from_entries(&entries, today()).days, 3);
    }

    #[test]
    fn test_grace_day_when_today_missing() {
        let entries = vec![entry(1), entry(2), entry(4)];
        assert_eq!(MoodStreak::from_entries(&entries, today()).days, 2);
    }

    #[test]
    fn test_no_entries() {
        let streak = MoodStreak::from_entries(&[], today());
        assert_eq!(streak.days, 0);
        assert_eq!(streak.tier, StreakTier::Low);
    }

    #[test]
    fn test_duplicates_count_once() {
        let entries = vec![entry(0), entry(0), entry(1), entry(1), entry(1)];
        assert_eq!(MoodStreak::from_entries(&entries, today()).days, 2);
    }

    #[test]
    fn test_grace_day_only_at_head() {
        // 今天和前天有记录，昨天空缺：只算今天
        let entries = vec![entry(0), entry(2), entry(3)];
        assert_eq!(MoodStreak::from_entries(&entries, today()).days, 1);
    }

    #[test]
    fn test_two_day_gap_at_head_breaks_streak() {
        let entries = vec![entry(2), entry(3), entry(4)];
        assert_eq!(MoodStreak::from_entries(&entries, today()).days, 0);
    }

    #[test]
    fn test_unordered_input_and_future_entries() {
        let entries = vec![entry(2), entry(-1), entry(0), entry(1)];
        assert_eq!(MoodStreak::from_entries(&entries, today()).days, 3);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(StreakTier::for_days(0), StreakTier::Low);
        assert_eq!(StreakTier::for_days(2), StreakTier::Low);
        assert_eq!(StreakTier::for_days(3), StreakTier::Medium);
        assert_eq!(StreakTier::for_days(6), StreakTier::Medium);
        assert_eq!(StreakTier::for_days(7), StreakTier::High);

        let week: Vec<MoodEntry> = (0..7).map(entry).collect();
        assert_eq!(MoodStreak::from_entries(&week, today()).tier, StreakTier::High);
    }
}
