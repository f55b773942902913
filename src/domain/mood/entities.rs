//! Mood Context - Entities

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Mood, MoodError};

/// 线上日期格式
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 某一天的心情记录
///
/// 同一天允许出现多条记录，去重由 streak 计算负责。
/// 服务端接受任意标签，无法识别的标签保留原文，`mood()` 为 `None`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    date: NaiveDate,
    mood: Option<Mood>,
    label: String,
    note: Option<String>,
}

impl MoodEntry {
    pub fn new(date: NaiveDate, mood: Mood, note: Option<String>) -> Self {
        Self::build(date, Some(mood), mood.as_str().to_string(), note)
    }

    /// 从线上字段构造（日期为 `YYYY-MM-DD`）
    ///
    /// 只有日期无效才失败。
    pub fn parse(date: &str, label: &str, note: Option<String>) -> Result<Self, MoodError> {
        let parsed = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| MoodError::InvalidDate(date.to_string()))?;
        let label = label.trim();
        Ok(Self::build(parsed, Mood::parse(label).ok(), label.to_string(), note))
    }

    fn build(date: NaiveDate, mood: Option<Mood>, label: String, note: Option<String>) -> Self {
        // 空白备注等同于没有备注
        let note = note.filter(|n| !n.trim().is_empty());
        Self {
            date,
            mood,
            label,
            note,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    /// 服务端记录的原始标签
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}
