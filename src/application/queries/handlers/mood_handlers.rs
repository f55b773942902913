//! Mood Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::MoodApiPort;
use crate::application::queries::{GetMoodHistory, GetMoodStreak};
use crate::domain::mood::{MoodEntry, MoodScope, MoodStreak};

// ============================================================================
// Response DTOs
// ============================================================================

/// streak 查询响应
#[derive(Debug, Clone)]
pub struct MoodStreakResponse {
    pub scope: MoodScope,
    pub streak: MoodStreak,
    /// 今天的心情（若已记录）
    pub today_entry: Option<MoodEntry>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetMoodHistory Handler
pub struct GetMoodHistoryHandler {
    mood_api: Arc<dyn MoodApiPort>,
}

impl GetMoodHistoryHandler {
    pub fn new(mood_api: Arc<dyn MoodApiPort>) -> Self {
        Self { mood_api }
    }

    /// 返回按日期倒序排列的历史
    pub async fn handle(&self, query: GetMoodHistory) -> Result<Vec<MoodEntry>, ApplicationError> {
        let mut entries = self.mood_api.mood_history(&query.scope).await?;
        entries.sort_by(|a, b| b.date().cmp(&a.date()));

        tracing::debug!(scope = %query.scope, count = entries.len(), "Mood history loaded");
        Ok(entries)
    }
}

/// GetMoodStreak Handler
pub struct GetMoodStreakHandler {
    history: GetMoodHistoryHandler,
}

impl GetMoodStreakHandler {
    pub fn new(mood_api: Arc<dyn MoodApiPort>) -> Self {
        Self {
            history: GetMoodHistoryHandler::new(mood_api),
        }
    }

    pub async fn handle(&self, query: GetMoodStreak) -> Result<MoodStreakResponse, ApplicationError> {
        let entries = self
            .history
            .handle(GetMoodHistory {
                scope: query.scope.clone(),
            })
            .await?;

        let streak = MoodStreak::from_entries(&entries, query.today);
        let today_entry = entries.into_iter().find(|e| e.date() == query.today);

        Ok(MoodStreakResponse {
            scope: query.scope,
            streak,
            today_entry,
        })
    }
}
