//! Mood API Port - 心情记录远程接口

use async_trait::async_trait;

use super::ApiError;
use crate::domain::mood::{Mood, MoodEntry, MoodScope};

/// 保存心情请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveMoodRequest {
    pub mood: Mood,
    pub note: String,
}

/// Mood API Port
///
/// - `User` 范围: `POST /save_mood`, `GET /get_mood_history`
/// - `Project` 范围: `POST /project/{id}/save_project_mood`, `GET /project/{id}/get_project_mood_history`
#[async_trait]
pub trait MoodApiPort: Send + Sync {
    /// 保存今天的心情，成功时返回服务端消息（若有）
    async fn save_mood(
        &self,
        scope: &MoodScope,
        request: &SaveMoodRequest,
    ) -> Result<Option<String>, ApiError>;

    /// 获取心情历史
    async fn mood_history(&self, scope: &MoodScope) -> Result<Vec<MoodEntry>, ApiError>;
}
