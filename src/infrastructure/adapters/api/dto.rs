//! Wire DTOs - BookGenPro REST 报文
//!
//! 服务端 JSON 在这里一次性解码为领域类型，下游不再处理原始字符串

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::application::ports::ApiError;
use crate::domain::generation::{GenerationProgress, GenerationStatus};
use crate::domain::mood::MoodEntry;
use crate::domain::project::{AiProviderStatus, CreationMethod, ProjectSummary};

// ============================================================================
// 生成状态
// ============================================================================

/// `GET /check_generation_status/{id}` 响应
#[derive(Debug, Deserialize)]
pub(super) struct GenerationStatusDto {
    pub status: String,
    #[serde(default)]
    pub completed_chapters: u32,
    #[serde(default)]
    pub chapters: u32,
}

impl TryFrom<GenerationStatusDto> for GenerationProgress {
    type Error = ApiError;

    fn try_from(dto: GenerationStatusDto) -> Result<Self, Self::Error> {
        let status =
            GenerationStatus::parse(&dto.status).map_err(|e| ApiError::Decode(e.to_string()))?;
        GenerationProgress::new(status, dto.completed_chapters, dto.chapters)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// ============================================================================
// 心情
// ============================================================================

/// 保存心情请求体
#[derive(Debug, Serialize)]
pub(super) struct SaveMoodBody<'a> {
    pub mood: &'a str,
    pub note: &'a str,
}

/// `{ success, message? }`
#[derive(Debug, Deserialize)]
pub(super) struct ApiResultDto {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResultDto {
    pub fn into_result(self) -> Result<Option<String>, ApiError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(ApiError::Rejected(self.message))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MoodEntryDto {
    pub date: String,
    pub mood: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// 心情历史响应
#[derive(Debug, Deserialize)]
pub(super) struct MoodHistoryDto {
    pub success: bool,
    #[serde(default)]
    pub moods: Vec<MoodEntryDto>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MoodHistoryDto {
    pub fn into_entries(self) -> Result<Vec<MoodEntry>, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(self.message));
        }
        // 单条坏记录不影响整段历史：日期无效的丢弃，标签未知的保留
        let entries = self
            .moods
            .into_iter()
            .filter_map(|m| match MoodEntry::parse(&m.date, &m.mood, m.note) {
                Ok(entry) => {
                    if entry.mood().is_none() {
                        tracing::debug!(
                            date = %entry.date(),
                            label = %entry.label(),
                            "Unrecognized mood label"
                        );
                    }
                    Some(entry)
                }
                Err(e) => {
                    tracing::warn!(date = %m.date, error = %e, "Skipping mood history row");
                    None
                }
            })
            .collect();
        Ok(entries)
    }
}

// ============================================================================
// 项目
// ============================================================================

/// `GET /api/projects` 数组元素（只取用到的字段）
#[derive(Debug, Deserialize)]
pub(super) struct ProjectDto {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub creation_method: Option<String>,
    #[serde(default)]
    pub generation_status: Option<String>,
    #[serde(default)]
    pub chapters: Vec<serde_json::Value>,
    #[serde(default)]
    pub num_chapters: Option<usize>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<ProjectDto> for ProjectSummary {
    fn from(dto: ProjectDto) -> Self {
        let created_at = dto.created_at.as_deref().and_then(|raw| {
            raw.parse::<NaiveDateTime>()
                .map_err(|e| {
                    tracing::debug!(project_id = %dto.id, created_at = %raw, error = %e, "Unparseable created_at");
                })
                .ok()
        });
        let chapter_count = if dto.chapters.is_empty() {
            dto.num_chapters.unwrap_or(0)
        } else {
            dto.chapters.len()
        };

        Self {
            name: dto.name.unwrap_or_else(|| dto.id.clone()),
            topic: dto.topic.unwrap_or_default(),
            creation_method: CreationMethod::from_wire(dto.creation_method.as_deref()),
            generation_status: dto.generation_status,
            chapter_count,
            created_at,
            id: dto.id,
        }
    }
}

/// `GET /check_ai_provider_status` 响应
#[derive(Debug, Deserialize)]
pub(super) struct AiProviderStatusDto {
    pub provider: String,
    pub provider_name: String,
    pub model: String,
    pub configured: bool,
    pub status: String,
}

impl From<AiProviderStatusDto> for AiProviderStatus {
    fn from(dto: AiProviderStatusDto) -> Self {
        Self {
            provider: dto.provider,
            provider_name: dto.provider_name,
            model: dto.model,
            configured: dto.configured,
            status: dto.status,
        }
    }
}
