//! Generation Context - Status Value Objects

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use super::StatusParseError;

/// 错误状态的线上前缀（`error` 或 `error:<message>`）
const ERROR_PREFIX: &str = "error";

/// 书籍生成状态
///
/// 状态机:
/// `pending -> {enhancing_description|generating_titles} -> generating_content -> completed`
///
/// 任意状态都可以进入 `Failed`；`Completed`、`Failed`、`Manual`、`Unknown` 为终态。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum GenerationStatus {
    /// 等待生成
    Pending,
    /// 正在润色书籍描述
    EnhancingDescription,
    /// 正在生成章节标题
    GeneratingTitles,
    /// 正在生成章节内容
    GeneratingContent,
    /// 生成完成
    Completed,
    /// 手动创作的项目，不会被生成
    Manual,
    /// 生成失败
    Failed { message: String },
    /// 服务端没有记录生成状态（线上为 `unknown`）
    Unknown,
}

impl GenerationStatus {
    /// 解析服务端返回的状态字符串
    ///
    /// `error` 与 `error:<message>` 解析为 `Failed`，`unknown` 解析为 `Unknown`，
    /// 其余字符串视为解码错误。
    pub fn parse(raw: &str) -> Result<Self, StatusParseError> {
        let raw = raw.trim();
        match raw {
            "pending" => Ok(Self::Pending),
            "enhancing_description" => Ok(Self::EnhancingDescription),
            "generating_titles" => Ok(Self::GeneratingTitles),
            "generating_content" => Ok(Self::GeneratingContent),
            "completed" => Ok(Self::Completed),
            "manual" => Ok(Self::Manual),
            "unknown" => Ok(Self::Unknown),
            _ => match raw.strip_prefix(ERROR_PREFIX) {
                Some("") => Ok(Self::failed("")),
                Some(rest) => match rest.strip_prefix(':') {
                    Some(message) => Ok(Self::failed(message.trim())),
                    None => Err(StatusParseError::UnknownStatus(raw.to_string())),
                },
                None => Err(StatusParseError::UnknownStatus(raw.to_string())),
            },
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// 线上表示
    pub fn as_wire(&self) -> Cow<'static, str> {
        match self {
            Self::Pending => Cow::Borrowed("pending"),
            Self::EnhancingDescription => Cow::Borrowed("enhancing_description"),
            Self::GeneratingTitles => Cow::Borrowed("generating_titles"),
            Self::GeneratingContent => Cow::Borrowed("generating_content"),
            Self::Completed => Cow::Borrowed("completed"),
            Self::Manual => Cow::Borrowed("manual"),
            Self::Unknown => Cow::Borrowed("unknown"),
            Self::Failed { message } if message.is_empty() => Cow::Borrowed(ERROR_PREFIX),
            Self::Failed { message } => Cow::Owned(format!("{}:{}", ERROR_PREFIX, message)),
        }
    }

    /// 终态之后不再有任何状态迁移，轮询也随之停止
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Manual | Self::Unknown | Self::Failed { .. }
        )
    }

    /// 生成进行中，只有这些状态值得继续轮询
    pub fn is_generating(&self) -> bool {
        matches!(
            self,
            Self::EnhancingDescription | Self::GeneratingTitles | Self::GeneratingContent
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// 状态机是否允许从 `self` 迁移到 `next`
    pub fn can_transition_to(&self, next: &GenerationStatus) -> bool {
        use GenerationStatus::*;

        if self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        match (self, next) {
            (_, Failed { .. }) => true,
            (Pending, EnhancingDescription | GeneratingTitles) => true,
            (EnhancingDescription, GeneratingTitles | GeneratingContent) => true,
            (GeneratingTitles, GeneratingContent) => true,
            (GeneratingContent, Completed) => true,
            _ => false,
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Pending => StatusTone::Pending,
            Self::EnhancingDescription | Self::GeneratingTitles | Self::GeneratingContent => {
                StatusTone::Generating
            }
            Self::Completed => StatusTone::Completed,
            Self::Manual => StatusTone::Manual,
            Self::Failed { .. } => StatusTone::Error,
            Self::Unknown => StatusTone::Unknown,
        }
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.as_wire())
    }
}

/// 状态徽章的样式分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Pending,
    Generating,
    Completed,
    Manual,
    Error,
    Unknown,
}

/// 一次状态查询的结果
///
/// 不变量: `completed_chapters <= total_chapters`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationProgress {
    status: GenerationStatus,
    completed_chapters: u32,
    total_chapters: u32,
}

impl GenerationProgress {
    pub fn new(
        status: GenerationStatus,
        completed_chapters: u32,
        total_chapters: u32,
    ) -> Result<Self, StatusParseError> {
        if completed_chapters > total_chapters {
            return Err(StatusParseError::InconsistentProgress {
                completed: completed_chapters,
                total: total_chapters,
            });
        }
        Ok(Self {
            status,
            completed_chapters,
            total_chapters,
        })
    }

    /// 仅有状态、没有章节信息（如服务端返回的裸 `{"status": "error"}`）
    pub fn status_only(status: GenerationStatus) -> Self {
        Self {
            status,
            completed_chapters: 0,
            total_chapters: 0,
        }
    }

    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    pub fn completed_chapters(&self) -> u32 {
        self.completed_chapters
    }

    pub fn total_chapters(&self) -> u32 {
        self.total_chapters
    }

    /// 完成比例，范围 [0, 1]；没有章节时为 0
    pub fn fraction(&self) -> f64 {
        if self.total_chapters == 0 {
            return 0.0;
        }
        f64::from(self.completed_chapters) / f64::from(self.total_chapters)
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }

    /// 状态显示文案
    pub fn label(&self) -> String {
        match &self.status {
            GenerationStatus::Pending => "Ready to generate".to_string(),
            GenerationStatus::EnhancingDescription => "Enhancing description...".to_string(),
            GenerationStatus::GeneratingTitles => "Generating chapter titles...".to_string(),
            GenerationStatus::GeneratingContent => format!(
                "Generating content ({}/{} chapters)",
                self.completed_chapters, self.total_chapters
            ),
            GenerationStatus::Completed => "Generation completed".to_string(),
            GenerationStatus::Manual => "Manual project".to_string(),
            GenerationStatus::Failed { .. } => "Generation failed".to_string(),
            GenerationStatus::Unknown => "Status unavailable".to_string(),
        }
    }
}
