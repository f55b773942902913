//! Project Context - Entities

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::generation::{GenerationStatus, StatusParseError};

/// 项目创建方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationMethod {
    Ai,
    Manual,
    /// 服务端返回的其它取值，原样保留
    Other(String),
}

impl CreationMethod {
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("ai") => CreationMethod::Ai,
            Some("manual") => CreationMethod::Manual,
            Some(other) => CreationMethod::Other(other.to_string()),
        }
    }
}

/// 项目列表中的一条摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub topic: String,
    pub creation_method: CreationMethod,
    /// 原始状态字符串，按需解析
    pub generation_status: Option<String>,
    pub chapter_count: usize,
    pub created_at: Option<NaiveDateTime>,
}

impl ProjectSummary {
    /// 解析生成状态；没有状态字段时视为 pending
    pub fn status(&self) -> Result<GenerationStatus, StatusParseError> {
        match &self.generation_status {
            Some(raw) => GenerationStatus::parse(raw),
            None => Ok(GenerationStatus::Pending),
        }
    }

    /// 仍在生成中的项目需要轮询；pending 项目还没有开始生成
    pub fn needs_polling(&self) -> bool {
        self.status().map(|s| s.is_generating()).unwrap_or(false)
    }
}

/// 按创建时间倒序排列，缺少时间的排在最后
pub fn sort_newest_first(projects: &mut [ProjectSummary]) {
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// AI 服务配置状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiProviderStatus {
    pub provider: String,
    pub provider_name: String,
    pub model: String,
    pub configured: bool,
    pub status: String,
}

impl AiProviderStatus {
    pub fn is_ready(&self) -> bool {
        self.configured && self.status == "ready"
    }
}
