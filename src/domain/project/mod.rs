//! Project Context - 书籍项目上下文
//!
//! 职责:
//! - 项目列表摘要
//! - AI 服务配置状态

mod entities;

pub use entities::{sort_newest_first, AiProviderStatus, CreationMethod, ProjectSummary};
