//! Generation Context - 书籍生成任务上下文
//!
//! 职责:
//! - 生成状态（封闭枚举 + 状态机）
//! - 章节进度
//! - 状态显示文案

mod errors;
mod status;

pub use errors::StatusParseError;
pub use status::{GenerationProgress, GenerationStatus, StatusTone};
