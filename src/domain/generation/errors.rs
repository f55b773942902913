//! Generation Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusParseError {
    #[error("未知的生成状态: {0}")]
    UnknownStatus(String),

    #[error("章节进度不一致: completed={completed}, total={total}")]
    InconsistentProgress { completed: u32, total: u32 },
}
