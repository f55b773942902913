//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{ApiError, StoreError};
use crate::domain::generation::StatusParseError;
use crate::domain::mood::MoodError;
use crate::domain::FormError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 网络/传输失败
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 响应格式错误
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// 客户端校验失败（提交前发现）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 服务端拒绝（`success: false`）
    #[error("Rejected by server: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),

    /// 外部服务错误（非 2xx）
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 本地存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 服务端原样返回的消息，用于通知展示
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected(Some(message)) if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// 通知文案：有服务端消息时原样使用，否则使用调用方给出的兜底文案
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::ValidationError(message) => message.clone(),
            _ => self
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

impl From<ApiError> for ApplicationError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(msg) => Self::NetworkError(msg),
            ApiError::Timeout => Self::NetworkError("request timed out".to_string()),
            ApiError::Decode(msg) => Self::DecodeError(msg),
            ApiError::Service { status, body } => {
                Self::ExternalServiceError(format!("HTTP {}: {}", status, body))
            }
            ApiError::Rejected(message) => Self::Rejected(message),
        }
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<MoodError> for ApplicationError {
    fn from(err: MoodError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<FormError> for ApplicationError {
    fn from(err: FormError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<StatusParseError> for ApplicationError {
    fn from(err: StatusParseError) -> Self {
        Self::DecodeError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_used_verbatim() {
        let err: ApplicationError = ApiError::Rejected(Some("Error saving mood: disk full".into())).into();
        assert_eq!(
            err.user_message("Failed to save mood. Please try again."),
            "Error saving mood: disk full"
        );
    }

    #[test]
    fn test_fallback_message() {
        let err: ApplicationError = ApiError::Timeout.into();
        assert!(matches!(err, ApplicationError::NetworkError(_)));
        assert_eq!(err.user_message("fallback"), "fallback");

        let err: ApplicationError = ApiError::Rejected(Some("  ".into())).into();
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_mood_error_is_validation() {
        let err: ApplicationError = MoodError::MissingMood.into();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(err.user_message("fallback"), "Mood is required");
    }
}
