//! API Error - BookGenPro REST 调用错误

use thiserror::Error;

/// REST 端口的统一错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Service error: HTTP {status}: {body}")]
    Service { status: u16, body: String },

    /// 服务端返回 `success: false`，携带可选的服务端消息
    #[error("Request rejected: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
}

impl ApiError {
    /// 服务端原样返回的消息（若有）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected(Some(message)) if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}
