//! Configuration Types
//!
//! 定义所有配置结构体

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 应用主配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// BookGenPro 服务端
    #[serde(default)]
    pub api: ApiConfig,

    /// 状态轮询
    #[serde(default)]
    pub poller: PollerSettings,

    /// 表单自动保存
    #[serde(default)]
    pub autosave: AutosaveConfig,

    /// 通知
    #[serde(default)]
    pub notification: NotificationConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 服务端基础 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_api_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_api_timeout(),
        }
    }
}

/// 轮询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerSettings {
    /// 两次查询之间的间隔（毫秒）
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// 单次查询超时（秒）
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_interval_ms() -> u64 {
    2000
}

fn default_fetch_timeout() -> u64 {
    10
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl PollerSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// 自动保存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// 防抖时间（毫秒）
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// 草稿数据库路径
    #[serde(default = "default_autosave_db")]
    pub db_path: PathBuf,
}

fn default_debounce_ms() -> u64 {
    2000
}

fn default_autosave_db() -> PathBuf {
    PathBuf::from("data/drafts.sled")
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            db_path: default_autosave_db(),
        }
    }
}

impl AutosaveConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// 通知配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// 通知自动消失时间（秒）
    #[serde(default = "default_dismiss_secs")]
    pub dismiss_secs: u64,
}

fn default_dismiss_secs() -> u64 {
    5
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_secs: default_dismiss_secs(),
        }
    }
}

impl NotificationConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_secs(self.dismiss_secs)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LogConfig {
    /// 默认的 EnvFilter 指令
    pub fn filter_directive(&self) -> String {
        format!("{},bookgen={}", self.level, self.level)
    }
}
