//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `BOOKGEN_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `BOOKGEN_API__BASE_URL=http://books.local:5000`
/// - `BOOKGEN_POLLER__INTERVAL_MS=1000`
/// - `BOOKGEN_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("api.base_url", "http://localhost:5000")?
        .set_default("api.timeout_secs", 30)?
        .set_default("poller.interval_ms", 2000)?
        .set_default("poller.fetch_timeout_secs", 10)?
        .set_default("autosave.debounce_ms", 2000)?
        .set_default("autosave.db_path", "data/drafts.sled")?
        .set_default("notification.dismiss_secs", 5)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: BOOKGEN_API__BASE_URL=http://books.local:5000
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("BOOKGEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "API base URL cannot be empty".to_string(),
        ));
    }

    if config.poller.interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Poll interval cannot be 0".to_string(),
        ));
    }

    if config.poller.fetch_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Fetch timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::debug!("=== Application Configuration ===");
    tracing::debug!("API: {}", config.api.base_url);
    tracing::debug!("API Timeout: {}s", config.api.timeout_secs);
    tracing::debug!("Poll Interval: {}ms", config.poller.interval_ms);
    tracing::debug!("Fetch Timeout: {}s", config.poller.fetch_timeout_secs);
    tracing::debug!("Autosave Debounce: {}ms", config.autosave.debounce_ms);
    tracing::debug!("Autosave Store: {:?}", config.autosave.db_path);
    tracing::debug!("Log Level: {}", config.log.level);
    tracing::debug!("=================================");
}

/// 以 TOML 形式输出生效的配置
pub fn render_config(config: &AppConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_interval() {
        let mut config = AppConfig::default();
        config.poller.interval_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_fetch_timeout() {
        let mut config = AppConfig::default();
        config.poller.fetch_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let file = config_file(
            r#"
            [api]
            base_url = "http://books.local:5000"
            timeout_secs = 12

            [autosave]
            debounce_ms = 750
            "#,
        );

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "http://books.local:5000");
        assert_eq!(config.api.timeout_secs, 12);
        assert_eq!(config.autosave.debounce_ms, 750);
        assert_eq!(config.poller.interval_ms, 2000);
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let file = config_file("[poller]\ninterval_ms = 0\n");
        assert!(matches!(
            load_config_from_path(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = config_file("[notification]\ndismiss_secs = 9\n");
        std::env::set_var("BOOKGEN_NOTIFICATION__DISMISS_SECS", "3");

        let config = load_config_from_path(Some(file.path()));
        std::env::remove_var("BOOKGEN_NOTIFICATION__DISMISS_SECS");

        assert_eq!(config.unwrap().notification.dismiss_secs, 3);
    }

    #[test]
    fn test_render_config_round_trips() {
        let rendered = render_config(&AppConfig::default()).unwrap();
        assert!(rendered.contains("[poller]"));
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.poller.interval_ms, 2000);
    }
}
