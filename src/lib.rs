//! BookGenPro - 书籍生成服务客户端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Generation Context: 生成状态与章节进度
//! - Mood Context: 写作心情与连续打卡
//! - Project Context: 项目摘要、AI 服务状态
//! - Form: 表单草稿与必填校验
//!
//! 应用层 (application/):
//! - Ports: 端口定义（状态查询、心情/项目 API、进度展示、键值存储、通知）
//! - Poller: 生成状态轮询
//! - Autosave: 表单草稿防抖保存
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP API Client, Tracing Notifier
//! - Memory: Key-Value Store, Notification Center 内存实现
//! - Persistence: Sled 存储
//! - Events: 生成进度事件广播

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
