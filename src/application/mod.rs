//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（状态查询、心情/项目接口、键值存储、通知、进度展示）
//! - poller: 生成状态轮询
//! - autosave: 表单草稿自动保存
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod autosave;
pub mod commands;
pub mod error;
pub mod poller;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use autosave::{FormAutosave, DEFAULT_DEBOUNCE};

pub use commands::{
    // Mood commands
    SaveMood,
    // Project commands
    DeleteProject,
    // Handlers
    handlers::{DeleteProjectHandler, SaveMoodHandler, SaveMoodResponse},
};

pub use error::ApplicationError;

pub use poller::{CompletionLatch, PollStep, PollerConfig, PollerHandle, StatusPoller, StopReason};

pub use ports::{
    // REST
    ApiError,
    GenerationStatusPort,
    MoodApiPort,
    ProjectApiPort,
    SaveMoodRequest,
    // View
    GenerationViewPort,
    // Storage
    KeyValueStorePort,
    StoreError,
    // Notifications
    Notification,
    NotificationLevel,
    NotifierPort,
};

pub use queries::{
    // Mood queries
    GetMoodHistory,
    GetMoodStreak,
    // Project queries
    CheckAiProvider,
    ListProjects,
    // Handlers
    handlers::{
        CheckAiProviderHandler, GetMoodHistoryHandler, GetMoodStreakHandler, ListProjectsHandler,
        MoodStreakResponse,
    },
};
