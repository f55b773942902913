//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod api_error;
mod generation_status;
mod generation_view;
mod key_value_store;
mod mood_api;
mod notifier;
mod project_api;

pub use api_error::ApiError;
pub use generation_status::GenerationStatusPort;
pub use generation_view::GenerationViewPort;
pub use key_value_store::{KeyValueStorePort, StoreError};
pub use mood_api::{MoodApiPort, SaveMoodRequest};
pub use notifier::{Notification, NotificationLevel, NotifierPort, DEFAULT_DISMISS_AFTER};
pub use project_api::ProjectApiPort;
