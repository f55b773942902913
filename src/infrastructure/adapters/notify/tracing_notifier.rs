//! Tracing Notifier - 把通知写入日志
//!
//! 命令行下没有可视的 toast，通知按等级映射为日志事件

use crate::application::ports::{Notification, NotificationLevel, NotifierPort};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotifierPort for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            id,
            level,
            message,
            dismiss_after,
        } = notification;
        let dismiss_ms = dismiss_after.map(|d| d.as_millis() as u64);

        match level {
            NotificationLevel::Info => {
                tracing::info!(notification_id = %id, kind = "info", dismiss_ms, "{}", message)
            }
            NotificationLevel::Success => {
                tracing::info!(notification_id = %id, kind = "success", dismiss_ms, "{}", message)
            }
            NotificationLevel::Warning => {
                tracing::warn!(notification_id = %id, dismiss_ms, "{}", message)
            }
            NotificationLevel::Error => {
                tracing::error!(notification_id = %id, dismiss_ms, "{}", message)
            }
        }
    }
}
