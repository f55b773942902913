//! In-Memory Notification Center
//!
//! 保存当前可见的通知，到期后自动移除

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::{Notification, NotifierPort, DEFAULT_DISMISS_AFTER};

/// 可见通知列表
///
/// 每条通知在 `dismiss_after` 之后由后台任务移除，也可以提前手动关闭。
/// 设置了 sink 时，通知带上最终的展示时长转发给它。
/// 需要在 tokio 运行时内使用。
pub struct NotificationCenter {
    active: Arc<DashMap<Uuid, Notification>>,
    default_dismiss: Duration,
    sink: Option<Arc<dyn NotifierPort>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_default_dismiss(DEFAULT_DISMISS_AFTER)
    }

    /// 未指定展示时长的通知使用 `default_dismiss`
    pub fn with_default_dismiss(default_dismiss: Duration) -> Self {
        Self {
            active: Arc::new(DashMap::new()),
            default_dismiss,
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn NotifierPort>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 手动关闭，返回通知是否仍在展示
    pub fn dismiss(&self, id: Uuid) -> bool {
        self.active.remove(&id).is_some()
    }

    /// 当前可见的通知
    pub fn active(&self) -> Vec<Notification> {
        self.active.iter().map(|n| n.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifierPort for NotificationCenter {
    fn notify(&self, notification: Notification) {
        let id = notification.id;
        let dismiss_after = notification.dismiss_after.unwrap_or(self.default_dismiss);
        let notification = notification.with_dismiss_after(dismiss_after);
        if let Some(sink) = &self.sink {
            sink.notify(notification.clone());
        }
        self.active.insert(id, notification);

        let active = Arc::downgrade(&self.active);
        tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            if let Some(active) = active.upgrade() {
                if active.remove(&id).is_some() {
                    tracing::trace!(notification_id = %id, "Notification dismissed");
                }
            }
        });
    }
}
