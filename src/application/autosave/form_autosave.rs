//! Form Autosave Implementation

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::application::error::ApplicationError;
use crate::application::ports::{KeyValueStorePort, Notification, NotifierPort};
use crate::domain::FormDraft;

/// 默认防抖时间
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

const KEY_PREFIX: &str = "autosave_";
const SAVED_MESSAGE: &str = "Changes saved automatically";
const REQUIRED_MESSAGE: &str = "Please fill in all required fields";

/// 单个表单的自动保存组件
///
/// 每次输入都会重置防抖计时，只有窗口内最后一份草稿会被写入。
/// drop 时取消尚未写入的草稿。
pub struct FormAutosave {
    form_id: String,
    store: Arc<dyn KeyValueStorePort>,
    notifier: Arc<dyn NotifierPort>,
    debounce: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl FormAutosave {
    pub fn new(
        form_id: impl Into<String>,
        store: Arc<dyn KeyValueStorePort>,
        notifier: Arc<dyn NotifierPort>,
        debounce: Duration,
    ) -> Self {
        Self {
            form_id: form_id.into(),
            store,
            notifier,
            debounce,
            pending: Mutex::new(None),
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn storage_key(&self) -> String {
        format!("{}{}", KEY_PREFIX, self.form_id)
    }

    /// 表单输入变化，重新开始防抖计时
    pub fn on_input(&self, draft: FormDraft) {
        let key = self.storage_key();
        let store = self.store.clone();
        let notifier = self.notifier.clone();
        let debounce = self.debounce;

        let task = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Err(e) = write_draft(store.as_ref(), notifier.as_ref(), &key, &draft) {
                tracing::warn!(key = %key, error = %e, "Autosave failed");
            }
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// 立即写入草稿，丢弃尚未触发的防抖写入
    pub fn flush(&self, draft: &FormDraft) -> Result<(), ApplicationError> {
        self.cancel_pending();
        write_draft(
            self.store.as_ref(),
            self.notifier.as_ref(),
            &self.storage_key(),
            draft,
        )
    }

    pub fn cancel_pending(&self) {
        if let Some(task) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }

    /// 读取已保存的草稿；内容损坏时记录日志并视为不存在
    pub fn restore(&self) -> Result<Option<FormDraft>, ApplicationError> {
        let key = self.storage_key();
        let Some(raw) = self.store.load(&key)? else {
            return Ok(None);
        };

        match serde_json::from_str::<FormDraft>(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Error loading saved form data");
                Ok(None)
            }
        }
    }

    /// 删除已保存的草稿
    pub fn clear(&self) -> Result<bool, ApplicationError> {
        self.cancel_pending();
        Ok(self.store.remove(&self.storage_key())?)
    }

    /// 提交前校验必填字段
    pub fn validate(&self, draft: &FormDraft, required: &[&str]) -> Result<(), ApplicationError> {
        if let Err(e) = draft.validate_required(required) {
            tracing::debug!(form_id = %self.form_id, error = %e, "Form validation failed");
            self.notifier.notify(Notification::error(REQUIRED_MESSAGE));
            return Err(e.into());
        }
        Ok(())
    }
}

impl Drop for FormAutosave {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn write_draft(
    store: &dyn KeyValueStorePort,
    notifier: &dyn NotifierPort,
    key: &str,
    draft: &FormDraft,
) -> Result<(), ApplicationError> {
    let json = serde_json::to_string(draft)
        .map_err(|e| ApplicationError::StorageError(e.to_string()))?;
    store.save(key, &json)?;

    tracing::debug!(key = %key, fields = draft.len(), "Form draft saved");
    notifier.notify(Notification::info(SAVED_MESSAGE));
    Ok(())
}
