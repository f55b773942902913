//! Sled-based Key-Value Store Implementation
//!
//! 表单草稿等客户端状态的本地持久化

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{KeyValueStorePort, StoreError};

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledStoreConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledStoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/drafts.sled".to_string(),
        }
    }
}

/// 内部存储条目
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    saved_at: i64,
}

/// Sled Key-Value 存储
pub struct SledKeyValueStore {
    db: Db,
}

impl SledKeyValueStore {
    pub fn new(config: &SledStoreConfig) -> Result<Self, StoreError> {
        let db =
            sled::open(&config.db_path).map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        tracing::info!(
            db_path = %config.db_path,
            entries = db.len(),
            "SledKeyValueStore initialized"
        );

        Ok(Self { db })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let config = SledStoreConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 最后一次写入时间（Unix 秒）
    pub fn saved_at(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.get_entry(key)?.map(|entry| entry.saved_at))
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn get_entry(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let Some(bytes) = self
            .db
            .get(key)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?
        else {
            return Ok(None);
        };

        let entry = bincode::deserialize::<StoredValue>(&bytes)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        Ok(Some(entry))
    }
}

impl KeyValueStorePort for SledKeyValueStore {
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let entry = StoredValue {
            value: value.to_string(),
            saved_at: Utc::now().timestamp(),
        };
        let bytes =
            bincode::serialize(&entry).map_err(|e| StoreError::SerializationError(e.to_string()))?;

        self.db
            .insert(key, bytes)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        tracing::debug!(key = %key, size = value.len(), "Value stored");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get_entry(key)?.map(|entry| entry.value))
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let removed = self
            .db
            .remove(key)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        Ok(removed.is_some())
    }
}
