//! Key-Value Store Port - 本地持久化抽象
//!
//! 表单草稿等客户端状态通过该端口读写，可替换为内存或文件实现

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Key-Value Store Port
pub trait KeyValueStorePort: Send + Sync {
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// 删除键，返回是否存在
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}
