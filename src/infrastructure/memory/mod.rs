//! Memory Layer - In-Memory State
//!
//! 进程内的 Key-Value 存储与通知列表

mod kv_store;
mod notification_center;

pub use kv_store::InMemoryKeyValueStore;
pub use notification_center::NotificationCenter;
