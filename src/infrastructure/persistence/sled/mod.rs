//! Sled Persistence

mod kv_store;

pub use kv_store::{SledKeyValueStore, SledStoreConfig};
