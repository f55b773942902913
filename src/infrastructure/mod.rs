//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod events;
pub mod memory;
pub mod persistence;

pub use adapters::{HttpApiClient, HttpApiClientConfig, TracingNotifier};
pub use events::{GenerationEvent, GenerationEventPublisher};
pub use memory::{InMemoryKeyValueStore, NotificationCenter};
pub use persistence::sled::SledKeyValueStore;
