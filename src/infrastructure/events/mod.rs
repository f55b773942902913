//! Events - 生成进度事件广播

mod publisher;

pub use publisher::{GenerationEvent, GenerationEventPublisher};
