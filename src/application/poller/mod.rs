//! Status Poller - 生成任务状态轮询
//!
//! 每个被跟踪的项目一个实例，各自持有完成标记与取消令牌，互不干扰

mod latch;
mod status_poller;

pub use latch::CompletionLatch;
pub use status_poller::{PollStep, PollerConfig, PollerHandle, StatusPoller, StopReason};
