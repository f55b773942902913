//! Completion Latch

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 完成副作用的一次性闸门
///
/// 默认每个 poller 一个；在同一页面会话内重建 poller 时可共享同一个实例，
/// 这样加载到已完成数据的新 poller 不会再次触发完成副作用。
#[derive(Debug, Default)]
pub struct CompletionLatch {
    fired: AtomicBool,
}

impl CompletionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 首次调用返回 true，之后恒为 false
    pub fn try_fire(&self) -> bool {
        !self.fired.swap(true, Ordering::SeqCst)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once() {
        let latch = CompletionLatch::new();
        assert!(!latch.has_fired());
        assert!(latch.try_fire());
        assert!(!latch.try_fire());
        assert!(latch.has_fired());
    }
}
