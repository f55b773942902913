//! Generation View Port - 生成进度展示

use super::ApiError;
use crate::domain::generation::GenerationProgress;

/// 轮询结果的展示端口
///
/// 替代原先直接操作页面元素的逻辑；实现方负责把结果推给 UI、日志或事件总线。
pub trait GenerationViewPort: Send + Sync {
    /// 每次成功查询后调用
    fn render(&self, project_id: &str, progress: &GenerationProgress);

    /// 查询失败时调用，轮询会在下一个周期继续
    fn render_fetch_error(&self, project_id: &str, error: &ApiError);

    /// 首次进入 completed 时调用，每个 CompletionLatch 只触发一次
    fn on_completed(&self, project_id: &str, progress: &GenerationProgress);
}
