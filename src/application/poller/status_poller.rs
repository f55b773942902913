//! Status Poller Implementation

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::CompletionLatch;
use crate::application::ports::{ApiError, GenerationStatusPort, GenerationViewPort};
use crate::domain::generation::{GenerationProgress, GenerationStatus};

/// Poller 配置
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// 固定轮询间隔，整个任务周期内不变
    pub interval: Duration,
    /// 单次状态查询的超时
    pub fetch_timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl PollerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }
}

/// 轮询结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Completed,
    Failed,
    Manual,
    /// pending：生成尚未开始，没有进度可等
    Idle,
    /// 服务端没有该项目的生成状态
    Unavailable,
    Cancelled,
}

/// 单次 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// 间隔后再查询一次
    Reschedule,
    /// 不再安排后续查询
    Stop(StopReason),
}

/// 生成状态轮询器
///
/// - 生成中（enhancing_description、generating_titles、generating_content）：
///   间隔后安排恰好一次后续查询
/// - pending / unknown：展示后停止，生成开始前不会自行推进
/// - completed：完成副作用经 CompletionLatch 只触发一次，然后停止
/// - error：展示失败并停止，不自动重试
/// - 查询失败：上报后按固定间隔继续，没有退避
pub struct StatusPoller {
    project_id: String,
    source: Arc<dyn GenerationStatusPort>,
    view: Arc<dyn GenerationViewPort>,
    config: PollerConfig,
    latch: Arc<CompletionLatch>,
    cancel: CancellationToken,
    last_status: Mutex<Option<GenerationStatus>>,
}

impl StatusPoller {
    pub fn new(
        project_id: impl Into<String>,
        source: Arc<dyn GenerationStatusPort>,
        view: Arc<dyn GenerationViewPort>,
        config: PollerConfig,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            source,
            view,
            config,
            latch: CompletionLatch::new().arc(),
            cancel: CancellationToken::new(),
            last_status: Mutex::new(None),
        }
    }

    /// 与其它 poller 共享完成闸门（页面会话范围）
    pub fn with_latch(mut self, latch: Arc<CompletionLatch>) -> Self {
        self.latch = latch;
        self
    }

    /// 使用外部取消令牌，通常是组件生命周期令牌的 child token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// 执行一次查询并决定是否继续
    pub async fn tick(&self) -> PollStep {
        if self.cancel.is_cancelled() {
            return PollStep::Stop(StopReason::Cancelled);
        }

        let fetch = tokio::time::timeout(
            self.config.fetch_timeout,
            self.source.get_status(&self.project_id),
        );

        let result = tokio::select! {
            _ = self.cancel.cancelled() => return PollStep::Stop(StopReason::Cancelled),
            result = fetch => result,
        };

        let progress = match result {
            Ok(Ok(progress)) => progress,
            Ok(Err(e)) => {
                self.report_fetch_error(&e);
                return PollStep::Reschedule;
            }
            Err(_) => {
                self.report_fetch_error(&ApiError::Timeout);
                return PollStep::Reschedule;
            }
        };

        self.observe_transition(progress.status());
        self.view.render(&self.project_id, &progress);

        match progress.status() {
            GenerationStatus::Completed => {
                self.handle_completed(&progress);
                PollStep::Stop(StopReason::Completed)
            }
            GenerationStatus::Failed { message } => {
                tracing::warn!(
                    project_id = %self.project_id,
                    message = %message,
                    "Generation failed"
                );
                PollStep::Stop(StopReason::Failed)
            }
            GenerationStatus::Manual => {
                tracing::debug!(project_id = %self.project_id, "Manual project, nothing to poll");
                PollStep::Stop(StopReason::Manual)
            }
            GenerationStatus::Pending => {
                tracing::debug!(project_id = %self.project_id, "Generation not started");
                PollStep::Stop(StopReason::Idle)
            }
            GenerationStatus::Unknown => {
                tracing::warn!(project_id = %self.project_id, "Server has no generation status");
                PollStep::Stop(StopReason::Unavailable)
            }
            GenerationStatus::EnhancingDescription
            | GenerationStatus::GeneratingTitles
            | GenerationStatus::GeneratingContent => PollStep::Reschedule,
        }
    }

    /// 轮询直到终态或被取消
    pub async fn run(&self) -> StopReason {
        tracing::debug!(
            project_id = %self.project_id,
            interval_ms = self.config.interval.as_millis() as u64,
            "Status poller started"
        );

        let reason = loop {
            match self.tick().await {
                PollStep::Stop(reason) => break reason,
                PollStep::Reschedule => {
                    tokio::select! {
                        _ = self.cancel.cancelled() => break StopReason::Cancelled,
                        _ = tokio::time::sleep(self.config.interval) => {}
                    }
                }
            }
        };

        tracing::debug!(project_id = %self.project_id, reason = ?reason, "Status poller stopped");
        reason
    }

    /// 在后台任务中运行，返回可取消的句柄
    pub fn start(self) -> PollerHandle {
        let cancel = self.cancel.clone();
        let project_id = self.project_id.clone();
        let join = tokio::spawn(async move { self.run().await });

        PollerHandle {
            project_id,
            cancel,
            join: Some(join),
        }
    }

    fn handle_completed(&self, progress: &GenerationProgress) {
        if self.latch.try_fire() {
            tracing::info!(
                project_id = %self.project_id,
                chapters = progress.total_chapters(),
                "Generation completed"
            );
            self.view.on_completed(&self.project_id, progress);
        } else {
            tracing::debug!(project_id = %self.project_id, "Completion already handled");
        }
    }

    fn report_fetch_error(&self, error: &ApiError) {
        tracing::warn!(
            project_id = %self.project_id,
            error = %error,
            "Failed to check generation status"
        );
        self.view.render_fetch_error(&self.project_id, error);
    }

    /// 记录状态变化；返回 false 表示状态机不允许这次迁移（只记日志）
    fn observe_transition(&self, status: &GenerationStatus) -> bool {
        let mut last = self
            .last_status
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let expected = match last.as_ref() {
            Some(previous) if previous != status => {
                let expected = previous.can_transition_to(status);
                if expected {
                    tracing::debug!(
                        project_id = %self.project_id,
                        from = %previous,
                        to = %status,
                        "Generation status changed"
                    );
                } else {
                    tracing::warn!(
                        project_id = %self.project_id,
                        from = %previous,
                        to = %status,
                        "Unexpected generation status transition"
                    );
                }
                expected
            }
            _ => true,
        };
        *last = Some(status.clone());
        expected
    }
}

/// 后台 poller 句柄
///
/// drop 时取消轮询，组件销毁后不会遗留定时器。
pub struct PollerHandle {
    project_id: String,
    cancel: CancellationToken,
    join: Option<JoinHandle<StopReason>>,
}

impl PollerHandle {
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map(|j| j.is_finished()).unwrap_or(true)
    }

    /// 等待轮询结束
    pub async fn join(mut self) -> StopReason {
        let Some(join) = self.join.take() else {
            return StopReason::Cancelled;
        };
        match join.await {
            Ok(reason) => reason,
            Err(e) => {
                tracing::error!(project_id = %self.project_id, error = %e, "Poller task aborted");
                StopReason::Cancelled
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.cancel.cancel();
        }
    }
}
