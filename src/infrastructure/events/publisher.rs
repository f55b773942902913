//! Generation Event Publisher
//!
//! 把轮询结果转换为事件广播，供命令行输出或其它订阅方消费

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::application::ports::{ApiError, GenerationViewPort};
use crate::domain::generation::{GenerationProgress, StatusTone};

/// 生成进度事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum GenerationEvent {
    /// 一次成功查询
    Rendered {
        project_id: String,
        status: String,
        label: String,
        tone: StatusTone,
        completed_chapters: u32,
        total_chapters: u32,
        percent: f64,
    },
    /// 查询失败，轮询继续
    FetchFailed { project_id: String, error: String },
    /// 生成完成，每个项目只发布一次
    Completed {
        project_id: String,
        total_chapters: u32,
    },
}

impl GenerationEvent {
    pub fn project_id(&self) -> &str {
        match self {
            GenerationEvent::Rendered { project_id, .. }
            | GenerationEvent::FetchFailed { project_id, .. }
            | GenerationEvent::Completed { project_id, .. } => project_id,
        }
    }
}

/// 事件发布器
pub struct GenerationEventPublisher {
    channel: broadcast::Sender<GenerationEvent>,
}

impl GenerationEventPublisher {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GenerationEvent> {
        self.channel.subscribe()
    }

    fn publish(&self, event: GenerationEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(
                project_id = %e.0.project_id(),
                "Failed to publish generation event (no receivers)"
            );
        }
    }
}

impl Default for GenerationEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationViewPort for GenerationEventPublisher {
    fn render(&self, project_id: &str, progress: &GenerationProgress) {
        self.publish(GenerationEvent::Rendered {
            project_id: project_id.to_string(),
            status: progress.status().as_wire().into_owned(),
            label: progress.label(),
            tone: progress.status().tone(),
            completed_chapters: progress.completed_chapters(),
            total_chapters: progress.total_chapters(),
            percent: progress.percent(),
        });
    }

    fn render_fetch_error(&self, project_id: &str, error: &ApiError) {
        self.publish(GenerationEvent::FetchFailed {
            project_id: project_id.to_string(),
            error: error.to_string(),
        });
    }

    fn on_completed(&self, project_id: &str, progress: &GenerationProgress) {
        tracing::info!(
            project_id = %project_id,
            chapters = progress.total_chapters(),
            "Book generation completed"
        );
        self.publish(GenerationEvent::Completed {
            project_id: project_id.to_string(),
            total_chapters: progress.total_chapters(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::GenerationStatus;

    #[tokio::test]
    async fn test_render_and_complete_events() {
        let publisher = GenerationEventPublisher::new();
        let mut rx = publisher.subscribe();

        let progress =
            GenerationProgress::new(GenerationStatus::GeneratingContent, 2, 8).unwrap();
        publisher.render("p1", &progress);
        publisher.render_fetch_error("p1", &ApiError::Timeout);
        let done = GenerationProgress::new(GenerationStatus::Completed, 8, 8).unwrap();
        publisher.on_completed("p1", &done);

        match rx.recv().await.unwrap() {
            GenerationEvent::Rendered {
                status,
                tone,
                completed_chapters,
                total_chapters,
                percent,
                ..
            } => {
                assert_eq!(status, "generating_content");
                assert_eq!(tone, StatusTone::Generating);
                assert_eq!((completed_chapters, total_chapters), (2, 8));
                assert_eq!(percent, 25.0);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(
            rx.recv().await.unwrap(),
            GenerationEvent::FetchFailed {
                project_id: "p1".to_string(),
                error: "Request timeout".to_string(),
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            GenerationEvent::Completed {
                project_id: "p1".to_string(),
                total_chapters: 8,
            }
        );
    }

    #[test]
    fn test_publish_without_subscribers() {
        let publisher = GenerationEventPublisher::new();
        publisher.render_fetch_error("p1", &ApiError::Network("down".to_string()));
    }

    #[test]
    fn test_event_json_shape() {
        let event = GenerationEvent::Completed {
            project_id: "p1".to_string(),
            total_chapters: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "Completed");
        assert_eq!(json["data"]["total_chapters"], 3);
    }
}
