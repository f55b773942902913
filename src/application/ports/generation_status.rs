//! Generation Status Port - 生成状态查询

use async_trait::async_trait;

use super::ApiError;
use crate::domain::generation::GenerationProgress;

/// 生成状态查询端口
///
/// 对应 `GET /check_generation_status/{project_id}`，状态字符串在适配器内一次性解码。
#[async_trait]
pub trait GenerationStatusPort: Send + Sync {
    async fn get_status(&self, project_id: &str) -> Result<GenerationProgress, ApiError>;
}
