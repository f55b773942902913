//! Project API Port - 项目管理远程接口

use async_trait::async_trait;

use super::ApiError;
use crate::domain::project::{AiProviderStatus, ProjectSummary};

#[async_trait]
pub trait ProjectApiPort: Send + Sync {
    /// `GET /api/projects`
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError>;

    /// `POST /delete_project/{id}`
    async fn delete_project(&self, project_id: &str) -> Result<(), ApiError>;

    /// `GET /check_ai_provider_status`
    async fn ai_provider_status(&self) -> Result<AiProviderStatus, ApiError>;
}
