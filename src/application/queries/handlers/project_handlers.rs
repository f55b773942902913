//! Project Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ProjectApiPort;
use crate::application::queries::{CheckAiProvider, ListProjects};
use crate::domain::project::{sort_newest_first, AiProviderStatus, ProjectSummary};

/// ListProjects Handler
pub struct ListProjectsHandler {
    project_api: Arc<dyn ProjectApiPort>,
}

impl ListProjectsHandler {
    pub fn new(project_api: Arc<dyn ProjectApiPort>) -> Self {
        Self { project_api }
    }

    pub async fn handle(&self, _query: ListProjects) -> Result<Vec<ProjectSummary>, ApplicationError> {
        let mut projects = self.project_api.list_projects().await?;
        sort_newest_first(&mut projects);
        Ok(projects)
    }
}

/// CheckAiProvider Handler
pub struct CheckAiProviderHandler {
    project_api: Arc<dyn ProjectApiPort>,
}

impl CheckAiProviderHandler {
    pub fn new(project_api: Arc<dyn ProjectApiPort>) -> Self {
        Self { project_api }
    }

    pub async fn handle(&self, _query: CheckAiProvider) -> Result<AiProviderStatus, ApplicationError> {
        let status = self.project_api.ai_provider_status().await?;
        if !status.is_ready() {
            tracing::warn!(provider = %status.provider, "AI provider is not configured");
        }
        Ok(status)
    }
}
