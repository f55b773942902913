//! Project Command Handlers

use std::sync::Arc;

use crate::application::commands::DeleteProject;
use crate::application::error::ApplicationError;
use crate::application::ports::{Notification, NotifierPort, ProjectApiPort};

const DELETE_FAILURE_FALLBACK: &str = "Error deleting project";

/// DeleteProject Handler
pub struct DeleteProjectHandler {
    project_api: Arc<dyn ProjectApiPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl DeleteProjectHandler {
    pub fn new(project_api: Arc<dyn ProjectApiPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            project_api,
            notifier,
        }
    }

    pub async fn handle(&self, command: DeleteProject) -> Result<(), ApplicationError> {
        let project_id = command.project_id.trim();
        if project_id.is_empty() {
            let err = ApplicationError::validation("Project id is required");
            self.notifier.notify(Notification::error(err.user_message(DELETE_FAILURE_FALLBACK)));
            return Err(err);
        }

        match self.project_api.delete_project(project_id).await {
            Ok(()) => {
                tracing::info!(project_id = %project_id, "Project deleted");
                self.notifier
                    .notify(Notification::success("Project deleted successfully!"));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(project_id = %project_id, error = %e, "Failed to delete project");
                let err = ApplicationError::from(e);
                self.notifier
                    .notify(Notification::error(err.user_message(DELETE_FAILURE_FALLBACK)));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ApiError, NotificationLevel};
    use crate::application::test_support::{FakeProjectApi, RecordingNotifier};

    #[tokio::test]
    async fn test_delete_project() {
        let api = Arc::new(FakeProjectApi::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = DeleteProjectHandler::new(api.clone(), notifier.clone());

        handler
            .handle(DeleteProject {
                project_id: " 1a2b3c4d ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(api.deleted.lock().unwrap().as_slice(), &["1a2b3c4d".to_string()]);
        assert_eq!(
            notifier.last(),
            Some((NotificationLevel::Success, "Project deleted successfully!".to_string()))
        );
    }

    #[tokio::test]
    async fn test_blank_id_is_validation_error() {
        let api = Arc::new(FakeProjectApi::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = DeleteProjectHandler::new(api.clone(), notifier.clone());

        let result = handler
            .handle(DeleteProject {
                project_id: "  ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert!(api.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_service_error_notifies() {
        let api = Arc::new(FakeProjectApi::default());
        *api.delete_result.lock().unwrap() = Err(ApiError::Service {
            status: 500,
            body: "boom".to_string(),
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = DeleteProjectHandler::new(api, notifier.clone());

        let result = handler
            .handle(DeleteProject {
                project_id: "1a2b3c4d".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ExternalServiceError(_))));
        assert_eq!(
            notifier.last(),
            Some((NotificationLevel::Error, DELETE_FAILURE_FALLBACK.to_string()))
        );
    }
}
