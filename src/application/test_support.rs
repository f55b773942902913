//! 测试用端口替身

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    ApiError, MoodApiPort, Notification, NotificationLevel, NotifierPort, ProjectApiPort,
    SaveMoodRequest,
};
use crate::domain::mood::{MoodEntry, MoodScope};
use crate::domain::project::{AiProviderStatus, ProjectSummary};

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<(NotificationLevel, String)> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .map(|n| (n.level, n.message.clone()))
            .collect()
    }

    pub fn last(&self) -> Option<(NotificationLevel, String)> {
        self.all().pop()
    }

    pub fn dismiss_times(&self) -> Vec<Option<Duration>> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.dismiss_after)
            .collect()
    }
}

impl NotifierPort for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

pub struct FakeMoodApi {
    pub save_result: Mutex<Result<Option<String>, ApiError>>,
    pub history: Mutex<Result<Vec<MoodEntry>, ApiError>>,
    pub saved: Mutex<Vec<(MoodScope, SaveMoodRequest)>>,
    pub history_scopes: Mutex<Vec<MoodScope>>,
}

impl Default for FakeMoodApi {
    fn default() -> Self {
        Self {
            save_result: Mutex::new(Ok(None)),
            history: Mutex::new(Ok(Vec::new())),
            saved: Mutex::new(Vec::new()),
            history_scopes: Mutex::new(Vec::new()),
        }
    }
}

impl FakeMoodApi {
    pub fn with_history(entries: Vec<MoodEntry>) -> Self {
        let api = Self::default();
        *api.history.lock().unwrap() = Ok(entries);
        api
    }

    pub fn with_save_result(result: Result<Option<String>, ApiError>) -> Self {
        let api = Self::default();
        *api.save_result.lock().unwrap() = result;
        api
    }
}

#[async_trait]
impl MoodApiPort for FakeMoodApi {
    async fn save_mood(
        &self,
        scope: &MoodScope,
        request: &SaveMoodRequest,
    ) -> Result<Option<String>, ApiError> {
        self.saved
            .lock()
            .unwrap()
            .push((scope.clone(), request.clone()));
        self.save_result.lock().unwrap().clone()
    }

    async fn mood_history(&self, scope: &MoodScope) -> Result<Vec<MoodEntry>, ApiError> {
        self.history_scopes.lock().unwrap().push(scope.clone());
        self.history.lock().unwrap().clone()
    }
}

pub struct FakeProjectApi {
    pub projects: Mutex<Result<Vec<ProjectSummary>, ApiError>>,
    pub delete_result: Mutex<Result<(), ApiError>>,
    pub deleted: Mutex<Vec<String>>,
    pub ai_status: Mutex<Result<AiProviderStatus, ApiError>>,
}

impl Default for FakeProjectApi {
    fn default() -> Self {
        Self {
            projects: Mutex::new(Ok(Vec::new())),
            delete_result: Mutex::new(Ok(())),
            deleted: Mutex::new(Vec::new()),
            ai_status: Mutex::new(Err(ApiError::Network("not scripted".to_string()))),
        }
    }
}

#[async_trait]
impl ProjectApiPort for FakeProjectApi {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError> {
        self.projects.lock().unwrap().clone()
    }

    async fn delete_project(&self, project_id: &str) -> Result<(), ApiError> {
        self.deleted.lock().unwrap().push(project_id.to_string());
        self.delete_result.lock().unwrap().clone()
    }

    async fn ai_provider_status(&self) -> Result<AiProviderStatus, ApiError> {
        self.ai_status.lock().unwrap().clone()
    }
}
