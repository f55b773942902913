//! Mood Command Handlers

use std::sync::Arc;

use crate::application::commands::SaveMood;
use crate::application::error::ApplicationError;
use crate::application::ports::{MoodApiPort, Notification, NotifierPort, SaveMoodRequest};
use crate::domain::mood::{Mood, MoodScope};

const SAVE_SUCCESS_FALLBACK: &str = "Mood saved successfully";
const SAVE_FAILURE_FALLBACK: &str = "Failed to save mood. Please try again.";

/// 保存心情响应
#[derive(Debug, Clone)]
pub struct SaveMoodResponse {
    pub scope: MoodScope,
    pub mood: Mood,
    pub message: String,
}

/// SaveMood Handler
///
/// 提交前校验心情标签；失败时优先展示服务端消息，否则使用兜底文案。
pub struct SaveMoodHandler {
    mood_api: Arc<dyn MoodApiPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl SaveMoodHandler {
    pub fn new(mood_api: Arc<dyn MoodApiPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self { mood_api, notifier }
    }

    pub async fn handle(&self, command: SaveMood) -> Result<SaveMoodResponse, ApplicationError> {
        let mood = match Mood::parse(&command.mood) {
            Ok(mood) => mood,
            Err(e) => {
                let err = ApplicationError::from(e);
                self.notifier
                    .notify(Notification::error(err.user_message(SAVE_FAILURE_FALLBACK)));
                return Err(err);
            }
        };

        let request = SaveMoodRequest {
            mood,
            note: command.note.trim().to_string(),
        };

        match self.mood_api.save_mood(&command.scope, &request).await {
            Ok(server_message) => {
                let message = server_message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| SAVE_SUCCESS_FALLBACK.to_string());

                tracing::info!(scope = %command.scope, mood = %mood, "Mood saved");
                self.notifier.notify(Notification::success(message.clone()));

                Ok(SaveMoodResponse {
                    scope: command.scope,
                    mood,
                    message,
                })
            }
            Err(e) => {
                tracing::warn!(scope = %command.scope, error = %e, "Failed to save mood");
                let err = ApplicationError::from(e);
                self.notifier
                    .notify(Notification::error(err.user_message(SAVE_FAILURE_FALLBACK)));
                Err(err)
            }
        }
    }
}
