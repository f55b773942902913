//! HTTP API Client - 调用 BookGenPro 服务端
//!
//! 同时实现 GenerationStatusPort、MoodApiPort、ProjectApiPort
//!
//! 服务端 API:
//! GET  /check_generation_status/{id}            -> {status, completed_chapters, chapters}
//! POST /save_mood                               -> {success, message?}
//! POST /project/{id}/save_project_mood          -> {success, message?}
//! GET  /get_mood_history                        -> {success, moods, message?}
//! GET  /project/{id}/get_project_mood_history   -> {success, moods, message?}
//! GET  /api/projects                            -> [project]
//! POST /delete_project/{id}                     -> redirect（结果只在 flash 中，需要回查列表）
//! GET  /check_ai_provider_status                -> {provider, provider_name, model, configured, status}

use async_trait::async_trait;
use reqwest::{redirect, Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{
    AiProviderStatusDto, ApiResultDto, GenerationStatusDto, MoodHistoryDto, ProjectDto,
    SaveMoodBody,
};
use crate::application::ports::{
    ApiError, GenerationStatusPort, MoodApiPort, ProjectApiPort, SaveMoodRequest,
};
use crate::domain::generation::GenerationProgress;
use crate::domain::mood::{MoodEntry, MoodScope};
use crate::domain::project::{AiProviderStatus, ProjectSummary};

/// HTTP API 客户端配置
#[derive(Debug, Clone)]
pub struct HttpApiClientConfig {
    /// 服务端基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// BookGenPro HTTP 客户端
pub struct HttpApiClient {
    client: Client,
    /// 不跟随重定向，用于只以 302 应答的表单端点
    form_client: Client,
    base_url: Url,
}

impl HttpApiClient {
    pub fn new(config: HttpApiClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Network(format!("Invalid base url {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Network(format!(
                "Invalid base url {}: cannot be a base",
                config.base_url
            )));
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let form_client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            form_client,
            base_url,
        })
    }

    pub fn with_default_config() -> Result<Self, ApiError> {
        Self::new(HttpApiClientConfig::default())
    }

    /// 拼接路径段；项目 id 会被正确转义
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn mood_save_url(&self, scope: &MoodScope) -> Url {
        match scope {
            MoodScope::User => self.endpoint(&["save_mood"]),
            MoodScope::Project(id) => self.endpoint(&["project", id.as_str(), "save_project_mood"]),
        }
    }

    fn mood_history_url(&self, scope: &MoodScope) -> Url {
        match scope {
            MoodScope::User => self.endpoint(&["get_mood_history"]),
            MoodScope::Project(id) => {
                self.endpoint(&["project", id.as_str(), "get_project_mood_history"])
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url).send().await.map_err(map_transport)?;
        decode_json(check_status(response).await?).await
    }
}

fn map_transport(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_connect() {
        ApiError::Network(format!("Cannot connect to BookGenPro server: {}", e))
    } else {
        ApiError::Network(e.to_string())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Service {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(map_transport)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl GenerationStatusPort for HttpApiClient {
    async fn get_status(&self, project_id: &str) -> Result<GenerationProgress, ApiError> {
        let url = self.endpoint(&["check_generation_status", project_id]);
        let dto: GenerationStatusDto = self.get_json(url).await?;

        tracing::trace!(
            project_id = %project_id,
            status = %dto.status,
            completed = dto.completed_chapters,
            total = dto.chapters,
            "Generation status fetched"
        );
        GenerationProgress::try_from(dto)
    }
}

#[async_trait]
impl MoodApiPort for HttpApiClient {
    async fn save_mood(
        &self,
        scope: &MoodScope,
        request: &SaveMoodRequest,
    ) -> Result<Option<String>, ApiError> {
        let url = self.mood_save_url(scope);
        let body = SaveMoodBody {
            mood: request.mood.as_str(),
            note: &request.note,
        };

        tracing::debug!(url = %url, scope = %scope, mood = %body.mood, "Saving mood");

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(map_transport)?;
        let result: ApiResultDto = decode_json(check_status(response).await?).await?;
        result.into_result()
    }

    async fn mood_history(&self, scope: &MoodScope) -> Result<Vec<MoodEntry>, ApiError> {
        let dto: MoodHistoryDto = self.get_json(self.mood_history_url(scope)).await?;
        dto.into_entries()
    }
}

#[async_trait]
impl ProjectApiPort for HttpApiClient {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError> {
        let projects: Vec<ProjectDto> = self.get_json(self.endpoint(&["api", "projects"])).await?;
        Ok(projects.into_iter().map(ProjectSummary::from).collect())
    }

    async fn delete_project(&self, project_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["delete_project", project_id]);
        tracing::debug!(url = %url, "Deleting project");

        let response = self.form_client.post(url).send().await.map_err(map_transport)?;
        if !response.status().is_redirection() {
            check_status(response).await?;
        }

        // 服务端无论成败都重定向回首页，只能回查项目是否还在
        let remaining = self.list_projects().await?;
        if remaining.iter().any(|p| p.id == project_id) {
            tracing::warn!(project_id = %project_id, "Project still listed after delete");
            return Err(ApiError::Rejected(None));
        }
        Ok(())
    }

    async fn ai_provider_status(&self) -> Result<AiProviderStatus, ApiError> {
        let dto: AiProviderStatusDto = self
            .get_json(self.endpoint(&["check_ai_provider_status"]))
            .await?;
        Ok(dto.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::GenerationStatus;
    use crate::domain::mood::Mood;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: &str) -> HttpApiClient {
        HttpApiClient::new(HttpApiClientConfig::new(base_url).with_timeout(5)).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = HttpApiClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = client("http://localhost:5000/bookgen/");
        let url = client.endpoint(&["check_generation_status", "a b/c"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/bookgen/check_generation_status/a%20b%2Fc"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpApiClient::new(HttpApiClientConfig::new("not a url")).is_err());
    }

    #[tokio::test]
    async fn test_get_status() {
        let router = Router::new().route(
            "/check_generation_status/:id",
            get(|Path(id): Path<String>| async move {
                assert_eq!(id, "p-42");
                Json(json!({
                    "status": "generating_content",
                    "completed_chapters": 3,
                    "chapters": 8
                }))
            }),
        );
        let base = serve(router).await;

        let progress = client(&base).get_status("p-42").await.unwrap();
        assert_eq!(progress.status(), &GenerationStatus::GeneratingContent);
        assert_eq!(progress.completed_chapters(), 3);
        assert_eq!(progress.total_chapters(), 8);
    }

    #[tokio::test]
    async fn test_get_status_error_with_message() {
        let router = Router::new().route(
            "/check_generation_status/:id",
            get(|| async { Json(json!({"status": "error: quota exceeded"})) }),
        );
        let base = serve(router).await;

        let progress = client(&base).get_status("p").await.unwrap();
        assert_eq!(progress.status(), &GenerationStatus::failed("quota exceeded"));
    }

    #[tokio::test]
    async fn test_unknown_status_is_decode_error() {
        let router = Router::new().route(
            "/check_generation_status/:id",
            get(|| async { Json(json!({"status": "teleporting"})) }),
        );
        let base = serve(router).await;

        let err = client(&base).get_status("p").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let router = Router::new().route(
            "/check_generation_status/:id",
            get(|| async { "<html>login</html>" }),
        );
        let base = serve(router).await;

        let err = client(&base).get_status("p").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_http_error_is_service_error() {
        let router = Router::new().route(
            "/check_generation_status/:id",
            get(|| async { (StatusCode::NOT_FOUND, "Project not found") }),
        );
        let base = serve(router).await;

        let err = client(&base).get_status("missing").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Service {
                status: 404,
                body: "Project not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .get_status("p")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let router = Router::new().route(
            "/check_generation_status/:id",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({"status": "pending"}))
            }),
        );
        let base = serve(router).await;
        let client = HttpApiClient::new(HttpApiClientConfig::new(base).with_timeout(1)).unwrap();

        let err = client.get_status("p").await.unwrap_err();
        assert_eq!(err, ApiError::Timeout);
    }

    #[tokio::test]
    async fn test_save_project_mood() {
        let received: Arc<Mutex<Vec<(String, Value)>>> = Arc::default();
        let sink = received.clone();
        let router = Router::new().route(
            "/project/:id/save_project_mood",
            post(move |Path(id): Path<String>, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push((id, body));
                    Json(json!({"success": true, "message": "Project mood saved successfully"}))
                }
            }),
        );
        let base = serve(router).await;

        let message = client(&base)
            .save_mood(
                &MoodScope::project("p1"),
                &SaveMoodRequest {
                    mood: Mood::Creative,
                    note: "good flow".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(message.as_deref(), Some("Project mood saved successfully"));
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].0, "p1");
        assert_eq!(received[0].1, json!({"mood": "creative", "note": "good flow"}));
    }

    #[tokio::test]
    async fn test_save_mood_rejected() {
        let router = Router::new().route(
            "/save_mood",
            post(|| async { Json(json!({"success": false, "message": "Mood is required"})) }),
        );
        let base = serve(router).await;

        let err = client(&base)
            .save_mood(
                &MoodScope::User,
                &SaveMoodRequest {
                    mood: Mood::Focused,
                    note: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.server_message(), Some("Mood is required"));
    }

    #[tokio::test]
    async fn test_user_mood_history() {
        let router = Router::new().route(
            "/get_mood_history",
            get(|| async {
                Json(json!({
                    "success": true,
                    "moods": [
                        {"date": "2025-01-02", "mood": "focused", "note": "deep work"},
                        {"date": "2025-01-01", "mood": "tired", "note": ""}
                    ]
                }))
            }),
        );
        let base = serve(router).await;

        let entries = client(&base).mood_history(&MoodScope::User).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].mood(), Some(Mood::Focused));
        assert_eq!(entries[0].note(), Some("deep work"));
        assert_eq!(entries[1].note(), None);
    }

    fn project_rows() -> Vec<Value> {
        vec![
            json!({
                "id": "m1",
                "name": "Field Notes",
                "topic": "Birds",
                "creation_method": "manual",
                "chapters": [{}, {}],
                "created_at": "2025-03-01T08:00:00"
            }),
            json!({"id": "a1", "topic": "Rust", "generation_status": "generating_titles"}),
        ]
    }

    /// 模拟服务端：列表来自共享状态，删除后一律 302 回首页
    fn projects_router(rows: Arc<Mutex<Vec<Value>>>, remove_on_delete: bool) -> Router {
        let listed = rows.clone();
        Router::new()
            .route(
                "/api/projects",
                get(move || {
                    let listed = listed.clone();
                    async move { Json(Value::Array(listed.lock().unwrap().clone())) }
                }),
            )
            .route(
                "/delete_project/:id",
                post(move |Path(id): Path<String>| {
                    let rows = rows.clone();
                    async move {
                        if remove_on_delete {
                            rows.lock().unwrap().retain(|row| row["id"] != id.as_str());
                        }
                        axum::response::Redirect::to("/")
                    }
                }),
            )
            .route(
                "/",
                get(|| async { "<html>Please activate your license first</html>" }),
            )
    }

    #[tokio::test]
    async fn test_list_projects_and_delete() {
        let rows = Arc::new(Mutex::new(project_rows()));
        let base = serve(projects_router(rows.clone(), true)).await;
        let client = client(&base);

        let projects = client.list_projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].chapter_count, 2);
        assert!(projects[1].needs_polling());

        client.delete_project("m1").await.unwrap();
        let remaining = rows.lock().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["id"], "a1");
    }

    #[tokio::test]
    async fn test_delete_redirect_without_removal_is_rejected() {
        let rows = Arc::new(Mutex::new(project_rows()));
        let base = serve(projects_router(rows.clone(), false)).await;

        let err = client(&base).delete_project("m1").await.unwrap_err();
        assert_eq!(err, ApiError::Rejected(None));
        assert_eq!(rows.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_server_error_skips_check() {
        let router = Router::new().route(
            "/delete_project/:id",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = serve(router).await;

        let err = client(&base).delete_project("m1").await.unwrap_err();
        assert!(matches!(err, ApiError::Service { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_ai_provider_status() {
        let router = Router::new().route(
            "/check_ai_provider_status",
            get(|| async {
                Json(json!({
                    "provider": "openrouter",
                    "provider_name": "OpenRouter",
                    "model": "meta-llama/llama-3.2-3b-instruct:free",
                    "configured": true,
                    "status": "ready"
                }))
            }),
        );
        let base = serve(router).await;

        let status = client(&base).ai_provider_status().await.unwrap();
        assert!(status.is_ready());
        assert_eq!(status.provider_name, "OpenRouter");
    }
}
