//! BookGenPro 命令行客户端
//!
//! - watch: 轮询一个或多个项目的生成状态，直到终态或 Ctrl-C
//! - mood: 记录心情、查看历史与连续天数
//! - projects / ai-status: 项目列表、删除、AI 服务配置状态
//! - draft: 本地表单草稿
//! - config: 查看生效配置

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use futures_util::future::join_all;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use bookgen::application::{
    ApplicationError, CheckAiProvider, CheckAiProviderHandler, DeleteProject,
    DeleteProjectHandler, FormAutosave, GetMoodHistory, GetMoodHistoryHandler, GetMoodStreak,
    GetMoodStreakHandler, ListProjects, ListProjectsHandler, Notification, NotifierPort,
    PollerConfig, SaveMood, SaveMoodHandler, StatusPoller, StopReason,
};
use bookgen::config::{load_config, load_config_from_path, print_config, render_config, AppConfig};
use bookgen::domain::mood::MoodScope;
use bookgen::domain::FormDraft;
use bookgen::infrastructure::{
    GenerationEvent, GenerationEventPublisher, HttpApiClient, HttpApiClientConfig,
    NotificationCenter, SledKeyValueStore, TracingNotifier,
};

#[derive(Parser)]
#[command(name = "bookgen", version, about = "BookGenPro client")]
struct Cli {
    /// 配置文件路径（默认搜索 config.toml / config.local.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch book generation progress
    Watch {
        /// Project ids to watch
        project_ids: Vec<String>,
        /// Watch every project that is still generating
        #[arg(long)]
        all: bool,
    },
    /// Writing mood tracker
    Mood {
        #[command(subcommand)]
        action: MoodAction,
    },
    /// Project management
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },
    /// Show AI provider configuration status
    AiStatus,
    /// Local form drafts
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum MoodAction {
    /// Record today's mood
    Save {
        /// One of: excited, focused, creative, motivated, tired, blocked, stressed
        mood: String,
        #[arg(long, default_value = "")]
        note: String,
        /// Record against a project instead of the user
        #[arg(long)]
        project: Option<String>,
    },
    /// Show mood history, newest first
    History {
        #[arg(long)]
        project: Option<String>,
    },
    /// Show the current streak
    Streak {
        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProjectsAction {
    /// List projects, newest first
    List,
    /// Delete a project
    Delete { project_id: String },
}

#[derive(Subcommand)]
enum DraftAction {
    /// Save fields immediately (`name=value` pairs)
    Save { form_id: String, fields: Vec<String> },
    /// Print the saved draft
    Show { form_id: String },
    /// Remove the saved draft
    Clear { form_id: String },
    /// Check that required fields are filled in
    Check {
        form_id: String,
        #[arg(long, value_delimiter = ',')]
        required: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match cli.config.as_deref() {
        Some(path) => load_config_from_path(Some(path)),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    // 通知按配置的时长保持可见，同时写入日志
    let notifier: Arc<dyn NotifierPort> = Arc::new(
        NotificationCenter::with_default_dismiss(config.notification.dismiss_after())
            .with_sink(Arc::new(TracingNotifier::new())),
    );

    let ok = match cli.command {
        Commands::Watch { project_ids, all } => {
            watch(&config, notifier, project_ids, all).await?
        }
        Commands::Mood { action } => mood(&config, notifier, action).await?,
        Commands::Projects { action } => projects(&config, notifier, action).await?,
        Commands::AiStatus => ai_status(&config, notifier).await?,
        Commands::Draft { action } => draft(&config, notifier, action)?,
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            print!("{}", render_config(&config)?);
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log.filter_directive()));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn api_client(config: &AppConfig) -> anyhow::Result<Arc<HttpApiClient>> {
    let api_config =
        HttpApiClientConfig::new(&config.api.base_url).with_timeout(config.api.timeout_secs);
    Ok(Arc::new(HttpApiClient::new(api_config)?))
}

fn scope(project: Option<String>) -> MoodScope {
    project.map(MoodScope::Project).unwrap_or(MoodScope::User)
}

/// 查询失败时在调用点转换为错误通知
fn report(notifier: &dyn NotifierPort, err: &ApplicationError, fallback: &str) {
    notifier.notify(Notification::error(err.user_message(fallback)));
}

async fn watch(
    config: &AppConfig,
    notifier: Arc<dyn NotifierPort>,
    mut project_ids: Vec<String>,
    all: bool,
) -> anyhow::Result<bool> {
    let client = api_client(config)?;

    if all {
        match ListProjectsHandler::new(client.clone()).handle(ListProjects).await {
            Ok(projects) => project_ids.extend(
                projects
                    .into_iter()
                    .filter(|p| p.needs_polling())
                    .map(|p| p.id),
            ),
            Err(e) => {
                report(notifier.as_ref(), &e, "Error loading projects");
                return Ok(false);
            }
        }
    }
    let mut seen = HashSet::new();
    project_ids.retain(|id| seen.insert(id.clone()));

    if project_ids.is_empty() {
        println!("Nothing to watch");
        return Ok(true);
    }

    let publisher = GenerationEventPublisher::new().arc();
    let printer = tokio::spawn(print_events(publisher.subscribe()));

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, stopping pollers");
                shutdown.cancel();
            }
        });
    }

    let poller_config = PollerConfig::default()
        .with_interval(config.poller.interval())
        .with_fetch_timeout(config.poller.fetch_timeout());

    let handles: Vec<_> = project_ids
        .iter()
        .map(|id| {
            StatusPoller::new(
                id.clone(),
                client.clone(),
                publisher.clone(),
                poller_config.clone(),
            )
            .with_cancellation(shutdown.child_token())
            .start()
        })
        .collect();

    let reasons = join_all(handles.into_iter().map(|h| h.join())).await;
    drop(publisher);
    if let Err(e) = printer.await {
        tracing::warn!(error = %e, "Event printer aborted");
    }

    let mut ok = true;
    for (id, reason) in project_ids.iter().zip(&reasons) {
        println!("{}: {}", id, stop_label(*reason));
        ok &= !matches!(reason, StopReason::Failed | StopReason::Unavailable);
    }
    Ok(ok)
}

fn stop_label(reason: StopReason) -> &'static str {
    match reason {
        StopReason::Completed => "completed",
        StopReason::Failed => "failed",
        StopReason::Manual => "manual project",
        StopReason::Idle => "not started",
        StopReason::Unavailable => "status unavailable",
        StopReason::Cancelled => "cancelled",
    }
}

async fn print_events(mut rx: tokio::sync::broadcast::Receiver<GenerationEvent>) {
    loop {
        match rx.recv().await {
            Ok(GenerationEvent::Rendered {
                project_id,
                label,
                percent,
                total_chapters,
                ..
            }) => {
                if total_chapters > 0 {
                    println!("[{}] {} ({:.0}%)", project_id, label, percent);
                } else {
                    println!("[{}] {}", project_id, label);
                }
            }
            Ok(GenerationEvent::FetchFailed { project_id, error }) => {
                println!("[{}] Error checking status: {}", project_id, error);
            }
            Ok(GenerationEvent::Completed {
                project_id,
                total_chapters,
            }) => {
                println!(
                    "[{}] Book generation completed! {} chapters ready",
                    project_id, total_chapters
                );
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped = skipped, "Event printer lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn mood(
    config: &AppConfig,
    notifier: Arc<dyn NotifierPort>,
    action: MoodAction,
) -> anyhow::Result<bool> {
    let client = api_client(config)?;
    let today = chrono::Local::now().date_naive();

    match action {
        MoodAction::Save {
            mood,
            note,
            project,
        } => {
            let handler = SaveMoodHandler::new(client, notifier);
            let command = SaveMood {
                scope: scope(project),
                mood,
                note,
            };
            // handler 已经发出通知
            Ok(handler.handle(command).await.is_ok())
        }
        MoodAction::History { project } => {
            let handler = GetMoodHistoryHandler::new(client);
            match handler.handle(GetMoodHistory { scope: scope(project) }).await {
                Ok(entries) => {
                    if entries.is_empty() {
                        println!("No moods recorded yet");
                    }
                    for entry in entries {
                        match entry.note() {
                            Some(note) => println!("{}  {:<10}  {}", entry.date(), entry.label(), note),
                            None => println!("{}  {}", entry.date(), entry.label()),
                        }
                    }
                    Ok(true)
                }
                Err(e) => {
                    report(notifier.as_ref(), &e, "Error loading mood history");
                    Ok(false)
                }
            }
        }
        MoodAction::Streak { project } => {
            let handler = GetMoodStreakHandler::new(client);
            let query = GetMoodStreak {
                scope: scope(project),
                today,
            };
            match handler.handle(query).await {
                Ok(response) => {
                    println!("{} day streak ({:?})", response.streak.days, response.streak.tier);
                    match response.today_entry {
                        Some(entry) => println!("Today: {}", entry.label()),
                        None => println!("No mood recorded today"),
                    }
                    Ok(true)
                }
                Err(e) => {
                    report(notifier.as_ref(), &e, "Error loading mood history");
                    Ok(false)
                }
            }
        }
    }
}

async fn projects(
    config: &AppConfig,
    notifier: Arc<dyn NotifierPort>,
    action: ProjectsAction,
) -> anyhow::Result<bool> {
    let client = api_client(config)?;

    match action {
        ProjectsAction::List => match ListProjectsHandler::new(client).handle(ListProjects).await {
            Ok(projects) => {
                for project in projects {
                    let status = project
                        .status()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|e| e.to_string());
                    let created = project
                        .created_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{}  {}  {}  {} chapters  {}",
                        project.id, created, project.name, project.chapter_count, status
                    );
                }
                Ok(true)
            }
            Err(e) => {
                report(notifier.as_ref(), &e, "Error loading projects");
                Ok(false)
            }
        },
        ProjectsAction::Delete { project_id } => {
            let handler = DeleteProjectHandler::new(client, notifier);
            Ok(handler.handle(DeleteProject { project_id }).await.is_ok())
        }
    }
}

async fn ai_status(config: &AppConfig, notifier: Arc<dyn NotifierPort>) -> anyhow::Result<bool> {
    let client = api_client(config)?;

    match CheckAiProviderHandler::new(client).handle(CheckAiProvider).await {
        Ok(status) => {
            println!("Provider: {} ({})", status.provider_name, status.provider);
            println!("Model:    {}", status.model);
            println!("Status:   {}", status.status);
            Ok(status.is_ready())
        }
        Err(e) => {
            report(notifier.as_ref(), &e, "Error checking AI provider status");
            Ok(false)
        }
    }
}

fn draft(
    config: &AppConfig,
    notifier: Arc<dyn NotifierPort>,
    action: DraftAction,
) -> anyhow::Result<bool> {
    if let Some(parent) = config.autosave.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = SledKeyValueStore::open(&config.autosave.db_path)?.arc();
    let form = |form_id: String| {
        FormAutosave::new(form_id, store.clone(), notifier.clone(), config.autosave.debounce())
    };

    match action {
        DraftAction::Save { form_id, fields } => {
            let mut draft = form(form_id.clone()).restore()?.unwrap_or_default();
            for field in fields {
                let Some((name, value)) = field.split_once('=') else {
                    notifier.notify(Notification::error(format!(
                        "Expected name=value, got: {}",
                        field
                    )));
                    return Ok(false);
                };
                draft.set(name.trim(), value);
            }
            form(form_id).flush(&draft)?;
            store.flush()?;
            Ok(true)
        }
        DraftAction::Show { form_id } => {
            match form(form_id).restore()? {
                Some(draft) => println!("{}", serde_json::to_string_pretty(&draft)?),
                None => println!("No saved draft"),
            }
            Ok(true)
        }
        DraftAction::Clear { form_id } => {
            if !form(form_id).clear()? {
                println!("No saved draft");
            }
            store.flush()?;
            Ok(true)
        }
        DraftAction::Check { form_id, required } => {
            let form = form(form_id);
            let draft = form.restore()?.unwrap_or_else(FormDraft::new);
            let required: Vec<&str> = required.iter().map(String::as_str).collect();
            Ok(form.validate(&draft, &required).is_ok())
        }
    }
}
