//! Task command handlers: wire config and identity into a `ListSession`,
//! run one operation, and render the resulting list.

use std::sync::Arc;

use uuid::Uuid;

use taskchain_core::api::TaskStore;
use taskchain_core::config::AppConfig;
use taskchain_core::identity::{require_owner, StaticIdentity};
use taskchain_core::session::ListSession;
use taskchain_core::list::TaskView;
use taskchain_core::task::{OwnerId, TaskId, TaskStatus};
use taskchain_store::{LocalTaskStore, RestTaskStore};

use crate::commands::cli::{Args, Commands};
use crate::error::CliError;

pub async fn dispatch(args: &Args, cfg: &AppConfig) -> Result<i32, CliError> {
    match &args.command {
        Commands::List => {
            let session = load_session(args, cfg).await?;
            print_list(&session.snapshot());
            Ok(0)
        }
        Commands::Add { title, front } => {
            let title = title.trim();
            if title.is_empty() {
                return Err(CliError::Command("title must not be empty".to_string()));
            }
            let mut session = load_session(args, cfg).await?;
            let created = if *front {
                session.insert_front(title).await?
            } else {
                session.insert_back(title).await?
            };
            println!("added task {}", created.id);
            print_list(&session.snapshot());
            Ok(0)
        }
        Commands::Rm { id } => {
            let mut session = load_session(args, cfg).await?;
            let removed = session.remove(TaskId(*id)).await?;
            if removed {
                println!("removed task {id}");
            } else {
                println!("no task with id {id}");
            }
            print_list(&session.snapshot());
            Ok(0)
        }
        Commands::Status { id, status } => {
            let mut session = load_session(args, cfg).await?;
            session.set_status(TaskId(*id), *status).await?;
            println!("task {id} -> {status}");
            print_list(&session.snapshot());
            Ok(0)
        }
        Commands::Init => unreachable!("init is dispatched before session setup"),
    }
}

/// Resolve identity, build the store, and materialize the owner's list.
async fn load_session(args: &Args, cfg: &AppConfig) -> Result<ListSession, CliError> {
    let owner = resolve_owner(args, cfg)?;
    let store: Arc<dyn TaskStore> = if args.local {
        Arc::new(LocalTaskStore::new())
    } else {
        Arc::new(RestTaskStore::from_config(&cfg.backend).map_err(|e| CliError::Config(e.to_string()))?)
    };
    tracing::debug!(store = store.name(), owner = %owner, "session starting");

    let mut session = ListSession::new(store, owner);
    session.load().await?;
    Ok(session)
}

/// Flag > config. Local mode mints an ephemeral identity when none is
/// given; remote mode rejects unauthenticated use before any call.
fn resolve_owner(args: &Args, cfg: &AppConfig) -> Result<OwnerId, CliError> {
    let configured = match &args.owner {
        Some(uuid) => Some(OwnerId(*uuid)),
        None => parse_config_owner(cfg)?,
    };

    if configured.is_none() && args.local {
        let ephemeral = OwnerId(Uuid::new_v4());
        tracing::info!(owner = %ephemeral, "local mode with no owner, using ephemeral identity");
        return Ok(ephemeral);
    }

    Ok(require_owner(&StaticIdentity(configured))?)
}

fn parse_config_owner(cfg: &AppConfig) -> Result<Option<OwnerId>, CliError> {
    let Some(raw) = cfg.owner_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let uuid = Uuid::parse_str(raw)
        .map_err(|e| CliError::Config(format!("owner_id is not a valid UUID: {e}")))?;
    Ok(Some(OwnerId(uuid)))
}

fn print_list(views: &[TaskView]) {
    if views.is_empty() {
        println!("(no tasks)");
        return;
    }
    println!("{:>6}  {:<12} TITLE", "ID", "STATUS");
    for view in views {
        println!("{:>6}  {:<12} {}", view.id, status_label(view.status), view.title);
    }
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in-progress",
        TaskStatus::Done => "done",
    }
}
