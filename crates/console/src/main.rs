// crates/console/src/main.rs
//! Aibys operator console.
//!
//! Triggers AI blog generation/regeneration against the portfolio API and
//! stays in the foreground tracking the resulting background jobs: progress
//! bars in the corner, toasts above them, non-zero exit if a job fails.

mod indicator;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aibys_console_client::{bulk_reject, generate_blogs, reject_blog, ApiClient};
use aibys_console_tracker::{BlogSource, EventBus, JobTracker, Watcher, WatcherConfig};
use aibys_console_types::{AppEvent, Blog, JobSnapshot, JobStatus};

use crate::indicator::Indicator;

#[derive(Parser)]
#[command(name = "aibys-console", version, about = "Operator console for Aibys AI blog jobs")]
struct Cli {
    /// Base URL of the portfolio API.
    #[arg(long, env = "AIBYS_API_URL", default_value = "http://localhost:8080/api")]
    api_url: String,

    /// Bearer token for admin endpoints.
    #[arg(long, env = "AIBYS_API_TOKEN")]
    token: Option<String>,

    /// Seconds between completion polls.
    #[arg(long, default_value_t = 5)]
    poll_interval: u64,

    /// Seconds before a stuck background job is declared failed.
    #[arg(long, default_value_t = 600)]
    job_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask Aibys to write new blog posts about a keyword.
    Generate {
        #[arg(long, default_value = "")]
        keyword: String,
        /// How many posts to write (1-10).
        #[arg(long, default_value_t = 1)]
        total: u32,
    },
    /// Reject one post with a review comment.
    Reject {
        id: i64,
        #[arg(long)]
        comment: String,
    },
    /// Reject several posts in one bulk action.
    BulkReject {
        ids: Vec<i64>,
        #[arg(long)]
        comment: String,
    },
    /// Show blog stats and the pending AI queue, then exit.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let api = Arc::new(ApiClient::new(&cli.api_url, cli.token.clone())?);

    if let Command::Status = cli.command {
        return print_status(&api).await;
    }

    let tracker = Arc::new(JobTracker::new());
    let bus = EventBus::new();

    // Subscribe before triggering so no toast or snapshot is missed.
    let snaps_rx = tracker.subscribe();
    let events_rx = bus.subscribe();

    Watcher::new(
        Arc::clone(&tracker),
        bus.clone(),
        Arc::clone(&api) as Arc<dyn BlogSource>,
        WatcherConfig {
            poll_interval: Duration::from_secs(cli.poll_interval),
            job_timeout: Duration::from_secs(cli.job_timeout),
        },
    )
    .spawn();

    let trigger = run_trigger(&cli.command, &api, &tracker, &bus).await;

    let mut indicator = Indicator::new();
    let mut events_rx = events_rx;
    drain_toasts(&indicator, &mut events_rx);

    if let Err(e) = trigger {
        tracing::error!("trigger failed: {e}");
        return Err(e);
    }

    watch_until_idle(&tracker, snaps_rx, events_rx, &mut indicator).await
}

async fn run_trigger(
    command: &Command,
    api: &ApiClient,
    tracker: &JobTracker,
    bus: &EventBus,
) -> Result<()> {
    match command {
        Command::Generate { keyword, total } => {
            generate_blogs(api, tracker, bus, keyword, *total).await?;
        }
        Command::Reject { id, comment } => {
            let target = api.get_blog(*id).await?;
            reject_blog(api, tracker, bus, &target, comment).await?;
        }
        Command::BulkReject { ids, comment } => {
            let selection: Vec<Blog> = api
                .list_blogs(None)
                .await?
                .into_iter()
                .filter(|b| ids.contains(&b.id))
                .collect();
            if selection.is_empty() {
                anyhow::bail!("tidak ada blog dengan id {ids:?}");
            }
            bulk_reject(api, tracker, bus, &selection, comment).await?;
        }
        Command::Status => unreachable!("handled before the tracker is built"),
    }
    Ok(())
}

/// Render snapshots and toasts until no job is running, then exit by job
/// outcome.
async fn watch_until_idle(
    tracker: &JobTracker,
    mut snaps_rx: tokio::sync::broadcast::Receiver<JobSnapshot>,
    mut events_rx: tokio::sync::broadcast::Receiver<AppEvent>,
    indicator: &mut Indicator,
) -> Result<()> {
    for snap in tracker.active_jobs() {
        indicator.apply(&snap);
    }

    let mut tick = tokio::time::interval(Duration::from_millis(500));
    loop {
        tokio::select! {
            result = snaps_rx.recv() => {
                if let Ok(snap) = result {
                    indicator.apply(&snap);
                }
            }
            result = events_rx.recv() => {
                if let Ok(event) = result {
                    indicator.toast(&event);
                }
            }
            _ = tick.tick() => {
                if tracker.active_jobs().is_empty() {
                    break;
                }
            }
        }
    }

    let failed = tracker
        .all_jobs()
        .iter()
        .filter(|s| s.status == JobStatus::Failed)
        .count();
    if failed > 0 {
        anyhow::bail!("{failed} job gagal");
    }
    Ok(())
}

fn drain_toasts(indicator: &Indicator, rx: &mut tokio::sync::broadcast::Receiver<AppEvent>) {
    while let Ok(event) = rx.try_recv() {
        indicator.toast(&event);
    }
}

async fn print_status(api: &ApiClient) -> Result<()> {
    let stats = api.blog_stats().await?;
    println!(
        "blog: {} total — {} pending, {} published, {} rejected, {} archived",
        stats.total, stats.pending, stats.published, stats.rejected, stats.archived
    );

    let pending_ai: Vec<Blog> = api
        .list_blogs(None)
        .await?
        .into_iter()
        .filter(|b| b.is_ai() && matches!(b.status, aibys_console_types::BlogStatus::Pending))
        .collect();
    if pending_ai.is_empty() {
        println!("antrian AI kosong");
    } else {
        println!("menunggu review ({}):", pending_ai.len());
        for blog in pending_ai {
            println!("  #{} {}", blog.id, blog.title);
        }
    }
    Ok(())
}
