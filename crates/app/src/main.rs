use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use services::{AppServices, Clock, ProgressService, ProgressServiceError};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;
use tracker_core::model::{DoneChange, ProgressUpdate};

mod render;

#[derive(Parser, Debug)]
#[command(name = "tracker", version)]
#[command(about = "Track progress through a day-by-day learning syllabus", long_about = None)]
struct Cli {
    /// SQLite database URL or file path
    #[arg(
        long,
        global = true,
        env = "TRACKER_DB_URL",
        default_value = "sqlite:instance/progress.db"
    )]
    db: String,

    /// Syllabus JSON file
    #[arg(
        long,
        global = true,
        env = "TRACKER_SYLLABUS",
        default_value = "data/syllabus.json"
    )]
    syllabus: PathBuf,

    /// Print views as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Create or upgrade the database schema
    InitDb,
    /// Show today's day, XP, streak and badges (default)
    Today,
    /// List every syllabus day with its state
    Syllabus,
    /// Show a single day
    Day { day: u32 },
    /// Update a day's progress, then show it
    Update {
        day: u32,
        /// Flip the done flag
        #[arg(long, conflicts_with = "done")]
        toggle: bool,
        /// Set the done flag explicitly
        #[arg(long)]
        done: Option<bool>,
        /// Notes for the day; left out, the notes are cleared
        #[arg(long)]
        notes: Option<String>,
        /// Whether the warm-up was done; left out, it is recorded as not done
        #[arg(long)]
        warmup: Option<bool>,
        /// Only change the fields given and keep the stored notes and warm-up
        #[arg(long)]
        partial: bool,
    },
    /// Show XP, streak, completion and upcoming days
    Progress,
    /// List unlocked badges
    Badges,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:"
        || trimmed.starts_with("sqlite://")
        || trimmed.contains("mode=memory")
    {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// SQLite creates the database file but not its directory.
fn ensure_db_dir(db_url: &str) -> anyhow::Result<()> {
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn format_view<T: Serialize>(
    json: bool,
    view: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(view)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(text(view))
    }
}

/// Map `update` flags onto a progress update.
///
/// By default this is a full day submission: missing notes are stored as
/// empty and a missing warm-up as not done. With `partial` the missing
/// fields keep their stored values.
fn build_update(
    toggle: bool,
    done: Option<bool>,
    notes: Option<String>,
    warmup: Option<bool>,
    partial: bool,
) -> ProgressUpdate {
    let done = match (toggle, done) {
        (true, _) => DoneChange::Toggle,
        (false, Some(value)) => DoneChange::Set(value),
        (false, None) => DoneChange::Keep,
    };
    if partial {
        return ProgressUpdate {
            done,
            notes,
            warmup_done: warmup,
        };
    }
    ProgressUpdate {
        done,
        notes: Some(notes.unwrap_or_default()),
        warmup_done: Some(warmup.unwrap_or(false)),
    }
}

async fn run_command(
    progress: &ProgressService,
    command: Command,
    json: bool,
) -> Result<String, CommandError> {
    let out = match command {
        Command::InitDb => String::new(),
        Command::Today => {
            let view = progress.dashboard().await?;
            format_view(json, &view, render::render_dashboard)?
        }
        Command::Syllabus => {
            let entries = progress.syllabus_overview().await?;
            format_view(json, &entries, |e| render::render_syllabus(e))?
        }
        Command::Day { day } => {
            let view = progress.day_view(day).await?;
            format_view(json, &view, render::render_day)?
        }
        Command::Update {
            day,
            toggle,
            done,
            notes,
            warmup,
            partial,
        } => {
            progress
                .update_day(day, build_update(toggle, done, notes, warmup, partial))
                .await?;
            let view = progress.day_view(day).await?;
            format_view(json, &view, render::render_day)?
        }
        Command::Progress => {
            let view = progress.summary().await?;
            format_view(json, &view, render::render_summary)?
        }
        Command::Badges => {
            let badges = progress.badges().await?;
            format_view(json, &badges, |b| render::render_badges(b))?
        }
    };
    Ok(out)
}

#[derive(Debug)]
enum CommandError {
    Service(ProgressServiceError),
    Other(anyhow::Error),
}

impl From<ProgressServiceError> for CommandError {
    fn from(err: ProgressServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err)
    }
}

const INVALID_DAY_MESSAGE: &str = "Invalid day number.";

/// What a finished command writes and how the process exits.
#[derive(Debug)]
struct Outcome {
    stdout: String,
    stderr: Option<&'static str>,
    exit_code: u8,
}

/// Run a command, turning a rejected day number into the dashboard plus a
/// failing exit code, like the day page redirecting home.
async fn execute(
    progress: &ProgressService,
    command: Command,
    json: bool,
) -> anyhow::Result<Outcome> {
    match run_command(progress, command, json).await {
        Ok(stdout) => Ok(Outcome {
            stdout,
            stderr: None,
            exit_code: 0,
        }),
        Err(CommandError::Service(ProgressServiceError::InvalidDayNumber { day, total })) => {
            tracing::warn!(day, total, "rejected invalid day number");
            let view = progress.dashboard().await?;
            Ok(Outcome {
                stdout: format_view(json, &view, render::render_dashboard)?,
                stderr: Some(INVALID_DAY_MESSAGE),
                exit_code: 1,
            })
        }
        Err(CommandError::Service(err)) => Err(err.into()),
        Err(CommandError::Other(err)) => Err(err),
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let db_url = normalize_sqlite_url(&cli.db);
    ensure_db_dir(&db_url)?;

    let command = cli.command.unwrap_or(Command::Today);
    if matches!(command, Command::InitDb) {
        Storage::sqlite(&db_url)
            .await
            .with_context(|| format!("failed to initialize {db_url}"))?;
        println!("Initialized the database.");
        return Ok(ExitCode::SUCCESS);
    }

    let services = AppServices::new_sqlite(&db_url, &cli.syllabus, Clock::system())
        .await
        .with_context(|| {
            format!(
                "failed to start with db {db_url} and syllabus {}",
                cli.syllabus.display()
            )
        })?;
    let outcome = execute(&services.progress(), command, cli.json).await?;
    if let Some(message) = outcome.stderr {
        eprintln!("{message}");
    }
    print!("{}", outcome.stdout);
    Ok(ExitCode::from(outcome.exit_code))
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            // At this layer (binary glue), printing once is fine.
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
