//! Presentation adapter for the task store.
//!
//! # Responsibility
//! - Forward add/rename/delete intents to `tasklist_core`.
//! - Re-read and render the full task list after every mutation; the store
//!   is the source of truth, the rendered list is a disposable copy.
//!
//! # Invariants
//! - Store-open failure is fatal at startup; nothing works without storage.
//! - Mutation failures are recoverable: print a hint, exit non-zero.

use clap::{Parser, Subcommand};
use log::warn;
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist_core::db::{close_db, open_db};
use tasklist_core::{
    default_log_level, init_logging, RepoError, SqliteTaskRepository, Task, TaskService,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tasklist", version, about = "Single-user to-do list over a local store")]
struct Cli {
    /// Path of the SQLite database file.
    #[arg(long, default_value = "tasklist.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the current task list.
    List,
    /// Create a new task.
    Add { title: String },
    /// Change the title of an existing task.
    Rename { id: Uuid, title: String },
    /// Remove a task.
    Delete { id: Uuid },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        if let Err(message) = init_logging(level, log_dir) {
            // Diagnostics are optional; the task list still works without them.
            eprintln!("warning: logging disabled: {message}");
        }
    }

    // No store, no app: treat open failure as fatal at startup.
    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("error: cannot open task store at `{}`: {err}", cli.db.display());
            return ExitCode::from(2);
        }
    };

    let outcome = {
        let service = TaskService::new(SqliteTaskRepository::new(&conn));
        run(&cli.command, &service)
    };

    if let Err(err) = close_db(conn) {
        warn!("event=app_shutdown module=cli status=error error={err}");
        eprintln!("warning: failed to close task store cleanly: {err}");
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command, service: &TaskService<SqliteTaskRepository<'_>>) -> Result<(), RepoError> {
    match command {
        Command::List => {}
        Command::Add { title } => {
            let task = service.create(title.as_str())?;
            println!("added {}", task.id);
        }
        Command::Rename { id, title } => {
            service.rename(*id, title)?;
            println!("renamed {id}");
        }
        Command::Delete { id } => {
            service.delete(*id)?;
            println!("deleted {id}");
        }
    }

    // Always re-read after a mutation; never render from local state.
    render_tasks(&service.list_all()?);
    Ok(())
}

fn render_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }

    for (index, task) in tasks.iter().enumerate() {
        println!("{:>3}. {}  {}", index + 1, task.id, task.title);
    }
}

fn report_error(err: &RepoError) {
    eprintln!("error: {err}");
    match err {
        RepoError::Validation(_) => {
            eprintln!("hint: enter a non-empty title");
        }
        RepoError::NotFound(_) => {
            eprintln!("hint: the task list may be out of date; run `tasklist list`");
        }
        RepoError::Db(_) | RepoError::InvalidData(_) => {}
    }
}
