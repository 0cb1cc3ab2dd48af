//! Command-line front end for the FocusFlow core.
//!
//! # Responsibility
//! - Resolve configuration from flags and `FOCUSFLOW_*` variables.
//! - Run backup/restore and quick inspection against the local store.

use clap::{Parser, Subcommand};
use focusflow_core::{
    backup_file_name, core_version, init_logging, ping, CoreConfig, FocusFlow, SharedStore,
    SnapshotService, SqliteStore,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "focusflow", version, about = "Tasks, time blocks and goals stored locally")]
struct Cli {
    /// SQLite file backing the store. Overrides `FOCUSFLOW_DB_PATH`.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Log level. Overrides `FOCUSFLOW_LOG_LEVEL`.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Overrides `FOCUSFLOW_LOG_DIR`;
    /// logging is off when neither is set.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the core links and report its version.
    Ping,
    /// Write every collection to a JSON backup file.
    Export {
        /// Defaults to `focusflow-backup-<today>.json` in the current directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Restore collections from a JSON backup file.
    Import { path: PathBuf },
    /// Print how many records each collection holds.
    Summary,
}

impl Cli {
    /// Environment-resolved configuration with explicit flags applied on top.
    fn config(&self) -> CoreConfig {
        self.apply_flags(CoreConfig::from_env())
    }

    fn apply_flags(&self, base: CoreConfig) -> CoreConfig {
        CoreConfig {
            db_path: self.db.clone().unwrap_or(base.db_path),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            log_dir: self.log_dir.clone().or(base.log_dir),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_command module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &CoreConfig) -> Result<(), String> {
    match command {
        Command::Ping => {
            println!("focusflow_core ping={}", ping());
            println!("focusflow_core version={}", core_version());
            Ok(())
        }
        Command::Export { out } => {
            let text = SnapshotService::new(open_store(config)?)
                .export_snapshot()
                .await
                .map_err(|err| err.to_string())?;
            let path = out.unwrap_or_else(|| {
                PathBuf::from(backup_file_name(chrono::Local::now().date_naive()))
            });
            std::fs::write(&path, text)
                .map_err(|err| format!("cannot write `{}`: {err}", path.display()))?;
            println!("exported to {}", path.display());
            Ok(())
        }
        Command::Import { path } => {
            let text = std::fs::read_to_string(&path)
                .map_err(|err| format!("cannot read `{}`: {err}", path.display()))?;
            if !SnapshotService::new(open_store(config)?)
                .import_snapshot(&text)
                .await
            {
                return Err(format!("`{}` is not a valid backup", path.display()));
            }
            println!("imported {}", path.display());
            Ok(())
        }
        Command::Summary => {
            let app = FocusFlow::start(open_store(config)?).await;
            println!("tasks={}", app.tasks.len());
            println!("time_blocks={}", app.time_blocks.len());
            println!("goals={}", app.goals.len());
            Ok(())
        }
    }
}

fn open_store(config: &CoreConfig) -> Result<SharedStore, String> {
    let store = SqliteStore::open(&config.db_path)
        .map_err(|err| format!("cannot open store `{}`: {err}", config.db_path.display()))?;
    Ok(Arc::new(store))
}
