//! notesmith CLI - binary entry point.
//!
//! Stands in for the editor host: the file named on the command line is the
//! active document, stdin is the instruction prompt, and stderr is the
//! notice area.
//!
//! ```text
//! main() -> init_tracing() -> NotesmithConfig::load()
//!        -> refine: FileDocument + LineInput/PresetInput + TerminalNotices
//!                   -> RequestOrchestrator::run() -> save on Applied
//!        -> config: show / path / set-key / set-model
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    process::ExitCode,
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use notesmith_cli::commands::{self, ConfigCommand, RefineArgs};
use notesmith_config::NotesmithConfig;
use notesmith_engine::{Notice, NotificationSink};

#[derive(Parser, Debug)]
#[command(name = "notesmith", version, about = "Refine notes in place with Gemini")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a document (or some of its lines) to Gemini and replace it with the result
    Refine(RefineArgs),
    /// Inspect or edit the configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // Stderr is the notice area; no log file means no logs.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: next to the config file (~/.notesmith/logs/notesmith.log)
    if let Some(config_path) = NotesmithConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("notesmith.log"));
    }

    // Fallback: ./.notesmith/logs/notesmith.log
    candidates.push(PathBuf::from(".notesmith").join("logs").join("notesmith.log"));

    candidates
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let mut notices = commands::terminal_notices();

    let config = match NotesmithConfig::load() {
        Ok(config) => config,
        Err(err) => {
            notices.notify(&Notice::ConfigUnreadable {
                message: err.to_string(),
            });
            None
        }
    };
    let credential = NotesmithConfig::resolve(config.as_ref());

    let setting_key = matches!(cli.command, Commands::Config(ConfigCommand::SetKey { .. }));
    if !credential.has_secret() && !setting_key {
        notices.notify(&Notice::ApiKeyNotConfigured);
    }

    match cli.command {
        Commands::Refine(args) => commands::refine(args, credential, &mut notices).await,
        Commands::Config(command) => commands::config(command, config.as_ref()),
    }
}
