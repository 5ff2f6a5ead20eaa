//! Subcommand handlers.

use std::io::{self, IsTerminal, Stderr};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use notesmith_config::NotesmithConfig;
use notesmith_engine::{
    GeminiClient, GeminiModel, GenerationClient, GenerationCredential, InputCollector,
    NotificationSink, RequestOrchestrator, RequestOutcome,
};

use crate::document::{FileDocument, LineRange};
use crate::terminal::{LineInput, PresetInput, TerminalNotices};

#[derive(Args, Debug)]
pub struct RefineArgs {
    /// Document to refine in place
    pub file: PathBuf,

    /// Only send these lines (1-based, inclusive), e.g. 3:10
    #[arg(long, value_name = "START:END")]
    pub lines: Option<LineRange>,

    /// Refinement instructions; asked for interactively when omitted
    #[arg(long, short = 'i', value_name = "TEXT")]
    pub instructions: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the resolved configuration (the key is never shown)
    Show,
    /// Print the config file location
    Path,
    /// Store the Gemini API key
    SetKey {
        key: String,
    },
    /// Choose the Gemini model (full id, `flash` or `pro`)
    SetModel {
        #[arg(value_parser = parse_model)]
        model: GeminiModel,
    },
}

fn parse_model(raw: &str) -> Result<GeminiModel, String> {
    GeminiModel::parse(raw).map_err(|e| e.to_string())
}

#[must_use]
pub fn terminal_notices() -> TerminalNotices<Stderr> {
    let stderr = io::stderr();
    let clear_on_dismiss = stderr.is_terminal();
    TerminalNotices::new(stderr, clear_on_dismiss)
}

pub async fn refine(
    mut args: RefineArgs,
    credential: GenerationCredential,
    notices: &mut TerminalNotices<Stderr>,
) -> Result<ExitCode> {
    let client = GeminiClient::new();
    let outcome = match args.instructions.take() {
        Some(text) => {
            let mut input = PresetInput::new(text);
            refine_with(args, credential, client, &mut input, notices).await?
        }
        None => {
            let mut input = LineInput::new(io::stdin().lock(), io::stderr());
            refine_with(args, credential, client, &mut input, notices).await?
        }
    };
    Ok(exit_code(&outcome))
}

/// Run one refinement of `args.file` through `client`, saving the document
/// when the result was applied.
///
/// Without a usable key nothing is read from disk; the request fails on the
/// credential before the file or `--lines` are looked at.
pub async fn refine_with<G, I, N>(
    args: RefineArgs,
    credential: GenerationCredential,
    client: G,
    input: &mut I,
    notices: &mut N,
) -> Result<RequestOutcome>
where
    G: GenerationClient,
    I: InputCollector,
    N: NotificationSink,
{
    let orchestrator = RequestOrchestrator::new(client);

    if !credential.has_secret() {
        let report = orchestrator
            .run(credential, input, &mut None::<FileDocument>, notices)
            .await;
        return Ok(report.outcome);
    }

    let mut document = FileDocument::open(&args.file)?;
    if let (Some(document), Some(lines)) = (document.as_mut(), args.lines) {
        document.select_lines(lines)?;
    }

    let report = orchestrator
        .run(credential, input, &mut document, notices)
        .await;

    if report.outcome == RequestOutcome::Applied
        && let Some(document) = document.as_ref()
        && document.is_modified()
    {
        document.save()?;
    }

    tracing::info!(
        outcome = report.outcome.as_str(),
        transitions = report.transitions.len(),
        "Refine finished"
    );
    Ok(report.outcome)
}

/// Only failures exit non-zero; a cancelled or empty request is not an error.
#[must_use]
pub fn exit_code(outcome: &RequestOutcome) -> ExitCode {
    if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

pub fn config(command: ConfigCommand, config: Option<&NotesmithConfig>) -> Result<ExitCode> {
    match command {
        ConfigCommand::Show => {
            let credential = NotesmithConfig::resolve(config);
            let path = NotesmithConfig::path()
                .map_or_else(|| "<unavailable>".to_string(), |p| p.display().to_string());
            let model = credential.model();
            println!("path: {path}");
            println!("model: {} ({})", model.model_id(), model.display_name());
            println!(
                "api_key: {}",
                if credential.has_secret() {
                    "configured"
                } else {
                    "not configured"
                }
            );
        }
        ConfigCommand::Path => match NotesmithConfig::path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("could not determine config path (no home directory)"),
        },
        ConfigCommand::SetKey { key } => {
            if key.trim().is_empty() {
                bail!("API key cannot be empty");
            }
            let path = NotesmithConfig::persist_api_key(key.trim())?;
            println!("Saved API key to {}", path.display());
        }
        ConfigCommand::SetModel { model } => {
            let path = NotesmithConfig::persist_model(model)?;
            println!("Saved model {} to {}", model.model_id(), path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}
