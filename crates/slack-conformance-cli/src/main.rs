// crates/slack-conformance-cli/src/main.rs
// ============================================================================
// Module: Slack Conformance CLI Entry Point
// Description: Command dispatcher for listing and running contract cases.
// Purpose: Load configuration, run the suite, and emit reports.
// Dependencies: clap, serde, serde_jcs, slack-conformance-config,
// slack-conformance-core, thiserror, tokio.
// ============================================================================

//! ## Overview
//! `slack-conformance list` prints the case catalog. `slack-conformance run`
//! loads configuration, runs the selected cases in order and prints the report.
//! The exit code is success only when every selected case passed.
//! Invariants:
//! - Unknown case ids are rejected before configuration is loaded or any
//!   request is sent.
//! - Output never includes the bearer token.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use slack_conformance_config::SuiteConfig;
use slack_conformance_core::CaseId;
use slack_conformance_core::EventSink;
use slack_conformance_core::JsonLineSink;
use slack_conformance_core::NoopSink;
use slack_conformance_core::SuiteReport;
use slack_conformance_core::TranscriptEntry;
use slack_conformance_core::run_suite;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Canonical JSON report file name.
const REPORT_JSON: &str = "report.json";
/// Markdown report file name.
const REPORT_MARKDOWN: &str = "report.md";
/// Transcript file name.
const TRANSCRIPT_JSON: &str = "transcript.json";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "slack-conformance", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the contract cases.
    List(ListCommand),
    /// Run contract cases against the configured service.
    Run(RunCommand),
}

/// Arguments for the `list` command.
#[derive(Args, Debug)]
struct ListCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Optional config file path (defaults to `SLACK_CONFORMANCE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Case ids to run (repeatable or comma-separated; defaults to all).
    #[arg(long = "case", value_name = "ID", value_delimiter = ',')]
    cases: Vec<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Directory that receives report and transcript files.
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,
    /// Stream JSON-line progress events to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    events: bool,
}

/// Output formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Canonical JSON.
    Json,
}

/// Catalog entry printed by `list --format json`.
#[derive(Debug, Serialize)]
struct CaseListing {
    /// Case id.
    id: &'static str,
    /// API method name.
    method: &'static str,
    /// Request path.
    path: &'static str,
    /// One-line description.
    description: &'static str,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::List(command) => command_list(&command),
        Commands::Run(command) => command_run(command).await,
    }
}

// ============================================================================
// SECTION: List Command
// ============================================================================

/// Executes the `list` command.
fn command_list(command: &ListCommand) -> CliResult<ExitCode> {
    let output = render_list(command.format)?;
    write_stdout_bytes(output.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Renders the case catalog.
fn render_list(format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for case in CaseId::ALL {
                output.push_str(&format!(
                    "{:<42} {:<30} {}\n",
                    case.as_str(),
                    case.endpoint().path(),
                    case.description()
                ));
            }
            Ok(output)
        }
        OutputFormat::Json => {
            let listings: Vec<CaseListing> = CaseId::ALL
                .iter()
                .map(|case| CaseListing {
                    id: case.as_str(),
                    method: case.endpoint().method(),
                    path: case.endpoint().path(),
                    description: case.description(),
                })
                .collect();
            let mut output = canonical_json(&listings)?;
            output.push('\n');
            Ok(output)
        }
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
async fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let cases = select_cases(&command.cases)?;
    let config = SuiteConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    let client = config.build_client().map_err(|err| CliError::new(err.to_string()))?;
    let params = config.suite_params();
    let sink: Box<dyn EventSink> = if command.events {
        Box::new(JsonLineSink::new(std::io::stderr()))
    } else {
        Box::new(NoopSink)
    };

    let report = run_suite(&client, &params, sink.as_ref(), &cases)
        .await
        .map_err(|err| CliError::new(err.to_string()))?;

    if let Some(dir) = &command.report_dir {
        write_artifacts(dir, &report, &client.transcript())?;
    }
    let output = match command.format {
        OutputFormat::Text => report.to_markdown(),
        OutputFormat::Json => {
            let mut output = canonical_json(&report)?;
            output.push('\n');
            output
        }
    };
    write_stdout_bytes(output.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for sink_error in &report.sink_errors {
        write_stderr_line(&format!("event sink error: {sink_error}"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(if report.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Resolves `--case` values into case ids, keeping first-seen order.
fn select_cases(raw: &[String]) -> CliResult<Vec<CaseId>> {
    if raw.is_empty() {
        return Ok(CaseId::ALL.to_vec());
    }
    let mut selected = Vec::with_capacity(raw.len());
    for value in raw {
        let case = CaseId::parse(value).ok_or_else(|| {
            CliError::new(format!(
                "unknown case id: {} (see `slack-conformance list`)",
                value.trim()
            ))
        })?;
        if !selected.contains(&case) {
            selected.push(case);
        }
    }
    Ok(selected)
}

/// Writes the report and transcript files into `dir`.
fn write_artifacts(
    dir: &Path,
    report: &SuiteReport,
    transcript: &[TranscriptEntry],
) -> CliResult<()> {
    fs::create_dir_all(dir).map_err(|err| {
        CliError::new(format!("failed to create report dir {}: {err}", dir.display()))
    })?;
    let report_json = report.to_canonical_json().map_err(|err| CliError::new(err.to_string()))?;
    let transcript_json = serde_jcs::to_vec(transcript)
        .map_err(|err| CliError::new(format!("failed to serialize transcript: {err}")))?;
    write_file(&dir.join(REPORT_JSON), &report_json)?;
    write_file(&dir.join(REPORT_MARKDOWN), report.to_markdown().as_bytes())?;
    write_file(&dir.join(TRANSCRIPT_JSON), &transcript_json)
}

/// Writes bytes to a file.
fn write_file(path: &Path, bytes: &[u8]) -> CliResult<()> {
    fs::write(path, bytes)
        .map_err(|err| CliError::new(format!("failed to write {}: {err}", path.display())))
}

/// Serializes a value as canonical JSON text.
fn canonical_json<T: Serialize>(value: &T) -> CliResult<String> {
    let bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))?;
    String::from_utf8(bytes)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)?;
    stdout.flush()
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
