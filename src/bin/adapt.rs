//! adapt CLI - Command-line interface for adaptive profiling
//!
//! Commands:
//! - classify: Classify a pair of expand/collapse counts
//! - replay: Replay an interaction log and classify the result
//! - run: Interactive session reading interactions from stdin

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use adaptive_profile::encoder::AdaptationEncoder;
use adaptive_profile::types::AdaptationReport;
use adaptive_profile::{
    AdaptError, AdaptiveSession, InteractionKind, InteractionLogAdapter, ProfileClassifier,
    SessionCounters, ADAPT_VERSION, DEFAULT_EXPERT_THRESHOLD,
};

/// adapt - Infer a presentation profile from expand/collapse interactions
#[derive(Parser)]
#[command(name = "adapt")]
#[command(version = ADAPT_VERSION)]
#[command(about = "Infer an Expert or Beginner profile from interaction behavior", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify expand/collapse counts directly
    Classify {
        /// Number of expand interactions
        #[arg(long, default_value = "0")]
        expand: u64,

        /// Number of collapse interactions
        #[arg(long, default_value = "0")]
        collapse: u64,

        /// Detail ratio that must be exceeded for the Expert profile
        #[arg(long, default_value_t = DEFAULT_EXPERT_THRESHOLD)]
        threshold: f64,

        /// Output the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay an interaction log and classify the result
    Replay {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,

        /// Detail ratio that must be exceeded for the Expert profile
        #[arg(long, default_value_t = DEFAULT_EXPERT_THRESHOLD)]
        threshold: f64,
    },

    /// Interactive session: read `expand`, `collapse`, `adapt`, `status` from stdin
    Run {
        /// Detail ratio that must be exceeded for the Expert profile
        #[arg(long, default_value_t = DEFAULT_EXPERT_THRESHOLD)]
        threshold: f64,

        /// Print adaptation reports as JSON lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one interaction per line)
    Ndjson,
    /// JSON array of interactions
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON report
    Json,
    /// Pretty-printed JSON report
    JsonPretty,
    /// Human-readable profile label
    Text,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AdaptCliError> {
    match cli.command {
        Commands::Classify {
            expand,
            collapse,
            threshold,
            json,
        } => cmd_classify(expand, collapse, threshold, json),

        Commands::Replay {
            input,
            input_format,
            output_format,
            threshold,
        } => cmd_replay(&input, input_format, output_format, threshold),

        Commands::Run { threshold, json } => cmd_run(threshold, json),
    }
}

fn cmd_classify(
    expand: u64,
    collapse: u64,
    threshold: f64,
    json: bool,
) -> Result<(), AdaptCliError> {
    let classifier = ProfileClassifier::with_threshold(threshold)?;
    let counters = SessionCounters::new(expand, collapse);
    let profile = classifier.classify(&counters)?;

    if json {
        let encoder = AdaptationEncoder::new();
        let session_id = Uuid::new_v4().to_string();
        println!(
            "{}",
            encoder.encode_to_json(&session_id, counters, classifier.threshold(), profile)?
        );
    } else {
        println!("{}", profile);
    }

    Ok(())
}

fn cmd_replay(
    input: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    threshold: f64,
) -> Result<(), AdaptCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let report = replay_log(&input_data, &input_format, threshold)?;

    println!("{}", format_report(&report, &output_format)?);
    Ok(())
}

fn replay_log(
    input_data: &str,
    input_format: &InputFormat,
    threshold: f64,
) -> Result<AdaptationReport, AdaptCliError> {
    let kinds = match input_format {
        InputFormat::Ndjson => InteractionLogAdapter::parse_ndjson(input_data)?,
        InputFormat::Json => InteractionLogAdapter::parse_array(input_data)?,
    };

    let mut session = AdaptiveSession::with_threshold(threshold)?;
    session.record_all(kinds);
    Ok(session.adapt()?)
}

fn cmd_run(threshold: f64, json: bool) -> Result<(), AdaptCliError> {
    let mut session = AdaptiveSession::with_threshold(threshold)?;
    let interactive = atty::is(atty::Stream::Stdin);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if interactive {
        writeln!(
            stdout,
            "Commands: expand (e), collapse (c), adapt, status, quit"
        )?;
        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        match trimmed.to_ascii_lowercase().as_str() {
            "" => {}
            "quit" | "exit" => break,
            "status" => {
                let counters = session.counters();
                writeln!(
                    stdout,
                    "expand={} collapse={}",
                    counters.expand_count, counters.collapse_count
                )?;
            }
            "adapt" => match session.adapt() {
                Ok(report) => {
                    let format = if json {
                        OutputFormat::Json
                    } else {
                        OutputFormat::Text
                    };
                    writeln!(stdout, "{}", format_report(&report, &format)?)?;
                }
                // Advisory only; keep the session going
                Err(e) if e.is_insufficient_data() => writeln!(stdout, "{}", e)?,
                Err(e) => return Err(e.into()),
            },
            other => match other.parse::<InteractionKind>() {
                Ok(kind) => session.record(kind),
                Err(e) => {
                    if !interactive {
                        return Err(e.into());
                    }
                    writeln!(stdout, "{}", e)?;
                }
            },
        }

        if interactive {
            write!(stdout, "> ")?;
        }
        stdout.flush()?;
    }

    Ok(())
}

// Helper functions

fn format_report(
    report: &AdaptationReport,
    format: &OutputFormat,
) -> Result<String, AdaptCliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(format!(
            "Current profile: {} (detail ratio {:.2} over {} interactions)",
            report.label, report.detail_ratio, report.total_interactions
        )),
    }
}

// Error types

#[derive(Debug)]
enum AdaptCliError {
    Io(io::Error),
    Adapt(AdaptError),
    Json(serde_json::Error),
}

impl From<io::Error> for AdaptCliError {
    fn from(e: io::Error) -> Self {
        AdaptCliError::Io(e)
    }
}

impl From<AdaptError> for AdaptCliError {
    fn from(e: AdaptError) -> Self {
        AdaptCliError::Adapt(e)
    }
}

impl From<serde_json::Error> for AdaptCliError {
    fn from(e: serde_json::Error) -> Self {
        AdaptCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<AdaptCliError> for CliError {
    fn from(e: AdaptCliError) -> Self {
        match e {
            AdaptCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            AdaptCliError::Adapt(AdaptError::InsufficientData) => CliError {
                code: "INSUFFICIENT_DATA".to_string(),
                message: AdaptError::InsufficientData.to_string(),
                hint: Some("Record at least one expand or collapse interaction".to_string()),
            },
            AdaptCliError::Adapt(e @ AdaptError::InvalidThreshold(_)) => CliError {
                code: "INVALID_THRESHOLD".to_string(),
                message: e.to_string(),
                hint: Some("Pass --threshold between 0 and 1".to_string()),
            },
            AdaptCliError::Adapt(e @ AdaptError::EncodingError(_)) => CliError {
                code: "ENCODING_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            AdaptCliError::Adapt(AdaptError::JsonError(e)) | AdaptCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            AdaptCliError::Adapt(e @ AdaptError::UnknownInteraction(_))
            | AdaptCliError::Adapt(e @ AdaptError::ParseError(_)) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Interactions must be \"expand\" or \"collapse\"".to_string()),
            },
        }
    }
}
