use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rectscan_parser::limits::{
    DEFAULT_MAX_DIMENSION, DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_MAX_RECTANGLES, DEFAULT_PARSE_TIMEOUT_MS,
    is_valid_dimension,
};
use rectscan_parser::{Limits, ParseError, SvgParser};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(e) => e.error_code(),
            Self::Encode(_) => "E_ENCODE",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rectscan-cli", about = "Extract rectangles and coverage metrics from SVG files")]
struct Cli {
    #[command(flatten)]
    limits: LimitArgs,

    /// Print single-line JSON instead of pretty output.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct LimitArgs {
    #[arg(long, global = true, env = "PARSER_MAX_FILE_SIZE_BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE_BYTES)]
    max_file_size_bytes: usize,

    #[arg(long, global = true, env = "PARSER_MAX_RECTANGLES", default_value_t = DEFAULT_MAX_RECTANGLES)]
    max_rectangles: usize,

    #[arg(
        long,
        global = true,
        env = "PARSER_MAX_DIMENSION",
        default_value_t = DEFAULT_MAX_DIMENSION,
        value_parser = parse_max_dimension
    )]
    max_dimension: f64,

    #[arg(long, global = true, env = "PARSER_TIMEOUT_MS", default_value_t = DEFAULT_PARSE_TIMEOUT_MS)]
    timeout_ms: u64,
}

fn parse_max_dimension(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.trim().parse().map_err(|e| format!("{e}"))?;
    if !is_valid_dimension(value) {
        return Err(format!("must be a finite number above zero, got {raw}"));
    }
    Ok(value)
}

impl From<LimitArgs> for Limits {
    fn from(args: LimitArgs) -> Self {
        Limits {
            max_file_size_bytes: args.max_file_size_bytes,
            max_rectangles: args.max_rectangles,
            max_dimension: args.max_dimension,
            parse_timeout_ms: args.timeout_ms,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an SVG file and print the result as JSON.
    Parse { file: PathBuf },
    /// Print the effective parser limits as JSON.
    Limits,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}: {e}", e.error_code());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<String, CliError> {
    let limits = Limits::from(cli.limits);
    match &cli.command {
        Command::Parse { file } => {
            let result = SvgParser::new(limits).parse_file(file).await?;
            tracing::debug!(file = %file.display(), items = result.items_count(), "parsed");
            render(&result, cli.compact)
        }
        Command::Limits => render(&limits, cli.compact),
    }
}

fn render<T: Serialize>(value: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact { serde_json::to_string(value)? } else { serde_json::to_string_pretty(value)? };
    Ok(out)
}
