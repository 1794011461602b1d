use anyhow::{Context, Result, anyhow};
use arf8112_lib::{DecodeError, DecodedPayload, decode_hex};
use clap::Parser;
use clap::error::ErrorKind;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use serde_json::Value;
use std::ffi::OsString;
use std::fs::File;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Decode an ARF8112AA field-test uplink given as hex.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payload as hex, with or without a 0x prefix.
    payload: String,
    /// LoRaWAN FPort the payload was received on.
    port: u8,
    /// JSON object merged over the decoded fields; its keys win.
    #[arg(short, long)]
    metadata: Option<String>,
    /// Pretty-print the JSON output.
    #[arg(short, long)]
    pretty: bool,
    /// Print a one-line summary instead of JSON.
    #[arg(short, long, conflicts_with_all = ["pretty", "metadata"])]
    text: bool,
    /// Report decode errors and exit non-zero instead of staying silent.
    #[arg(short, long)]
    strict: bool,
    /// Optional path to a file to write logs to, in addition to the console.
    #[arg(short, long)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn setup_logging(log_file_path: Option<PathBuf>, verbosity: &Verbosity<WarnLevel>) -> Result<Option<WorkerGuard>> {
    // stdout carries the decoded payload
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = if let Some(ref path) = log_file_path {
        let log_file = File::create(path).with_context(|| format!("Failed to create log file at: {:?}", path))?;
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(log_file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .with_target(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file_path {
        info!("Logging to file: {:?}", path);
    }

    Ok(guard)
}

/// Parse arguments; usage errors are swallowed unless `--strict` was given.
/// Help and version requests always come back as `Err` so clap can print them.
fn parse_args<I, T>(args: I) -> Result<Option<Cli>, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match Cli::try_parse_from(&args) {
        Ok(cli) => Ok(Some(cli)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => Err(e),
        Err(e) if args.iter().any(|a| a == "--strict" || a == "-s") => Err(e),
        Err(_) => Ok(None),
    }
}

fn main() -> Result<()> {
    let cli = match parse_args(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => return Ok(()),
        Err(e) => e.exit(),
    };
    let _guard = setup_logging(cli.log_file.clone(), &cli.verbose)?;

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) if cli.strict => {
            error!("Decode failed: {:#}", e);
            process::exit(1);
        }
        // Without --strict nothing is printed, so a failed decode looks like no output.
        Err(e) => debug!("Decode failed: {:#}", e),
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<String> {
    let payload = decode_hex(&cli.payload, cli.port).context("Failed to decode payload")?;
    debug!(size = payload.size, fport = payload.fport, "decoded");

    if cli.text {
        return Ok(payload.to_string());
    }

    let value = Value::Object(merged(&payload, cli.metadata.as_deref())?);
    let output = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(output)
}

fn merged(payload: &DecodedPayload, metadata: Option<&str>) -> Result<serde_json::Map<String, Value>> {
    let Some(raw) = metadata else {
        return Ok(payload.to_json_map()?);
    };
    let metadata: Value = serde_json::from_str(raw).context("Metadata is not valid JSON")?;
    payload.merge_metadata(metadata).map_err(|e| match e {
        DecodeError::InvalidMetadata(kind) => anyhow!("--metadata must be a JSON object, got {}", kind),
        other => other.into(),
    })
}
