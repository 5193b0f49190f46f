use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use panorama_ingest::bind::deserialize_file;
use panorama_ingest::locate::locate_document;
use panorama_ingest::report::{render_document, render_failure, render_ingestion};
use panorama_ingest::settings::{load_settings, IngestSettings};
use panorama_ingest::{ingest, IngestError, IngestRequest};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;

use cli::{Cli, Command, IngestArgs, LocateArgs, OutputFormat, ParseArgs};

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<IngestError>() {
                Some(ingest_err) => eprintln!("{}", render_failure(ingest_err)),
                None => eprintln!("{} {err:#}", "error:".red().bold()),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    initialise_logging(cli.verbose)?;

    match cli.command {
        Command::Ingest(args) => run_ingest(args),
        Command::Locate(args) => run_locate(args),
        Command::Parse(args) => run_parse(args),
    }
}

/// Logs go to stderr so stdout stays `key=value` only. `RUST_LOG` wins over
/// `--verbose`.
fn initialise_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .context("failed to install log subscriber")
}

fn run_ingest(args: IngestArgs) -> Result<()> {
    let settings = match &args.settings {
        Some(path) => load_settings(path).map_err(IngestError::from)?,
        None => IngestSettings::default(),
    };
    let ingestion = ingest(&IngestRequest {
        archive: args.archive,
        work_dir: args.work_dir,
        settings,
    })?;

    match args.format {
        OutputFormat::Text => println!("{}", render_ingestion(&ingestion)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ingestion)?),
    }
    Ok(())
}

fn run_locate(args: LocateArgs) -> Result<()> {
    let found = locate_document(&args.configs_dir, &args.marker)?;
    let path = found.ok_or_else(|| IngestError::DocumentNotFound {
        path: args.configs_dir.display().to_string(),
        marker: args.marker.clone(),
    })?;
    println!("document={}", path.display());
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let document = deserialize_file(&args.file, &args.marker)?;
    match args.format {
        OutputFormat::Text => println!("{}", render_document(&args.file, &document)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&document)
                .with_context(|| format!("failed to encode {}", args.file.display()))?
        ),
    }
    Ok(())
}
