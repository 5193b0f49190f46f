use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "panorama-ingest")]
#[command(about = "Unpack and read Panorama configuration exports")]
pub struct Cli {
    /// Log pipeline steps at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Extract an export archive and deserialize its management document.
    Ingest(IngestArgs),
    /// Find the management document in an already extracted tree.
    Locate(LocateArgs),
    /// Deserialize a single management document.
    Parse(ParseArgs),
}

#[derive(Parser, Debug)]
pub struct IngestArgs {
    /// Export archive (`.tgz`).
    pub archive: PathBuf,
    /// Directory that receives the archive copy and the extracted tree.
    #[arg(long)]
    pub work_dir: PathBuf,
    /// Optional settings TOML file. Defaults to the built-in settings.
    #[arg(long)]
    pub settings: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Directory whose subdirectories hold the extracted files.
    pub configs_dir: PathBuf,
    #[arg(long, default_value = "panorama")]
    pub marker: String,
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    pub file: PathBuf,
    #[arg(long, default_value = "panorama")]
    pub marker: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
