//! Command-line access to a stored session.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use markupkit_annotate::ExportFormat;
use markupkit_session::{FileStore, Session, SessionConfig};

#[derive(Debug, Parser)]
#[command(name = "markupkit")]
#[command(about = "Inspect and export MarkupKit review sessions")]
pub struct Cli {
    /// Directory holding the session blobs.
    #[arg(long, global = true, value_name = "DIR")]
    dir: Option<PathBuf>,
    /// Session configuration file (.toml or .json).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the compiled stylesheet.
    Stylesheet,
    /// Print the annotations.
    Export {
        #[arg(long, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
    /// Print a submission report for a page.
    Report {
        #[arg(long)]
        url: String,
        /// Emit JSON instead of markdown.
        #[arg(long)]
        json: bool,
    },
    /// Print annotation and style counts.
    Stats,
    /// Print version and build date.
    Version,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    if let Commands::Version = cli.command {
        println!("markupkit {} ({})", crate::VERSION, crate::BUILD_DATE);
        return Ok(());
    }

    let session = open_session(cli.dir.as_deref(), cli.config.as_deref())?;
    match cli.command {
        Commands::Stylesheet => print!("{}", session.compile_stylesheet()),
        Commands::Export { format } => println!("{}", session.export_annotations(format)?),
        Commands::Report { url, json } => {
            let report = session.report(&url);
            if json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", report.to_markdown());
            }
        }
        Commands::Stats => println!("{}", session.stats()),
        Commands::Version => {}
    }
    Ok(())
}

fn open_session(dir: Option<&Path>, config: Option<&Path>) -> Result<Session<FileStore>> {
    let config = match config {
        Some(path) => SessionConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    let store = match dir.map(Path::to_path_buf).or_else(|| config.storage_dir.clone()) {
        Some(dir) => FileStore::new(dir),
        None => FileStore::default_location().context("no session directory available")?,
    };
    tracing::debug!("Reading session from {}", store.dir().display());
    Session::open(config, store).context("failed to open session")
}
