//! circolari: section segmentation and chunking for Italian tax documents
//!
//! Command-line entry point for inspecting how a document is segmented.

use anyhow::Result;
use circolari::{
    config::{Config, LogFormat},
    types::DocumentType,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

use commands::{init_config, segment_file, OutputFormat, SegmentArgs};

#[derive(Parser)]
#[command(name = "circolari")]
#[command(about = "Segment Italian tax documents into sections and chunks")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "circolari.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a text file into sections and chunks
    Segment {
        /// UTF-8 text file, pages separated by form feeds
        path: PathBuf,

        /// Document type (Circolare, Risoluzione, Risposta)
        #[arg(short = 't', long, default_value = "Circolare")]
        doc_type: DocumentType,

        /// Document id (defaults to the file stem)
        #[arg(long)]
        id: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Chunk size in tokens (overrides config)
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Chunk overlap in tokens (overrides config)
        #[arg(long)]
        overlap: Option<usize>,
    },

    /// Write a default configuration file
    Init {
        /// Output directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config, falling back to defaults when the file is absent
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    // Setup logging on stderr so JSON output stays clean
    let log_level: Level = config.logging.level.with_verbosity(cli.verbose).into();
    let builder = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }

    match cli.command {
        Commands::Segment {
            path,
            doc_type,
            id,
            format,
            chunk_size,
            overlap,
        } => segment_file(
            config,
            SegmentArgs {
                path,
                doc_type,
                id,
                format,
                chunk_size,
                overlap,
            },
        ),
        Commands::Init { path } => init_config(path),
    }
}
