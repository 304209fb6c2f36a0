//! Corpora CLI
//!
//! Main entry point for the corpora command-line tool. Classifies documents
//! and splits them into chunks for downstream embedding/indexing.

mod commands;
mod extract;

use clap::{Parser, Subcommand};
use commands::{DetectCommand, IngestCommand};
use corpora_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Corpora CLI - document classification and chunking for knowledge bases
#[derive(Parser, Debug)]
#[command(name = "corpora")]
#[command(about = "Classify documents and split them into chunks", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "CORPORA_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "CORPORA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Collection name stamped into the ingestion payload
    #[arg(long, global = true, env = "CORPORA_COLLECTION")]
    collection: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest documents (files, directories, URLs) into a chunk payload
    Ingest(IngestCommand),

    /// Classify documents without splitting them
    Detect(DetectCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.collection,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    config.validate()?;

    // Log startup
    tracing::info!("Corpora CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Collection: {}", config.collection_name);

    // Emit command.start span
    let command_name = match &cli.command {
        Commands::Ingest(_) => "ingest",
        Commands::Detect(_) => "detect",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ingest(cmd) => cmd.execute(&config).await,
        Commands::Detect(cmd) => cmd.execute().await,
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
