//! RAGOps CLI: evaluate a RAG pipeline and write a dated markdown report.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// RAGOps: score retrieval-augmented answers and report the results
#[derive(Parser, Debug)]
#[command(name = "ragops", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Workspace directory (searched for ragops.toml)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path (replaces the workspace ragops.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: commands::RunOverrides,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Subcommand (defaults to `run`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Run the dataset through retrieval, generation, and scoring
    Run,
    /// Score pre-recorded QA records instead of running the pipeline
    Replay {
        /// JSON/TOML file of records (defaults to the built-in worked example)
        #[arg(short, long)]
        records: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(cli: &Cli) {
    let level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over the flags when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(&cli);

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| cli.workspace.clone());

    let config = commands::resolve_config(&workspace, cli.config.as_deref(), &cli.overrides)?;
    tracing::debug!(?config, "Resolved configuration");

    match cli.command.clone().unwrap_or(Commands::Run) {
        Commands::Run => commands::run(&config, cli.overrides.date),
        Commands::Replay { records } => {
            commands::replay(&config, records.as_deref(), cli.overrides.date)
        }
        Commands::Config => commands::show_config(&config),
    }
}
