#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use bondex_config::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    CommandStrategy, DemoStrategy, ExtractInput, ExtractStrategy, InitStrategy, PatternsStrategy,
    VersionStrategy,
};

#[derive(Parser)]
#[command(name = "bondex")]
#[command(about = "Regex field extraction for bond disclosure documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from documents and print JSON
    Extract {
        /// Document files; reads stdin when omitted
        files: Vec<PathBuf>,

        /// JSON file with a group object or an array of groups
        #[arg(short = 'g', long, conflicts_with = "profile")]
        groups: Option<PathBuf>,

        /// Profile name from the config file
        #[arg(short = 'p', long)]
        profile: Option<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List builtin patterns
    Patterns,
    /// Run the bundled exchangeable-bond sample
    Demo,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

fn init_logging() -> anyhow::Result<()> {
    let level = Config::load_or_default()
        .map(|config| config.logging.level)
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            files,
            groups,
            profile,
            pretty,
        } => ExtractStrategy.execute(ExtractInput {
            files,
            groups,
            profile,
            pretty,
        }),
        Commands::Patterns => PatternsStrategy.execute(()),
        Commands::Demo => DemoStrategy.execute(()),
        Commands::Init => InitStrategy.execute(()),
        Commands::Version => VersionStrategy.execute(()),
    }
}
