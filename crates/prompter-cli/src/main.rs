use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prompter_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "prompter")]
#[command(author, version, about = "A terminal teleprompter with hands-free scrolling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the prompter
    Run,
    /// Import a script text file and make it the active script
    Import {
        /// Path to a plain text file
        path: PathBuf,
        /// Title for the script (defaults to the file name)
        #[arg(short = 't', long)]
        title: Option<String>,
    },
    /// List stored scripts
    List,
    /// Activate a stored script by id prefix
    Load {
        /// Script id (a unique prefix is enough)
        id: String,
    },
    /// Restore default prompter settings (keymap and UI tuning are kept)
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Import { path, title }) => commands::import::run(config, &path, title),
        Some(Commands::List) => commands::list::run(),
        Some(Commands::Load { id }) => commands::load::run(config, &id),
        Some(Commands::Reset) => commands::reset::run(config),
    }
}
