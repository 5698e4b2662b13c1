//! techtide CLI — the main entry point.
//!
//! Commands:
//! - `serve`      — Start the HTTP API
//! - `recommend`  — Run one recommendation request from the terminal
//! - `highlights` — Print the daily highlights teaser
//! - `seed`       — Load demo articles and users into the store

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "techtide",
    about = "techtide — LLM-assisted tech article recommendations",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one recommendation request
    Recommend {
        /// User to recommend for
        #[arg(short, long)]
        user: String,

        /// Interest tags overriding the stored profile
        #[arg(short, long)]
        tag: Vec<String>,

        /// Number of items
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print the daily highlights teaser
    Highlights,

    /// Load demo articles and users into the store
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await,
        Commands::Recommend { user, tag, limit } => {
            commands::recommend::run(&user, tag, limit).await
        }
        Commands::Highlights => commands::highlights::run().await,
        Commands::Seed => commands::seed::run().await,
    }
}
