mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "poolchat",
    about = "Lead-capture service for the pool-service site — store, list, and serve quote and inquiry submissions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: poolchat.yaml in the current directory)
    #[arg(long, global = true, env = "POOLCHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and an empty submission document
    Init,

    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8787")]
        port: u16,
    },

    /// List stored submissions of one kind, newest first
    List {
        /// quote or inquiry
        #[arg(long, default_value = "quote")]
        kind: String,
    },
}

fn config_path(explicit: Option<&PathBuf>) -> PathBuf {
    explicit
        .cloned()
        .unwrap_or_else(|| PathBuf::from("poolchat.yaml"))
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let config = config_path(cli.config.as_ref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&config),
        Commands::Serve { port } => cmd::serve::run(&config, port),
        Commands::List { kind } => cmd::list::run(&config, &kind, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
