//! typequiz CLI — play the personality-type quiz in a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "typequiz", version, about = "Terminal personality-type quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Play {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Quiz server URL (overrides config and TYPEQUIZ_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Fetch one question set and print it
    Questions {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Quiz server URL (overrides config and TYPEQUIZ_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("typequiz=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { config, base_url } => commands::play::execute(config, base_url).await,
        Commands::Questions {
            config,
            base_url,
            format,
        } => commands::questions::execute(config, base_url, format).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
