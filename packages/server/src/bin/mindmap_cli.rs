//! CLI for submitting transcriptions and inspecting graphs
//!
//! Uses the same configuration and stores as the server and prints JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use server_core::{kernel::ServerDeps, Config};
use topic_graph::UserId;

#[derive(Parser)]
#[command(name = "mindmap_cli")]
#[command(about = "Build and inspect mind maps from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a transcription and print the resulting graph delta
    Submit {
        /// Owner of the graph
        #[arg(long)]
        user: UserId,
        /// Read the transcription from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Print every stored node and edge for a user
    Graph {
        #[arg(long)]
        user: UserId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,topic_graph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let service = ServerDeps::from_config(&config).await?.mind_map_service();

    let result = match cli.command {
        Commands::Submit { user, file } => {
            let transcription = read_transcription(file)?;
            service.submit(&transcription, user).await?
        }
        Commands::Graph { user } => service.graph(user).await?,
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn read_transcription(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read transcription from stdin")?;
            Ok(buf)
        }
    }
}
