//! qtoe CLI - Train, evaluate and play against a tabular Q-learning agent
//!
//! This CLI provides:
//! - Training against a uniform-random opponent with per-epoch evaluation
//! - Evaluation of a saved agent
//! - A console game against a saved agent

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qtoe")]
#[command(version, about = "Tabular Q-learning for tic-tac-toe", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent against the random opponent
    Train(Box<qtoe::cli::commands::train::TrainArgs>),

    /// Evaluate a saved agent against the random opponent
    Evaluate(qtoe::cli::commands::evaluate::EvaluateArgs),

    /// Play against a saved agent
    Play(qtoe::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("qtoe={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Train(args) => qtoe::cli::commands::train::execute(*args).map(|_| ()),
        Commands::Evaluate(args) => qtoe::cli::commands::evaluate::execute(args).map(|_| ()),
        Commands::Play(args) => qtoe::cli::commands::play::execute(args),
    }
}
