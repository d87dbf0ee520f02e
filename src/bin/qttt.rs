//! qttt CLI - Train, evaluate and play against a tabular Q-learning agent

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "qttt")]
#[command(version, about = "Tabular Q-learning tic-tac-toe agent", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent through self-play
    Train(qttt::cli::commands::train::TrainArgs),

    /// Train, then evaluate the agent
    Evaluate(qttt::cli::commands::evaluate::EvaluateArgs),

    /// Train, then play a game against the agent
    Play(qttt::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Train(args) => qttt::cli::commands::train::execute(args),
        Commands::Evaluate(args) => qttt::cli::commands::evaluate::execute(args),
        Commands::Play(args) => qttt::cli::commands::play::execute(args),
    }
}
