//! Train command - Self-play training with optional table persistence

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::{prepare_agent, print_training_summary};
use crate::cli::config::AgentArgs;

#[derive(Parser, Debug)]
#[command(about = "Train the agent through self-play")]
pub struct TrainArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let (agent, result) = prepare_agent(&args.agent)?;
    print_training_summary(&result, &agent);

    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
        println!("\nSummary written to {}", path.display());
    }
    Ok(())
}
