//! Play command - Train, then play one game against a human on the console

use anyhow::Result;
use clap::Parser;

use super::{prepare_agent, print_training_summary};
use crate::{
    adapters::{ConsoleInput, ConsoleRenderer},
    cli::config::AgentArgs,
    session::InteractiveSession,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Train, then play against the agent")]
pub struct PlayArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Take X and move first
    #[arg(long, default_value_t = false)]
    pub human_first: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let (mut agent, training) = prepare_agent(&args.agent)?;
    print_training_summary(&training, &agent);
    println!();

    let human_mark = if args.human_first { Player::X } else { Player::O };
    let session = InteractiveSession::new(human_mark);

    let mut renderer = ConsoleRenderer::stdout();
    let mut input = ConsoleInput::stdio();
    session.run(&mut agent, &mut renderer, &mut input)?;
    Ok(())
}
