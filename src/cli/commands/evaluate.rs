//! Evaluate command - Train, then measure the table from one mark's side

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use clap::Parser;

use super::{prepare_agent, print_training_summary};
use crate::{
    cli::{
        config::AgentArgs,
        output::{format_count, format_number, print_kv, print_section},
    },
    pipeline::{
        EvaluationConfig, EvaluationMode, EvaluationPipeline, MetricsObserver, Opponent,
        ProgressObserver,
    },
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Train, then evaluate the agent")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 10_000)]
    pub games: usize,

    /// Which mark the evaluated agent plays (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub agent_mark: Player,

    /// Whether the table keeps learning during evaluation (frozen or learning)
    #[arg(long, default_value = "frozen")]
    pub mode: EvaluationMode,

    /// Who plays the other mark (self or random)
    #[arg(long, default_value = "self")]
    pub opponent: Opponent,

    /// Exploration rate used only while evaluating
    #[arg(long)]
    pub eval_epsilon: Option<f64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let (mut agent, training) = prepare_agent(&args.agent)?;
    print_training_summary(&training, &agent);

    let metrics = Rc::new(RefCell::new(MetricsObserver::for_mark(args.agent_mark)));
    let mut pipeline = EvaluationPipeline::new(EvaluationConfig {
        episodes: args.games,
        agent_mark: args.agent_mark,
        mode: args.mode,
        opponent: args.opponent,
        epsilon: args.eval_epsilon,
    })
    .with_observer(Box::new(Rc::clone(&metrics)));
    if !args.agent.no_progress && args.games > 0 {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::with_label("games")));
    }
    let result = pipeline.run(&mut agent)?;

    print_section("Evaluation Results");
    print_kv("Agent", &args.agent_mark.to_string());
    print_kv("Opponent", &args.opponent.to_string());
    print_kv("Mode", &args.mode.to_string());
    print_kv("Games", &format_number(result.total_games));
    print_kv("Wins", &format_count(result.wins, result.win_rate));
    print_kv("Draws", &format_count(result.draws, result.draw_rate));
    print_kv("Losses", &format_count(result.losses, result.loss_rate));

    let summary = metrics.borrow().summary();
    print_kv("Avg. length", &format!("{:.2} plies", summary.avg_game_length));
    if args.mode == EvaluationMode::Learning {
        print_kv("Mean |TD error|", &format!("{:.6}", summary.mean_abs_td_error));
    }

    if let Some(path) = &args.export {
        result
            .save(path)
            .with_context(|| format!("failed to export results to {}", path.display()))?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(())
}
