//! Command implementations for the CLI

pub mod evaluate;
pub mod play;
pub mod train;

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    cli::{
        config::AgentArgs,
        output::{format_count, format_number, print_kv, print_section},
    },
    pipeline::{JsonlObserver, ProgressObserver, TrainingConfig, TrainingPipeline, TrainingResult},
    q_learning::{QLearningAgent, serialization},
};

/// Build the agent, then load, train and save its table.
///
/// A table that cannot be loaded is reported and training starts from a fresh
/// table; a table that cannot be saved is reported and skipped.
pub(crate) fn prepare_agent(args: &AgentArgs) -> Result<(QLearningAgent, TrainingResult)> {
    let mut agent = args.build_agent()?;

    if let Some(path) = &args.load {
        match serialization::load_from_file(agent.q_table_mut(), path) {
            Ok(()) => info!(path = %path.display(), "loaded value table"),
            Err(err) => warn!("could not load value table, starting fresh: {err}"),
        }
    }

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: args.episodes,
        seed: None,
    });
    if !args.no_progress && args.episodes > 0 {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::new(path)?));
    }
    let result = pipeline.run(&mut agent)?;

    if let Some(path) = &args.save {
        match serialization::save_to_file(agent.q_table(), path) {
            Ok(()) => info!(path = %path.display(), "saved value table"),
            Err(err) => warn!("could not save value table: {err}"),
        }
    }

    Ok((agent, result))
}

pub(crate) fn print_training_summary(result: &TrainingResult, agent: &QLearningAgent) {
    print_section("Training Summary");
    print_kv("Episodes", &format_number(result.episodes));
    print_kv("X wins", &format_count(result.x_wins, result.x_win_rate()));
    print_kv("O wins", &format_count(result.o_wins, result.o_win_rate()));
    print_kv("Draws", &format_count(result.draws, result.draw_rate()));
    print_kv("Avg. length", &format!("{:.2} plies", result.avg_episode_length()));
    print_kv(
        "States visited",
        &format_number(agent.q_table().visited_count()),
    );
    print_kv(
        "Alpha / gamma",
        &format!(
            "{} / {}",
            agent.q_table().learning_rate(),
            agent.q_table().discount_factor()
        ),
    );
    print_kv("Final epsilon", &format!("{:.4}", agent.epsilon()));
}
