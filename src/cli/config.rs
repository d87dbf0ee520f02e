//! Agent options shared by every subcommand

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{AgentConfig, q_learning::QLearningAgent, tictactoe::StateEncoding};

/// Options that build, train and persist the agent.
///
/// Hyper-parameter flags are optional so that values from `--config` are only
/// overridden when a flag is actually given.
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    /// Number of self-play training episodes
    #[arg(long, short = 'e', default_value_t = 10_000)]
    pub episodes: usize,

    /// Learning rate α [default: 0.5]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ [default: 0.9]
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Exploration rate ε [default: 0.2]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Multiplicative ε decay after each episode [default: 1.0]
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Floor for the decayed ε [default: 0.0]
    #[arg(long)]
    pub min_epsilon: Option<f64>,

    /// State encoding (absolute or relative) [default: absolute]
    #[arg(long)]
    pub encoding: Option<StateEncoding>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with agent settings; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Value table to load before training
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Where to write the value table after training
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Write one JSON line per training episode to this file
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Hide progress bars
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl AgentArgs {
    /// Merge `--config` with the flags given on the command line
    pub fn agent_config(&self) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => AgentConfig::default(),
        };

        if let Some(alpha) = self.alpha {
            config.learning_rate = alpha;
        }
        if let Some(gamma) = self.gamma {
            config.discount_factor = gamma;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(decay) = self.epsilon_decay {
            config.epsilon_decay = decay;
        }
        if let Some(min_epsilon) = self.min_epsilon {
            config.min_epsilon = min_epsilon;
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate().context("invalid agent settings")?;
        Ok(config)
    }

    pub fn build_agent(&self) -> Result<QLearningAgent> {
        let config = self.agent_config()?;
        Ok(QLearningAgent::from_config(&config)?)
    }
}
