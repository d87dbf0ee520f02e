//! Self-play training pipeline

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    ports::Observer,
    q_learning::QLearningAgent,
    tictactoe::{Board, GameOutcome, Player},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub episodes: usize,

    /// Reseed the agent's generator before training
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played
    pub episodes: usize,

    /// Episodes won by X
    pub x_wins: usize,

    /// Episodes won by O
    pub o_wins: usize,

    /// Drawn episodes
    pub draws: usize,

    /// Moves played across all episodes
    pub total_plies: usize,
}

impl TrainingResult {
    fn rate(&self, count: usize) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            count as f64 / self.episodes as f64
        }
    }

    pub fn x_win_rate(&self) -> f64 {
        self.rate(self.x_wins)
    }

    pub fn o_win_rate(&self) -> f64 {
        self.rate(self.o_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Mean number of moves per episode
    pub fn avg_episode_length(&self) -> f64 {
        self.rate(self.total_plies)
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Trains one agent by letting it play both marks against itself
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run the full episode budget.
    ///
    /// Every ply selects exactly once, applies that action and feeds the
    /// transition into the Q-learning update. Epsilon decay, when the agent
    /// has one configured, is applied after each episode.
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.reseed(seed);
        }

        info!(
            episodes = self.config.episodes,
            epsilon = agent.epsilon(),
            encoding = %agent.encoding(),
            "training started"
        );

        let mut result = TrainingResult {
            episodes: 0,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            total_plies: 0,
        };

        for observer in &mut self.observers {
            observer.on_run_start(self.config.episodes)?;
        }

        let mut board = Board::new();
        for episode in 0..self.config.episodes {
            let (outcome, plies) = self.play_episode(episode, agent, &mut board)?;

            match outcome {
                GameOutcome::Win(Player::X) => result.x_wins += 1,
                GameOutcome::Win(Player::O) => result.o_wins += 1,
                GameOutcome::Draw => result.draws += 1,
            }
            result.episodes += 1;
            result.total_plies += plies;

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome, plies)?;
            }

            agent.end_episode();
            debug!(episode, ?outcome, plies, epsilon = agent.epsilon(), "episode finished");
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        info!(
            x_wins = result.x_wins,
            o_wins = result.o_wins,
            draws = result.draws,
            "training finished"
        );
        Ok(result)
    }

    fn play_episode(
        &mut self,
        episode: usize,
        agent: &mut QLearningAgent,
        board: &mut Board,
    ) -> Result<(GameOutcome, usize)> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        board.reset();
        let mut mover = Player::X;
        let mut plies = 0;

        while !board.is_terminal() {
            let ply = agent.play_ply(board, mover, true)?;
            plies += 1;

            for observer in &mut self.observers {
                observer.on_ply(episode, board, &ply)?;
            }
            mover = mover.opponent();
        }

        let outcome = match board.winner() {
            Some(winner) => GameOutcome::Win(winner),
            None => GameOutcome::Draw,
        };
        Ok((outcome, plies))
    }
}
