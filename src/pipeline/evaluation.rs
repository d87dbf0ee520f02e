//! Evaluation pipeline
//!
//! Plays a fixed number of episodes with the agent holding one mark and
//! tallies the outcomes from that mark's point of view.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    ports::Observer,
    q_learning::QLearningAgent,
    tictactoe::{Board, GameOutcome, Player},
};

/// Whether the table keeps learning while being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// No updates; the table is read-only for the whole run
    #[default]
    Frozen,
    /// Agent plies are learned from exactly as in training
    Learning,
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationMode::Frozen => f.write_str("frozen"),
            EvaluationMode::Learning => f.write_str("learning"),
        }
    }
}

impl FromStr for EvaluationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frozen" => Ok(EvaluationMode::Frozen),
            "learning" | "learn" => Ok(EvaluationMode::Learning),
            _ => Err(Error::ParseOption {
                kind: "evaluation mode",
                input: s.to_string(),
                expected: "frozen, learning",
            }),
        }
    }
}

/// Who plays the mark the agent does not hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opponent {
    /// The agent's own policy plays both marks
    #[default]
    SelfPlay,
    /// Uniformly random legal moves
    Random,
}

impl fmt::Display for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opponent::SelfPlay => f.write_str("self"),
            Opponent::Random => f.write_str("random"),
        }
    }
}

impl FromStr for Opponent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "self" | "self-play" | "selfplay" => Ok(Opponent::SelfPlay),
            "random" => Ok(Opponent::Random),
            _ => Err(Error::ParseOption {
                kind: "opponent",
                input: s.to_string(),
                expected: "self, random",
            }),
        }
    }
}

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of episodes to play
    pub episodes: usize,

    /// Mark the agent plays for the whole run
    pub agent_mark: Player,

    pub mode: EvaluationMode,

    pub opponent: Opponent,

    /// Exploration rate for this run only; the agent's own rate is restored
    /// afterwards
    pub epsilon: Option<f64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            agent_mark: Player::X,
            mode: EvaluationMode::Frozen,
            opponent: Opponent::SelfPlay,
            epsilon: None,
        }
    }
}

/// Result of an evaluation run, from the agent mark's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Total games played
    pub total_games: usize,

    /// Mark the agent played
    pub agent_mark: Player,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,
}

impl EvaluationResult {
    /// Create a new evaluation result
    pub fn new(agent_mark: Player, wins: usize, draws: usize, losses: usize) -> Self {
        let total_games = wins + draws + losses;
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            agent_mark,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Evaluation pipeline
pub struct EvaluationPipeline {
    config: EvaluationConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl EvaluationPipeline {
    pub fn new(config: EvaluationConfig) -> Self {
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

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Play the configured number of episodes.
    ///
    /// The agent's exploration rate is restored before returning, whether or
    /// not the run succeeded.
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<EvaluationResult> {
        let saved_epsilon = agent.epsilon();
        if let Some(epsilon) = self.config.epsilon {
            agent.set_epsilon(epsilon);
        }

        let result = self.run_episodes(agent);
        agent.set_epsilon(saved_epsilon);
        result
    }

    fn run_episodes(&mut self, agent: &mut QLearningAgent) -> Result<EvaluationResult> {
        let agent_mark = self.config.agent_mark;
        info!(
            episodes = self.config.episodes,
            %agent_mark,
            mode = %self.config.mode,
            opponent = %self.config.opponent,
            epsilon = agent.epsilon(),
            "evaluation started"
        );

        for observer in &mut self.observers {
            observer.on_run_start(self.config.episodes)?;
        }

        let (mut wins, mut draws, mut losses) = (0, 0, 0);
        let mut board = Board::new();
        for episode in 0..self.config.episodes {
            let (outcome, plies) = self.play_episode(episode, agent, &mut board)?;

            match outcome {
                GameOutcome::Win(winner) if winner == agent_mark => wins += 1,
                GameOutcome::Win(_) => losses += 1,
                GameOutcome::Draw => draws += 1,
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome, plies)?;
            }
            debug!(episode, ?outcome, plies, "evaluation episode finished");
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        let result = EvaluationResult::new(agent_mark, wins, draws, losses);
        info!(wins, draws, losses, "evaluation finished");
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

        let learning = self.config.mode == EvaluationMode::Learning;
        board.reset();
        let mut mover = Player::X;
        let mut plies = 0;

        while !board.is_terminal() {
            let agent_turn = mover == self.config.agent_mark;
            let ply = match self.config.opponent {
                Opponent::SelfPlay => agent.play_ply(board, mover, learning)?,
                Opponent::Random if agent_turn => agent.play_ply(board, mover, learning)?,
                Opponent::Random => {
                    let action = agent.random_action(board).ok_or(Error::EmptyLegalSet)?;
                    agent.commit(board, mover, action, false)?
                }
            };
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::training::{TrainingConfig, TrainingPipeline};

    fn trained_agent() -> QLearningAgent {
        let mut agent = QLearningAgent::new(0.5, 0.9, 0.2).with_seed(11);
        TrainingPipeline::new(TrainingConfig {
            episodes: 200,
            seed: None,
        })
        .run(&mut agent)
        .unwrap();
        agent
    }

    #[test]
    fn frozen_evaluation_leaves_table_unchanged() {
        let mut agent = trained_agent();
        let before = agent.q_table().clone();

        let result = EvaluationPipeline::new(EvaluationConfig {
            episodes: 100,
            ..EvaluationConfig::default()
        })
        .run(&mut agent)
        .unwrap();

        assert_eq!(result.total_games, 100);
        assert_eq!(result.wins + result.draws + result.losses, 100);
        assert_eq!(agent.q_table(), &before);
    }

    #[test]
    fn learning_evaluation_updates_table() {
        let mut agent = QLearningAgent::new(0.5, 0.9, 0.2).with_seed(3);
        EvaluationPipeline::new(EvaluationConfig {
            episodes: 20,
            mode: EvaluationMode::Learning,
            ..EvaluationConfig::default()
        })
        .run(&mut agent)
        .unwrap();

        assert!(!agent.q_table().is_untouched());
    }

    #[test]
    fn epsilon_override_is_restored() {
        let mut agent = QLearningAgent::new(0.5, 0.9, 0.2).with_seed(3);
        EvaluationPipeline::new(EvaluationConfig {
            episodes: 5,
            epsilon: Some(0.0),
            ..EvaluationConfig::default()
        })
        .run(&mut agent)
        .unwrap();

        assert_eq!(agent.epsilon(), 0.2);
    }

    #[test]
    fn random_opponent_counts_from_agent_mark() {
        let mut agent = trained_agent();
        let result = EvaluationPipeline::new(EvaluationConfig {
            episodes: 200,
            agent_mark: Player::O,
            opponent: Opponent::Random,
            epsilon: Some(0.0),
            ..EvaluationConfig::default()
        })
        .run(&mut agent)
        .unwrap();

        assert_eq!(result.agent_mark, Player::O);
        assert_eq!(result.total_games, 200);
        let total = result.win_rate + result.draw_rate + result.loss_rate;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_games_has_zero_rates() {
        let result = EvaluationResult::new(Player::X, 0, 0, 0);
        assert_eq!(result.total_games, 0);
        assert_eq!(result.win_rate, 0.0);
    }

    #[test]
    fn parses_options() {
        assert_eq!("learning".parse::<EvaluationMode>().unwrap(), EvaluationMode::Learning);
        assert_eq!("Random".parse::<Opponent>().unwrap(), Opponent::Random);
        assert_eq!(Opponent::SelfPlay.to_string(), "self");
        assert!("sometimes".parse::<EvaluationMode>().is_err());
    }

    #[test]
    fn result_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval.json");
        let result = EvaluationResult::new(Player::X, 3, 5, 2);
        result.save(&path).unwrap();
        assert_eq!(EvaluationResult::load(&path).unwrap(), result);
    }
}
