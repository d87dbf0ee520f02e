//! Q-learning agent
//!
//! One agent owns one Q-table and plays whichever mark it is told to. The
//! mark is never stored on the agent: every call names the mark to move, so
//! self-play simply alternates the argument.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    AgentConfig, Error, Result,
    q_learning::{policy::EpsilonGreedy, q_table::QTable, reward::RewardScheme},
    tictactoe::{Board, Player, StateEncoding},
    types::StateIndex,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Everything that happened during one ply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ply {
    /// Mark that moved
    pub mover: Player,
    /// Encoding of the board before the move
    pub state: StateIndex,
    /// Cell that was played
    pub action: usize,
    /// Reward seen by the mover after the move
    pub reward: f64,
    /// Encoding of the board after the move, from the perspective of the
    /// mark that moves next
    pub next_state: StateIndex,
    /// The move ended the game
    pub done: bool,
    /// TD error of the update, when the table was updated
    pub td_error: Option<f64>,
}

/// Tabular Q-learning agent with an ε-greedy policy
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    policy: EpsilonGreedy,
    rewards: RewardScheme,
    encoding: StateEncoding,
    initial_epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create a new Q-learning agent
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter (0.0 to 1.0)
    /// * `discount_factor` - γ parameter (0.0 to 1.0)
    /// * `epsilon` - Exploration rate
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64) -> Self {
        Self {
            q_table: QTable::new(learning_rate, discount_factor),
            policy: EpsilonGreedy::new(epsilon),
            rewards: RewardScheme::default(),
            encoding: StateEncoding::default(),
            initial_epsilon: epsilon,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Create an agent from a validated configuration
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        let agent = Self {
            q_table: QTable::new(config.learning_rate, config.discount_factor)
                .with_initial_value(config.q_init),
            policy: EpsilonGreedy::new(config.epsilon),
            rewards: config.rewards,
            encoding: config.encoding,
            initial_epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            min_epsilon: config.min_epsilon,
            rng: build_rng(config.seed),
            rng_seed: config.seed,
        };
        Ok(agent)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Restart the generator from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn encoding(&self) -> StateEncoding {
        self.encoding
    }

    pub fn epsilon(&self) -> f64 {
        self.policy.epsilon()
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.policy.set_epsilon(epsilon);
    }

    /// Encode `board` from `mover`'s point of view
    pub fn encode(&self, board: &Board, mover: Player) -> StateIndex {
        self.encoding.encode(board, mover)
    }

    /// ε-greedy choice for `mover`; `None` when the board is full
    pub fn select_action(&mut self, board: &Board, mover: Player) -> Option<usize> {
        let state = self.encode(board, mover);
        self.policy
            .select_action(&self.q_table, board, state, &mut self.rng)
    }

    /// Uniformly random legal action drawn from the agent's generator
    pub fn random_action(&mut self, board: &Board) -> Option<usize> {
        board.legal_actions().choose(&mut self.rng).copied()
    }

    /// Select, apply and optionally learn from one move by `mover`.
    ///
    /// The action is selected once and that same action is both applied to
    /// the board and used in the update.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLegalSet`] when called on a full board. Callers
    /// check [`Board::is_terminal`] first, so this signals a defect.
    pub fn play_ply(&mut self, board: &mut Board, mover: Player, learn: bool) -> Result<Ply> {
        let action = self
            .select_action(board, mover)
            .ok_or(Error::EmptyLegalSet)?;
        self.commit(board, mover, action, learn)
    }

    /// Apply `action` for `mover` and optionally learn from the transition.
    ///
    /// Used directly when the action comes from somewhere other than the
    /// policy, such as a scripted opponent.
    ///
    /// The successor is encoded for the opponent, which is the row its next
    /// selection reads. Its best value enters the target unchanged under
    /// either encoding.
    pub fn commit(
        &mut self,
        board: &mut Board,
        mover: Player,
        action: usize,
        learn: bool,
    ) -> Result<Ply> {
        let state = self.encode(board, mover);
        board.apply(action, mover)?;

        let next_state = self.encode(board, mover.opponent());
        let reward = self.rewards.reward(board, mover);
        let done = board.is_terminal();
        let td_error = learn.then(|| {
            self.q_table.q_learning_update(
                state,
                action,
                reward,
                next_state,
                &board.legal_actions(),
                done,
            )
        });

        Ok(Ply {
            mover,
            state,
            action,
            reward,
            next_state,
            done,
            td_error,
        })
    }

    /// Decay epsilon after episode
    pub fn end_episode(&mut self) {
        if self.epsilon_decay < 1.0 {
            let decayed = (self.policy.epsilon() * self.epsilon_decay).max(self.min_epsilon);
            self.policy.set_epsilon(decayed);
        }
    }

    /// Forget everything learned and restart the generator
    pub fn reset(&mut self) {
        self.q_table.reset();
        self.policy.set_epsilon(self.initial_epsilon);
        self.rng = build_rng(self.rng_seed);
    }
}
