//! Epsilon-greedy action selection

use rand::{Rng, seq::IndexedRandom};

use crate::{q_learning::q_table::QTable, tictactoe::Board, types::StateIndex};

/// ε-greedy policy over a [`QTable`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    /// Create a policy exploring with probability `epsilon` (clamped to [0, 1])
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon: epsilon.clamp(0.0, 1.0),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon.clamp(0.0, 1.0);
    }

    /// Choose an action for `board`, whose encoding is `state`.
    ///
    /// Returns `None` when the board has no empty cell. Exactly one uniform
    /// draw decides between exploring and exploiting.
    pub fn select_action<R: Rng>(
        &self,
        q_table: &QTable,
        board: &Board,
        state: StateIndex,
        rng: &mut R,
    ) -> Option<usize> {
        let legal_actions = board.legal_actions();
        if legal_actions.is_empty() {
            return None;
        }

        if rng.random::<f64>() < self.epsilon {
            // Explore: random action
            legal_actions.choose(rng).copied()
        } else {
            // Exploit: greedy action based on Q-values
            q_table.greedy_action(state, &legal_actions)
        }
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(0.2)
    }
}
