//! Q-table implementation for temporal difference learning

use crate::{
    Error, Result,
    tictactoe::{NUM_ACTIONS, NUM_STATES},
    types::StateIndex,
};

/// Dense Q-table with one row per encodable state and one column per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    /// Q-values indexed by `[state][action]`
    values: Vec<[f64; NUM_ACTIONS]>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    /// Value every entry starts from
    q_init: f64,
}

impl QTable {
    /// Create a new Q-table with every entry at 0.0
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            values: vec![[0.0; NUM_ACTIONS]; NUM_STATES],
            learning_rate,
            discount_factor,
            q_init: 0.0,
        }
    }

    /// Refill the table with a different starting value
    pub fn with_initial_value(mut self, q_init: f64) -> Self {
        self.q_init = q_init;
        self.reset();
        self
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn initial_value(&self) -> f64 {
        self.q_init
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: StateIndex, action: usize) -> f64 {
        self.values[state.value()][action]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateIndex, action: usize, value: f64) {
        self.values[state.value()][action] = value;
    }

    /// All action values of one state
    pub fn row(&self, state: StateIndex) -> &[f64; NUM_ACTIONS] {
        &self.values[state.value()]
    }

    /// Rows in state-index order
    pub fn rows(&self) -> impl Iterator<Item = &[f64; NUM_ACTIONS]> {
        self.values.iter()
    }

    /// Swap in a complete matrix. Callers validate the shape first.
    pub(crate) fn replace_rows(&mut self, rows: Vec<[f64; NUM_ACTIONS]>) {
        debug_assert_eq!(rows.len(), NUM_STATES);
        self.values = rows;
    }

    /// Maximum Q-value over legal actions in a state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLegalSet`] when `legal_actions` is empty.
    pub fn best_value(&self, state: StateIndex, legal_actions: &[usize]) -> Result<f64> {
        if legal_actions.is_empty() {
            return Err(Error::EmptyLegalSet);
        }
        Ok(legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Select greedy action (highest Q-value) from legal actions.
    ///
    /// Ties go to the action listed first, so with ascending `legal_actions`
    /// the lowest index wins.
    pub fn greedy_action(&self, state: StateIndex, legal_actions: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &action in legal_actions {
            let value = self.get(state, action);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The bootstrap term is zero when `done` is set or no action is legal in
    /// the next state. Returns the TD error.
    pub fn q_learning_update(
        &mut self,
        state: StateIndex,
        action: usize,
        reward: f64,
        next_state: StateIndex,
        next_legal_actions: &[usize],
        done: bool,
    ) -> f64 {
        let current_q = self.get(state, action);
        let max_next_q = if done || next_legal_actions.is_empty() {
            0.0
        } else {
            self.best_value(next_state, next_legal_actions)
                .unwrap_or(0.0)
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
        td_error
    }

    /// Reset all Q-values to the initial value
    pub fn reset(&mut self) {
        let q_init = self.q_init;
        self.values.iter_mut().for_each(|row| *row = [q_init; NUM_ACTIONS]);
    }

    /// Every entry still holds the initial value
    pub fn is_untouched(&self) -> bool {
        self.values
            .iter()
            .all(|row| row.iter().all(|&v| v == self.q_init))
    }

    /// Number of entries that moved away from the initial value
    pub fn visited_count(&self) -> usize {
        self.values
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&v| v != self.q_init)
            .count()
    }
}
