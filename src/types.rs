//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::NUM_STATES;

/// Base-3 index of a full board configuration, in `[0, 3^9)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateIndex(usize);

impl StateIndex {
    /// Create a new state index, validating it lies inside the table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StateOutOfRange`] if the value is >= 3^9.
    pub fn new(value: usize) -> Result<Self, crate::Error> {
        if value < NUM_STATES {
            Ok(StateIndex(value))
        } else {
            Err(crate::Error::StateOutOfRange {
                value,
                limit: NUM_STATES,
            })
        }
    }

    /// Build an index from a value already known to be in range.
    pub(crate) const fn from_raw(value: usize) -> Self {
        StateIndex(value)
    }

    /// Get the inner value.
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<StateIndex> for usize {
    fn from(state: StateIndex) -> Self {
        state.0
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_values_past_the_table() {
        assert!(StateIndex::new(0).is_ok());
        assert!(StateIndex::new(NUM_STATES - 1).is_ok());
        assert!(StateIndex::new(NUM_STATES).is_err());
    }
}
