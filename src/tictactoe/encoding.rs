//! Base-3 state encoding strategies
//!
//! A board is read row-major and each cell becomes one base-3 digit, with
//! cell `i` weighted by `3^i`. The strategies differ only in which digit a
//! mark receives:
//!
//! | Strategy   | Empty | X / perspective mark | O / opponent mark |
//! |------------|-------|----------------------|-------------------|
//! | `Absolute` | 0     | X → 1                | O → 2             |
//! | `Relative` | 0     | mover → 1            | opponent → 2      |
//!
//! Under `Absolute` a board maps to the same index whoever is about to move;
//! with X always opening, the piece counts already determine the mover, so a
//! single table holds values for both sides. Under `Relative` the same
//! pattern of "mine" and "theirs" shares one entry whichever mark the agent
//! plays.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Board, Cell, Player};
use crate::types::StateIndex;

/// How cell contents map to base-3 digits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateEncoding {
    /// Empty → 0, X → 1, O → 2
    #[default]
    Absolute,
    /// Empty → 0, perspective mark → 1, other mark → 2
    Relative,
}

impl StateEncoding {
    /// Digit assigned to a single cell
    pub fn digit(self, cell: Cell, perspective: Player) -> usize {
        match (self, cell) {
            (_, Cell::Empty) => 0,
            (StateEncoding::Absolute, Cell::X) => 1,
            (StateEncoding::Absolute, Cell::O) => 2,
            (StateEncoding::Relative, mark) if mark == perspective.to_cell() => 1,
            (StateEncoding::Relative, _) => 2,
        }
    }

    /// Encode `board` as seen by `perspective`
    pub fn encode(self, board: &Board, perspective: Player) -> StateIndex {
        let mut value = 0;
        let mut power = 1;
        for &cell in &board.cells {
            value += self.digit(cell, perspective) * power;
            power *= 3;
        }
        StateIndex::from_raw(value)
    }
}

impl fmt::Display for StateEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StateEncoding::Absolute => "absolute",
            StateEncoding::Relative => "relative",
        };
        f.write_str(label)
    }
}

impl FromStr for StateEncoding {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absolute" | "abs" => Ok(StateEncoding::Absolute),
            "relative" | "rel" | "perspective" => Ok(StateEncoding::Relative),
            _ => Err(crate::Error::ParseOption {
                kind: "state encoding",
                input: s.to_string(),
                expected: "absolute, relative",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::NUM_STATES;

    #[test]
    fn empty_board_encodes_to_zero() {
        let board = Board::new();
        for encoding in [StateEncoding::Absolute, StateEncoding::Relative] {
            assert_eq!(encoding.encode(&board, Player::X).value(), 0);
            assert_eq!(encoding.encode(&board, Player::O).value(), 0);
        }
    }

    #[test]
    fn absolute_digits_follow_row_major_order() {
        // X at cell 0 contributes 1, O at cell 1 contributes 2 * 3
        let board = Board::from_string("XO.......").unwrap();
        let state = StateEncoding::Absolute.encode(&board, Player::O);
        assert_eq!(state.value(), 1 + 2 * 3);
        assert_eq!(StateEncoding::Absolute.encode(&board, Player::X), state);
    }

    #[test]
    fn relative_swaps_digits_with_perspective() {
        let board = Board::from_string("XO.......").unwrap();
        assert_eq!(
            StateEncoding::Relative.encode(&board, Player::X).value(),
            1 + 2 * 3
        );
        assert_eq!(
            StateEncoding::Relative.encode(&board, Player::O).value(),
            2 + 3
        );
    }

    #[test]
    fn full_board_stays_in_range() {
        let board = Board::from_string("OOOOOOOOO").unwrap();
        let state = StateEncoding::Absolute.encode(&board, Player::X);
        assert_eq!(state.value(), NUM_STATES - 1);
    }

    #[test]
    fn parses_names() {
        assert_eq!(
            "Absolute".parse::<StateEncoding>().unwrap(),
            StateEncoding::Absolute
        );
        assert_eq!(
            "relative".parse::<StateEncoding>().unwrap(),
            StateEncoding::Relative
        );
        assert!("mirror".parse::<StateEncoding>().is_err());
    }
}
