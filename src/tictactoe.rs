//! Tic-Tac-Toe game model

pub mod board;
pub mod encoding;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, Player};
pub use encoding::StateEncoding;
pub use game::{GameOutcome, GameRecord, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};

/// Number of cells on the board
pub const NUM_CELLS: usize = 9;

/// Number of actions (one per cell)
pub const NUM_ACTIONS: usize = NUM_CELLS;

/// Number of encodable board states (3^9)
pub const NUM_STATES: usize = 19_683;
