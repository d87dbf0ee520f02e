//! Interaction ports - how an interactive session talks to a human.

use crate::{Result, tictactoe::Board};

/// Displays the board after each ply. Purely presentational.
pub trait BoardRenderer {
    /// Show `board`
    fn render(&mut self, board: &Board) -> Result<()>;

    /// Show a line of status text (outcome, whose turn, ...)
    fn announce(&mut self, message: &str) -> Result<()>;
}

/// Source of human moves.
///
/// The session owns validation: it parses what `next_action` returns,
/// checks it against the board, and calls `reject` before asking again.
pub trait MoveInput {
    /// Prompt for and read one raw answer. `Ok(None)` means the input is
    /// exhausted.
    fn next_action(&mut self) -> Result<Option<String>>;

    /// Tell the human why their last answer was refused.
    fn reject(&mut self, answer: &str, reason: &str) -> Result<()>;
}
