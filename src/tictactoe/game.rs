//! Game outcomes and move history

use serde::{Deserialize, Serialize};

use super::board::{Board, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Classify a board, returning `None` while the game is still running
    pub fn from_board(board: &Board) -> Option<Self> {
        if let Some(winner) = board.winner() {
            Some(GameOutcome::Win(winner))
        } else if board.is_draw() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Whether `player` won this game
    pub fn is_win_for(self, player: Player) -> bool {
        self == GameOutcome::Win(player)
    }

    /// Whether `player` lost this game
    pub fn is_loss_for(self, player: Player) -> bool {
        self == GameOutcome::Win(player.opponent())
    }
}

/// Moves of one finished (or running) episode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl GameRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a move
    pub fn push(&mut self, position: usize, player: Player) {
        self.moves.push(Move { position, player });
    }

    /// Positions in play order
    pub fn positions(&self) -> Vec<usize> {
        self.moves.iter().map(|m| m.position).collect()
    }

    /// Rebuild the board by replaying the recorded moves.
    ///
    /// # Errors
    ///
    /// Returns error if any recorded move is illegal, which indicates corrupted
    /// game data.
    pub fn replay(&self) -> Result<Board, crate::Error> {
        let mut board = Board::new();
        for m in &self.moves {
            board.apply(m.position, m.player)?;
        }
        Ok(board)
    }
}
