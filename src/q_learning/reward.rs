//! Reward function

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Board, Player};

/// Rewards handed out after a move, seen from the mark that moved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardScheme {
    pub win: f64,
    pub loss: f64,
    pub draw: f64,
    pub neutral: f64,
}

impl Default for RewardScheme {
    fn default() -> Self {
        Self {
            win: 1.0,
            loss: -1.0,
            draw: 0.5,
            neutral: 0.0,
        }
    }
}

impl RewardScheme {
    /// Reward for `perspective` on the board resulting from a move
    pub fn reward(&self, board: &Board, perspective: Player) -> f64 {
        match board.winner() {
            Some(winner) if winner == perspective => self.win,
            Some(_) => self.loss,
            None if board.is_draw() => self.draw,
            None => self.neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewards_follow_perspective() {
        let rewards = RewardScheme::default();
        let x_won = Board::from_string("XXXOO....").unwrap();

        assert_eq!(rewards.reward(&x_won, Player::X), 1.0);
        assert_eq!(rewards.reward(&x_won, Player::O), -1.0);
    }

    #[test]
    fn draw_and_neutral() {
        let rewards = RewardScheme::default();
        let drawn = Board::from_string("XOXXOOOXX").unwrap();
        assert_eq!(rewards.reward(&drawn, Player::X), 0.5);
        assert_eq!(rewards.reward(&drawn, Player::O), 0.5);

        let running = Board::from_string("X...O....").unwrap();
        assert_eq!(rewards.reward(&running, Player::X), 0.0);
    }

    #[test]
    fn custom_scheme() {
        let rewards = RewardScheme {
            win: 10.0,
            loss: -5.0,
            draw: 0.0,
            neutral: -0.01,
        };
        let running = Board::new();
        assert_eq!(rewards.reward(&running, Player::O), -0.01);
    }
}
