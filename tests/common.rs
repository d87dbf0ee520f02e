//! Common test utilities for the qttt test suite.

use qttt::tictactoe::{Board, Player};
use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

/// Play `moves` legal random moves from the empty board, stopping early if
/// the game ends. Returns the board and the mark to move next.
pub fn random_reachable_board(rng: &mut StdRng, moves: usize) -> (Board, Player) {
    let mut board = Board::new();
    let mut mover = Player::X;
    for _ in 0..moves {
        if board.is_terminal() {
            break;
        }
        let legal = board.legal_actions();
        let action = *legal.choose(rng).expect("non-terminal board has a legal move");
        board.apply(action, mover).unwrap();
        mover = mover.opponent();
    }
    (board, mover)
}

/// Random number of moves between 0 and 9
pub fn random_depth(rng: &mut StdRng) -> usize {
    rng.random_range(0..=9)
}
