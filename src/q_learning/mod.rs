//! Tabular Q-learning
//!
//! This module implements one-step Q-learning over a dense table indexed by
//! base-3 board encodings. The update bootstraps from the best legal action
//! in the successor state:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α · (r + γ · max_a' Q(s',a') − Q(s,a))
//! ```
//!
//! with the bootstrap term dropped once the game is over.
//!
//! ## Usage Example
//!
//! ```no_run
//! use qttt::q_learning::QLearningAgent;
//! use qttt::tictactoe::{Board, Player};
//!
//! let mut agent = QLearningAgent::new(
//!     0.5, // learning_rate
//!     0.9, // discount_factor
//!     0.2, // epsilon (exploration)
//! )
//! .with_seed(7);
//!
//! let mut board = Board::new();
//! let ply = agent.play_ply(&mut board, Player::X, true).unwrap();
//! println!("X played {}", ply.action);
//! ```

pub mod agent;
pub mod policy;
pub mod q_table;
pub mod reward;
pub mod serialization;

// Public re-exports
pub use agent::{Ply, QLearningAgent};
pub use policy::EpsilonGreedy;
pub use q_table::QTable;
pub use reward::RewardScheme;
