//! Tabular Q-learning for tic-tac-toe
//!
//! This crate provides:
//! - A tic-tac-toe board model with base-3 state encoding
//! - A dense Q-table with the one-step Q-learning update and flat-file persistence
//! - An ε-greedy agent trained through self-play
//! - Training and evaluation pipelines with composable observers
//! - An interactive human-versus-agent session behind small I/O ports

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod session;
pub mod tictactoe;
pub mod types;

pub use config::AgentConfig;
pub use error::{Error, Result};
pub use q_learning::QLearningAgent;
pub use session::{InteractiveSession, SessionOutcome};
pub use types::StateIndex;
