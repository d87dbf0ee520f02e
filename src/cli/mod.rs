//! CLI infrastructure for qttt
//!
//! This module provides the command-line interface for training, evaluating
//! and playing against the Q-learning agent.

pub mod commands;
pub mod config;
pub mod output;
