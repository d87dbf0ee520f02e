//! Observer port - abstraction for run observation and data collection
//!
//! This port defines the interface for observing training and evaluation
//! runs, allowing composable data collection without coupling the loops to
//! specific output formats or metrics.

use std::{cell::RefCell, rc::Rc};

use crate::{
    Result,
    q_learning::Ply,
    tictactoe::{Board, GameOutcome},
};

/// Observer trait for monitoring training and evaluation runs
///
/// Observers can be composed to collect different types of data:
/// - Progress bars for user feedback
/// - JSONL export for analysis
/// - Metrics tracking
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_run_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_ply(...)` - After each move has been applied (and learned from)
///    - `on_episode_end(episode, outcome, plies)`
/// 3. `on_run_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use qttt::{ports::Observer, tictactoe::GameOutcome};
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl Observer for DrawCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         outcome: GameOutcome,
///         _plies: usize,
///     ) -> qttt::Result<()> {
///         if outcome == GameOutcome::Draw {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called when a run starts, with the number of episodes it will play.
    fn on_run_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the episode (0-based)
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every ply.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the current episode
    /// * `board` - Board after the move was applied
    /// * `ply` - The transition, including the TD error when the table was
    ///   updated
    fn on_ply(&mut self, _episode: usize, _board: &Board, _ply: &Ply) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal board.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the completed episode
    /// * `outcome` - Final outcome
    /// * `plies` - Number of moves played
    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome, _plies: usize) -> Result<()> {
        Ok(())
    }

    /// Called when the run completes. Use this to finalize outputs.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Shared handle, so a caller can read an observer back after the pipeline
/// that owns the box is done with it.
impl<T: Observer> Observer for Rc<RefCell<T>> {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        self.borrow_mut().on_run_start(total_episodes)
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        self.borrow_mut().on_episode_start(episode)
    }

    fn on_ply(&mut self, episode: usize, board: &Board, ply: &Ply) -> Result<()> {
        self.borrow_mut().on_ply(episode, board, ply)
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome, plies: usize) -> Result<()> {
        self.borrow_mut().on_episode_end(episode, outcome, plies)
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.borrow_mut().on_run_end()
    }
}
