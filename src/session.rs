//! Human versus agent play
//!
//! The session drives one game through the interaction ports. X always moves
//! first; the human may hold either mark.

use std::fmt;

use tracing::debug;

use crate::{
    Error, Result,
    ports::{BoardRenderer, MoveInput},
    q_learning::QLearningAgent,
    tictactoe::{Board, Player},
};

/// How an interactive game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    AgentWon,
    HumanWon,
    Draw,
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::AgentWon => f.write_str("You lose!"),
            SessionOutcome::HumanWon => f.write_str("You win!"),
            SessionOutcome::Draw => f.write_str("Draw!"),
        }
    }
}

/// One interactive game
#[derive(Debug, Clone, Copy)]
pub struct InteractiveSession {
    human_mark: Player,
    learn: bool,
}

impl InteractiveSession {
    /// Session in which the human plays `human_mark`
    pub fn new(human_mark: Player) -> Self {
        Self {
            human_mark,
            learn: true,
        }
    }

    /// Whether the agent updates its table from its own moves (default on)
    pub fn with_learning(mut self, learn: bool) -> Self {
        self.learn = learn;
        self
    }

    /// Play one game to completion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] when the input runs out before the game
    /// ends. Invalid answers are rejected through the input port and asked
    /// again; they never end the session.
    pub fn run(
        &self,
        agent: &mut QLearningAgent,
        renderer: &mut dyn BoardRenderer,
        input: &mut dyn MoveInput,
    ) -> Result<SessionOutcome> {
        let agent_mark = self.human_mark.opponent();
        let mut board = Board::new();
        let mut mover = Player::X;

        renderer.announce(&format!("You play {}. X moves first.", self.human_mark))?;

        while !board.is_terminal() {
            renderer.render(&board)?;

            if mover == self.human_mark {
                let action = read_human_action(&board, input)?;
                board.apply(action, mover)?;
                debug!(action, "human moved");
            } else {
                let ply = agent.play_ply(&mut board, agent_mark, self.learn)?;
                debug!(action = ply.action, td_error = ?ply.td_error, "agent moved");
            }
            mover = mover.opponent();
        }

        renderer.render(&board)?;
        let outcome = match board.winner() {
            Some(winner) if winner == self.human_mark => SessionOutcome::HumanWon,
            Some(_) => SessionOutcome::AgentWon,
            None => SessionOutcome::Draw,
        };
        renderer.announce(&outcome.to_string())?;
        Ok(outcome)
    }
}

/// Ask until the human names an empty cell
fn read_human_action(board: &Board, input: &mut dyn MoveInput) -> Result<usize> {
    loop {
        let Some(answer) = input.next_action()? else {
            return Err(Error::InputClosed);
        };

        let action = match answer.trim().parse::<usize>() {
            Ok(action) => action,
            Err(_) => {
                input.reject(&answer, "not a number")?;
                continue;
            }
        };

        match board.check_action(action) {
            Ok(()) => return Ok(action),
            Err(Error::InvalidAction { reason, .. }) => input.reject(&answer, reason)?,
            Err(err) => return Err(err),
        }
    }
}
