//! In-memory interaction adapters for tests and scripted games.
//!
//! These adapters implement the interaction ports without any terminal I/O,
//! so sessions can be replayed deterministically.

use std::collections::VecDeque;

use crate::{
    Result,
    ports::{BoardRenderer, MoveInput},
    tictactoe::Board,
};

/// Replays a fixed list of answers, then reports exhausted input.
///
/// # Examples
///
/// ```
/// use qttt::adapters::ScriptedInput;
/// use qttt::ports::MoveInput;
///
/// let mut input = ScriptedInput::new(["4", "0"]);
/// assert_eq!(input.next_action()?.as_deref(), Some("4"));
/// assert_eq!(input.next_action()?.as_deref(), Some("0"));
/// assert_eq!(input.next_action()?, None);
/// # Ok::<(), qttt::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    rejections: Vec<(String, String)>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            rejections: Vec::new(),
        }
    }

    /// Answers that were refused, with the reason given
    pub fn rejections(&self) -> &[(String, String)] {
        &self.rejections
    }
}

impl MoveInput for ScriptedInput {
    fn next_action(&mut self) -> Result<Option<String>> {
        Ok(self.answers.pop_front())
    }

    fn reject(&mut self, answer: &str, reason: &str) -> Result<()> {
        self.rejections.push((answer.to_string(), reason.to_string()));
        Ok(())
    }
}

/// Keeps every rendered board and announcement.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<Board>,
    pub messages: Vec<String>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardRenderer for RecordingRenderer {
    fn render(&mut self, board: &Board) -> Result<()> {
        self.frames.push(*board);
        Ok(())
    }

    fn announce(&mut self, message: &str) -> Result<()> {
        self.messages.push(message.to_string());
        Ok(())
    }
}
