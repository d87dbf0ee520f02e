//! Console adapters for interactive play.
//!
//! Both adapters are generic over their streams so tests can drive them with
//! in-memory buffers; the binary uses stdin and stdout.

use std::io::{BufRead, Write};

use crate::{
    Result,
    ports::{BoardRenderer, MoveInput},
    tictactoe::{Board, Cell},
};

const FRAME: &str = "=====";
const ROW_SEPARATOR: &str = "-----";

/// Format `board` as a 3x3 grid framed by `=====` lines.
///
/// ```
/// use qttt::{adapters::console::render_grid, tictactoe::Board};
///
/// let board = Board::from_string("X...O....").unwrap();
/// assert_eq!(
///     render_grid(&board),
///     "=====\nX| | \n-----\n |O| \n-----\n | | \n=====\n"
/// );
/// ```
pub fn render_grid(board: &Board) -> String {
    let mut out = String::new();
    out.push_str(FRAME);
    out.push('\n');
    for row in 0..3 {
        let cells: Vec<&str> = (0..3)
            .map(|col| match board.get(row * 3 + col) {
                Cell::Empty => " ",
                Cell::X => "X",
                Cell::O => "O",
            })
            .collect();
        out.push_str(&cells.join("|"));
        out.push('\n');
        if row < 2 {
            out.push_str(ROW_SEPARATOR);
            out.push('\n');
        }
    }
    out.push_str(FRAME);
    out.push('\n');
    out
}

/// Renders boards as ASCII grids
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleRenderer<std::io::Stdout> {
    /// Renderer writing to standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> BoardRenderer for ConsoleRenderer<W> {
    fn render(&mut self, board: &Board) -> Result<()> {
        self.out.write_all(render_grid(board).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn announce(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }
}

/// Prompts for moves on a writer and reads answers line by line
pub struct ConsoleInput<R: BufRead, W: Write> {
    input: R,
    prompt: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self { input, prompt }
    }
}

impl ConsoleInput<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Input reading standard input, prompting on standard output
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> MoveInput for ConsoleInput<R, W> {
    fn next_action(&mut self) -> Result<Option<String>> {
        write!(self.prompt, "Enter your action (0-8): ")?;
        self.prompt.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn reject(&mut self, answer: &str, reason: &str) -> Result<()> {
        writeln!(
            self.prompt,
            "Invalid action '{answer}': {reason}. Please select an empty cell (0-8)."
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_marks_and_separators() {
        let board = Board::from_string("XO.......").unwrap();
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer.render(&board).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "X|O| ");
        assert_eq!(lines[2], "-----");
        assert_eq!(lines[5], " | | ");
    }

    #[test]
    fn reads_trimmed_lines_until_eof() {
        let mut input = ConsoleInput::new(" 4 \nfoo\n".as_bytes(), Vec::new());
        assert_eq!(input.next_action().unwrap().as_deref(), Some("4"));
        assert_eq!(input.next_action().unwrap().as_deref(), Some("foo"));
        assert_eq!(input.next_action().unwrap(), None);
    }

    #[test]
    fn prompts_and_rejections_are_written() {
        let mut prompt = Vec::new();
        {
            let mut input = ConsoleInput::new("9\n".as_bytes(), &mut prompt);
            input.next_action().unwrap();
            input.reject("9", "position must be between 0 and 8").unwrap();
        }
        let text = String::from_utf8(prompt).unwrap();
        assert!(text.starts_with("Enter your action (0-8): "));
        assert!(text.contains("Invalid action '9'"));
    }
}
