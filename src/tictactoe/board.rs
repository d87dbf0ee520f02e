//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{NUM_CELLS, lines::LineAnalyzer};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

impl std::str::FromStr for Player {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Player::X),
            "o" => Ok(Player::O),
            _ => Err(crate::Error::ParseOption {
                kind: "mark",
                input: s.to_string(),
                expected: "x, o",
            }),
        }
    }
}

/// The 3x3 grid, stored row-major.
///
/// The board does not track whose turn it is. Loops that drive a game carry
/// the mark to move alongside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; NUM_CELLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; NUM_CELLS],
        }
    }

    /// Clear every cell
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; NUM_CELLS];
    }

    /// Create a board from a string of 9 cell characters.
    ///
    /// Whitespace other than spaces inside the grid is ignored, so multi-line
    /// layouts such as `"XO.\n.X.\n..O"` parse as expected.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 cells are present or a character is not a
    /// valid cell representation.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !matches!(c, '\n' | '\r' | '\t')).collect();
        if chars.len() < NUM_CELLS {
            return Err(crate::Error::InvalidBoardLength {
                expected: NUM_CELLS,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; NUM_CELLS];
        for (i, &c) in chars.iter().take(NUM_CELLS).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Empty cells in ascending order. An empty result means the board is full.
    pub fn legal_actions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check whether `action` names an empty cell
    pub fn check_action(&self, action: usize) -> Result<(), crate::Error> {
        if action >= NUM_CELLS {
            return Err(crate::Error::InvalidAction {
                action,
                reason: "position must be between 0 and 8",
            });
        }
        if !self.is_empty(action) {
            return Err(crate::Error::InvalidAction {
                action,
                reason: "cell is already occupied",
            });
        }
        Ok(())
    }

    /// Place `mark` on `action`. The board is left untouched on error.
    pub fn apply(&mut self, action: usize, mark: Player) -> Result<(), crate::Error> {
        self.check_action(action)?;
        self.cells[action] = mark.to_cell();
        Ok(())
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Any row, column or diagonal holds three equal marks
    pub fn is_win(&self) -> bool {
        LineAnalyzer::completed_line(&self.cells).is_some()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty) && !self.is_win()
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.is_win() || self.is_draw()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(actions: &[usize]) -> Board {
        let mut board = Board::new();
        let mut mover = Player::X;
        for &action in actions {
            board.apply(action, mover).unwrap();
            mover = mover.opponent();
        }
        board
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        for i in 0..9 {
            assert_eq!(board.cells[i], Cell::Empty);
        }
        assert_eq!(board.legal_actions(), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_apply() {
        let mut board = Board::new();

        assert!(board.apply(4, Player::X).is_ok());
        assert_eq!(board.cells[4], Cell::X);

        let result = board.apply(4, Player::O);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("occupied"));
        assert_eq!(board.cells[4], Cell::X);
    }

    #[test]
    fn test_apply_out_of_range() {
        let mut board = Board::new();
        let err = board.apply(9, Player::X).unwrap_err();
        assert!(err.is_invalid_action());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_legal_actions() {
        let mut board = Board::new();
        assert_eq!(board.legal_actions().len(), 9);

        board.apply(0, Player::X).unwrap();
        assert_eq!(board.legal_actions().len(), 8);
        assert!(!board.legal_actions().contains(&0));

        board.apply(4, Player::O).unwrap();
        let legal = board.legal_actions();
        assert_eq!(legal.len(), 7);
        assert!(legal.iter().all(|&a| board.is_empty(a)));
    }

    #[test]
    fn test_top_row_win() {
        let board = Board::from_string("XXX.OO...").unwrap();
        assert!(board.is_win());
        assert!(!board.is_draw());
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::X));
    }

    #[test]
    fn test_win_detection_vertical() {
        let board = play(&[0, 1, 2, 4, 5, 7]);
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::O));
    }

    #[test]
    fn test_win_detection_diagonal() {
        let board = play(&[0, 1, 4, 2, 8]);
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::X));
    }

    #[test]
    fn test_draw_detection() {
        let board = play(&[0, 1, 2, 4, 3, 6, 5, 8, 7]);
        assert!(board.is_draw());
        assert!(!board.is_win());
        assert!(board.is_terminal());
        assert!(board.legal_actions().is_empty());
    }

    #[test]
    fn test_empty_board_is_neither() {
        let board = Board::new();
        assert!(!board.is_win());
        assert!(!board.is_draw());
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_win_on_full_board_is_not_draw() {
        let board = Board::from_string("XOXOXOOXX").unwrap();
        assert!(board.is_win());
        assert!(!board.is_draw());
    }

    #[test]
    fn test_reset() {
        let mut board = play(&[0, 4, 8]);
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("XOX......").unwrap();
        assert_eq!(board.cells[0], Cell::X);
        assert_eq!(board.cells[1], Cell::O);
        assert_eq!(board.cells[2], Cell::X);
        assert_eq!(board.occupied_count(), 3);

        assert!(Board::from_string("XO").is_err());
        assert!(Board::from_string("XOZ......").is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XOX.O.X..").unwrap();
        assert_eq!(format!("{board}"), "XOX\n.O.\nX..");
    }

    #[test]
    fn test_parse_player() {
        assert_eq!("x".parse::<Player>().unwrap(), Player::X);
        assert_eq!(" O ".parse::<Player>().unwrap(), Player::O);
        assert!("z".parse::<Player>().is_err());
    }
}
