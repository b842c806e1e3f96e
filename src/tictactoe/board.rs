//! Board state representation and basic operations
//!
//! A board is stored as its base-3 encoding: cell `i` contributes
//! `tag(cell_i) * 3^i`, with tags `Empty = 0`, `O = 1`, `X = 2`. The expanded
//! nine-cell form is recovered on demand with [`BoardState::cells`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GameTables, lines::LineAnalyzer};
use crate::{Error, Result};

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// Number of raw encodings, `3^9`
pub const STATE_SPACE: u32 = 19_683;

const POW3: [u16; CELL_COUNT] = [1, 3, 9, 27, 81, 243, 729, 2187, 6561];

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    O,
    X,
}

impl Cell {
    /// Ternary digit used by the board encoding
    pub fn tag(self) -> u16 {
        match self {
            Cell::Empty => 0,
            Cell::O => 1,
            Cell::X => 2,
        }
    }

    pub fn from_tag(tag: u16) -> Option<Cell> {
        match tag {
            0 => Some(Cell::Empty),
            1 => Some(Cell::O),
            2 => Some(Cell::X),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::O => 'O',
            Cell::X => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'O' | 'o' | '0' => Some(Cell::O),
            'X' | 'x' => Some(Cell::X),
            _ => None,
        }
    }

    /// The player owning this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::O => Some(Player::O),
            Cell::X => Some(Player::X),
            Cell::Empty => None,
        }
    }
}

/// A side in the game. O always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    O,
    X,
}

impl Player {
    /// The side making the first move
    pub const FIRST: Player = Player::O;

    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::O => Player::X,
            Player::X => Player::O,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::O => Cell::O,
            Player::X => Cell::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceCount {
    pub o: usize,
    pub x: usize,
    pub empty: usize,
}

/// A board configuration, stored as its base-3 encoding.
///
/// Two boards are equal exactly when their encodings are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardState {
    encoded: u16,
}

impl BoardState {
    /// The empty board
    pub fn new() -> Self {
        Self { encoded: 0 }
    }

    /// Wrap a raw encoding.
    ///
    /// Any encoding below `3^9` is accepted, including boards that cannot
    /// arise in play; use [`BoardState::is_valid`] to check the piece counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if `encoded >= 3^9`.
    pub fn from_encoded(encoded: u32) -> Result<Self> {
        if encoded >= STATE_SPACE {
            return Err(Error::InvalidState { encoded });
        }
        Ok(Self {
            encoded: encoded as u16,
        })
    }

    /// Encode an expanded board.
    pub fn from_cells(cells: &[Cell; CELL_COUNT]) -> Self {
        let encoded = cells
            .iter()
            .zip(POW3)
            .map(|(cell, weight)| cell.tag() * weight)
            .sum();
        Self { encoded }
    }

    /// Parse a board from nine cell characters, whitespace ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoardString`] if the text does not hold exactly
    /// nine valid cell characters, or [`Error::InvalidState`] if the piece
    /// counts cannot occur with O moving first.
    pub fn from_string(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != CELL_COUNT {
            return Err(Error::InvalidBoardString {
                input: s.to_string(),
                reason: format!("expected {CELL_COUNT} cells, got {}", chars.len()),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidBoardString {
                input: s.to_string(),
                reason: format!("invalid character '{c}' at position {i}"),
            })?;
        }

        let board = Self::from_cells(&cells);
        if !board.is_valid() {
            return Err(Error::InvalidState {
                encoded: u32::from(board.encoded),
            });
        }
        Ok(board)
    }

    /// The base-3 encoding
    pub fn encoded(&self) -> u16 {
        self.encoded
    }

    /// The expanded nine-cell form
    pub fn cells(&self) -> [Cell; CELL_COUNT] {
        std::array::from_fn(|pos| self.get(pos))
    }

    /// Get cell at position (0-8)
    ///
    /// # Panics
    ///
    /// Panics if `pos >= 9`.
    pub fn get(&self, pos: usize) -> Cell {
        let tag = (self.encoded / POW3[pos]) % 3;
        match Cell::from_tag(tag) {
            Some(cell) => cell,
            None => unreachable!("a base-3 digit is always below 3"),
        }
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.get(pos) == Cell::Empty
    }

    pub fn piece_counts(&self) -> PieceCount {
        let mut count = PieceCount::default();
        for cell in self.cells() {
            match cell {
                Cell::O => count.o += 1,
                Cell::X => count.x += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }

    /// O has placed as many marks as X, or exactly one more.
    pub fn is_valid(&self) -> bool {
        let count = self.piece_counts();
        count.o == count.x || count.o == count.x + 1
    }

    /// O when the counts are equal, X otherwise
    pub fn to_move(&self) -> Player {
        let count = self.piece_counts();
        if count.o == count.x {
            Player::O
        } else {
            Player::X
        }
    }

    /// Get all empty positions in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Owner of a completed line, computed from the cells directly
    pub fn line_winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells())
    }

    pub fn is_full(&self) -> bool {
        (0..CELL_COUNT).all(|pos| !self.is_empty(pos))
    }

    /// The board with `pos` overwritten by `cell`.
    #[must_use]
    pub(crate) fn with_cell(&self, pos: usize, cell: Cell) -> Self {
        let cleared = self.encoded - self.get(pos).tag() * POW3[pos];
        Self {
            encoded: cleared + cell.tag() * POW3[pos],
        }
    }

    /// Legal positions, empty when the game is over
    pub fn legal_moves(&self) -> Vec<usize> {
        GameTables::global().graph.available_positions(*self)
    }

    /// Play `pos` for the side to move.
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState> {
        GameTables::global().graph.apply_move(*self, pos)
    }

    /// The board this one was reached from by playing `pos`, if recorded.
    pub fn undo_move(&self, pos: usize) -> Option<BoardState> {
        GameTables::global().graph.undo_move(*self, pos)
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        GameTables::global().graph.is_terminal(*self)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        GameTables::global().graph.winner(*self)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells().iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1) % 3 == 0 {
                if i < 8 {
                    writeln!(f)?;
                }
            } else {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = BoardState::new();
        assert_eq!(board.encoded(), 0);
        assert_eq!(board.cells(), [Cell::Empty; 9]);
        assert_eq!(board.to_move(), Player::O);
    }

    #[test]
    fn test_decode_fixture() {
        // . X X
        // . X O
        // . X O
        let board = BoardState::from_encoded(11364).unwrap();
        use Cell::{Empty as E, O, X};
        assert_eq!(board.cells(), [E, X, X, E, X, O, E, X, O]);
        assert_eq!(BoardState::from_cells(&board.cells()), board);
    }

    #[test]
    fn test_encoding_weights() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::O;
        assert_eq!(BoardState::from_cells(&cells).encoded(), 1);
        cells[0] = Cell::X;
        assert_eq!(BoardState::from_cells(&cells).encoded(), 2);
        cells[8] = Cell::O;
        assert_eq!(BoardState::from_cells(&cells).encoded(), 2 + 6561);
    }

    #[test]
    fn test_roundtrip_every_encoding() {
        for n in 0..STATE_SPACE {
            let board = BoardState::from_encoded(n).unwrap();
            assert_eq!(u32::from(BoardState::from_cells(&board.cells()).encoded()), n);
        }
    }

    #[test]
    fn test_rejects_out_of_range_encoding() {
        assert!(matches!(
            BoardState::from_encoded(STATE_SPACE),
            Err(Error::InvalidState { encoded: 19_683 })
        ));
    }

    #[test]
    fn test_to_move_follows_counts() {
        let board = BoardState::from_string("O........").unwrap();
        assert_eq!(board.to_move(), Player::X);
        let board = BoardState::from_string("OX.......").unwrap();
        assert_eq!(board.to_move(), Player::O);
    }

    #[test]
    fn test_from_string() {
        let board = BoardState::from_string("OXO......").unwrap();
        assert_eq!(board.get(0), Cell::O);
        assert_eq!(board.get(1), Cell::X);
        assert_eq!(board.get(2), Cell::O);

        let spaced = BoardState::from_string("O X O\n. . .\n. . .").unwrap();
        assert_eq!(spaced, board);

        assert!(BoardState::from_string("OX").is_err());
        assert!(BoardState::from_string("OXZ......").is_err());
        // X cannot be ahead of O
        assert!(BoardState::from_string("X........").is_err());
    }

    #[test]
    fn test_with_cell() {
        let board = BoardState::new().with_cell(4, Cell::O);
        assert_eq!(board.get(4), Cell::O);
        assert_eq!(board.with_cell(4, Cell::Empty), BoardState::new());
    }

    #[test]
    fn test_display() {
        let board = BoardState::from_string("OXO.X.O..").unwrap();
        assert_eq!(board.to_string(), "O X O\n. X .\nO . .");
    }

    #[test]
    fn test_empty_positions() {
        let board = BoardState::from_string("O...X....").unwrap();
        assert_eq!(board.empty_positions(), vec![1, 2, 3, 5, 6, 7, 8]);
    }
}
