//! Dihedral group of order 8 (the symmetries of the square)
//!
//! The group is generated by `r` (quarter turn) and `s` (mirror about the
//! vertical axis) with `r^4 = e`, `s^2 = e` and `s r = r^-1 s`. Each element
//! is a permutation of the cell indices
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```
//!
//! and acts on a board by moving the content of cell `j` to cell `p(j)`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BoardState, CELL_COUNT, Cell};
use crate::permutation::Permutation;

/// An element of the dihedral group of order 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dihedral {
    /// `e`
    Identity,
    /// `r`, a quarter turn
    Rotate90,
    /// `r^2`, a half turn
    Rotate180,
    /// `r^3`, a quarter turn the other way
    Rotate270,
    /// `s`, mirror about the vertical axis
    Reflect,
    /// `sr`, mirror about the anti-diagonal 2-4-6
    ReflectRotate90,
    /// `sr^2`, mirror about the horizontal axis
    ReflectRotate180,
    /// `sr^3`, mirror about the main diagonal 0-4-8
    ReflectRotate270,
}

use Dihedral::{
    Identity as E, Reflect as S, ReflectRotate90 as SR, ReflectRotate180 as SR2,
    ReflectRotate270 as SR3, Rotate90 as R, Rotate180 as R2, Rotate270 as R3,
};

const MAPPINGS: [[usize; CELL_COUNT]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8],
    [6, 3, 0, 7, 4, 1, 8, 5, 2],
    [8, 7, 6, 5, 4, 3, 2, 1, 0],
    [2, 5, 8, 1, 4, 7, 0, 3, 6],
    [2, 1, 0, 5, 4, 3, 8, 7, 6],
    [8, 5, 2, 7, 4, 1, 6, 3, 0],
    [6, 7, 8, 3, 4, 5, 0, 1, 2],
    [0, 3, 6, 1, 4, 7, 2, 5, 8],
];

/// `PRODUCT[a][b] = a * b`, where `(a * b)` acting on a board equals `a`
/// acting on the result of `b`.
const PRODUCT: [[Dihedral; 8]; 8] = [
    [E, R, R2, R3, S, SR, SR2, SR3],
    [R, R2, R3, E, SR3, S, SR, SR2],
    [R2, R3, E, R, SR2, SR3, S, SR],
    [R3, E, R, R2, SR, SR2, SR3, S],
    [S, SR, SR2, SR3, E, R, R2, R3],
    [SR, SR2, SR3, S, R3, E, R, R2],
    [SR2, SR3, S, SR, R2, R3, E, R],
    [SR3, S, SR, SR2, R, R2, R3, E],
];

const INVERSE: [Dihedral; 8] = [E, R3, R2, R, S, SR, SR2, SR3];

impl Dihedral {
    /// All elements in their fixed enumeration order
    pub const ALL: [Dihedral; 8] = [E, R, R2, R3, S, SR, SR2, SR3];

    pub fn all() -> impl Iterator<Item = Dihedral> {
        Self::ALL.into_iter()
    }

    /// Position in [`Dihedral::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short group-theoretic name (`e`, `r`, ..., `sr3`)
    pub fn short_name(self) -> &'static str {
        match self {
            E => "e",
            R => "r",
            R2 => "r2",
            R3 => "r3",
            S => "s",
            SR => "sr",
            SR2 => "sr2",
            SR3 => "sr3",
        }
    }

    /// The cell mapping of this element
    pub fn mapping(self) -> &'static [usize; CELL_COUNT] {
        &MAPPINGS[self.index()]
    }

    pub fn permutation(self) -> Permutation {
        match Permutation::new(self.mapping().to_vec()) {
            Ok(permutation) => permutation,
            Err(_) => unreachable!("symmetry mappings are bijections"),
        }
    }

    /// Group product `self * other`: apply `other` first, then `self`.
    #[must_use]
    pub fn compose(self, other: Dihedral) -> Dihedral {
        PRODUCT[self.index()][other.index()]
    }

    #[must_use]
    pub fn inverse(self) -> Dihedral {
        INVERSE[self.index()]
    }

    /// Where the content of `pos` ends up under this symmetry
    pub fn act_on_position(self, pos: usize) -> usize {
        self.mapping()[pos]
    }

    /// Rearrange a board's cells; piece counts are unchanged.
    pub fn act_on_cells(self, cells: &[Cell; CELL_COUNT]) -> [Cell; CELL_COUNT] {
        let mut transformed = [Cell::Empty; CELL_COUNT];
        for (pos, &cell) in cells.iter().enumerate() {
            transformed[self.act_on_position(pos)] = cell;
        }
        transformed
    }

    pub fn act_on_board(self, board: BoardState) -> BoardState {
        BoardState::from_cells(&self.act_on_cells(&board.cells()))
    }
}

impl fmt::Display for Dihedral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
