//! Tic-Tac-Toe game model: encoding, move graph, symmetries

pub mod board;
pub mod canonical;
pub mod lines;
pub mod move_graph;
pub mod symmetry;
pub mod tables;

pub use board::{BoardState, CELL_COUNT, Cell, PieceCount, Player, STATE_SPACE};
pub use canonical::{CanonicalForm, CanonicalTable};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use move_graph::{Edge, MoveGraph};
pub use symmetry::Dihedral;
pub use tables::GameTables;
