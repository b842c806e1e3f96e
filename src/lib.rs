//! oxlearn: tabular reinforcement learning for tic-tac-toe
//!
//! This crate provides:
//! - A base-3 board encoding with a precomputed move graph over every valid
//!   board
//! - The dihedral symmetry group of the square and canonicalization of boards
//!   to one representative per orbit
//! - A value brain that picks moves from learned values and updates them
//!   backwards over a finished game
//! - Players (human, random, trained, learning), the game loop and self-play
//!   training
//! - JSON persistence of value tables behind a storage port

pub mod adapters;
pub mod agents;
pub mod app;
pub mod cli;
pub mod error;
pub mod game;
pub mod learning;
pub mod permutation;
pub mod ports;
pub mod tictactoe;
pub mod training;

pub use error::{Error, Result};
pub use game::{GameOutcome, GameResult, play_game, play_game_on};
pub use learning::{Brain, SharedBrain, ValueTable};
pub use permutation::Permutation;
pub use tictactoe::{BoardState, CanonicalForm, Dihedral, GameTables, Player};
pub use training::{TrainingSummary, train};
