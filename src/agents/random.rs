//! Uniformly random player

use std::sync::Arc;

use rand::{rngs::StdRng, seq::IndexedRandom};

use super::build_rng;
use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{BoardState, GameTables},
};

/// Plays a uniformly random legal position
#[derive(Debug, Clone)]
pub struct RandomAgent {
    tables: Arc<GameTables>,
    rng: StdRng,
}

impl RandomAgent {
    /// A random player on the process-wide tables
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_tables(GameTables::shared(), seed)
    }

    pub fn with_tables(tables: Arc<GameTables>, seed: Option<u64>) -> Self {
        Self {
            tables,
            rng: build_rng(seed),
        }
    }

    pub fn tables(&self) -> &Arc<GameTables> {
        &self.tables
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: BoardState) -> Result<Option<usize>> {
        self.tables
            .graph
            .available_positions(board)
            .choose(&mut self.rng)
            .copied()
            .map(Some)
            .ok_or(Error::NoLegalMoves {
                encoded: board.encoded(),
            })
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_picks_a_legal_move() {
        let mut agent = RandomAgent::new(Some(7));
        let board = BoardState::from_string("OX.O.X...").unwrap();
        let legal = board.legal_moves();
        for _ in 0..50 {
            let position = agent.select_move(board).unwrap().unwrap();
            assert!(legal.contains(&position));
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let board = BoardState::new();
        let mut first = RandomAgent::new(Some(42));
        let mut second = RandomAgent::new(Some(42));
        for _ in 0..20 {
            assert_eq!(
                first.select_move(board).unwrap(),
                second.select_move(board).unwrap()
            );
        }
    }

    #[test]
    fn terminal_board_is_an_error() {
        let mut agent = RandomAgent::new(Some(1));
        let board = BoardState::from_string("OOOXX....").unwrap();
        assert!(matches!(
            agent.select_move(board),
            Err(Error::NoLegalMoves { .. })
        ));
    }
}
