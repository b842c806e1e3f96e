//! Precomputed move graph over every valid board
//!
//! The graph is built once from a sweep of all `3^9` encodings. For each
//! valid non-terminal board it records the board reached by every legal move
//! (forward edges) and, on the resulting board, the originating board keyed by
//! the position that was played (backward edges).

use tracing::debug;

use super::board::{BoardState, CELL_COUNT, Player, STATE_SPACE};
use crate::{Error, Result};

/// A move edge: the position played and the board on the other end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub position: usize,
    pub board: BoardState,
}

#[derive(Debug, Clone, Default)]
struct Node {
    /// Successors in ascending position order
    forward: Vec<Edge>,
    /// Predecessors in ascending position order
    backward: Vec<Edge>,
    terminal: bool,
    winner: Option<Player>,
}

/// Forward/backward move relation and terminal classification
#[derive(Debug, Clone)]
pub struct MoveGraph {
    valid_states: Vec<BoardState>,
    nodes: Vec<Option<Node>>,
}

impl MoveGraph {
    /// Enumerate the valid boards and wire up every legal move.
    pub fn build() -> Self {
        let valid_states: Vec<BoardState> = (0..STATE_SPACE)
            .filter_map(|encoded| BoardState::from_encoded(encoded).ok())
            .filter(BoardState::is_valid)
            .collect();

        let mut nodes: Vec<Option<Node>> = vec![None; STATE_SPACE as usize];
        for &state in &valid_states {
            let winner = state.line_winner();
            nodes[usize::from(state.encoded())] = Some(Node {
                terminal: winner.is_some() || state.is_full(),
                winner,
                ..Node::default()
            });
        }

        let mut edge_count = 0;
        for &state in &valid_states {
            let from = usize::from(state.encoded());
            if nodes[from].as_ref().is_some_and(|node| node.terminal) {
                continue;
            }

            let mark = state.to_move().to_cell();
            let forward: Vec<Edge> = state
                .empty_positions()
                .into_iter()
                .map(|position| Edge {
                    position,
                    board: state.with_cell(position, mark),
                })
                .collect();

            for edge in &forward {
                if let Some(next) = nodes[usize::from(edge.board.encoded())].as_mut() {
                    next.backward.push(Edge {
                        position: edge.position,
                        board: state,
                    });
                }
            }
            edge_count += forward.len();
            if let Some(node) = nodes[from].as_mut() {
                node.forward = forward;
            }
        }

        for node in nodes.iter_mut().flatten() {
            node.backward.sort_by_key(|edge| edge.position);
        }

        debug!(
            valid_states = valid_states.len(),
            edges = edge_count,
            "Built move graph"
        );

        Self {
            valid_states,
            nodes,
        }
    }

    fn node(&self, state: BoardState) -> Option<&Node> {
        self.nodes
            .get(usize::from(state.encoded()))
            .and_then(Option::as_ref)
    }

    /// Every valid board in ascending encoding order
    pub fn valid_states(&self) -> &[BoardState] {
        &self.valid_states
    }

    pub fn contains(&self, state: BoardState) -> bool {
        self.node(state).is_some()
    }

    /// Number of forward edges in the graph
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .flatten()
            .map(|node| node.forward.len())
            .sum()
    }

    /// Empty cells of a non-terminal board in ascending order; empty for
    /// terminal boards and boards outside the valid set.
    pub fn available_positions(&self, state: BoardState) -> Vec<usize> {
        self.successors(state)
            .iter()
            .map(|edge| edge.position)
            .collect()
    }

    pub fn successors(&self, state: BoardState) -> &[Edge] {
        self.node(state)
            .map(|node| node.forward.as_slice())
            .unwrap_or_default()
    }

    pub fn predecessors(&self, state: BoardState) -> &[Edge] {
        self.node(state)
            .map(|node| node.backward.as_slice())
            .unwrap_or_default()
    }

    /// The board reached when the side to move plays `position`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPosition`] if `position >= 9`
    /// - [`Error::InvalidState`] if `state` is not a valid board
    /// - [`Error::IllegalMove`] if the cell is occupied or the game is over
    pub fn apply_move(&self, state: BoardState, position: usize) -> Result<BoardState> {
        if position >= CELL_COUNT {
            return Err(Error::InvalidPosition { position });
        }
        let node = self.node(state).ok_or(Error::InvalidState {
            encoded: u32::from(state.encoded()),
        })?;
        node.forward
            .iter()
            .find(|edge| edge.position == position)
            .map(|edge| edge.board)
            .ok_or(Error::IllegalMove {
                position,
                encoded: state.encoded(),
            })
    }

    /// The board that `state` was reached from by playing `position`, if any.
    pub fn undo_move(&self, state: BoardState, position: usize) -> Option<BoardState> {
        self.predecessors(state)
            .iter()
            .find(|edge| edge.position == position)
            .map(|edge| edge.board)
    }

    /// The position whose play turns `from` into `to`.
    pub fn move_between(&self, from: BoardState, to: BoardState) -> Option<usize> {
        self.successors(from)
            .iter()
            .find(|edge| edge.board == to)
            .map(|edge| edge.position)
    }

    /// Full board or a completed line. Boards outside the valid set are
    /// classified from their cells.
    pub fn is_terminal(&self, state: BoardState) -> bool {
        match self.node(state) {
            Some(node) => node.terminal,
            None => state.line_winner().is_some() || state.is_full(),
        }
    }

    pub fn winner(&self, state: BoardState) -> Option<Player> {
        match self.node(state) {
            Some(node) => node.winner,
            None => state.line_winner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::GameTables;

    fn graph() -> &'static MoveGraph {
        &GameTables::global().graph
    }

    #[test]
    fn valid_state_counts_are_fixed() {
        let graph = graph();
        assert_eq!(graph.valid_states().len(), 6046);
        let terminal = graph
            .valid_states()
            .iter()
            .filter(|&&s| graph.is_terminal(s))
            .count();
        assert_eq!(terminal, 1526);
        assert_eq!(graph.edge_count(), 16_167);
    }

    #[test]
    fn valid_states_are_ascending() {
        let states = graph().valid_states();
        assert!(states.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(states[0], BoardState::new());
    }

    #[test]
    fn winners_split_by_side() {
        let graph = graph();
        let count = |player| {
            graph
                .valid_states()
                .iter()
                .filter(|&&s| graph.winner(s) == Some(player))
                .count()
        };
        assert_eq!(count(Player::O), 1020);
        assert_eq!(count(Player::X), 490);
    }

    #[test]
    fn apply_then_undo_returns_origin() {
        let graph = graph();
        for &state in graph.valid_states() {
            for position in graph.available_positions(state) {
                let next = graph.apply_move(state, position).unwrap();
                assert_eq!(graph.undo_move(next, position), Some(state));
                assert_eq!(graph.move_between(state, next), Some(position));
            }
        }
    }

    #[test]
    fn undo_without_predecessor_is_none() {
        let graph = graph();
        assert_eq!(graph.undo_move(BoardState::new(), 0), None);
        let opened = BoardState::from_string("O........").unwrap();
        assert_eq!(graph.undo_move(opened, 4), None);
        assert_eq!(graph.undo_move(opened, 0), Some(BoardState::new()));
    }

    #[test]
    fn illegal_moves_are_rejected() {
        let graph = graph();
        let opened = BoardState::from_string("O........").unwrap();
        assert!(matches!(
            graph.apply_move(opened, 0),
            Err(Error::IllegalMove { position: 0, .. })
        ));
        assert!(matches!(
            graph.apply_move(opened, 9),
            Err(Error::InvalidPosition { position: 9 })
        ));

        let won = BoardState::from_string("OOOXX....").unwrap();
        assert!(graph.is_terminal(won));
        assert!(graph.available_positions(won).is_empty());
        assert!(matches!(
            graph.apply_move(won, 8),
            Err(Error::IllegalMove { position: 8, .. })
        ));
    }

    #[test]
    fn boards_outside_valid_set_are_classified_from_cells() {
        let graph = graph();
        let lopsided = BoardState::from_encoded(2 + 2 * 3 + 2 * 9).unwrap();
        assert!(!graph.contains(lopsided));
        assert!(graph.is_terminal(lopsided));
        assert_eq!(graph.winner(lopsided), Some(Player::X));
        assert!(matches!(
            graph.apply_move(lopsided, 4),
            Err(Error::InvalidState { .. })
        ));
    }
}
