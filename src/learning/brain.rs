//! The value brain: move selection and backward value updates
//!
//! All values live in the canonical frame. A board is reduced to its orbit
//! representative before it is scored or updated, and a move chosen on the
//! representative is carried back to the caller's board with the symmetry
//! recorded in its [`CanonicalForm`].

use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
};

use tracing::{debug, info, trace};

use super::value_table::ValueTable;
use crate::{
    Error, Result,
    ports::ValueStore,
    tictactoe::{BoardState, CanonicalForm, GameTables},
};

/// A brain shared by several players of the same process
pub type SharedBrain = Rc<RefCell<Brain>>;

/// One candidate move as scored by [`Brain::options`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOption {
    /// Position on the canonical board
    pub position: usize,
    /// Canonical representative of the board after the move
    pub successor: BoardState,
    pub value: f64,
}

/// Learned state values plus the tables needed to use them
pub struct Brain {
    tables: Arc<GameTables>,
    values: ValueTable,
    store: Arc<dyn ValueStore + Send + Sync>,
    output: PathBuf,
}

impl std::fmt::Debug for Brain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Brain")
            .field("entries", &self.values.len())
            .field("output", &self.output)
            .finish()
    }
}

impl Brain {
    /// Load the value table stored at `input`; later saves go to `output`.
    ///
    /// A missing input is an empty table.
    ///
    /// # Errors
    ///
    /// Fails if the stored table cannot be read or contains an entry that is
    /// not a valid board encoding with a finite value.
    pub fn load(
        tables: Arc<GameTables>,
        store: Arc<dyn ValueStore + Send + Sync>,
        input: &Path,
        output: impl Into<PathBuf>,
    ) -> Result<Self> {
        let values = store.load(input)?;
        Self::from_parts(tables, values, store, output)
    }

    /// Assemble a brain around an existing table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] for a key outside the valid set and
    /// [`Error::MalformedEntry`] for a value that is not finite.
    pub fn from_parts(
        tables: Arc<GameTables>,
        values: ValueTable,
        store: Arc<dyn ValueStore + Send + Sync>,
        output: impl Into<PathBuf>,
    ) -> Result<Self> {
        for (key, value) in values.entries() {
            let state = BoardState::from_encoded(u32::from(key))?;
            if !tables.graph.contains(state) {
                return Err(Error::InvalidState {
                    encoded: u32::from(key),
                });
            }
            if !value.is_finite() {
                return Err(Error::MalformedEntry {
                    key: key.to_string(),
                    reason: format!("value {value} is not a finite number"),
                });
            }
        }

        Ok(Self {
            tables,
            values,
            store,
            output: output.into(),
        })
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn tables(&self) -> &Arc<GameTables> {
        &self.tables
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Current value of `state`'s orbit (0 if never learned)
    pub fn value(&self, state: BoardState) -> Result<f64> {
        let form = self.canonical(state)?;
        Ok(self.values.get(form.canonical))
    }

    pub fn canonical(&self, state: BoardState) -> Result<CanonicalForm> {
        self.tables.canonical.lookup(state)
    }

    /// Score every legal move of `state`'s canonical board.
    ///
    /// Options come in ascending canonical position; a terminal board has none.
    pub fn options(&self, state: BoardState) -> Result<Vec<MoveOption>> {
        let form = self.canonical(state)?;
        self.tables
            .graph
            .successors(form.canonical)
            .iter()
            .map(|edge| {
                let successor = self.canonical(edge.board)?.canonical;
                Ok(MoveOption {
                    position: edge.position,
                    successor,
                    value: self.values.get(successor),
                })
            })
            .collect()
    }

    /// The highest-valued move on `state`, in `state`'s own frame.
    ///
    /// Ties go to the lowest canonical position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMoves`] on a terminal board and
    /// [`Error::InvalidState`] on a board outside the valid set.
    pub fn best_move(&self, state: BoardState) -> Result<usize> {
        let form = self.canonical(state)?;
        let options = self.options(state)?;

        let mut best: Option<&MoveOption> = None;
        for option in &options {
            trace!(
                position = option.position,
                successor = option.successor.encoded(),
                value = option.value,
                "Scored option"
            );
            if best.is_none_or(|current| option.value > current.value) {
                best = Some(option);
            }
        }

        let best = best.ok_or(Error::NoLegalMoves {
            encoded: state.encoded(),
        })?;
        let position = form.to_original(best.position);
        debug!(
            board = state.encoded(),
            canonical = form.canonical.encoded(),
            symmetry = %form.symmetry,
            position,
            value = best.value,
            "Selected move"
        );
        Ok(position)
    }

    /// Pull the values of `history` (oldest first) toward `reward`.
    ///
    /// Walks the history newest to oldest. Each state moves a `learn_rate`
    /// fraction of the way toward `decay_rate` times its target, and its new
    /// value becomes the target of the state before it. The first target is
    /// `reward`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if any entry is outside the valid set;
    /// the table is left untouched in that case.
    pub fn learn(
        &mut self,
        history: &[BoardState],
        reward: f64,
        learn_rate: f64,
        decay_rate: f64,
    ) -> Result<()> {
        let canonical = history
            .iter()
            .map(|&state| Ok(self.canonical(state)?.canonical))
            .collect::<Result<Vec<_>>>()?;

        let mut target = reward;
        for &state in canonical.iter().rev() {
            let current = self.values.get(state);
            let updated = current + learn_rate * (decay_rate * target - current);
            self.values.set(state, updated);
            target = updated;
        }

        debug!(states = history.len(), reward, "Learned from game");
        Ok(())
    }

    /// Write the significant entries to the output path.
    pub fn save(&self) -> Result<()> {
        let significant = self.values.significant();
        self.store.save(&significant, &self.output)?;
        info!(
            path = %self.output.display(),
            entries = significant.len(),
            dropped = self.values.len() - significant.len(),
            "Saved brain"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStore;

    const TOLERANCE: f64 = 1e-12;

    fn board(s: &str) -> BoardState {
        BoardState::from_string(s).unwrap()
    }

    fn brain_with(values: ValueTable) -> Brain {
        Brain::from_parts(
            GameTables::shared(),
            values,
            Arc::new(InMemoryStore::new()),
            "out.json",
        )
        .unwrap()
    }

    fn canonical_key(state: BoardState) -> u16 {
        GameTables::global()
            .canonical
            .lookup(state)
            .unwrap()
            .canonical
            .encoded()
    }

    #[test]
    fn fresh_brain_plays_the_only_move() {
        let brain = brain_with(ValueTable::new());
        assert_eq!(brain.best_move(board("OXOOXXXO.")).unwrap(), 8);
    }

    #[test]
    fn ties_go_to_the_first_position() {
        let brain = brain_with(ValueTable::new());
        assert_eq!(brain.best_move(BoardState::new()).unwrap(), 0);
    }

    #[test]
    fn prefers_the_highest_value() {
        let center = board("....O....");
        let brain = brain_with([(canonical_key(center), 0.5)].into_iter().collect());
        assert_eq!(brain.best_move(BoardState::new()).unwrap(), 4);
    }

    #[test]
    fn move_is_mapped_back_to_the_original_frame() {
        // O in the bottom-right corner is the rotated image of O in the top-left
        let state = board("........O");
        let favoured = canonical_key(board("O.......X"));
        let brain = brain_with([(favoured, 1.0)].into_iter().collect());

        let form = brain.canonical(state).unwrap();
        assert_eq!(form.canonical, board("O........"));
        assert_eq!(brain.best_move(state).unwrap(), 0);
        assert_eq!(form.to_original(8), 0);
    }

    #[test]
    fn terminal_board_has_no_moves() {
        let brain = brain_with(ValueTable::new());
        let won = board("OOOXX....");
        assert!(brain.options(won).unwrap().is_empty());
        assert!(matches!(
            brain.best_move(won),
            Err(Error::NoLegalMoves { .. })
        ));
    }

    #[test]
    fn options_are_in_canonical_frame() {
        let brain = brain_with(ValueTable::new());
        let options = brain.options(board("O........")).unwrap();
        let positions: Vec<_> = options.iter().map(|option| option.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        for option in &options {
            assert_eq!(canonical_key(option.successor), option.successor.encoded());
        }
    }

    #[test]
    fn learn_walks_history_backwards() {
        let history = [board("O........"), board("OX.O....."), board("OXXOO....")];
        let keys: Vec<u16> = history.iter().map(|&state| canonical_key(state)).collect();
        let start = [0.1, 0.2, 0.3];
        let mut brain = brain_with(keys.iter().copied().zip(start).collect());

        let (alpha, gamma, reward) = (0.2, 0.9, 1.0);
        brain.learn(&history, reward, alpha, gamma).unwrap();

        let newest = start[2] + alpha * (gamma * reward - start[2]);
        let middle = start[1] + alpha * (gamma * newest - start[1]);
        let oldest = start[0] + alpha * (gamma * middle - start[0]);

        let learned: Vec<f64> = history
            .iter()
            .map(|&state| brain.value(state).unwrap())
            .collect();
        assert!((learned[2] - newest).abs() < TOLERANCE);
        assert!((learned[1] - middle).abs() < TOLERANCE);
        assert!((learned[0] - oldest).abs() < TOLERANCE);
        assert!((learned[2] - 0.42).abs() < TOLERANCE);
        assert!((learned[1] - 0.2356).abs() < TOLERANCE);
        assert!((learned[0] - 0.122408).abs() < TOLERANCE);
    }

    #[test]
    fn learn_updates_the_canonical_entry() {
        let mut brain = brain_with(ValueTable::new());
        brain.learn(&[board("........O")], 1.0, 0.5, 1.0).unwrap();
        assert_eq!(brain.values().get(board("O........")), 0.5);
        assert_eq!(brain.values().len(), 1);
    }

    #[test]
    fn invalid_history_leaves_table_untouched() {
        let mut brain = brain_with(ValueTable::new());
        let invalid = BoardState::from_encoded(2).unwrap();
        let result = brain.learn(&[board("O........"), invalid], 1.0, 0.2, 0.9);
        assert!(matches!(result, Err(Error::InvalidState { encoded: 2 })));
        assert!(brain.values().is_empty());
    }

    #[test]
    fn save_drops_insignificant_entries() {
        let store = InMemoryStore::new();
        let brain = Brain::from_parts(
            GameTables::shared(),
            [(100, 0.5), (200, 1e-6)].into_iter().collect(),
            Arc::new(store.clone()),
            "out.json",
        )
        .unwrap();
        brain.save().unwrap();

        let saved = store.load(Path::new("out.json")).unwrap();
        assert_eq!(saved.entries().collect::<Vec<_>>(), vec![(100, 0.5)]);
    }

    #[test]
    fn load_reads_from_input_and_saves_to_output() {
        let store = InMemoryStore::new();
        let table: ValueTable = [(100, 0.5)].into_iter().collect();
        store.save(&table, Path::new("in.json")).unwrap();

        let brain = Brain::load(
            GameTables::shared(),
            Arc::new(store.clone()),
            Path::new("in.json"),
            "out.json",
        )
        .unwrap();
        assert_eq!(brain.values(), &table);

        brain.save().unwrap();
        assert!(store.contains(Path::new("out.json")));
    }

    #[test]
    fn load_rejects_invalid_keys() {
        let store = InMemoryStore::new();
        store.insert_raw(Path::new("in.json"), r#"{"2": 0.5}"#);
        let result = Brain::load(
            GameTables::shared(),
            Arc::new(store),
            Path::new("in.json"),
            "out.json",
        );
        assert!(matches!(result, Err(Error::InvalidState { encoded: 2 })));
    }

    #[test]
    fn rejects_non_finite_values() {
        let result = Brain::from_parts(
            GameTables::shared(),
            [(100, f64::NAN)].into_iter().collect(),
            Arc::new(InMemoryStore::new()),
            "out.json",
        );
        assert!(matches!(result, Err(Error::MalformedEntry { .. })));
    }
}
