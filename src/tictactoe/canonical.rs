//! Symmetry canonicalization of valid boards
//!
//! Every valid board maps to one representative of its orbit under the
//! dihedral group together with the symmetry that carries the representative
//! onto the board. Boards are visited in ascending encoding order and each
//! image of an unseen board is claimed by that board, so the representative
//! is always the smallest encoding in the orbit and the symmetry is the first
//! element of [`Dihedral::ALL`] producing the board. The rule depends only on
//! the fixed enumeration orders, so stored value tables stay portable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    board::{BoardState, STATE_SPACE},
    move_graph::MoveGraph,
    symmetry::Dihedral,
};
use crate::{Error, Result};

/// A board's orbit representative and the symmetry mapping it back
///
/// Invariant: `symmetry.act_on_board(canonical) == original board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalForm {
    pub canonical: BoardState,
    pub symmetry: Dihedral,
}

impl CanonicalForm {
    /// Map a position on the canonical board to the original board
    pub fn to_original(&self, canonical_position: usize) -> usize {
        self.symmetry.act_on_position(canonical_position)
    }

    /// Map a position on the original board to the canonical board
    pub fn to_canonical(&self, original_position: usize) -> usize {
        self.symmetry.inverse().act_on_position(original_position)
    }
}

/// Lookup from every valid board to its [`CanonicalForm`]
#[derive(Debug, Clone)]
pub struct CanonicalTable {
    forms: Vec<Option<CanonicalForm>>,
}

impl CanonicalTable {
    pub fn build(graph: &MoveGraph) -> Self {
        let mut forms: Vec<Option<CanonicalForm>> = vec![None; STATE_SPACE as usize];
        let mut classes = 0;

        for &state in graph.valid_states() {
            if forms[usize::from(state.encoded())].is_some() {
                continue;
            }
            classes += 1;
            for symmetry in Dihedral::all() {
                let image = symmetry.act_on_board(state);
                let slot = &mut forms[usize::from(image.encoded())];
                if slot.is_none() {
                    *slot = Some(CanonicalForm {
                        canonical: state,
                        symmetry,
                    });
                }
            }
        }

        debug!(classes, "Built canonical table");
        Self { forms }
    }

    /// Canonical form of a valid board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if `state` is outside the valid set.
    pub fn lookup(&self, state: BoardState) -> Result<CanonicalForm> {
        self.forms
            .get(usize::from(state.encoded()))
            .copied()
            .flatten()
            .ok_or(Error::InvalidState {
                encoded: u32::from(state.encoded()),
            })
    }

    /// Orbit representatives in ascending encoding order
    pub fn representatives(&self) -> impl Iterator<Item = BoardState> + '_ {
        // a representative claims its own slot with the identity, and no
        // other slot can be claimed with the identity
        self.forms
            .iter()
            .flatten()
            .filter(|form| form.symmetry == Dihedral::Identity)
            .map(|form| form.canonical)
    }

    pub fn class_count(&self) -> usize {
        self.representatives().count()
    }
}
