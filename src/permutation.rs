//! Finite permutations with value semantics
//!
//! A [`Permutation`] maps `i -> mapping[i]` for indices inside its explicit
//! mapping and leaves every other index fixed. Trailing fixed points are
//! trimmed on construction, so two permutations with the same effect compare
//! and hash equal regardless of the arity they were declared with.
//!
//! Conventions:
//!
//! - composition: `p.compose(&q)` is `p ∘ q`, i.e. `(p ∘ q)(i) = p(q(i))`
//! - sequence action: `p.act_on_slice(s)[i] = s[p⁻¹(i)]`, so the element at
//!   index `j` ends up at index `p(j)`
//!
//! With these two choices `(p ∘ q)·s == p·(q·s)` for every sequence `s`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A permutation of the non-negative integers with finite support
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Permutation {
    mapping: Vec<usize>,
}

impl Permutation {
    /// Create a permutation from an explicit mapping `i -> mapping[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPermutation`] if `mapping` is not a bijection
    /// on `0..mapping.len()`.
    pub fn new(mapping: impl Into<Vec<usize>>) -> Result<Self> {
        let mapping = mapping.into();
        let mut seen = vec![false; mapping.len()];
        for &target in &mapping {
            if target >= mapping.len() || seen[target] {
                return Err(Error::InvalidPermutation { mapping });
            }
            seen[target] = true;
        }
        Ok(Self::from_trusted(mapping))
    }

    /// The identity permutation.
    pub fn identity() -> Self {
        Self::default()
    }

    /// A single cycle `elements[0] -> elements[1] -> ... -> elements[0]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPermutation`] if an element repeats.
    pub fn cycle(elements: &[usize]) -> Result<Self> {
        let size = elements.iter().map(|&e| e + 1).max().unwrap_or(0);
        let mut mapping: Vec<usize> = (0..size).collect();
        let mut seen = vec![false; size];
        for (idx, &from) in elements.iter().enumerate() {
            if seen[from] {
                return Err(Error::InvalidPermutation {
                    mapping: elements.to_vec(),
                });
            }
            seen[from] = true;
            mapping[from] = elements[(idx + 1) % elements.len()];
        }
        Ok(Self::from_trusted(mapping))
    }

    /// Product of the given cycles, applied right to left.
    pub fn from_cycles(cycles: &[&[usize]]) -> Result<Self> {
        cycles.iter().try_fold(Self::identity(), |acc, cycle| {
            Ok(acc.compose(&Self::cycle(cycle)?))
        })
    }

    fn from_trusted(mut mapping: Vec<usize>) -> Self {
        while mapping.last().is_some_and(|&last| last == mapping.len() - 1) {
            mapping.pop();
        }
        Self { mapping }
    }

    /// The trimmed explicit mapping.
    pub fn mapping(&self) -> &[usize] {
        &self.mapping
    }

    /// The mapping padded with fixed points up to `len` entries.
    pub fn extended_mapping(&self, len: usize) -> Vec<usize> {
        (0..len.max(self.mapping.len()))
            .map(|i| self.apply(i))
            .collect()
    }

    pub fn is_identity(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Image of a single index; indices outside the mapping are fixed.
    pub fn apply(&self, index: usize) -> usize {
        self.mapping.get(index).copied().unwrap_or(index)
    }

    /// `self ∘ other`: first `other`, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Permutation) -> Permutation {
        let len = self.mapping.len().max(other.mapping.len());
        Self::from_trusted((0..len).map(|i| self.apply(other.apply(i))).collect())
    }

    #[must_use]
    pub fn inverse(&self) -> Permutation {
        let mut inverse = vec![0; self.mapping.len()];
        for (from, &to) in self.mapping.iter().enumerate() {
            inverse[to] = from;
        }
        Self::from_trusted(inverse)
    }

    /// Rearrange a sequence so that the element at index `j` moves to `self(j)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PermutationOutOfRange`] if the permutation moves an
    /// index that the sequence does not have.
    pub fn act_on_slice<T: Clone>(&self, seq: &[T]) -> Result<Vec<T>> {
        if self.mapping.len() > seq.len() {
            return Err(Error::PermutationOutOfRange {
                required: self.mapping.len() - 1,
                len: seq.len(),
            });
        }
        let inverse = self.inverse();
        Ok((0..seq.len())
            .map(|i| seq[inverse.apply(i)].clone())
            .collect())
    }

    /// Disjoint cycle decomposition, fixed points omitted.
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.mapping.len()];
        let mut cycles = Vec::new();
        for start in 0..self.mapping.len() {
            if visited[start] {
                continue;
            }
            let mut cycle = vec![start];
            visited[start] = true;
            let mut next = self.apply(start);
            while next != start {
                visited[next] = true;
                cycle.push(next);
                next = self.apply(next);
            }
            if cycle.len() > 1 {
                cycles.push(cycle);
            }
        }
        cycles
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cycles = self.cycles();
        if cycles.is_empty() {
            return write!(f, "()");
        }
        for cycle in cycles {
            let body: Vec<String> = cycle.iter().map(usize::to_string).collect();
            write!(f, "({})", body.join(" "))?;
        }
        Ok(())
    }
}
