//! Process-wide precomputed tables
//!
//! The move graph and canonical table depend only on the rules, so they are
//! built once and shared read-only. Code that wants explicit wiring takes an
//! `Arc<GameTables>`; convenience methods on [`BoardState`](super::BoardState)
//! use the lazily built global instance.

use std::{sync::Arc, time::Instant};

use once_cell::sync::Lazy;
use tracing::debug;

use super::{canonical::CanonicalTable, move_graph::MoveGraph};

static GLOBAL: Lazy<Arc<GameTables>> = Lazy::new(|| Arc::new(GameTables::build()));

/// Move graph plus canonical table, immutable after construction
#[derive(Debug, Clone)]
pub struct GameTables {
    pub graph: MoveGraph,
    pub canonical: CanonicalTable,
}

impl GameTables {
    /// Build a fresh set of tables (one full sweep of the encodings).
    pub fn build() -> Self {
        let started = Instant::now();
        let graph = MoveGraph::build();
        let canonical = CanonicalTable::build(&graph);
        debug!(elapsed = ?started.elapsed(), "Built game tables");
        Self { graph, canonical }
    }

    /// The process-wide instance, built on first use
    pub fn global() -> &'static GameTables {
        &GLOBAL
    }

    /// A shared handle to the process-wide instance
    pub fn shared() -> Arc<GameTables> {
        Arc::clone(&GLOBAL)
    }
}
