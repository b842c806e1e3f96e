//! Ports (trait boundaries) for external collaborators.
//!
//! The game loop talks to players through [`Agent`] and the brain persists its
//! value table through [`ValueStore`]. Concrete implementations live in
//! `agents` and `adapters`.

pub mod agent;
pub mod value_store;

pub use agent::Agent;
pub use value_store::ValueStore;
