//! The two modes of the binary

pub mod play;
pub mod train;
