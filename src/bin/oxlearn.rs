//! oxlearn - tic-tac-toe against (or between) value-learning players
//!
//! Plays interactive games by default; `--training N` trains the value table
//! by self-play instead.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use oxlearn::cli::{Args, logging::init_tracing};
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level, args.log_file.as_deref())?;

    let started = Instant::now();
    let result = oxlearn::cli::run(args);
    info!(elapsed = ?started.elapsed(), "Finished execution");
    result
}
