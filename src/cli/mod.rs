//! CLI infrastructure for oxlearn
//!
//! Without `--training` the binary plays games between the chosen players
//! until the user declines another round. With `--training N` two learning
//! players train the brain by self-play.

pub mod commands;
pub mod config;
pub mod logging;
pub mod output;

use anyhow::Result;
use tracing::info;

use crate::app::App;
pub use config::{Args, LogLevel};

/// Run one session of the binary.
pub fn run(args: Args) -> Result<()> {
    info!(?args, "New session");

    let mut builder = App::builder();
    if let Some(seed) = args.seed {
        builder = builder.with_default_seed(seed);
    }
    let app = builder.build();

    match args.training {
        Some(games) => commands::train::execute(&app, &args, games).map(|_| ()),
        None => commands::play::execute(&app, &args),
    }
}
