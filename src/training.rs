//! Self-play training
//!
//! Two learning players, one per side, share a single brain and play a fixed
//! number of games against each other. Every finished game updates the brain
//! twice (once per side) and the brain is saved when the run is over.

use std::{rc::Rc, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Result,
    agents::{LearningAgent, side_seed},
    app::LearningConfig,
    game::{GameOutcome, GameResult, play_game_on},
    learning::SharedBrain,
    tictactoe::Player,
};

/// Tally of a training run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub games: usize,
    pub o_wins: usize,
    pub x_wins: usize,
    pub draws: usize,
}

impl TrainingSummary {
    pub fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn draw_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.draws as f64 / self.games as f64
        }
    }
}

/// Run `games` self-play games and save the brain.
///
/// The brain is saved even when `games` is zero.
pub fn train(
    games: usize,
    brain: &SharedBrain,
    config: &LearningConfig,
    seed: Option<u64>,
) -> Result<TrainingSummary> {
    train_with_observer(games, brain, config, seed, |_, _| {})
}

/// Like [`train`], calling `observer` with the game number (from 1) and the
/// result after every game.
pub fn train_with_observer(
    games: usize,
    brain: &SharedBrain,
    config: &LearningConfig,
    seed: Option<u64>,
    mut observer: impl FnMut(usize, &GameResult),
) -> Result<TrainingSummary> {
    config.validate()?;

    let mut o = LearningAgent::new(
        Rc::clone(brain),
        Player::O,
        *config,
        side_seed(seed, Player::O),
    );
    let mut x = LearningAgent::new(
        Rc::clone(brain),
        Player::X,
        *config,
        side_seed(seed, Player::X),
    );

    let tables = Arc::clone(brain.borrow().tables());
    info!(games, ?seed, "Starting training");
    let mut summary = TrainingSummary::default();
    for game in 1..=games {
        let result = play_game_on(&tables, &mut o, &mut x)?;
        summary.record(result.outcome);
        observer(game, &result);
    }

    brain.borrow().save()?;
    info!(
        games = summary.games,
        o_wins = summary.o_wins,
        x_wins = summary.x_wins,
        draws = summary.draws,
        draw_rate = summary.draw_rate(),
        "Training finished"
    );
    Ok(summary)
}
