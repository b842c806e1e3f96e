//! Players backed by the value brain

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};
use tracing::{debug, info};

use super::build_rng;
use crate::{
    Error, Result,
    app::LearningConfig,
    learning::SharedBrain,
    ports::Agent,
    tictactoe::{BoardState, Player},
};

/// Always plays the brain's best move and never learns
#[derive(Debug, Clone)]
pub struct TrainedAgent {
    brain: SharedBrain,
}

impl TrainedAgent {
    pub fn new(brain: SharedBrain) -> Self {
        Self { brain }
    }

    pub fn brain(&self) -> &SharedBrain {
        &self.brain
    }
}

impl Agent for TrainedAgent {
    fn select_move(&mut self, board: BoardState) -> Result<Option<usize>> {
        self.brain.borrow().best_move(board).map(Some)
    }

    fn name(&self) -> &str {
        "Trained"
    }
}

/// Explores with a fixed probability and learns from every finished game.
///
/// The agent records the board produced by each of its own moves. When the
/// game ends the brain learns from that history with the reward for this
/// agent's side and outcome, and the history is cleared for the next game.
#[derive(Debug, Clone)]
pub struct LearningAgent {
    brain: SharedBrain,
    side: Player,
    config: LearningConfig,
    rng: StdRng,
    history: Vec<BoardState>,
}

impl LearningAgent {
    pub fn new(
        brain: SharedBrain,
        side: Player,
        config: LearningConfig,
        seed: Option<u64>,
    ) -> Self {
        Self {
            brain,
            side,
            config,
            rng: build_rng(seed),
            history: Vec::new(),
        }
    }

    pub fn side(&self) -> Player {
        self.side
    }

    pub fn brain(&self) -> &SharedBrain {
        &self.brain
    }

    /// Boards produced by this agent's moves in the current game
    pub fn history(&self) -> &[BoardState] {
        &self.history
    }

    fn learn(&mut self, reward: f64, outcome: &str) -> Result<()> {
        let history = std::mem::take(&mut self.history);
        info!(
            side = %self.side,
            outcome,
            reward,
            moves = history.len(),
            "Learning from game"
        );
        self.brain.borrow_mut().learn(
            &history,
            reward,
            self.config.learn_rate,
            self.config.decay_rate,
        )
    }
}

impl Agent for LearningAgent {
    fn select_move(&mut self, board: BoardState) -> Result<Option<usize>> {
        let brain = self.brain.borrow();
        let position = if self.rng.random::<f64>() < self.config.exploration_rate {
            debug!(side = %self.side, "Making random choice");
            brain
                .tables()
                .graph
                .available_positions(board)
                .choose(&mut self.rng)
                .copied()
                .ok_or(Error::NoLegalMoves {
                    encoded: board.encoded(),
                })?
        } else {
            debug!(side = %self.side, "Making trained choice");
            brain.best_move(board)?
        };

        let next = brain.tables().graph.apply_move(board, position)?;
        drop(brain);
        self.history.push(next);
        Ok(Some(position))
    }

    fn notify_win(&mut self, _board: BoardState) -> Result<()> {
        let reward = self.config.rewards.for_player(self.side).win;
        self.learn(reward, "win")
    }

    fn notify_loss(&mut self, _board: BoardState) -> Result<()> {
        let reward = self.config.rewards.for_player(self.side).loss;
        self.learn(reward, "loss")
    }

    fn notify_draw(&mut self, _board: BoardState) -> Result<()> {
        let reward = self.config.rewards.for_player(self.side).draw;
        self.learn(reward, "draw")
    }

    fn name(&self) -> &str {
        "Learning"
    }
}
