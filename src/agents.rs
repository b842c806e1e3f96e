//! Player implementations
//!
//! Every player implements [`Agent`]. [`AnyAgent`] closes over the fixed set
//! of player kinds so the command line and the game loop can pick one at run
//! time without boxing.

pub mod human;
pub mod random;
pub mod trained;

use clap::ValueEnum;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

pub use human::HumanAgent;
pub use random::RandomAgent;
pub use trained::{LearningAgent, TrainedAgent};

use crate::{
    Result,
    ports::Agent,
    tictactoe::{BoardState, Player},
};

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Derive a per-side seed so the two players of a seeded game draw from
/// different streams.
pub(crate) fn side_seed(seed: Option<u64>, side: Player) -> Option<u64> {
    seed.map(|seed| match side {
        Player::O => seed,
        Player::X => seed.wrapping_add(1),
    })
}

/// Player kinds selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Interactive player on the terminal
    Human,
    /// Uniformly random legal moves
    Random,
    /// Best move from the value brain, no learning
    Trained,
    /// Explores, plays the brain's best move otherwise, and learns
    Learn,
}

impl AgentKind {
    pub fn learns(self) -> bool {
        matches!(self, AgentKind::Learn)
    }
}

/// One of the built-in players
#[derive(Debug)]
pub enum AnyAgent {
    Human(HumanAgent),
    Random(RandomAgent),
    Trained(TrainedAgent),
    Learning(LearningAgent),
}

impl AnyAgent {
    pub fn kind(&self) -> AgentKind {
        match self {
            AnyAgent::Human(_) => AgentKind::Human,
            AnyAgent::Random(_) => AgentKind::Random,
            AnyAgent::Trained(_) => AgentKind::Trained,
            AnyAgent::Learning(_) => AgentKind::Learn,
        }
    }

    fn as_agent(&mut self) -> &mut dyn Agent {
        match self {
            AnyAgent::Human(agent) => agent,
            AnyAgent::Random(agent) => agent,
            AnyAgent::Trained(agent) => agent,
            AnyAgent::Learning(agent) => agent,
        }
    }
}

impl Agent for AnyAgent {
    fn select_move(&mut self, board: BoardState) -> Result<Option<usize>> {
        self.as_agent().select_move(board)
    }

    fn notify_win(&mut self, board: BoardState) -> Result<()> {
        self.as_agent().notify_win(board)
    }

    fn notify_loss(&mut self, board: BoardState) -> Result<()> {
        self.as_agent().notify_loss(board)
    }

    fn notify_draw(&mut self, board: BoardState) -> Result<()> {
        self.as_agent().notify_draw(board)
    }

    fn name(&self) -> &str {
        match self {
            AnyAgent::Human(agent) => agent.name(),
            AnyAgent::Random(agent) => agent.name(),
            AnyAgent::Trained(agent) => agent.name(),
            AnyAgent::Learning(agent) => agent.name(),
        }
    }
}

impl From<RandomAgent> for AnyAgent {
    fn from(agent: RandomAgent) -> Self {
        AnyAgent::Random(agent)
    }
}

impl From<TrainedAgent> for AnyAgent {
    fn from(agent: TrainedAgent) -> Self {
        AnyAgent::Trained(agent)
    }
}

impl From<LearningAgent> for AnyAgent {
    fn from(agent: LearningAgent) -> Self {
        AnyAgent::Learning(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_command_line_names() {
        assert_eq!(AgentKind::from_str("learn", true).unwrap(), AgentKind::Learn);
        assert_eq!(AgentKind::from_str("HUMAN", true).unwrap(), AgentKind::Human);
        assert!(AgentKind::from_str("minimax", true).is_err());
    }

    #[test]
    fn only_learn_learns() {
        let learners: Vec<_> = AgentKind::value_variants()
            .iter()
            .filter(|kind| kind.learns())
            .collect();
        assert_eq!(learners, vec![&AgentKind::Learn]);
    }

    #[test]
    fn enum_dispatches_to_the_wrapped_agent() {
        let mut agent = AnyAgent::from(RandomAgent::new(Some(9)));
        assert_eq!(agent.kind(), AgentKind::Random);
        assert_eq!(agent.name(), "Random");
        let position = agent.select_move(BoardState::new()).unwrap().unwrap();
        assert!(position < 9);
        assert!(agent.notify_draw(BoardState::new()).is_ok());
    }
}
