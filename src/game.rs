//! The game loop

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    ports::Agent,
    tictactoe::{BoardState, GameTables, Player},
};

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// Everything known about a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub outcome: GameOutcome,
    pub final_board: BoardState,
    /// Positions played, O's first
    pub moves: Vec<usize>,
    /// The side that gave up, if the game did not reach a terminal board
    pub conceded: Option<Player>,
}

/// Play one game from the empty board, O moving first, on the process-wide
/// tables.
///
/// See [`play_game_on`].
///
/// # Errors
///
/// Same as [`play_game_on`].
pub fn play_game<'a>(o: &'a mut dyn Agent, x: &'a mut dyn Agent) -> Result<GameResult> {
    play_game_on(GameTables::global(), o, x)
}

/// Play one game from the empty board, O moving first.
///
/// Sides alternate until the board is terminal or the side to move concedes,
/// in which case its opponent wins. Afterwards the winner is told it won and
/// the loser that it lost, or both are told about the draw.
///
/// # Errors
///
/// Propagates any agent error, and fails with
/// [`Error::IllegalMove`](crate::Error::IllegalMove) if an agent picks an
/// occupied or out-of-range position.
pub fn play_game_on<'a>(
    tables: &GameTables,
    o: &'a mut dyn Agent,
    x: &'a mut dyn Agent,
) -> Result<GameResult> {
    let graph = &tables.graph;
    info!(o = o.name(), x = x.name(), "New game");

    let mut board = BoardState::new();
    let mut moves = Vec::new();
    let mut side = Player::FIRST;
    let mut conceded = None;

    while !graph.is_terminal(board) {
        let agent = match side {
            Player::O => &mut *o,
            Player::X => &mut *x,
        };
        debug!(%side, board = board.encoded(), "Turn");

        match agent.select_move(board)? {
            Some(position) => {
                debug!(%side, position, "Move");
                board = graph.apply_move(board, position)?;
                moves.push(position);
                side = side.opponent();
            }
            None => {
                info!(%side, "Side concedes");
                conceded = Some(side);
                break;
            }
        }
    }

    let outcome = match conceded {
        Some(loser) => GameOutcome::Win(loser.opponent()),
        None => graph
            .winner(board)
            .map_or(GameOutcome::Draw, GameOutcome::Win),
    };

    match outcome {
        GameOutcome::Win(winner) => {
            info!(%winner, board = board.encoded(), "Game won");
            let (winning, losing) = match winner {
                Player::O => (o, x),
                Player::X => (x, o),
            };
            winning.notify_win(board)?;
            losing.notify_loss(board)?;
        }
        GameOutcome::Draw => {
            info!(board = board.encoded(), "Game drawn");
            o.notify_draw(board)?;
            x.notify_draw(board)?;
        }
    }

    Ok(GameResult {
        outcome,
        final_board: board,
        moves,
        conceded,
    })
}
