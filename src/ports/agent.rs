//! Player port used by the game loop.

use crate::{Result, tictactoe::BoardState};

/// A participant in a game.
///
/// The game loop asks the side to move for a position and, once the game is
/// over, tells each side how it ended. Terminal notifications default to
/// no-ops so non-learning players only implement [`Agent::select_move`].
pub trait Agent {
    /// Choose a position on `board`, or `None` to concede.
    ///
    /// Only called with non-terminal boards where this agent is to move.
    fn select_move(&mut self, board: BoardState) -> Result<Option<usize>>;

    /// The game ended in a win for this agent on `board`.
    fn notify_win(&mut self, _board: BoardState) -> Result<()> {
        Ok(())
    }

    /// The game ended in a loss for this agent on `board`.
    fn notify_loss(&mut self, _board: BoardState) -> Result<()> {
        Ok(())
    }

    /// The game ended in a draw on `board`.
    fn notify_draw(&mut self, _board: BoardState) -> Result<()> {
        Ok(())
    }

    /// Human-readable name for logs and prompts
    fn name(&self) -> &str;
}
