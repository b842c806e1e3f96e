//! Interactive player reading positions from a line-oriented input

use std::io::{self, BufRead, BufReader, Stdin, Write};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{BoardState, CELL_COUNT, Cell, Player},
};

/// Asks a person for each move.
///
/// The board is shown with every free cell replaced by its position number.
/// An empty line (or end of input) concedes the game, and anything that is
/// not a free position is re-prompted.
pub struct HumanAgent<R = Box<dyn BufRead>, W = Box<dyn Write>> {
    side: Player,
    input: R,
    output: W,
}

impl<R, W> std::fmt::Debug for HumanAgent<R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumanAgent")
            .field("side", &self.side)
            .finish_non_exhaustive()
    }
}

/// Line reader over stdin that never reads past the line it returns.
///
/// The single-byte buffer lets several readers share stdin without
/// consuming each other's input.
pub fn stdin_reader() -> BufReader<Stdin> {
    BufReader::with_capacity(1, io::stdin())
}

impl HumanAgent {
    /// A human at the terminal.
    pub fn stdio(side: Player) -> Self {
        Self::new(side, Box::new(stdin_reader()), Box::new(io::stdout()))
    }
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(side: Player, input: R, output: W) -> Self {
        Self {
            side,
            input,
            output,
        }
    }

    pub fn side(&self) -> Player {
        self.side
    }

    /// Consume the agent, returning its output (used to inspect transcripts)
    pub fn into_output(self) -> W {
        self.output
    }

    fn show_board(&mut self, board: BoardState, with_numbers: bool) -> Result<()> {
        let cells = board.cells();
        let rendered: Vec<String> = (0..CELL_COUNT)
            .map(|position| match cells[position] {
                Cell::Empty if with_numbers => position.to_string(),
                cell => cell.to_char().to_string(),
            })
            .collect();
        for row in rendered.chunks(3) {
            writeln!(self.output, "{}", row.join(" ")).map_err(write_error)?;
        }
        Ok(())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").map_err(write_error)
    }
}

fn write_error(source: io::Error) -> Error {
    Error::Io {
        operation: "write to player".to_string(),
        source,
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn select_move(&mut self, board: BoardState) -> Result<Option<usize>> {
        self.show_board(board, true)?;
        let legal = board.legal_moves();

        loop {
            write!(
                self.output,
                "Your move, {}. Enter a number position from above or press enter to concede.\n>",
                self.side
            )
            .and_then(|()| self.output.flush())
            .map_err(write_error)?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|source| Error::Io {
                    operation: "read player input".to_string(),
                    source,
                })?;

            let answer = line.trim();
            if read == 0 || answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(position) if legal.contains(&position) => return Ok(Some(position)),
                _ => self.say("Value must be a free position from the above board.")?,
            }
        }
    }

    fn notify_win(&mut self, board: BoardState) -> Result<()> {
        self.show_board(board, false)?;
        let message = format!("Congratulations {}! You win!", self.side);
        self.say(&message)
    }

    fn notify_loss(&mut self, board: BoardState) -> Result<()> {
        self.show_board(board, false)?;
        let message = format!("Sorry {}! You lose!", self.side);
        self.say(&message)
    }

    fn notify_draw(&mut self, board: BoardState) -> Result<()> {
        self.show_board(board, false)?;
        self.say("It's a draw!")
    }

    fn name(&self) -> &str {
        "Human"
    }
}
