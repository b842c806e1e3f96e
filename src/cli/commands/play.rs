//! Play command - interactive or scripted games between two chosen players

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    agents::{AgentKind, human::stdin_reader},
    app::App,
    cli::{config::Args, output::describe_outcome},
    game::play_game_on,
    tictactoe::Player,
};

pub fn execute(app: &App, args: &Args) -> Result<()> {
    let config = args.learning_config();
    config.validate().context("invalid learning parameters")?;

    let brain_config = args.brain_config();
    let brain = app.create_brain(&brain_config).with_context(|| {
        format!(
            "failed to load training data from {}",
            brain_config.input.display()
        )
    })?;

    let has_human = args.player_o == AgentKind::Human || args.player_x == AgentKind::Human;
    if !has_human {
        println!("Note that both players in this config are not human.");
    }

    let mut o = app.create_agent(args.player_o, Player::O, &brain, &config);
    let mut x = app.create_agent(args.player_x, Player::X, &brain, &config);

    let tables = app.tables();
    let mut input = stdin_reader();
    let mut output = io::stdout();
    loop {
        let result = play_game_on(&tables, &mut o, &mut x).context("game aborted")?;
        info!(outcome = ?result.outcome, moves = result.moves.len(), "Game over");
        if !has_human {
            println!("{}", describe_outcome(result.outcome));
        }
        if !ask_play_again(&mut input, &mut output).context("failed to read answer")? {
            break;
        }
    }
    println!("Thank you for playing oxlearn.");

    if args.saves_brain() {
        brain
            .borrow()
            .save()
            .with_context(|| format!("failed to save {}", brain_config.output.display()))?;
    }
    Ok(())
}

/// Ask until the answer is y or n (any case). End of input counts as no.
pub fn ask_play_again<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    loop {
        write!(output, "Play again? (y/n)\n>")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim().to_ascii_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            _ => writeln!(output, "Please enter Y or N.")?,
        }
    }
}
