use saper_core::{Coord, Coord2};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("Expected `{0} X Y` with whole-number coordinates")]
    BadCoords(&'static str),
}

pub(crate) const HELP: &str = "\
Commands:
  r X Y, reveal X Y   open the cell in column X, row Y
  f X Y, flag X Y     place or remove a flag
  h, help             show this text
  q, quit             leave the game";

pub(crate) fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(CommandError::Empty);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "r" | "reveal" => Command::Reveal(parse_coords(words, "reveal")?),
        "f" | "flag" => Command::Flag(parse_coords(words, "flag")?),
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(verb.to_string())),
    };
    Ok(command)
}

fn parse_coords<'a>(
    mut words: impl Iterator<Item = &'a str>,
    verb: &'static str,
) -> Result<Coord2, CommandError> {
    let mut next = || -> Result<Coord, CommandError> {
        words
            .next()
            .and_then(|word| word.parse().ok())
            .ok_or(CommandError::BadCoords(verb))
    };
    let coords = (next()?, next()?);
    if words.next().is_some() {
        return Err(CommandError::BadCoords(verb));
    }
    Ok(coords)
}
