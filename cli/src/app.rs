use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::Context;
use chrono::prelude::*;
use saper_core::{Coord2, FlagOutcome, GameSummary, RevealOutcome};
use serde::Serialize;

use crate::command::{Command, CommandError, HELP, parse_command};
use crate::render::render_board;
use crate::session::GameSession;

/// Machine-readable line written in `--json` mode.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Reveal {
        coords: Coord2,
        outcome: &'a RevealOutcome,
    },
    Flag {
        coords: Coord2,
        outcome: FlagOutcome,
    },
    Finished {
        elapsed_secs: u32,
    },
    Help {
        text: &'static str,
    },
    Error {
        message: String,
    },
}

fn emit(output: &mut impl Write, event: &JsonEvent) -> anyhow::Result<()> {
    writeln!(output, "{}", serde_json::to_string(event)?)?;
    Ok(())
}

fn report(output: &mut impl Write, json: bool, err: &dyn Display) -> anyhow::Result<()> {
    if json {
        let message = err.to_string();
        emit(output, &JsonEvent::Error { message })
    } else {
        writeln!(output, "{err}")?;
        Ok(())
    }
}

pub(crate) fn summary_message(summary: &GameSummary, elapsed_secs: u32) -> String {
    let verdict = if summary.won { "You won!" } else { "You lost!" };
    format!(
        "{verdict} Mines found: {} of {}. Time: {elapsed_secs}s",
        summary.found, summary.total
    )
}

/// Feeds player commands to the session until the game ends, the player quits or input runs out.
pub(crate) fn run(
    session: &mut GameSession,
    input: &mut impl BufRead,
    output: &mut impl Write,
    json: bool,
) -> anyhow::Result<()> {
    if !json {
        render_board(&session.engine, output)?;
        writeln!(output, "Type `help` for commands")?;
    }

    let mut line = String::new();
    loop {
        if !json {
            write!(output, "> ")?;
            output.flush()?;
        }

        line.clear();
        if input.read_line(&mut line).context("reading command")? == 0 {
            log::debug!("Input closed after {} moves", session.move_count);
            return Ok(());
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                report(output, json, &err)?;
                continue;
            }
        };

        let summary = match command {
            Command::Help if json => {
                emit(output, &JsonEvent::Help { text: HELP })?;
                None
            }
            Command::Help => {
                writeln!(output, "{HELP}")?;
                None
            }
            Command::Quit => return Ok(()),
            Command::Reveal(coords) => match session.reveal(coords, Utc::now()) {
                Ok(outcome) if json => {
                    let event = JsonEvent::Reveal {
                        coords,
                        outcome: &outcome,
                    };
                    emit(output, &event)?;
                    outcome.summary().cloned()
                }
                Ok(outcome) => {
                    render_board(&session.engine, output)?;
                    outcome.summary().cloned()
                }
                Err(err) => {
                    report(output, json, &err)?;
                    None
                }
            },
            Command::Flag(coords) => {
                match session.toggle_flag(coords) {
                    Ok(outcome) if json => emit(output, &JsonEvent::Flag { coords, outcome })?,
                    Ok(FlagOutcome::Rejected) => writeln!(output, "Revealed cells cannot be flagged")?,
                    Ok(_) => render_board(&session.engine, output)?,
                    Err(err) => report(output, json, &err)?,
                }
                None
            }
        };

        if let Some(summary) = summary {
            let elapsed_secs = session.elapsed_secs(Utc::now());
            log::debug!(
                "Game over after {} moves, won: {}",
                session.move_count,
                summary.won
            );
            if json {
                emit(output, &JsonEvent::Finished { elapsed_secs })?;
            } else {
                writeln!(output, "{}", summary_message(&summary, elapsed_secs))?;
            }
            return Ok(());
        }
    }
}
