use std::io::{self, Write};

use clap::Parser;
use saper_core::PlayEngine;

mod app;
mod command;
mod menu;
mod render;
mod session;

use menu::MenuFields;
use session::GameSession;

/// Minesweeper in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width, asked interactively when any size setting is missing
    #[arg(long)]
    width: Option<String>,

    /// Board height
    #[arg(long)]
    height: Option<String>,

    /// Number of mines
    #[arg(long)]
    mines: Option<String>,

    /// Place mines before the first reveal, so it may hit one
    #[arg(long)]
    fixed_placement: bool,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write every outcome as a JSON line instead of drawing the board
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Command line settings, and whether all of them were given.
    fn menu_fields(&self) -> (MenuFields, bool) {
        let defaults = MenuFields::default();
        let complete = self.width.is_some() && self.height.is_some() && self.mines.is_some();
        let fields = MenuFields {
            width: self.width.clone().unwrap_or(defaults.width),
            height: self.height.clone().unwrap_or(defaults.height),
            mines: self.mines.clone().unwrap_or(defaults.mines),
            deferred_placement: !self.fixed_placement,
        };
        (fields, complete)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    let (fields, complete) = args.menu_fields();
    let config = match fields.parse() {
        Ok(config) if complete => Some(config),
        Ok(_) => None,
        Err(err) => {
            writeln!(output, "Invalid settings: {err}")?;
            None
        }
    };
    let config = match config {
        Some(config) => config,
        None => match menu::prompt_config(&mut input, &mut output, fields)? {
            Some(config) => config,
            None => return Ok(()),
        },
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("config: {:?}, seed: {}", config, seed);

    let mut session = GameSession::new(PlayEngine::new(config, seed)?);
    app::run(&mut session, &mut input, &mut output, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_command_line_skips_menu() {
        let args = Args::parse_from(["saper", "--width", "8", "--height", "6", "--mines", "5"]);
        let (fields, complete) = args.menu_fields();

        assert!(complete);
        let config = fields.parse().unwrap();
        assert_eq!(config.size, (8, 6));
        assert!(config.deferred_placement);
    }

    #[test]
    fn partial_command_line_seeds_menu_defaults() {
        let args = Args::parse_from(["saper", "--width", "x", "--fixed-placement", "-s", "4"]);
        let (fields, complete) = args.menu_fields();

        assert!(!complete);
        assert_eq!(fields.width, "x");
        assert_eq!(fields.height, "10");
        assert!(!fields.deferred_placement);
        assert_eq!(args.seed, Some(4));
    }
}
