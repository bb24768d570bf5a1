use std::io::{self, BufRead, Write};

use saper_core::GameConfig;

/// Raw settings text, as typed by the player or passed on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MenuFields {
    pub width: String,
    pub height: String,
    pub mines: String,
    pub deferred_placement: bool,
}

impl MenuFields {
    pub fn parse(&self) -> saper_core::Result<GameConfig> {
        GameConfig::from_fields(
            &self.width,
            &self.height,
            &self.mines,
            self.deferred_placement,
        )
    }
}

impl Default for MenuFields {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            width: config.size.0.to_string(),
            height: config.size.1.to_string(),
            mines: config.mines.to_string(),
            deferred_placement: config.deferred_placement,
        }
    }
}

/// Reads one answer, `Ok(None)` once input is exhausted.
fn ask(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
    default: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label} [{default}]: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim();
    Ok(Some(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    }))
}

/// Prompts for every setting until they form a valid config.
///
/// The previous answers become the defaults of the next round.
pub(crate) fn prompt_config(
    input: &mut impl BufRead,
    output: &mut impl Write,
    mut fields: MenuFields,
) -> io::Result<Option<GameConfig>> {
    writeln!(output, "Choose the grid size and the number of mines")?;
    loop {
        let Some(width) = ask(input, output, "Width", &fields.width)? else {
            return Ok(None);
        };
        let Some(height) = ask(input, output, "Height", &fields.height)? else {
            return Ok(None);
        };
        let Some(mines) = ask(input, output, "Mines", &fields.mines)? else {
            return Ok(None);
        };
        let default_answer = if fields.deferred_placement { "y" } else { "n" };
        let Some(deferred) = ask(
            input,
            output,
            "Place mines after the first reveal? (y/n)",
            default_answer,
        )?
        else {
            return Ok(None);
        };

        fields = MenuFields {
            width,
            height,
            mines,
            deferred_placement: !deferred.to_ascii_lowercase().starts_with('n'),
        };
        match fields.parse() {
            Ok(config) => return Ok(Some(config)),
            Err(err) if !err.is_config_error() => return Err(io::Error::other(err)),
            Err(err) => {
                log::debug!("Rejected settings {:?}: {}", fields, err);
                writeln!(output, "Invalid settings: {err}")?;
            }
        }
    }
}
