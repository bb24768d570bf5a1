use std::io::{self, Write};

use saper_core::{CellState, Coord2, GamePhase, PlayEngine};

fn glyph(engine: &PlayEngine, coords: Coord2) -> char {
    let disclose = engine.is_finished()
        && engine
            .mine_layout()
            .is_some_and(|layout| layout.contains_mine(coords));

    match engine.cell_at(coords) {
        Ok(CellState::Exploded) => 'X',
        Ok(_) if disclose => '*',
        Ok(CellState::Hidden) => '#',
        Ok(CellState::Flagged) => 'F',
        Ok(CellState::Revealed(0)) => '.',
        Ok(CellState::Revealed(count)) => char::from_digit(count.into(), 10).unwrap_or('?'),
        Err(_) => ' ',
    }
}

/// Writes the board as a text grid, columns are `x` and rows are `y`.
pub(crate) fn render_board(engine: &PlayEngine, out: &mut impl Write) -> io::Result<()> {
    let (x_end, y_end) = engine.size();

    write!(out, "    ")?;
    for x in 0..x_end {
        write!(out, "{x:>3}")?;
    }
    writeln!(out)?;

    for y in 0..y_end {
        write!(out, "{y:>3} ")?;
        for x in 0..x_end {
            write!(out, "{:>3}", glyph(engine, (x, y)))?;
        }
        writeln!(out)?;
    }

    let status = match engine.phase() {
        GamePhase::AwaitingFirstMove => "pick a cell to start",
        GamePhase::InProgress => "in progress",
        GamePhase::Won => "won",
        GamePhase::Lost => "lost",
    };
    writeln!(out, "Mines left: {}, {}", engine.mines_left(), status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saper_core::MineLayout;

    fn rendered(engine: &PlayEngine) -> String {
        let mut out = Vec::new();
        render_board(engine, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn hidden_board_has_indices() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 1)]).unwrap();
        let engine = PlayEngine::with_layout(layout);

        assert_eq!(
            rendered(&engine),
            "      0  1\n  0   #  #\n  1   #  #\nMines left: 1, in progress\n"
        );
    }

    #[test]
    fn shows_counts_flags_and_blanks() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(2, 1)]).unwrap();
        let mut engine = PlayEngine::with_layout(layout);
        engine.reveal((0, 0)).unwrap();
        engine.toggle_flag((2, 1)).unwrap();

        let board = rendered(&engine);

        assert!(board.contains("  0   .  1  #\n"), "{board}");
        assert!(board.contains("  1   .  1  F\n"), "{board}");
        assert!(board.ends_with("Mines left: 0, in progress\n"));
    }

    #[test]
    fn lost_board_discloses_mines() {
        let layout = MineLayout::from_mine_coords((3, 1), &[(0, 0), (2, 0)]).unwrap();
        let mut engine = PlayEngine::with_layout(layout);
        engine.toggle_flag((2, 0)).unwrap();
        engine.reveal((0, 0)).unwrap();

        let board = rendered(&engine);

        assert!(board.contains("  0   X  #  *\n"), "{board}");
        assert!(board.ends_with("lost\n"));
    }
}
