use pairs_core::{EngineState, Tile, TileCount};
use std::fmt::Write;

/// Presentation-only settings that never reach the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ViewSettings {
    pub muted: bool,
}

/// Draws the board as a grid plus a status line.
///
/// Hidden tiles show their number in brackets so they can be picked,
/// tiles waiting for comparison show their value in angle brackets.
pub(crate) fn render(state: &EngineState, columns: TileCount, settings: ViewSettings) -> String {
    let mut out = String::new();
    let columns = usize::from(columns.max(1));

    for row in state.board.chunks(columns) {
        let cells: Vec<String> = row.iter().map(|&tile| render_tile(tile)).collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }

    let sound = if settings.muted { "off" } else { "on" };
    let _ = write!(out, "Moves: {}  Sound: {}", state.move_count, sound);
    if state.is_complete {
        let _ = write!(out, "\nCompleted in: {} seconds", state.elapsed_seconds);
    }
    out
}

fn render_tile(tile: Tile) -> String {
    if tile.matched {
        format!(" {:>2} ", tile.value)
    } else if tile.revealed {
        format!("<{:>2}>", tile.value)
    } else {
        format!("[{:>2}]", tile.id)
    }
}
