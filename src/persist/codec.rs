//! Line-oriented text format for a game in progress:
//!
//! ```text
//! <game-name>                 (SaveMode::Named only)
//! <name-of-player-to-move>
//! <row> <col> <player-name>   (one line per coin)
//! ```

use crate::error::{RestoreError, SaveError};
use crate::game::{Board, Position, Roster, SavedGame, COLS, ROWS};

/// Header written when a named save has no game name of its own.
pub const UNTITLED: &str = "untitled";

/// Whether the first line of a save carries the game name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    #[default]
    Named,
    Anonymous,
}

/// Render a saved game. Coins are written bottom row first, left to right.
pub fn encode(saved: &SavedGame, roster: &Roster, mode: SaveMode) -> String {
    let mut out = String::new();
    if mode == SaveMode::Named {
        out.push_str(saved.name.as_deref().unwrap_or(UNTITLED));
        out.push('\n');
    }
    out.push_str(roster.name(saved.to_move));
    out.push('\n');

    for row in 0..ROWS {
        for col in 0..COLS {
            if let Some(cell) = saved.board.get(Position::new(row, col)) {
                out.push_str(&format!("{row} {col} {}\n", roster.name(cell.player())));
            }
        }
    }
    out
}

/// Parse a saved game. Any malformed line fails the whole load; nothing is
/// returned half-populated.
pub fn decode(text: &str, roster: &Roster, mode: SaveMode) -> Result<SavedGame, SaveError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());
    let eof = text.lines().count() + 1;

    let name = match mode {
        SaveMode::Named => {
            let (_, name) = lines
                .next()
                .ok_or_else(|| SaveError::malformed(eof, "missing game name"))?;
            Some(name.to_string())
        }
        SaveMode::Anonymous => None,
    };

    let (line_no, mover) = lines
        .next()
        .ok_or_else(|| SaveError::malformed(eof, "missing player to move"))?;
    let to_move = roster
        .by_name(mover)
        .ok_or_else(|| SaveError::malformed(line_no, format!("unknown player '{mover}'")))?;

    let mut board = Board::new();
    let mut origins: Vec<(Position, usize)> = Vec::new();
    for (line_no, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [row, col, owner] = tokens.as_slice() else {
            return Err(SaveError::malformed(
                line_no,
                format!("expected '<row> <col> <player>', found {} tokens", tokens.len()),
            ));
        };
        let row: usize = row
            .parse()
            .map_err(|_| SaveError::malformed(line_no, format!("row '{row}' is not an integer")))?;
        let col: usize = col
            .parse()
            .map_err(|_| SaveError::malformed(line_no, format!("column '{col}' is not an integer")))?;
        let player = roster
            .by_name(owner)
            .ok_or_else(|| SaveError::malformed(line_no, format!("unknown player '{owner}'")))?;

        let pos = Position::new(row, col);
        board
            .restore(pos, player)
            .map_err(|e| SaveError::malformed(line_no, e.to_string()))?;
        origins.push((pos, line_no));
    }

    if let Some(pos) = board.floating_coin() {
        let line_no = origins
            .iter()
            .find(|(p, _)| *p == pos)
            .map_or(eof, |&(_, line_no)| line_no);
        return Err(SaveError::malformed(
            line_no,
            RestoreError::Floating(pos).to_string(),
        ));
    }

    Ok(SavedGame {
        name,
        to_move,
        board,
    })
}
