//! Line-oriented console front end: the board is printed after every move and
//! columns are typed as 1-7.

use std::io::{self, BufRead, Write};

use crate::error::MoveError;
use crate::game::{Board, Game, Outcome, Position, Roster, COLS, ROWS};
use crate::persist::SaveStore;

/// Play until the game finishes or input runs out. Typing `s` saves the game
/// under `save_name` (or the game's own name), `q` quits.
pub fn run<R: BufRead, W: Write>(
    game: &mut Game,
    store: &dyn SaveStore,
    save_name: &str,
    input: R,
    mut out: W,
) -> io::Result<Option<Outcome>> {
    let mut lines = input.lines();

    while !game.is_finished() {
        print_board(&mut out, game.board(), game.roster())?;
        writeln!(out, "It is now {}'s turn", game.roster().name(game.to_move()))?;

        loop {
            write!(out, "Enter column number (1-{COLS}): ")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                return Ok(None);
            };
            let line = line?;
            let choice = line.trim();

            match choice {
                "q" => return Ok(None),
                "s" => {
                    let name = game.name().unwrap_or(save_name).to_string();
                    match store.save(&name, &game.snapshot(), game.roster()) {
                        Ok(()) => {
                            game.set_name(name.clone());
                            writeln!(out, "Saved as '{name}'.")?;
                        }
                        Err(e) => writeln!(out, "Could not save: {e}")?,
                    }
                    continue;
                }
                _ => {}
            }

            let Some(col) = choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
                writeln!(out, "Not a valid column, try again.")?;
                continue;
            };
            match game.play(col) {
                Ok(_) => break,
                Err(MoveError::ColumnFull(_)) => writeln!(out, "You cannot place a coin there...")?,
                Err(MoveError::InvalidColumn(_)) => writeln!(out, "Not a valid column, try again.")?,
                Err(MoveError::GameOver) => break,
            }
        }
    }

    print_board(&mut out, game.board(), game.roster())?;
    let outcome = game.outcome();
    match outcome {
        Some(Outcome::Winner(player)) => {
            writeln!(out, "\nThe winner is {}!", game.roster().name(player))?
        }
        Some(Outcome::Draw) => writeln!(out, "\nThe board is full. It's a draw!")?,
        None => {}
    }
    Ok(outcome)
}

/// Print the board top row first, each cell showing its owner's name.
pub fn print_board<W: Write>(out: &mut W, board: &Board, roster: &Roster) -> io::Result<()> {
    let width = board
        .matrix()
        .iter()
        .flatten()
        .flatten()
        .map(|cell| roster.name(cell.player()).chars().count())
        .max()
        .unwrap_or(1);
    let rule = "-".repeat(1 + COLS * (width + 3));

    writeln!(out, "\n{rule}")?;
    for row in (0..ROWS).rev() {
        write!(out, "|")?;
        for col in 0..COLS {
            let label = board
                .get(Position::new(row, col))
                .map_or("", |cell| roster.name(cell.player()));
            write!(out, " {label:^width$} |")?;
        }
        writeln!(out, "\n{rule}")?;
    }
    let numbers: String = (1..=COLS).map(|n| format!(" {n:^width$}  ")).collect();
    writeln!(out, " {}", numbers.trim_end())?;
    Ok(())
}
