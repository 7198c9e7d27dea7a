//! Core Connect Four game logic: positions, players, the board with its
//! placement and win rules, and the turn controller that drives it.

mod board;
mod player;
mod position;
mod state;

pub use board::{Board, Cell, Grid, COLS, ROWS, WIN_LENGTH};
pub use player::{Player, Roster};
pub use position::Position;
pub use state::{Game, Outcome, Phase, SavedGame, Turn};
