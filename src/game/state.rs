use tracing::{debug, info, warn};

use super::{Board, Player, Position, Roster};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove,
    Finished(Outcome),
}

/// Result of one accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub player: Player,
    pub position: Position,
    pub phase: Phase,
}

/// Everything needed to resume a game: the board and who moves next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub name: Option<String>,
    pub to_move: Player,
    pub board: Board,
}

/// Turn controller: owns the board for one session and alternates players.
#[derive(Debug, Clone)]
pub struct Game {
    name: Option<String>,
    roster: Roster,
    board: Board,
    to_move: Player,
    phase: Phase,
}

impl Game {
    /// Start a fresh game, first player to move
    pub fn new(roster: Roster) -> Self {
        Game {
            name: None,
            roster,
            board: Board::new(),
            to_move: Player::First,
            phase: Phase::AwaitingMove,
        }
    }

    /// Resume a saved game. The restored board has no last move to check, so
    /// it is scanned once for a finished run.
    pub fn from_saved(roster: Roster, saved: SavedGame) -> Self {
        let phase = if let Some(winner) = saved.board.find_winner() {
            Phase::Finished(Outcome::Winner(winner))
        } else if saved.board.is_full() {
            Phase::Finished(Outcome::Draw)
        } else {
            Phase::AwaitingMove
        };
        Game {
            name: saved.name,
            roster,
            board: saved.board,
            to_move: saved.to_move,
            phase,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player whose turn it is (the last mover once the game is finished)
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            Phase::AwaitingMove => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Play the acting player's coin into `col`.
    ///
    /// A rejected move consumes no turn. An accepted one places the coin and
    /// checks for a win in the same step, then either finishes the game or
    /// hands the turn over.
    pub fn play(&mut self, col: usize) -> Result<Turn, MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameOver);
        }
        if !self.board.can_place(col) {
            let err = if col >= super::COLS {
                MoveError::InvalidColumn(col)
            } else {
                MoveError::ColumnFull(col)
            };
            warn!(player = self.roster.name(self.to_move), col, %err, "move rejected");
            return Err(err);
        }

        let player = self.to_move;
        let position = self.board.place(player, col)?;

        self.phase = if let Some(winner) = self.board.check() {
            Phase::Finished(Outcome::Winner(winner))
        } else if self.board.is_full() {
            Phase::Finished(Outcome::Draw)
        } else {
            self.to_move = player.other();
            Phase::AwaitingMove
        };

        match self.phase {
            Phase::Finished(Outcome::Winner(winner)) => {
                info!(winner = self.roster.name(winner), %position, "game won")
            }
            Phase::Finished(Outcome::Draw) => info!("game drawn"),
            Phase::AwaitingMove => debug!(next = self.roster.name(self.to_move), "turn passed"),
        }

        Ok(Turn {
            player,
            position,
            phase: self.phase,
        })
    }

    /// Throw the board away and start over with the same players and name
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.to_move = Player::First;
        self.phase = Phase::AwaitingMove;
        info!("game restarted");
    }

    /// State needed to resume this game later
    pub fn snapshot(&self) -> SavedGame {
        SavedGame {
            name: self.name.clone(),
            to_move: self.to_move,
            board: self.board.clone(),
        }
    }
}
