use tracing::debug;

use super::{Player, Position};
use crate::error::{MoveError, RestoreError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const WIN_LENGTH: usize = 4;

/// An occupied slot: who dropped the coin and where it landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    player: Player,
    position: Position,
}

impl Cell {
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Read-only view of the grid, indexed `[row][col]` with row 0 at the bottom.
pub type Grid = [[Option<Cell>; COLS]; ROWS];

/// The four lines along which a run can form, each with the directions walked
/// away from the origin coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right, /
    DiagonalUp,
    /// Top-left to bottom-right, \
    DiagonalDown,
}

impl Axis {
    const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalUp,
        Axis::DiagonalDown,
    ];

    /// (d_row, d_col) steps. Vertical only looks down: nothing sits above the
    /// newest coin in its column.
    fn directions(self) -> &'static [(isize, isize)] {
        match self {
            Axis::Horizontal => &[(0, -1), (0, 1)],
            Axis::Vertical => &[(-1, 0)],
            Axis::DiagonalUp => &[(-1, -1), (1, 1)],
            Axis::DiagonalDown => &[(1, -1), (-1, 1)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Grid,
    last: Option<Position>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[None; COLS]; ROWS],
            last: None,
        }
    }

    /// Get the cell at a position, `None` if empty or off the board
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.cells
            .get(pos.row())
            .and_then(|row| row.get(pos.col()))
            .copied()
            .flatten()
    }

    /// Immutable snapshot of the whole grid for rendering
    pub fn matrix(&self) -> &Grid {
        &self.cells
    }

    /// True if `col` is on the board and its topmost cell is still empty
    pub fn can_place(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col].is_none()
    }

    /// Number of coins already stacked in a column
    pub fn coin_count(&self, col: usize) -> usize {
        if col >= COLS {
            return 0;
        }
        (0..ROWS).take_while(|&row| self.cells[row][col].is_some()).count()
    }

    /// Drop a coin for `player` into `col`, returning where it landed.
    ///
    /// The board is left untouched when the column is off the board or full.
    pub fn place(&mut self, player: Player, col: usize) -> Result<Position, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        if !self.can_place(col) {
            return Err(MoveError::ColumnFull(col));
        }

        // Lowest empty row, scanning up from the bottom
        let row = self.coin_count(col);
        let position = Position::new(row, col);
        self.cells[row][col] = Some(Cell { player, position });
        self.last = Some(position);

        debug!(?player, %position, "placed coin");
        Ok(position)
    }

    /// Position of the most recently placed coin. `None` on a fresh board and
    /// on a restored one, where there is no pending check.
    pub fn last_position(&self) -> Option<Position> {
        self.last
    }

    /// Winner formed by the last placed coin, if any.
    pub fn check(&self) -> Option<Player> {
        let origin = self.get(self.last?)?;
        let winner = Axis::ALL
            .into_iter()
            .any(|axis| self.run_length(origin, axis) >= WIN_LENGTH)
            .then_some(origin.player);

        debug!(origin = %origin.position, ?winner, "checked for win");
        winner
    }

    /// Positions of the winning run through the last placed coin, origin first.
    pub fn winning_line(&self) -> Option<Vec<Position>> {
        let origin = self.get(self.last?)?;
        Axis::ALL.into_iter().find_map(|axis| {
            let line: Vec<Position> = std::iter::once(origin.position)
                .chain(
                    axis.directions()
                        .iter()
                        .flat_map(|&(d_row, d_col)| self.walk(origin, d_row, d_col)),
                )
                .collect();
            (line.len() >= WIN_LENGTH).then_some(line)
        })
    }

    /// Owner of any run of `WIN_LENGTH` anywhere on the board. Unlike `check`
    /// this scans every coin; it is for boards restored without a last move.
    pub fn find_winner(&self) -> Option<Player> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .find(|&&cell| {
                Axis::ALL
                    .into_iter()
                    .any(|axis| self.run_length(cell, axis) >= WIN_LENGTH)
            })
            .map(|cell| cell.player)
    }

    /// True when no column can take another coin
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.can_place(col))
    }

    /// Run length along one axis, counting the origin itself.
    fn run_length(&self, origin: Cell, axis: Axis) -> usize {
        1 + axis
            .directions()
            .iter()
            .map(|&(d_row, d_col)| self.walk(origin, d_row, d_col).count())
            .sum::<usize>()
    }

    /// Positions of consecutive coins owned by the origin's player, walking
    /// away from the origin until an empty cell, an opponent coin or the edge.
    fn walk(&self, origin: Cell, d_row: isize, d_col: isize) -> impl Iterator<Item = Position> + '_ {
        std::iter::successors(Some(origin.position), move |pos| pos.offset(d_row, d_col))
            .skip(1)
            .take_while(move |&pos| {
                self.get(pos)
                    .is_some_and(|cell| cell.player == origin.player)
            })
    }

    /// Write a saved coin straight into the grid, skipping placement rules.
    /// Does not touch the last placed position.
    pub(crate) fn restore(&mut self, pos: Position, player: Player) -> Result<(), RestoreError> {
        if pos.row() >= ROWS || pos.col() >= COLS {
            return Err(RestoreError::OutOfBounds(pos));
        }
        let slot = &mut self.cells[pos.row()][pos.col()];
        if slot.is_some() {
            return Err(RestoreError::Occupied(pos));
        }
        *slot = Some(Cell {
            player,
            position: pos,
        });
        Ok(())
    }

    /// First coin (row-major from the bottom) with an empty cell directly beneath.
    pub(crate) fn floating_coin(&self) -> Option<Position> {
        (1..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| Position::new(row, col)))
            .find(|&pos| {
                self.cells[pos.row()][pos.col()].is_some()
                    && self.cells[pos.row() - 1][pos.col()].is_none()
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Player = Player::First;
    const B: Player = Player::Second;

    /// Owner of each cell on a full board with no run longer than two.
    fn draw_owner(row: usize, col: usize) -> Player {
        if (col / 2 + row) % 2 == 0 {
            A
        } else {
            B
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(Position::new(row, col)), None);
            }
        }
        assert_eq!(board.last_position(), None);
        assert_eq!(board.check(), None);
    }

    #[test]
    fn test_place_coin() {
        let mut board = Board::new();
        board.place(A, 0).unwrap();

        let cell = board.matrix()[0][0].unwrap();
        assert_eq!(cell.player(), A);
        assert_eq!(cell.position(), Position::new(0, 0));
    }

    #[test]
    fn test_place_lands_on_top_of_stack() {
        let mut board = Board::new();
        for expected_row in 0..ROWS {
            assert_eq!(board.coin_count(3), expected_row);
            let pos = board.place(if expected_row % 2 == 0 { A } else { B }, 3).unwrap();
            assert_eq!(pos, Position::new(expected_row, 3));
        }
    }

    #[test]
    fn test_last_position() {
        let mut board = Board::new();
        board.place(A, 4).unwrap();
        board.place(A, 4).unwrap();
        assert_eq!(board.last_position(), Some(Position::new(1, 4)));
    }

    #[test]
    fn test_column_full() {
        for col in 0..COLS {
            let mut board = Board::new();
            assert!(board.can_place(col));
            for row in 0..ROWS {
                board.place(if row % 2 == 0 { A } else { B }, col).unwrap();
            }
            assert!(!board.can_place(col));

            let before = board.clone();
            assert_eq!(board.place(A, col), Err(MoveError::ColumnFull(col)));
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert!(!board.can_place(COLS));
        assert_eq!(board.place(A, COLS), Err(MoveError::InvalidColumn(COLS)));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place(A, col).unwrap();
            assert_eq!(board.check(), None);
        }
        board.place(A, 3).unwrap();
        assert_eq!(board.check(), Some(A));
    }

    #[test]
    fn test_horizontal_win_filled_in_the_middle() {
        let mut board = Board::new();
        for col in [0, 1, 3] {
            board.place(B, col).unwrap();
        }
        assert_eq!(board.check(), None);
        board.place(B, 2).unwrap();
        assert_eq!(board.check(), Some(B));
    }

    #[test]
    fn test_five_in_a_row_is_a_win() {
        let mut board = Board::new();
        for col in [0, 1, 3, 4] {
            board.place(A, col).unwrap();
        }
        board.place(A, 2).unwrap();
        assert_eq!(board.check(), Some(A));
        assert_eq!(board.winning_line().unwrap().len(), 5);
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for _ in 0..3 {
            board.place(B, 0).unwrap();
            assert_eq!(board.check(), None);
        }
        board.place(B, 0).unwrap();
        assert_eq!(board.check(), Some(B));
        assert_eq!(board.last_position(), Some(Position::new(3, 0)));
    }

    #[test]
    fn test_vertical_run_broken_by_opponent() {
        let mut board = Board::new();
        board.place(A, 5).unwrap();
        board.place(B, 5).unwrap();
        for _ in 0..3 {
            board.place(A, 5).unwrap();
        }
        assert_eq!(board.check(), None);
    }

    #[test]
    fn test_diagonal_up_win() {
        // . . . A
        // . . A B
        // . A B B
        // A B B B
        let mut board = Board::new();
        for col in [1, 2, 2, 3, 3, 3] {
            board.place(B, col).unwrap();
            assert_eq!(board.check(), None);
        }
        for col in 0..3 {
            board.place(A, col).unwrap();
            assert_eq!(board.check(), None);
        }
        board.place(A, 3).unwrap();
        assert_eq!(board.check(), Some(A));
    }

    #[test]
    fn test_diagonal_down_win() {
        // A . . .
        // B A . .
        // B B A .
        // B B B A
        let mut board = Board::new();
        for col in [0, 0, 0, 1, 1, 2] {
            board.place(B, col).unwrap();
            assert_eq!(board.check(), None);
        }
        for col in 0..3 {
            board.place(A, col).unwrap();
            assert_eq!(board.check(), None);
        }
        board.place(A, 3).unwrap();
        assert_eq!(board.check(), Some(A));
    }

    #[test]
    fn test_diagonal_win_completed_from_inside() {
        let mut board = Board::new();
        // Staircase under columns 3..6 for a / run from (0,3) to (3,6)
        for col in [4, 5, 5, 6, 6, 6] {
            board.place(B, col).unwrap();
        }
        for col in [3, 4, 6] {
            board.place(A, col).unwrap();
        }
        assert_eq!(board.check(), None);
        let pos = board.place(A, 5).unwrap();
        assert_eq!(pos, Position::new(2, 5));
        assert_eq!(board.check(), Some(A));

        let mut line = board.winning_line().unwrap();
        line.sort_by_key(|p| p.col());
        assert_eq!(
            line,
            vec![
                Position::new(0, 3),
                Position::new(1, 4),
                Position::new(2, 5),
                Position::new(3, 6)
            ]
        );
    }

    #[test]
    fn test_winning_line_none_without_win() {
        let mut board = Board::new();
        board.place(A, 0).unwrap();
        assert_eq!(board.winning_line(), None);
    }

    #[test]
    fn test_full_board_draw() {
        let mut board = Board::new();
        for col in 0..COLS {
            assert!(!board.is_full());
            for row in 0..ROWS {
                board.place(draw_owner(row, col), col).unwrap();
                assert_eq!(board.check(), None, "unexpected win at ({row}, {col})");
            }
        }
        assert!(board.is_full());
        assert!((0..COLS).all(|col| !board.can_place(col)));
        assert_eq!(board.check(), None);
    }

    #[test]
    fn test_not_full_with_one_open_column() {
        let mut board = Board::new();
        for col in 0..COLS - 1 {
            for row in 0..ROWS {
                board.place(draw_owner(row, col), col).unwrap();
            }
        }
        assert!(!board.is_full());
        assert!(board.can_place(COLS - 1));
    }

    #[test]
    fn test_restore_rejects_bad_cells() {
        let mut board = Board::new();
        assert_eq!(
            board.restore(Position::new(ROWS, 0), A),
            Err(RestoreError::OutOfBounds(Position::new(ROWS, 0)))
        );
        board.restore(Position::new(0, 0), A).unwrap();
        assert_eq!(
            board.restore(Position::new(0, 0), B),
            Err(RestoreError::Occupied(Position::new(0, 0)))
        );
    }

    #[test]
    fn test_restore_leaves_no_pending_check() {
        let mut board = Board::new();
        for row in 0..4 {
            board.restore(Position::new(row, 2), A).unwrap();
        }
        assert_eq!(board.last_position(), None);
        assert_eq!(board.check(), None);
        assert_eq!(board.floating_coin(), None);
    }

    #[test]
    fn test_find_winner_on_restored_board() {
        let mut board = Board::new();
        for col in 2..6 {
            board.restore(Position::new(0, col), B).unwrap();
        }
        board.restore(Position::new(1, 2), A).unwrap();
        assert_eq!(board.check(), None);
        assert_eq!(board.find_winner(), Some(B));

        let mut board = Board::new();
        for row in 0..3 {
            board.restore(Position::new(row, 0), A).unwrap();
        }
        assert_eq!(board.find_winner(), None);
    }

    #[test]
    fn test_floating_coin_detected() {
        let mut board = Board::new();
        board.restore(Position::new(0, 1), A).unwrap();
        board.restore(Position::new(2, 1), B).unwrap();
        assert_eq!(board.floating_coin(), Some(Position::new(2, 1)));
    }
}
