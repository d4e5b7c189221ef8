//! Game logic and game board.

use crate::ai_player::search_best_move;
use crate::error::GameError;
use crate::ordering::ColumnOrder;
use log::debug;

/// Number of coins in a row to win the game.
pub const SERIES_LEN: usize = 4;

/// Axes checked by the local win test as `(d_row, d_col)`: horizontal,
/// vertical, diagonal `/` and diagonal `\`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Game with all its state.
#[derive(Debug, PartialOrd, PartialEq, Clone, Eq)]
pub struct Game<const W: usize = 7, const H: usize = 6> {
    board: Gameboard<W, H>,
    order: ColumnOrder<W>,
    round: usize,
}

impl<const W: usize, const H: usize> Game<W, H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Gameboard::new(),
            order: ColumnOrder::new(),
            round: 0,
        }
    }

    /// Drops a chip of `player` into `column`.
    ///
    /// Returns the row the chip landed in and whether it completed a series for
    /// `player`.
    pub fn apply_move(
        &mut self,
        column: usize,
        player: Player,
    ) -> Result<(usize, bool), GameError> {
        if column >= W {
            return Err(GameError::InvalidColumn(column));
        }

        let row = self
            .board
            .lowest_empty_row(column)
            .ok_or(GameError::ColumnFull(column))?;
        self.board.drop_chip(row, column, player);
        self.round += 1;

        let won = self.board.has_local_win(row, column, player);
        debug!(
            "round {}: {} -> ({row}, {column}), won={won}",
            self.round,
            player.name()
        );
        Ok((row, won))
    }

    /// Asks the engine for the best column of the AI side.
    ///
    /// Returns `None` if the board is full.
    ///
    /// # Panics
    /// If `depth` is zero.
    pub fn request_move(&mut self, depth: usize) -> Option<usize> {
        search_best_move(self, depth).column
    }

    #[must_use]
    pub const fn board(&self) -> &Gameboard<W, H> {
        &self.board
    }

    /// Splits the game into the mutable board and the column order, so the
    /// search can work on the board in place.
    pub(crate) fn search_state(&mut self) -> (&mut Gameboard<W, H>, &ColumnOrder<W>) {
        (&mut self.board, &self.order)
    }

    #[must_use]
    pub const fn round(&self) -> usize {
        self.round
    }
}

impl<const W: usize, const H: usize> Default for Game<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Gameboard.
#[derive(Debug, PartialOrd, PartialEq, Clone, Eq)]
pub struct Gameboard<const W: usize = 7, const H: usize = 6>(
    /*
     * Board: rows --> col --> field
     * Technical indices correspond to the logical indices:
     * (row=0,col=0) <==> bottom left of game board
     */
    [[Option<Player>; W]; H],
);

impl<const W: usize, const H: usize> Default for Gameboard<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Gameboard<W, H> {
    #[must_use]
    pub const fn new() -> Self {
        assert!(W >= SERIES_LEN);
        assert!(H >= SERIES_LEN);

        let board = [[None; W]; H];
        Self(board)
    }

    /// Builds a board from its cells, indexed `[row][column]` with row 0 at
    /// the bottom.
    ///
    /// # Panics
    /// If a chip floats above an empty cell.
    #[must_use]
    pub fn from_cells(cells: [[Option<Player>; W]; H]) -> Self {
        for col in 0..W {
            let height = (0..H).take_while(|&row| cells[row][col].is_some()).count();
            assert!(
                (height..H).all(|row| cells[row][col].is_none()),
                "column {col} has a gap"
            );
        }
        Self(cells)
    }

    /// Parses rows of `A` (AI), `H` (human) and `.` (empty), top row first.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; H]) -> Self {
        let mut cells = [[None; W]; H];
        for (i, line) in rows.iter().enumerate() {
            let row = H - 1 - i;
            assert_eq!(line.len(), W, "{line}");
            for (col, symbol) in line.chars().enumerate() {
                cells[row][col] = match symbol {
                    'A' => Some(Player::Ai),
                    'H' => Some(Player::Human),
                    '.' => None,
                    _ => panic!("unexpected symbol {symbol}"),
                };
            }
        }
        Self::from_cells(cells)
    }

    #[must_use]
    pub const fn board(&self) -> &[[Option<Player>; W]; H] {
        &self.0
    }

    #[must_use]
    pub const fn cell(&self, row: usize, column: usize) -> Option<Player> {
        self.0[row][column]
    }

    /// Whether a chip can be dropped into `column`, i.e., its top cell is empty.
    #[must_use]
    pub const fn is_legal(&self, column: usize) -> bool {
        self.0[H - 1][column].is_none()
    }

    /// Returns the index to the next free slot in the selected column.
    ///
    /// Returns `None` if there are no more free slots.
    #[must_use]
    pub fn lowest_empty_row(&self, column: usize) -> Option<usize> {
        (0..H).find(|&row| self.0[row][column].is_none())
    }

    /// Emits the column indices where moves are legal.
    pub fn available_columns_iter(&self) -> impl Iterator<Item = usize> {
        (0..W).filter(|&col| self.is_legal(col))
    }

    /// Returns whether the game is over, i.e., there are no legal moves.
    #[must_use]
    pub fn gameover(&self) -> bool {
        self.available_columns_iter().next().is_none()
    }

    /// Places a chip without any legality check.
    ///
    /// `row` must be [`Self::lowest_empty_row`] of `column`.
    pub fn drop_chip(&mut self, row: usize, column: usize, player: Player) {
        debug_assert!(self.0[row][column].is_none(), "({row}, {column}) is occupied");
        debug_assert!(
            row == 0 || self.0[row - 1][column].is_some(),
            "chip at ({row}, {column}) would float"
        );
        self.0[row][column] = Some(player);
    }

    /// Removes the topmost chip of `column`, which sits in `row`.
    ///
    /// Must be paired with exactly one preceding [`Self::drop_chip`], undone in
    /// reverse order.
    pub fn undo_chip(&mut self, row: usize, column: usize) {
        debug_assert!(self.0[row][column].is_some(), "({row}, {column}) is empty");
        debug_assert!(
            row + 1 == H || self.0[row + 1][column].is_none(),
            "({row}, {column}) is not the topmost chip"
        );
        self.0[row][column] = None;
    }

    /// Checks whether the chip of `player` at `(row, column)` is part of a
    /// series.
    ///
    /// Only lines through that cell are inspected, so this is only meaningful
    /// right after the chip was placed. A series elsewhere on the board is not
    /// reported.
    #[must_use]
    pub fn has_local_win(&self, row: usize, column: usize, player: Player) -> bool {
        DIRECTIONS.iter().any(|&(d_row, d_col)| {
            let series = 1
                + self.count_in_direction(row, column, d_row, d_col, player)
                + self.count_in_direction(row, column, -d_row, -d_col, player);
            series >= SERIES_LEN
        })
    }

    /// Counts consecutive chips of `player` next to `(row, column)`, walking at
    /// most `SERIES_LEN - 1` steps.
    fn count_in_direction(
        &self,
        row: usize,
        column: usize,
        d_row: isize,
        d_col: isize,
        player: Player,
    ) -> usize {
        (1..SERIES_LEN as isize)
            .map_while(|step| {
                let r = row.checked_add_signed(d_row * step)?;
                let c = column.checked_add_signed(d_col * step)?;
                (r < H && c < W && self.0[r][c] == Some(player)).then_some(())
            })
            .count()
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }
}

#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Debug)]
pub enum Player {
    /// The computer. Always the maximizing side of the search.
    Ai,
    Human,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Ai => Self::Human,
            Self::Human => Self::Ai,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Human => "Human",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Independent check: does any window of `SERIES_LEN` cells containing
    /// `(row, column)` belong entirely to `player`?
    fn brute_force_series<const W: usize, const H: usize>(
        board: &Gameboard<W, H>,
        row: usize,
        column: usize,
        player: Player,
    ) -> bool {
        let n = SERIES_LEN as isize;
        DIRECTIONS.iter().any(|&(d_row, d_col)| {
            (-(n - 1)..=0).any(|start| {
                (start..start + n).all(|i| {
                    let r = row as isize + d_row * i;
                    let c = column as isize + d_col * i;
                    (0..H as isize).contains(&r)
                        && (0..W as isize).contains(&c)
                        && board.0[r as usize][c as usize] == Some(player)
                })
            })
        })
    }

    fn assert_gravity<const W: usize, const H: usize>(board: &Gameboard<W, H>) {
        for col in 0..W {
            let height = (0..H).take_while(|&row| board.0[row][col].is_some()).count();
            assert!(
                (height..H).all(|row| board.0[row][col].is_none()),
                "gap in column {col}"
            );
        }
    }

    #[test]
    fn test_lowest_empty_row() {
        let mut board = Gameboard::<7, 6>::new();
        assert_eq!(board.lowest_empty_row(0), Some(0));

        for i in 0..board.height() - 1 {
            board.0[i][0] = Some(Player::Ai);
            assert_eq!(board.lowest_empty_row(0), Some(i + 1));
            assert!(board.is_legal(0));
        }

        board.0[board.height() - 1][0] = Some(Player::Ai);
        assert_eq!(board.lowest_empty_row(0), None);
        assert!(!board.is_legal(0));
    }

    #[test]
    fn find_local_winner_horizontally() {
        let mut board = Gameboard::<7, 6>::new();
        board.0[0][0] = Some(Player::Ai);
        board.0[0][1] = Some(Player::Ai);
        board.0[0][2] = Some(Player::Ai);
        assert!(!board.has_local_win(0, 2, Player::Ai));

        // closing the gap in the middle of the series
        board.0[0][4] = Some(Player::Ai);
        assert!(!board.has_local_win(0, 4, Player::Ai));
        board.0[0][3] = Some(Player::Ai);
        assert!(board.has_local_win(0, 3, Player::Ai));
        assert!(!board.has_local_win(0, 3, Player::Human));

        let mut board = Gameboard::<4, 4>::new();
        for col in 0..4 {
            board.drop_chip(0, col, Player::Human);
        }
        assert!(board.has_local_win(0, 0, Player::Human));
        assert!(board.has_local_win(0, 3, Player::Human));
    }

    #[test]
    fn find_local_winner_vertically() {
        let mut board = Gameboard::<7, 6>::new();
        board.0[0][5] = Some(Player::Human);
        board.0[1][5] = Some(Player::Human);
        board.0[2][5] = Some(Player::Human);
        assert!(!board.has_local_win(2, 5, Player::Human));

        board.0[3][5] = Some(Player::Human);
        assert!(board.has_local_win(3, 5, Player::Human));
        assert!(!board.has_local_win(3, 5, Player::Ai));

        // interrupted by the opponent
        let mut board = Gameboard::<7, 6>::new();
        board.0[0][0] = Some(Player::Human);
        board.0[1][0] = Some(Player::Ai);
        board.0[2][0] = Some(Player::Ai);
        board.0[3][0] = Some(Player::Ai);
        assert!(!board.has_local_win(3, 0, Player::Ai));
    }

    #[test]
    fn find_local_winner_diagonally() {
        // direction=/
        {
            let mut board = Gameboard::<7, 6>::new();
            board.0[0][0] = Some(Player::Ai);
            board.0[1][1] = Some(Player::Ai);
            board.0[2][2] = Some(Player::Ai);
            assert!(!board.has_local_win(2, 2, Player::Ai));

            board.0[3][3] = Some(Player::Ai);
            assert!(board.has_local_win(3, 3, Player::Ai));
            // placed in the middle of the diagonal
            assert!(board.has_local_win(1, 1, Player::Ai));
        }
        // direction=\, touching the right border
        {
            let mut board = Gameboard::<7, 6>::new();
            board.0[4][3] = Some(Player::Human);
            board.0[3][4] = Some(Player::Human);
            board.0[2][5] = Some(Player::Human);
            assert!(!board.has_local_win(2, 5, Player::Human));

            board.0[1][6] = Some(Player::Human);
            assert!(board.has_local_win(1, 6, Player::Human));
        }
        // direction=\, on a 4x4 board
        {
            let mut board = Gameboard::<4, 4>::new();
            board.0[0][3] = Some(Player::Ai);
            board.0[1][2] = Some(Player::Ai);
            board.0[2][1] = Some(Player::Ai);
            board.0[3][0] = Some(Player::Ai);
            assert!(board.has_local_win(3, 0, Player::Ai));
        }
    }

    #[test]
    fn local_win_ignores_series_elsewhere() {
        let mut board = Gameboard::<7, 6>::new();
        for col in 0..4 {
            board.drop_chip(0, col, Player::Ai);
        }
        board.drop_chip(0, 6, Player::Ai);
        assert!(!board.has_local_win(0, 6, Player::Ai));
    }

    #[test]
    fn local_win_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut board = Gameboard::<7, 6>::new();
            let mut player = Player::Human;
            while !board.gameover() {
                let legal = board.available_columns_iter().collect::<Vec<_>>();
                let col = legal[rng.random_range(0..legal.len())];
                let row = board.lowest_empty_row(col).unwrap();
                board.drop_chip(row, col, player);

                assert_eq!(
                    board.has_local_win(row, col, player),
                    brute_force_series(&board, row, col, player),
                    "{board:?}"
                );
                assert_gravity(&board);
                player = player.opponent();
            }
        }
    }

    #[test]
    fn drop_then_undo_restores_board() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let mut board = Gameboard::<7, 6>::new();
            let moves = rng.random_range(0..30);
            for i in 0..moves {
                let legal = board.available_columns_iter().collect::<Vec<_>>();
                let col = legal[rng.random_range(0..legal.len())];
                let player = if i % 2 == 0 { Player::Human } else { Player::Ai };
                board.drop_chip(board.lowest_empty_row(col).unwrap(), col, player);
            }

            for col in board.available_columns_iter().collect::<Vec<_>>() {
                let before = board.clone();
                let row = board.lowest_empty_row(col).unwrap();
                board.drop_chip(row, col, Player::Ai);
                assert_ne!(before, board);
                board.undo_chip(row, col);
                assert_eq!(before, board);
            }
        }
    }

    #[test]
    fn test_legal_moves_iter() {
        let mut game = Game::<7, 6>::new();

        fn fill_column(game: &mut Game, col: usize) {
            for _ in 0..game.board().height() {
                game.apply_move(col, Player::Human).unwrap();
            }
        }

        assert_eq!(
            game.board().available_columns_iter().collect::<Vec<_>>(),
            [0, 1, 2, 3, 4, 5, 6]
        );

        fill_column(&mut game, 1);
        fill_column(&mut game, 3);
        fill_column(&mut game, 5);
        fill_column(&mut game, 6);
        assert_eq!(
            game.board().available_columns_iter().collect::<Vec<_>>(),
            [0, 2, 4]
        );

        fill_column(&mut game, 0);
        fill_column(&mut game, 2);
        fill_column(&mut game, 4);
        assert_eq!(game.board().available_columns_iter().count(), 0);
        assert!(game.board().gameover());
        assert_eq!(game.round(), 42);
    }

    #[test]
    fn apply_move_reports_row_and_win() {
        let mut game = Game::<7, 6>::new();
        assert_eq!(game.apply_move(3, Player::Human), Ok((0, false)));
        assert_eq!(game.apply_move(3, Player::Ai), Ok((1, false)));
        assert_eq!(game.board().cell(1, 3), Some(Player::Ai));

        assert_eq!(game.apply_move(0, Player::Human), Ok((0, false)));
        assert_eq!(game.apply_move(1, Player::Human), Ok((0, false)));
        // closes the series 0..=3 on the bottom row
        assert_eq!(game.apply_move(2, Player::Human), Ok((0, true)));
    }

    #[test]
    fn apply_move_rejects_bad_columns() {
        let mut game = Game::<7, 6>::new();
        assert_eq!(game.apply_move(7, Player::Human), Err(GameError::InvalidColumn(7)));

        for i in 0..6 {
            let player = if i % 2 == 0 { Player::Human } else { Player::Ai };
            game.apply_move(2, player).unwrap();
        }
        let before = game.clone();
        assert_eq!(game.apply_move(2, Player::Ai), Err(GameError::ColumnFull(2)));
        assert_eq!(before, game);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Ai.opponent(), Player::Human);
        assert_eq!(Player::Human.opponent(), Player::Ai);
    }
}
