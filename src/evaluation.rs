//! Static evaluation of non-terminal positions at the search horizon.

use crate::game::{Gameboard, Player, SERIES_LEN};

/// Bonus per own chip in the middle column.
pub const CENTER_BONUS: i64 = 3;
/// A complete series inside a window. Wins normally end the search before the
/// horizon is reached, so this only matters for positions handed in directly.
pub const SERIES_SCORE: i64 = 100_000;
/// Three own chips and one empty cell.
pub const OPEN_THREE_SCORE: i64 = 100;
/// Two own chips and two empty cells.
pub const OPEN_TWO_SCORE: i64 = 10;
/// Three opponent chips and one empty cell.
pub const OPPONENT_OPEN_THREE_SCORE: i64 = -1_000;

/// Scores one window from the counts of its cells.
#[must_use]
pub const fn score_window(own: usize, opponent: usize, empty: usize) -> i64 {
    let mut score = match (own, empty) {
        (4, _) => SERIES_SCORE,
        (3, 1) => OPEN_THREE_SCORE,
        (2, 2) => OPEN_TWO_SCORE,
        _ => 0,
    };
    if opponent == 3 && empty == 1 {
        score += OPPONENT_OPEN_THREE_SCORE;
    }
    score
}

/// Heuristic value of `board` from the perspective of `player`.
///
/// Adds [`CENTER_BONUS`] for every chip of `player` in the middle column and
/// the [`score_window`] of every horizontal, vertical and diagonal window of
/// [`SERIES_LEN`] cells.
#[must_use]
pub fn evaluate<const W: usize, const H: usize>(board: &Gameboard<W, H>, player: Player) -> i64 {
    let cells = board.board();
    let middle = W / 2;
    let center = (0..H).filter(|&row| cells[row][middle] == Some(player)).count() as i64;

    let window = |row: usize, col: usize, d_row: isize, d_col: isize| {
        let (mut own, mut opponent, mut empty) = (0, 0, 0);
        for i in 0..SERIES_LEN as isize {
            let r = (row as isize + d_row * i) as usize;
            let c = (col as isize + d_col * i) as usize;
            match cells[r][c] {
                Some(p) if p == player => own += 1,
                Some(_) => opponent += 1,
                None => empty += 1,
            }
        }
        score_window(own, opponent, empty)
    };

    let last = SERIES_LEN - 1;
    let mut score = center * CENTER_BONUS;

    // horizontal
    for row in 0..H {
        for col in 0..W - last {
            score += window(row, col, 0, 1);
        }
    }
    // vertical
    for col in 0..W {
        for row in 0..H - last {
            score += window(row, col, 1, 0);
        }
    }
    // diagonals: `/` starts at the bottom left, `\` at the top left
    for row in 0..H - last {
        for col in 0..W - last {
            score += window(row, col, 1, 1);
            score += window(row + last, col, -1, 1);
        }
    }

    score
}
