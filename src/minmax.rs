//! Depth-limited minmax search with alpha-beta pruning.
//!
//! The search works on a single board in place: every chip dropped while
//! exploring a column is removed again before the next sibling is visited, so
//! the board is identical before and after any subtree.

use crate::evaluation::evaluate;
use crate::game::{Gameboard, Player};
use crate::ordering::ColumnOrder;

/// Magnitude of a proven win or loss. Far above anything [`evaluate`] can
/// produce.
pub const BASE_WIN_SCORE: i64 = 100_000_000_000;

/// Result of [`alphabeta_search`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SearchOutcome {
    /// Best column for the AI. `None` if the board is full.
    pub column: Option<usize>,
    /// Score from the AI's perspective.
    pub score: i64,
    /// Number of visited nodes, including the root.
    pub nodes: u64,
}

impl SearchOutcome {
    /// The AI can force a win within the search depth.
    #[must_use]
    pub const fn is_forced_win(&self) -> bool {
        self.score >= BASE_WIN_SCORE
    }

    /// The human can force a win within the search depth.
    #[must_use]
    pub const fn is_forced_loss(&self) -> bool {
        self.score <= -BASE_WIN_SCORE
    }
}

/// Score of a node where `winner` just completed a series with
/// `depth_remaining` plies left to search.
///
/// Quick wins score higher than slow ones and late losses are less bad than
/// early ones.
#[must_use]
pub const fn win_score(winner: Player, depth_remaining: usize) -> i64 {
    let score = BASE_WIN_SCORE + depth_remaining as i64;
    match winner {
        Player::Ai => score,
        Player::Human => -score,
    }
}

/// Searches the best column for [`Player::Ai`] up to `depth` plies.
///
/// The board is borrowed mutably for the search and handed back unchanged.
///
/// # Panics
/// If `depth` is zero.
pub fn alphabeta_search<const W: usize, const H: usize>(
    board: &mut Gameboard<W, H>,
    order: &ColumnOrder<W>,
    depth: usize,
) -> SearchOutcome {
    assert!(depth > 0, "search depth must be positive");

    let mut search = AlphaBeta {
        board,
        order,
        nodes: 0,
    };
    let (column, score) = search.node(depth, i64::MIN, i64::MAX, true, None);

    SearchOutcome {
        column,
        score,
        nodes: search.nodes,
    }
}

struct AlphaBeta<'a, const W: usize, const H: usize> {
    board: &'a mut Gameboard<W, H>,
    order: &'a ColumnOrder<W>,
    nodes: u64,
}

impl<const W: usize, const H: usize> AlphaBeta<'_, W, H> {
    /// Recursive alpha-beta logic including the recursion end conditions and
    /// evaluation of winning/losing moves.
    fn node(
        &mut self,
        depth: usize,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
        last_move: Option<(usize, usize)>,
    ) -> (
        Option<usize>, /* move: col */
        i64,           /* score: pos: good for the AI, neg: good for the human */
    ) {
        self.nodes += 1;
        let current_player = if maximizing { Player::Ai } else { Player::Human };

        // We start with the recursion tail: Can we stop the recursion?
        if let Some((row, col)) = last_move {
            let previous_player = current_player.opponent();
            if self.board.has_local_win(row, col, previous_player) {
                return (None /* upper level knows col */, win_score(previous_player, depth));
            }
        }

        let moves = self
            .order
            .ordered_legal_moves(self.board)
            .collect::<Vec<_>>();
        // draw
        let Some(&first_move) = moves.first() else {
            return (None, 0);
        };

        if depth == 0 {
            return (None, evaluate(self.board, Player::Ai));
        }

        let mut best_col = first_move;
        let mut best_score = if maximizing { i64::MIN } else { i64::MAX };

        for col in moves {
            let Some(row) = self.board.lowest_empty_row(col) else {
                unreachable!("column {col} is legal but has no free slot");
            };

            self.board.drop_chip(row, col, current_player);
            let (_, score) = self.node(depth - 1, alpha, beta, !maximizing, Some((row, col)));
            self.board.undo_chip(row, col);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_col = col;
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_col = col;
                }
                beta = beta.min(best_score);
            }

            if alpha >= beta {
                break;
            }
        }

        (Some(best_col), best_score)
    }
}
