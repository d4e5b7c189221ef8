use crate::Game;
use crate::minmax::{SearchOutcome, alphabeta_search};
use log::info;
use std::time::Instant;

/// Searches the best column for the AI on the current board of `game`.
///
/// # Panics
/// If `depth` is zero.
pub fn search_best_move<const W: usize, const H: usize>(
    game: &mut Game<W, H>,
    depth: usize,
) -> SearchOutcome {
    let round = game.round();
    let (board, order) = game.search_state();

    let start = Instant::now();
    let outcome = alphabeta_search(board, order, depth);
    let elapsed = start.elapsed();

    info!(
        "round {round}: column={:?} score={} depth={depth} nodes={} in {}ms",
        outcome.column,
        outcome.score,
        outcome.nodes,
        elapsed.as_millis()
    );
    if outcome.is_forced_win() {
        info!("AI found a forced win");
    } else if outcome.is_forced_loss() {
        info!("AI cannot avoid a loss against best play");
    }

    outcome
}
