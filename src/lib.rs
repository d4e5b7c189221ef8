//! # vier-alphabeta
//!
//! Engine for _Vier gewinnt_ (Connect Four) on a 7x6 board. The computer
//! picks its move with a depth-limited minmax search with alpha-beta pruning:
//! the board is mutated in place and rolled back, wins are detected locally
//! around the last chip, and positions at the search horizon are scored by a
//! static heuristic.
//!
//! ## Modules
//!
//! - [`game`] — board, players, local win detection and the [`Game`] facade
//! - [`ordering`] — center-first column order
//! - [`evaluation`] — static heuristic at the search horizon
//! - [`minmax`] — alpha-beta search
//! - [`ai_player`] — entry point for the AI side
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — structured error types

pub mod ai_player;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod minmax;
pub mod ordering;

pub use ai_player::search_best_move;
pub use game::{Game, Gameboard, Player};
